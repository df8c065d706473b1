use crate::models::CliApp;
use crate::server::build_rocket;
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn run_server(&self) -> Result<()> {
        println!("\n🚀 Capture API Server");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!(
            "📡 Serving http://{}:{}/api",
            self.config.server.host, self.config.server.port
        );
        println!("💡 Ctrl+C stops the server");

        info!(
            "Starting capture API on {}:{}",
            self.config.server.host, self.config.server.port
        );

        build_rocket(self.config.clone(), self.db_pool.clone())
            .launch()
            .await?;

        Ok(())
    }
}
