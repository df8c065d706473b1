use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::models::{CliApp, RoiSubmissionRequest};
use crate::roi::{compute_roi, Industry, RoiInput, RoiResult};
use crate::submitter::SubmitOutcome;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn run_calculator(&self) -> Result<()> {
        println!("\n🧮 ROI Calculator");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let industries = Industry::all();
        let labels: Vec<&str> = industries.iter().map(|i| i.label()).collect();
        let pick = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select your industry")
            .items(&labels)
            .interact()?;
        let industry = industries[pick];

        let monthly_installations: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Jobs completed per month")
            .interact_text()?;

        let average_technicians: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Technicians on the road")
            .interact_text()?;

        let average_travel_time: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Average travel time per job (minutes)")
            .interact_text()?;

        let fuel_cost_per_gallon: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Fuel cost per gallon ($)")
            .interact_text()?;

        let average_wage_per_hour: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Average technician wage per hour ($)")
            .interact_text()?;

        let mut input = RoiInput {
            industry: industry.key().to_string(),
            monthly_installations: Some(monthly_installations),
            average_technicians: Some(f64::from(average_technicians)),
            average_travel_time: Some(average_travel_time),
            fuel_cost_per_gallon: Some(fuel_cost_per_gallon),
            average_wage_per_hour: Some(average_wage_per_hour),
            company_name: None,
            email: None,
            phone: None,
        };

        let results = match compute_roi(&input) {
            Some(results) => results,
            None => {
                println!("❌ Every value must be a number other than zero");
                return Ok(());
            }
        };

        self.display_roi_results(industry, &results);

        let share = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Email this report and share it with our team?")
            .interact()?;

        if !share {
            return Ok(());
        }

        let email: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Work email")
            .interact_text()?;

        let company: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Company name (optional)")
            .allow_empty(true)
            .interact_text()?;

        input.email = Some(email.trim().to_string());
        if !company.trim().is_empty() {
            input.company_name = Some(company.trim().to_string());
        }

        let request = RoiSubmissionRequest {
            input,
            calculations: Some(results),
        };

        match self.submitter.submit(&request).await {
            Ok(SubmitOutcome::Accepted { message }) => {
                println!("✅ {}", message.as_deref().unwrap_or("Report saved"));
            }
            Ok(SubmitOutcome::Rejected {
                message,
                field_errors,
            }) => {
                println!(
                    "⚠️  {}",
                    message.as_deref().unwrap_or("Submission rejected")
                );
                for (field, error) in &field_errors {
                    println!("   • {}: {}", field, error);
                }
            }
            Ok(SubmitOutcome::AlreadyInFlight) => {
                println!("⏳ A submission is already on the wire");
            }
            Err(e) => {
                println!("❌ Could not reach the capture API: {}", e);
                println!("💡 Start the server first, or set ROI_ENDPOINT_URL");
            }
        }

        Ok(())
    }

    fn display_roi_results(&self, industry: Industry, results: &RoiResult) {
        println!("\n📈 Projected Savings for {}", industry.label());
        println!("━━━━━━━━━━━━━━━━━━━━━");

        println!(
            "💸 Current monthly travel spend: ${:.2}",
            results.current_costs.total_monthly_costs
        );
        println!("⛽ Fuel savings: ${:.2}/month", results.savings.fuel_savings);
        println!(
            "🧰 Labor savings: ${:.2}/month",
            results.savings.labor_savings
        );
        println!(
            "💰 Net monthly savings: ${:.2}",
            results.savings.net_monthly_savings
        );
        println!(
            "📅 Net annual savings: ${:.2}",
            results.savings.net_annual_savings
        );
        println!("📊 First-year ROI: {:.1}%", results.roi.roi_percentage);
        println!("⏱️  Break even: {}", results.roi.break_even_point);
        println!(
            "🔧 Installs per tech per day: {:.2} now, {:.2} with routing ({:.0}% gain)",
            results.efficiency.current_installs_per_tech_per_day,
            results.efficiency.improved_installs_per_tech_per_day,
            results.efficiency.improvement_percentage
        );

        if results.savings.net_monthly_savings <= 0.0 {
            println!("\n⚠️  At these inputs the platform costs more than it saves");
        }
    }
}
