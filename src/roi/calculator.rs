use serde::{Deserialize, Serialize};

use crate::roi::factors::Industry;

// Model constants. A month is 22 working days; travel is costed at a flat
// 45 mph and 15 mpg fleet average; the platform bills per technician.
pub const WORKING_DAYS_PER_MONTH: f64 = 22.0;
pub const AVG_SPEED_MPH: f64 = 45.0;
pub const AVG_FUEL_ECONOMY_MPG: f64 = 15.0;
pub const PLATFORM_COST_PER_TECH: f64 = 99.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    #[serde(default)]
    pub industry: String,
    pub monthly_installations: Option<f64>,
    pub average_technicians: Option<f64>,
    pub average_travel_time: Option<f64>,
    pub fuel_cost_per_gallon: Option<f64>,
    pub average_wage_per_hour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCosts {
    pub monthly_fuel_costs: f64,
    pub monthly_labor_costs: f64,
    pub total_monthly_costs: f64,
    pub annual_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSavings {
    pub time_reduction_percentage: f64,
    pub fuel_savings: f64,
    pub labor_savings: f64,
    pub net_monthly_savings: f64,
    pub net_annual_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub payback_period_months: f64,
    pub roi_percentage: f64,
    pub break_even_point: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyGains {
    pub current_installs_per_tech_per_day: f64,
    pub improved_installs_per_tech_per_day: f64,
    pub improvement_percentage: f64,
}

// Derived report. No rounding happens in here; currency and percentage
// rounding belongs to whoever renders the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub current_costs: CurrentCosts,
    pub savings: ProjectedSavings,
    pub roi: RoiProjection,
    pub efficiency: EfficiencyGains,
}

// The form treats absent, zero and NaN all as "not filled in yet".
fn required(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => Some(v),
        _ => None,
    }
}

// Maps operational inputs to a savings/ROI report. Returns None while any
// required field is still missing so the caller can keep the results panel
// hidden. Range limits live in the form layer, not here: any nonzero
// numeric input computes without panicking. Safe to call on every change.
pub fn compute_roi(input: &RoiInput) -> Option<RoiResult> {
    let monthly_installations = required(input.monthly_installations)?;
    let average_technicians = required(input.average_technicians)?;
    let average_travel_time = required(input.average_travel_time)?;
    let fuel_cost_per_gallon = required(input.fuel_cost_per_gallon)?;
    let average_wage_per_hour = required(input.average_wage_per_hour)?;

    // Unknown keys resolve to Other, so the lookup itself cannot fail
    let factor = Industry::from_key(&input.industry).factor();

    let daily_installations = monthly_installations / WORKING_DAYS_PER_MONTH;
    let installs_per_tech_per_day = daily_installations / average_technicians;

    let miles_per_installation = (average_travel_time / 60.0) * AVG_SPEED_MPH;
    let monthly_miles = monthly_installations * miles_per_installation;
    let monthly_gallons = monthly_miles / AVG_FUEL_ECONOMY_MPG;
    let monthly_fuel_costs = monthly_gallons * fuel_cost_per_gallon;

    let monthly_travel_hours =
        (monthly_installations * average_technicians * average_travel_time) / 60.0;
    let monthly_labor_costs = monthly_travel_hours * average_wage_per_hour;

    let total_monthly_costs = monthly_fuel_costs + monthly_labor_costs;
    let annual_costs = total_monthly_costs * 12.0;

    let fuel_savings = monthly_fuel_costs * factor.time_reduction;
    let labor_savings = monthly_labor_costs * factor.time_reduction;
    let gross_monthly_savings = fuel_savings + labor_savings;

    let monthly_platform_cost = average_technicians * PLATFORM_COST_PER_TECH;
    let net_monthly_savings = gross_monthly_savings - monthly_platform_cost;
    let net_annual_savings = net_monthly_savings * 12.0;

    // Denominator clamps to 1 when net savings are zero or negative, so
    // payback collapses to the monthly platform cost instead of dividing
    // by zero. Longstanding display behavior; keep it as is.
    let payback_period_months = if net_monthly_savings > 0.0 {
        monthly_platform_cost / net_monthly_savings
    } else {
        monthly_platform_cost / 1.0
    };

    let roi_percentage = (net_annual_savings / (monthly_platform_cost * 12.0)) * 100.0;
    let break_even_point = format!("{} months", payback_period_months.ceil());

    let improved_installs_per_tech_per_day = installs_per_tech_per_day * (1.0 + factor.efficiency);

    Some(RoiResult {
        current_costs: CurrentCosts {
            monthly_fuel_costs,
            monthly_labor_costs,
            total_monthly_costs,
            annual_costs,
        },
        savings: ProjectedSavings {
            time_reduction_percentage: factor.time_reduction * 100.0,
            fuel_savings,
            labor_savings,
            net_monthly_savings,
            net_annual_savings,
        },
        roi: RoiProjection {
            payback_period_months,
            roi_percentage,
            break_even_point,
        },
        efficiency: EfficiencyGains {
            current_installs_per_tech_per_day: installs_per_tech_per_day,
            improved_installs_per_tech_per_day,
            improvement_percentage: factor.efficiency * 100.0,
        },
    })
}
