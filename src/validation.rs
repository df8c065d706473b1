use regex::Regex;
use std::collections::HashMap;

use crate::models::LeadSubmissionRequest;
use crate::roi::RoiInput;

// Form-layer range limits. The calculator itself never checks these; a
// submission has to pass through here before anything is persisted.
pub const MIN_MONTHLY_INSTALLATIONS: f64 = 1.0;
pub const MAX_MONTHLY_INSTALLATIONS: f64 = 10_000.0;
pub const MIN_TECHNICIANS: f64 = 1.0;
pub const MAX_TECHNICIANS: f64 = 500.0;
pub const MIN_TRAVEL_MINUTES: f64 = 5.0;
pub const MAX_TRAVEL_MINUTES: f64 = 240.0;
pub const MIN_FUEL_COST: f64 = 1.0;
pub const MAX_FUEL_COST: f64 = 12.0;
pub const MIN_WAGE: f64 = 10.0;
pub const MAX_WAGE: f64 = 200.0;

pub const MAX_COMPANY_NAME_LEN: usize = 200;
pub const MAX_FULL_NAME_LEN: usize = 120;
pub const MAX_MESSAGE_LEN: usize = 2000;

pub const LEAD_FORM_TYPES: [&str; 3] = ["demo_request", "enterprise_contact", "trial_signup"];

pub struct FormValidator {
    email_regex: Regex,
    phone_regex: Regex,
}

impl FormValidator {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap(),
            phone_regex: Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").unwrap(),
        }
    }

    // Field keys in the returned map match the wire names of the ROI form.
    // An empty map means the submission may be stored.
    pub fn validate_roi_submission(&self, input: &RoiInput) -> HashMap<String, String> {
        let mut errors = HashMap::new();

        check_range(
            &mut errors,
            "monthly_installations",
            input.monthly_installations,
            MIN_MONTHLY_INSTALLATIONS,
            MAX_MONTHLY_INSTALLATIONS,
            "Monthly installations",
        );
        check_range(
            &mut errors,
            "average_technicians",
            input.average_technicians,
            MIN_TECHNICIANS,
            MAX_TECHNICIANS,
            "Technician count",
        );
        if let Some(technicians) = input.average_technicians {
            if technicians.is_finite() && technicians.fract() != 0.0 {
                errors.insert(
                    "average_technicians".to_string(),
                    "Technician count must be a whole number".to_string(),
                );
            }
        }
        check_range(
            &mut errors,
            "average_travel_time",
            input.average_travel_time,
            MIN_TRAVEL_MINUTES,
            MAX_TRAVEL_MINUTES,
            "Average travel time",
        );
        check_range(
            &mut errors,
            "fuel_cost_per_gallon",
            input.fuel_cost_per_gallon,
            MIN_FUEL_COST,
            MAX_FUEL_COST,
            "Fuel cost per gallon",
        );
        check_range(
            &mut errors,
            "average_wage_per_hour",
            input.average_wage_per_hour,
            MIN_WAGE,
            MAX_WAGE,
            "Average hourly wage",
        );

        // An ROI report is only ever stored with a reachable contact
        match input.email.as_deref().map(str::trim) {
            None | Some("") => {
                errors.insert(
                    "email".to_string(),
                    "Email address is required".to_string(),
                );
            }
            Some(email) => {
                if !self.email_regex.is_match(email) {
                    errors.insert(
                        "email".to_string(),
                        "Enter a valid email address".to_string(),
                    );
                }
            }
        }

        if let Some(phone) = input.phone.as_deref().map(str::trim) {
            if !phone.is_empty() && !self.phone_regex.is_match(phone) {
                errors.insert(
                    "phone".to_string(),
                    "Enter a valid phone number".to_string(),
                );
            }
        }

        if let Some(company) = input.company_name.as_deref() {
            if company.chars().count() > MAX_COMPANY_NAME_LEN {
                errors.insert(
                    "company_name".to_string(),
                    format!("Company name must be {} characters or fewer", MAX_COMPANY_NAME_LEN),
                );
            }
        }

        errors
    }

    pub fn validate_lead_submission(&self, lead: &LeadSubmissionRequest) -> HashMap<String, String> {
        let mut errors = HashMap::new();

        if !LEAD_FORM_TYPES.contains(&lead.form_type.as_str()) {
            errors.insert(
                "form_type".to_string(),
                "Unknown form type".to_string(),
            );
        }

        let full_name = lead.full_name.trim();
        if full_name.is_empty() {
            errors.insert(
                "full_name".to_string(),
                "Name is required".to_string(),
            );
        } else if full_name.chars().count() > MAX_FULL_NAME_LEN {
            errors.insert(
                "full_name".to_string(),
                format!("Name must be {} characters or fewer", MAX_FULL_NAME_LEN),
            );
        }

        let email = lead.email.trim();
        if email.is_empty() {
            errors.insert(
                "email".to_string(),
                "Email address is required".to_string(),
            );
        } else if !self.email_regex.is_match(email) {
            errors.insert(
                "email".to_string(),
                "Enter a valid email address".to_string(),
            );
        }

        if let Some(phone) = lead.phone.as_deref().map(str::trim) {
            if !phone.is_empty() && !self.phone_regex.is_match(phone) {
                errors.insert(
                    "phone".to_string(),
                    "Enter a valid phone number".to_string(),
                );
            }
        }

        if let Some(company) = lead.company_name.as_deref() {
            if company.chars().count() > MAX_COMPANY_NAME_LEN {
                errors.insert(
                    "company_name".to_string(),
                    format!("Company name must be {} characters or fewer", MAX_COMPANY_NAME_LEN),
                );
            }
        }

        if let Some(message) = lead.message.as_deref() {
            if message.chars().count() > MAX_MESSAGE_LEN {
                errors.insert(
                    "message".to_string(),
                    format!("Message must be {} characters or fewer", MAX_MESSAGE_LEN),
                );
            }
        }

        // industry is optional on lead forms and unknown values resolve to
        // the catalog fallback, so it never produces an error here

        errors
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range(
    errors: &mut HashMap<String, String>,
    field: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
    display_name: &str,
) {
    match value {
        None => {
            errors.insert(field.to_string(), format!("{} is required", display_name));
        }
        Some(v) if v.is_nan() => {
            errors.insert(field.to_string(), format!("{} is required", display_name));
        }
        Some(v) if v < min || v > max => {
            errors.insert(
                field.to_string(),
                format!("{} must be between {} and {}", display_name, min, max),
            );
        }
        Some(_) => {}
    }
}
