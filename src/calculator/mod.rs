use chrono::Datelike;
use std::fmt;

use crate::models::property::{FinanceProperty, MetricResult};

/// Housing company loans run 25 years on average with a two-year grace
/// window before repayments start.
pub const LOAN_HORIZON_YEARS: i32 = 23;

/// A metric's denominator is undefined for the property: either the loan
/// amortization horizon has already elapsed, or a price field that the
/// metric divides by is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    LoanTermElapsed {
        construction_year: i32,
        remaining: i32,
    },
    ZeroDenominator {
        field: &'static str,
    },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::LoanTermElapsed {
                construction_year,
                remaining,
            } => write!(
                f,
                "loan term elapsed for property built in {construction_year} ({remaining} years remaining)"
            ),
            CalcError::ZeroDenominator { field } => {
                write!(f, "{field} must be positive to compute metrics")
            }
        }
    }
}

impl std::error::Error for CalcError {}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Years left in the fixed amortization model. Deliberately not floored at
/// zero: callers must treat a non-positive result as a division hazard.
pub fn loan_time_left(construction_year: i32, current_year: i32) -> i32 {
    LOAN_HORIZON_YEARS - (current_year - construction_year)
}

fn remaining_time(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    let remaining = loan_time_left(property.valmistunut, current_year);
    if remaining <= 0 {
        return Err(CalcError::LoanTermElapsed {
            construction_year: property.valmistunut,
            remaining,
        });
    }
    Ok(remaining as f64)
}

/// Outstanding interest burden `offset_years` into the future, under linear
/// amortization of the loan share.
pub fn interest_remaining(
    property: &FinanceProperty,
    offset_years: f64,
    current_year: i32,
) -> Result<f64, CalcError> {
    let remaining = remaining_time(property, current_year)?;
    Ok(property.lainaosuus * ((remaining - offset_years) / remaining) * property.korkotaso)
}

pub fn loan_payment(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    Ok(property.lainaosuus / remaining_time(property, current_year)?)
}

pub fn cash_flow(
    property: &FinanceProperty,
    offset_years: f64,
    current_year: i32,
) -> Result<f64, CalcError> {
    let interest_fee = interest_remaining(property, offset_years, current_year)?;
    let payment = loan_payment(property, current_year)?;
    Ok((property.arvioitu_vuokra - property.hoitovastike) * 12.0 - interest_fee - payment)
}

pub fn cash_flow_now(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    cash_flow(property, 0.0, current_year)
}

pub fn cash_flow_in_5(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    cash_flow(property, 5.0, current_year)
}

pub fn cash_flow_in_10(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    cash_flow(property, 10.0, current_year)
}

pub fn gross_yield(property: &FinanceProperty) -> Result<f64, CalcError> {
    if property.velaton <= 0.0 {
        return Err(CalcError::ZeroDenominator { field: "velaton" });
    }
    Ok((property.arvioitu_vuokra - property.hoitovastike) * 12.0 / property.velaton)
}

pub fn roi(property: &FinanceProperty, current_year: i32) -> Result<f64, CalcError> {
    if property.myyntihinta <= 0.0 {
        return Err(CalcError::ZeroDenominator {
            field: "myyntihinta",
        });
    }
    let annual_profit = (property.arvioitu_vuokra - property.hoitovastike) * 12.0;
    let interest_fee = interest_remaining(property, 0.0, current_year)?;
    Ok((annual_profit - interest_fee) / property.myyntihinta)
}

/// All five metrics for one property. A failure here only affects this
/// property; batch callers keep going.
pub fn metrics_for(
    property: &FinanceProperty,
    current_year: i32,
) -> Result<MetricResult, CalcError> {
    Ok(MetricResult {
        kohdenumero: property.kohdenumero.clone(),
        kassavirta: cash_flow_now(property, current_year)?,
        kassavirta_5: cash_flow_in_5(property, current_year)?,
        kassavirta_10: cash_flow_in_10(property, current_year)?,
        gross_yield: gross_yield(property)?,
        roi: roi(property, current_year)?,
    })
}
