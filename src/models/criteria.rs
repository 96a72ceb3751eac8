use serde::Deserialize;

use crate::error::ApiError;

fn default_interest_rate() -> f64 {
    0.03
}

/// User-supplied search inputs. `price_max` is in thousands of euros,
/// `user_max_limit` is an absolute ceiling on the effective cost of a
/// listing (debt-free price minus 10% of the asking price).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCriteria {
    pub location: String,
    pub price_max: Option<i64>,
    pub year_min: Option<i32>,
    pub size_min: Option<i32>,
    pub user_max_limit: Option<f64>,
    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,
}

impl SearchCriteria {
    /// Bounds are either unset or strictly positive.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.interest_rate <= 0.0 {
            return Err(ApiError::InvalidCriteria(
                "interest_rate must be positive".to_string(),
            ));
        }
        if matches!(self.price_max, Some(p) if p <= 0) {
            return Err(ApiError::InvalidCriteria(
                "price_max must be positive".to_string(),
            ));
        }
        if matches!(self.year_min, Some(y) if y <= 0) {
            return Err(ApiError::InvalidCriteria(
                "year_min must be positive".to_string(),
            ));
        }
        if matches!(self.size_min, Some(s) if s <= 0) {
            return Err(ApiError::InvalidCriteria(
                "size_min must be positive".to_string(),
            ));
        }
        if matches!(self.user_max_limit, Some(l) if l <= 0.0) {
            return Err(ApiError::InvalidCriteria(
                "user_max_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
