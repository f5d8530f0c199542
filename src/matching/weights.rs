use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};

/// Dimension weight vector. One canonical default exists; callers that
/// need different tradeoffs pass their own vector and it is stored on the
/// relationship record alongside the score it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Weights {
    #[validate(range(min = 0.0, max = 1.0))]
    pub language: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub skills: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub industry: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub activity: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub experience: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub timezone: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub region: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub availability: f64,
}

impl Weights {
    pub const DEFAULT: Weights = Weights {
        language: 0.15,
        skills: 0.20,
        industry: 0.20,
        activity: 0.05,
        experience: 0.20,
        timezone: 0.10,
        region: 0.05,
        availability: 0.05,
    };

    pub fn sum(&self) -> f64 {
        self.language
            + self.skills
            + self.industry
            + self.activity
            + self.experience
            + self.timezone
            + self.region
            + self.availability
    }

    /// Every weight in [0,1] and the vector summing to 1.0.
    pub fn ensure_normalized(&self) -> Result<()> {
        self.validate()?;
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::Validation(format!(
                "weight vector must sum to 1.0, got {:.6}",
                sum
            )));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((Weights::DEFAULT.sum() - 1.0).abs() < 1e-9);
        assert!(Weights::DEFAULT.ensure_normalized().is_ok());
    }

    #[test]
    fn unnormalized_vector_is_rejected() {
        let skewed = Weights {
            skills: 0.5,
            ..Weights::DEFAULT
        };
        assert!(skewed.ensure_normalized().is_err());
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let negative = Weights {
            language: -0.1,
            skills: 0.45,
            ..Weights::DEFAULT
        };
        assert!(negative.ensure_normalized().is_err());
    }
}
