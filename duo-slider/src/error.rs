//! Construction-time failures.

use thiserror::Error;

/// Reasons a slider configuration is rejected.
///
/// Every variant is raised before any visual element is touched, so a failed
/// construction leaves the host container untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The domain is empty or inverted (`min >= max`).
    #[error("domain minimum {min} must be below maximum {max}")]
    EmptyDomain {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The step is zero or negative.
    #[error("step must be positive, got {step}")]
    NonPositiveStep {
        /// Configured step.
        step: f64,
    },
    /// A numeric field is NaN or infinite.
    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An explicit minimum separation below zero.
    #[error("minimum separation must not be negative, got {separation}")]
    NegativeSeparation {
        /// Configured separation.
        separation: f64,
    },
    /// The thumbs could never be placed `separation` apart inside the domain.
    #[error("minimum separation {separation} does not fit in a domain spanning {span}")]
    SeparationExceedsDomain {
        /// Effective separation (explicit, or one step).
        separation: f64,
        /// Width of the domain, `max - min`.
        span: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = ConfigError::EmptyDomain {
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(err.to_string(), "domain minimum 10 must be below maximum 5");

        let err = ConfigError::NonFinite {
            field: "step",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "`step` must be a finite number, got NaN");
    }
}
