//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("required_votes must be within [0.0, 1.0], got {0}")]
    RatioOutOfRange(f64),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let vote = &config.vote;

    // NaN also fails the range check
    if !(0.0..=1.0).contains(&vote.required_votes) {
        errors.push(ValidationError::RatioOutOfRange(vote.required_votes));
    }

    if vote.timeout_seconds == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "timeout_seconds",
        });
    }

    if vote.cooldown_seconds == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "cooldown_seconds",
        });
    }

    // start_lockout_seconds = 0 is legal: surrenders available immediately

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawVoteConfig;

    fn raw(vote: RawVoteConfig) -> RawConfig {
        RawConfig {
            config_version: 1,
            vote,
        }
    }

    #[test]
    fn default_config_is_valid() {
        let errors = validate_config(&raw(RawVoteConfig::default()));
        assert!(errors.is_empty());
    }

    #[test]
    fn boundary_ratios_are_valid() {
        for ratio in [0.0, 0.5, 1.0] {
            let errors = validate_config(&raw(RawVoteConfig {
                required_votes: ratio,
                ..Default::default()
            }));
            assert!(errors.is_empty(), "ratio {} should validate", ratio);
        }
    }

    #[test]
    fn out_of_range_ratio_rejected() {
        for ratio in [-0.1, 1.1, f64::NAN] {
            let errors = validate_config(&raw(RawVoteConfig {
                required_votes: ratio,
                ..Default::default()
            }));
            assert!(
                matches!(errors.as_slice(), [ValidationError::RatioOutOfRange(_)]),
                "ratio {} should be rejected",
                ratio
            );
        }
    }

    #[test]
    fn zero_timeout_rejected() {
        let errors = validate_config(&raw(RawVoteConfig {
            timeout_seconds: 0,
            ..Default::default()
        }));
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::ZeroDuration {
                field: "timeout_seconds"
            }]
        ));
    }

    #[test]
    fn zero_lockout_allowed() {
        let errors = validate_config(&raw(RawVoteConfig {
            start_lockout_seconds: 0,
            ..Default::default()
        }));
        assert!(errors.is_empty());
    }
}
