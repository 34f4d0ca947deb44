// ABOUTME: Size validation policies applied to declared list counts.
// ABOUTME: Validation is O(1) and runs before any work proportional to the count.

use crate::error::{Error, Result};
use crate::types::limits;
use serde::{Deserialize, Serialize};

/// Rule applied to every declared list count before it is trusted.
///
/// Negative counts are refused by every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizePolicy {
    /// Accept any non-negative count. This reproduces an unpatched decoder;
    /// large counts are then caught by the resource estimator's
    /// survivability check.
    Unchecked,
    /// Accept counts up to and including `max_count`.
    Bounded { max_count: u32 },
}

impl Default for SizePolicy {
    fn default() -> Self {
        SizePolicy::Bounded {
            max_count: limits::DEFAULT_MAX_CONTAINER_SIZE,
        }
    }
}

impl SizePolicy {
    /// Validate a declared count, returning it as a usable length.
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeSize`] for any negative count, under every policy
    /// - [`Error::SizeLimitExceeded`] when a bounded policy's maximum is exceeded
    #[inline]
    pub fn validate(&self, declared_count: i32) -> Result<usize> {
        let Ok(count) = u32::try_from(declared_count) else {
            return Err(Error::NegativeSize(declared_count));
        };
        if let SizePolicy::Bounded { max_count } = *self {
            if count > max_count {
                return Err(Error::SizeLimitExceeded {
                    declared: declared_count,
                    max: max_count,
                });
            }
        }
        Ok(count as usize)
    }

    /// Returns true for the unchecked policy.
    #[must_use]
    pub fn is_unchecked(&self) -> bool {
        matches!(self, SizePolicy::Unchecked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_is_inclusive() {
        let policy = SizePolicy::Bounded { max_count: 16 };
        assert_eq!(policy.validate(0), Ok(0));
        assert_eq!(policy.validate(16), Ok(16));
        assert_eq!(
            policy.validate(17),
            Err(Error::SizeLimitExceeded {
                declared: 17,
                max: 16
            })
        );
    }

    #[test]
    fn test_default_is_bounded_16m() {
        let policy = SizePolicy::default();
        assert_eq!(policy.validate(16_777_216), Ok(16_777_216));
        assert!(matches!(
            policy.validate(16_777_217),
            Err(Error::SizeLimitExceeded { .. })
        ));
        assert!(matches!(
            policy.validate(i32::MAX),
            Err(Error::SizeLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_unchecked_accepts_any_non_negative() {
        let policy = SizePolicy::Unchecked;
        assert_eq!(policy.validate(0), Ok(0));
        assert_eq!(policy.validate(2_000_000_000), Ok(2_000_000_000));
        assert_eq!(policy.validate(i32::MAX), Ok(i32::MAX as usize));
    }

    #[test]
    fn test_negative_counts_always_rejected() {
        for policy in [SizePolicy::Unchecked, SizePolicy::Bounded { max_count: u32::MAX }] {
            for n in [-1, -2, -1_000_000, i32::MIN] {
                assert_eq!(policy.validate(n), Err(Error::NegativeSize(n)));
            }
        }
    }

    #[test]
    fn test_policy_serde() {
        let bounded: SizePolicy =
            serde_json::from_str(r#"{"mode": "bounded", "max_count": 1000}"#).unwrap();
        assert_eq!(bounded, SizePolicy::Bounded { max_count: 1000 });

        let unchecked: SizePolicy = serde_json::from_str(r#"{"mode": "unchecked"}"#).unwrap();
        assert!(unchecked.is_unchecked());

        let json = serde_json::to_string(&SizePolicy::Bounded { max_count: 3 }).unwrap();
        assert_eq!(json, r#"{"mode":"bounded","max_count":3}"#);
    }
}
