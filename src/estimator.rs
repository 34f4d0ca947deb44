// ABOUTME: Estimates the memory a naive decoder would commit for a declared list.
// ABOUTME: Drives the unchecked policy's simulated allocation failure and amplification ratios.

use crate::error::{Error, Result};
use crate::types::{limits, WireType};
use serde::{Deserialize, Serialize};

/// Per-element memory model of an unguarded decoder that pre-sizes its
/// containers from the declared count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceEstimator {
    /// Bytes per decoded struct element
    pub struct_element_bytes: u64,
    /// Bytes per decoded i64 element
    pub i64_element_bytes: u64,
    /// Bytes per decoded nested list element
    pub list_element_bytes: u64,
    /// Largest single allocation the process is assumed to survive
    pub survivable_bytes: u64,
}

impl Default for ResourceEstimator {
    fn default() -> Self {
        Self {
            struct_element_bytes: limits::STRUCT_ELEMENT_BYTES,
            i64_element_bytes: limits::I64_ELEMENT_BYTES,
            list_element_bytes: limits::LIST_ELEMENT_BYTES,
            survivable_bytes: limits::SURVIVABLE_ALLOCATION_BYTES,
        }
    }
}

impl ResourceEstimator {
    /// In-memory size of one element of the given type.
    #[must_use]
    pub fn per_element_size(&self, element_type: WireType) -> u64 {
        match element_type {
            WireType::Struct => self.struct_element_bytes,
            WireType::Int64 => self.i64_element_bytes,
            WireType::List => self.list_element_bytes,
            WireType::Stop | WireType::Unknown(_) => 0,
        }
    }

    /// Bytes a naive decoder would allocate up front for `count` elements.
    /// Saturates instead of overflowing.
    #[must_use]
    pub fn estimate(&self, element_type: WireType, count: usize) -> u64 {
        (count as u64).saturating_mul(self.per_element_size(element_type))
    }

    /// Estimate the commitment for a list and fail if a naive allocation of
    /// that size would not survive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SimulatedAllocationFailure`] when the estimate is
    /// strictly greater than `survivable_bytes`.
    pub fn commit(&self, element_type: WireType, count: usize) -> Result<u64> {
        let requested_bytes = self.estimate(element_type, count);
        if requested_bytes > self.survivable_bytes {
            return Err(Error::SimulatedAllocationFailure {
                requested_bytes,
                survivable_bytes: self.survivable_bytes,
            });
        }
        Ok(requested_bytes)
    }

    /// Ratio of committed bytes to bytes actually received.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn amplification(committed_bytes: u64, wire_bytes: usize) -> f64 {
        if wire_bytes == 0 {
            return 0.0;
        }
        committed_bytes as f64 / wire_bytes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payload_estimate() {
        let est = ResourceEstimator::default();
        assert_eq!(est.estimate(WireType::Struct, 2_000_000_000), 64_000_000_000);
        assert_eq!(
            est.commit(WireType::Struct, 2_000_000_000),
            Err(Error::SimulatedAllocationFailure {
                requested_bytes: 64_000_000_000,
                survivable_bytes: 1 << 30,
            })
        );

        // 64 GB committed for a 20 byte message
        let ratio = ResourceEstimator::amplification(64_000_000_000, 20);
        assert_eq!(ratio, 3_200_000_000.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let est = ResourceEstimator {
            survivable_bytes: 64,
            ..ResourceEstimator::default()
        };
        assert_eq!(est.commit(WireType::Int64, 8), Ok(64));
        assert!(est.commit(WireType::Int64, 9).unwrap_err().is_fatal());
        assert_eq!(est.commit(WireType::Struct, 2), Ok(64));
    }

    #[test]
    fn test_per_element_sizes() {
        let est = ResourceEstimator::default();
        assert_eq!(est.per_element_size(WireType::Struct), 32);
        assert_eq!(est.per_element_size(WireType::Int64), 8);
        assert_eq!(est.per_element_size(WireType::List), 24);
        assert_eq!(est.per_element_size(WireType::Unknown(9)), 0);
    }

    #[test]
    fn test_estimate_saturates() {
        let est = ResourceEstimator {
            struct_element_bytes: u64::MAX,
            ..ResourceEstimator::default()
        };
        assert_eq!(est.estimate(WireType::Struct, 2), u64::MAX);
    }

    #[test]
    fn test_amplification_of_empty_input() {
        assert_eq!(ResourceEstimator::amplification(100, 0), 0.0);
    }
}
