//! Timing policy - gravity interval as a function of level
//!
//! Level 1 falls one row every `base`; each level after that is faster by
//! `step` until `floor` is reached. Further levels have no effect.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingPolicy {
    #[serde(rename = "base_ms", with = "millis")]
    pub base: Duration,
    #[serde(rename = "step_ms", with = "millis")]
    pub step: Duration,
    #[serde(rename = "floor_ms", with = "millis")]
    pub floor: Duration,
}

impl TimingPolicy {
    pub const fn new(base: Duration, step: Duration, floor: Duration) -> Self {
        Self { base, step, floor }
    }

    /// Gravity interval for `level` (levels below 1 count as 1)
    pub fn interval_for_level(&self, level: u32) -> Duration {
        let faster_by = self.step.saturating_mul(level.saturating_sub(1));
        self.base.saturating_sub(faster_by).max(self.floor)
    }

    /// First level at which the floor is in effect
    pub fn floor_level(&self) -> u32 {
        if self.step.is_zero() || self.base <= self.floor {
            return 1;
        }
        let span = (self.base - self.floor).as_nanos();
        let step = self.step.as_nanos();
        (span.div_ceil(step) as u32).saturating_add(1)
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(BASE_DROP_MS),
            Duration::from_millis(DROP_STEP_MS),
            Duration::from_millis(DROP_INTERVAL_FLOOR_MS),
        )
    }
}

/// Gravity interval for `level` under the default policy
pub fn interval_for_level(level: u32) -> Duration {
    TimingPolicy::default().interval_for_level(level)
}

/// Serialize durations as whole milliseconds
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_default_curve() {
        assert_eq!(interval_for_level(1), ms(500));
        assert_eq!(interval_for_level(2), ms(450));
        assert_eq!(interval_for_level(5), ms(300));
        assert_eq!(interval_for_level(8), ms(150));
        assert_eq!(interval_for_level(9), ms(100));
        assert_eq!(interval_for_level(10), ms(100));
        assert_eq!(interval_for_level(1000), ms(100));
    }

    #[test]
    fn test_level_zero_counts_as_one() {
        assert_eq!(interval_for_level(0), interval_for_level(1));
    }

    #[test]
    fn test_strictly_decreasing_until_floor() {
        let policy = TimingPolicy::default();
        let floor_level = policy.floor_level();
        assert_eq!(floor_level, 9);
        for level in 1..floor_level {
            assert!(policy.interval_for_level(level + 1) < policy.interval_for_level(level));
        }
        for level in floor_level..floor_level + 20 {
            assert_eq!(policy.interval_for_level(level), policy.floor);
        }
    }

    #[test]
    fn test_huge_level_saturates() {
        let policy = TimingPolicy::new(ms(1000), ms(1), ms(10));
        assert_eq!(policy.interval_for_level(u32::MAX), ms(10));
    }

    #[test]
    fn test_deserialize_from_millis() {
        let policy: TimingPolicy =
            serde_json::from_str(r#"{"base_ms": 800, "step_ms": 100}"#).unwrap();
        assert_eq!(policy.base, ms(800));
        assert_eq!(policy.step, ms(100));
        assert_eq!(policy.floor, ms(100));
    }
}
