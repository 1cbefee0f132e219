//! Data-driven game balance
//!
//! Loaded from JSON so levels can be replayed with different constants
//! without recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Balance values consumed by the tick pipeline and paddle movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Longest sub-tick; longer ticks are split into slices of this length
    pub tick_cutoff: i32,
    /// Time a supercharged ball stays supercharged
    pub max_supercharge_time: i32,
    /// Horizontal paddle speed (units per time unit)
    pub paddle_speed: i32,
    /// Top-side paddle boost is `paddle_speed / paddle_boost_divisor` per direction unit
    pub paddle_boost_divisor: i32,
    /// Larger values weaken the magnet pull on linked balls
    pub magnet_damping: i32,
    /// Replications granted by a replicator block
    pub replicator_charges: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_cutoff: 20,
            max_supercharge_time: 10_000,
            paddle_speed: 20,
            paddle_boost_divisor: 5,
            magnet_damping: 10,
            replicator_charges: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every divisor and duration is usable
    pub fn validate(&self) -> Result<(), TuningError> {
        let checks = [
            ("tick_cutoff", self.tick_cutoff),
            ("max_supercharge_time", self.max_supercharge_time),
            ("paddle_speed", self.paddle_speed),
            ("paddle_boost_divisor", self.paddle_boost_divisor),
            ("magnet_damping", self.magnet_damping),
            ("replicator_charges", i32::from(self.replicator_charges)),
        ];
        for (field, value) in checks {
            if value <= 0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        Ok(())
    }

    /// Horizontal velocity added by a top-side paddle hit
    pub fn paddle_boost(&self, direction: i32) -> crate::Vector {
        crate::Vector::new(self.paddle_speed / self.paddle_boost_divisor * direction, 0)
    }

    /// Replication count after a replicator block hit, capped at the paddle maximum
    pub fn replicator_grant(&self) -> u8 {
        self.replicator_charges.min(crate::consts::MAX_REPLICATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.tick_cutoff, 20);
        assert_eq!(tuning.paddle_boost(1), crate::Vector::new(4, 0));
        assert_eq!(tuning.paddle_boost(-1), crate::Vector::new(-4, 0));
        assert_eq!(tuning.paddle_boost(0), crate::Vector::ZERO);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "paddle_speed": 40 }"#).unwrap();
        assert_eq!(tuning.paddle_speed, 40);
        assert_eq!(tuning.max_supercharge_time, 10_000);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            magnet_damping: 3,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = Tuning::from_json(r#"{ "paddle_boost_divisor": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive {
                field: "paddle_boost_divisor"
            }
        ));
        assert!(matches!(
            Tuning::from_json("not json").unwrap_err(),
            TuningError::Parse(_)
        ));
    }

    #[test]
    fn test_replicator_grant_is_capped() {
        let tuning = Tuning {
            replicator_charges: 9,
            ..Default::default()
        };
        assert_eq!(tuning.replicator_grant(), 3);
    }
}
