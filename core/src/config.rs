//! Run configuration and its validation.

use crate::{
    error::{SimError, SimResult},
    pattern::PatternName,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub duration_hours: u32,
    pub transactions_per_hour: u32,
    pub fraud_patterns: Vec<PatternName>,
    pub fraud_rate: f64,
    /// Master seed for all randomness in the run.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_hours: 1,
            transactions_per_hour: 100,
            fraud_patterns: vec![PatternName::MixedPatterns],
            fraud_rate: 0.15,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Reject malformed configuration before a run starts. The driver
    /// assumes valid inputs after this point.
    pub fn validate(&self) -> SimResult<()> {
        if self.duration_hours == 0 {
            return Err(SimError::InvalidConfig {
                reason: "duration_hours must be positive".into(),
            });
        }
        if self.transactions_per_hour == 0 {
            return Err(SimError::InvalidConfig {
                reason: "transactions_per_hour must be positive".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.fraud_rate) {
            return Err(SimError::InvalidConfig {
                reason: format!("fraud_rate {} outside [0, 1]", self.fraud_rate),
            });
        }
        if self.fraud_rate > 0.0 && self.fraud_patterns.is_empty() {
            return Err(SimError::InvalidConfig {
                reason: "fraud_rate > 0 requires at least one fraud pattern".into(),
            });
        }
        Ok(())
    }

    /// Total units of work for progress accounting.
    pub fn total_units(&self) -> u64 {
        u64::from(self.duration_hours) * u64::from(self.transactions_per_hour)
    }

    /// Users created for the run: max(50, tph / 10).
    pub fn user_count(&self) -> usize {
        (self.transactions_per_hour / 10).max(50) as usize
    }

    /// Parse caller-supplied pattern names, failing on the first
    /// unknown one.
    pub fn parse_patterns(names: &[&str]) -> SimResult<Vec<PatternName>> {
        names.iter().map(|n| n.parse()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_counts_are_rejected() {
        let cfg = SimulationConfig {
            duration_hours: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimError::InvalidConfig { .. })
        ));

        let cfg = SimulationConfig {
            transactions_per_hour: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_fraud_rate_is_rejected() {
        for rate in [-0.1, 1.5] {
            let cfg = SimulationConfig {
                fraud_rate: rate,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "rate {rate} should be invalid");
        }
    }

    #[test]
    fn empty_pattern_set_needs_zero_fraud_rate() {
        let cfg = SimulationConfig {
            fraud_patterns: vec![],
            fraud_rate: 0.2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimulationConfig {
            fraud_patterns: vec![],
            fraud_rate: 0.0,
            ..Default::default()
        };
        cfg.validate().unwrap();
    }

    #[test]
    fn user_count_has_a_floor_of_fifty() {
        let small = SimulationConfig {
            transactions_per_hour: 100,
            ..Default::default()
        };
        assert_eq!(small.user_count(), 50);

        let large = SimulationConfig {
            transactions_per_hour: 2000,
            ..Default::default()
        };
        assert_eq!(large.user_count(), 200);
    }

    #[test]
    fn parse_patterns_surfaces_unknown_names() {
        let ok = SimulationConfig::parse_patterns(&["rapid_fire", "mixed_patterns"]).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(SimulationConfig::parse_patterns(&["rapid_fire", "bogus"]).is_err());
    }
}
