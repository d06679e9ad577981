//! Fraud-pattern vocabulary.
//!
//! Two layers on purpose:
//!   - `FraudPattern` is the closed set of labels a transaction can
//!     carry — one per concrete attack generator.
//!   - `PatternName` is what callers configure. It adds two alias
//!     attacks (velocity_attack, account_takeover) that dispatch to
//!     the rapid-fire generator, and the mixed_patterns pseudo-pattern,
//!     which is expanded at selection time and never appears on a
//!     transaction.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime transaction labels — the five concrete attack behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudPattern {
    RapidFire,
    GeographicHopping,
    DeviceSpoofing,
    AmountEscalation,
    MerchantCycling,
}

impl FraudPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RapidFire => "rapid_fire",
            Self::GeographicHopping => "geographic_hopping",
            Self::DeviceSpoofing => "device_spoofing",
            Self::AmountEscalation => "amount_escalation",
            Self::MerchantCycling => "merchant_cycling",
        }
    }

    /// The batch-size range the driver rolls for this pattern.
    pub fn count_range(&self) -> (usize, usize) {
        match self {
            Self::RapidFire => (5, 15),
            Self::GeographicHopping => (3, 7),
            Self::DeviceSpoofing => (4, 10),
            Self::AmountEscalation => (4, 8),
            Self::MerchantCycling => (6, 12),
        }
    }
}

impl fmt::Display for FraudPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable pattern names, as accepted from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternName {
    RapidFire,
    GeographicHopping,
    DeviceSpoofing,
    AmountEscalation,
    MerchantCycling,
    VelocityAttack,
    AccountTakeover,
    MixedPatterns,
}

impl PatternName {
    /// Every concrete (non-mixed) name, in stable order.
    pub const CONCRETE: [PatternName; 7] = [
        PatternName::RapidFire,
        PatternName::GeographicHopping,
        PatternName::DeviceSpoofing,
        PatternName::AmountEscalation,
        PatternName::MerchantCycling,
        PatternName::VelocityAttack,
        PatternName::AccountTakeover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RapidFire => "rapid_fire",
            Self::GeographicHopping => "geographic_hopping",
            Self::DeviceSpoofing => "device_spoofing",
            Self::AmountEscalation => "amount_escalation",
            Self::MerchantCycling => "merchant_cycling",
            Self::VelocityAttack => "velocity_attack",
            Self::AccountTakeover => "account_takeover",
            Self::MixedPatterns => "mixed_patterns",
        }
    }

    /// The generator this name dispatches to. Velocity and takeover
    /// attacks present as rapid-fire activity on the wire.
    /// Mixed has no generator — it must be expanded first.
    pub fn generator(&self) -> Option<FraudPattern> {
        match self {
            Self::RapidFire | Self::VelocityAttack | Self::AccountTakeover => {
                Some(FraudPattern::RapidFire)
            }
            Self::GeographicHopping => Some(FraudPattern::GeographicHopping),
            Self::DeviceSpoofing => Some(FraudPattern::DeviceSpoofing),
            Self::AmountEscalation => Some(FraudPattern::AmountEscalation),
            Self::MerchantCycling => Some(FraudPattern::MerchantCycling),
            Self::MixedPatterns => None,
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s {
            "rapid_fire" => Ok(Self::RapidFire),
            "geographic_hopping" => Ok(Self::GeographicHopping),
            "device_spoofing" => Ok(Self::DeviceSpoofing),
            "amount_escalation" => Ok(Self::AmountEscalation),
            "merchant_cycling" => Ok(Self::MerchantCycling),
            "velocity_attack" => Ok(Self::VelocityAttack),
            "account_takeover" => Ok(Self::AccountTakeover),
            "mixed_patterns" => Ok(Self::MixedPatterns),
            other => Err(SimError::UnknownPattern {
                name: other.to_string(),
            }),
        }
    }
}

/// Pick the concrete pattern for one fraudulent unit of work.
///
/// Uniform over the configured set; if mixed_patterns is present it
/// wins nothing by itself — it stands for a uniform choice over all
/// concrete names at selection time.
pub fn select_pattern(configured: &[PatternName], rng: &mut SimRng) -> FraudPattern {
    debug_assert!(!configured.is_empty(), "pattern set validated before run");
    let name = if configured.contains(&PatternName::MixedPatterns) {
        *rng.choose(&PatternName::CONCRETE)
    } else {
        *rng.choose(configured)
    };
    // Unreachable for concrete names; mixed was expanded above.
    name.generator().unwrap_or(FraudPattern::RapidFire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SimRng, StreamLabel};

    #[test]
    fn parse_round_trips_every_name() {
        for name in PatternName::CONCRETE
            .iter()
            .chain([PatternName::MixedPatterns].iter())
        {
            let parsed: PatternName = name.as_str().parse().unwrap();
            assert_eq!(parsed, *name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "card_testing".parse::<PatternName>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::SimError::UnknownPattern { ref name } if name == "card_testing"
        ));
    }

    #[test]
    fn mixed_expands_over_every_concrete_pattern() {
        let mut rng = SimRng::new(42, StreamLabel::Driver);
        let configured = [PatternName::MixedPatterns];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(select_pattern(&configured, &mut rng));
        }
        // All five generators should surface; aliases fold into rapid_fire.
        assert_eq!(seen.len(), 5, "expected all 5 generators, saw {seen:?}");
    }

    #[test]
    fn single_configured_pattern_always_wins() {
        let mut rng = SimRng::new(7, StreamLabel::Driver);
        let configured = [PatternName::MerchantCycling];
        for _ in 0..100 {
            assert_eq!(
                select_pattern(&configured, &mut rng),
                FraudPattern::MerchantCycling
            );
        }
    }

    #[test]
    fn alias_attacks_dispatch_to_rapid_fire() {
        assert_eq!(
            PatternName::VelocityAttack.generator(),
            Some(FraudPattern::RapidFire)
        );
        assert_eq!(
            PatternName::AccountTakeover.generator(),
            Some(FraudPattern::RapidFire)
        );
        assert_eq!(PatternName::MixedPatterns.generator(), None);
    }
}
