//! Strategy family and builder dispatch keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy family. Each family owns one block of delta/width configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyFamily {
    /// Short put spread plus short call spread.
    IronCondor,
    /// Two-leg credit spread.
    VerticalSpread,
    /// Wheel entry: cash-secured short put.
    WheelCsp,
    /// Wheel exit: covered short call.
    WheelCc,
}

impl StrategyFamily {
    /// Every family, in configuration order.
    pub const ALL: [Self; 4] = [
        Self::IronCondor,
        Self::VerticalSpread,
        Self::WheelCsp,
        Self::WheelCc,
    ];
}

impl fmt::Display for StrategyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IronCondor => write!(f, "IRON_CONDOR"),
            Self::VerticalSpread => write!(f, "VERTICAL_SPREAD"),
            Self::WheelCsp => write!(f, "WHEEL_CSP"),
            Self::WheelCc => write!(f, "WHEEL_CC"),
        }
    }
}

/// Concrete structure a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// Four-leg iron condor.
    IronCondor,
    /// Short put, long lower put.
    BullPutSpread,
    /// Short call, long higher call.
    BearCallSpread,
    /// Single short put secured by cash.
    CashSecuredPut,
    /// Single short call covered by shares.
    CoveredCall,
}

impl StrategyKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 5] = [
        Self::IronCondor,
        Self::BullPutSpread,
        Self::BearCallSpread,
        Self::CashSecuredPut,
        Self::CoveredCall,
    ];

    /// Family whose configuration drives this kind.
    #[must_use]
    pub const fn family(self) -> StrategyFamily {
        match self {
            Self::IronCondor => StrategyFamily::IronCondor,
            Self::BullPutSpread | Self::BearCallSpread => StrategyFamily::VerticalSpread,
            Self::CashSecuredPut => StrategyFamily::WheelCsp,
            Self::CoveredCall => StrategyFamily::WheelCc,
        }
    }

    /// Number of legs in the structure.
    #[must_use]
    pub const fn leg_count(self) -> usize {
        match self {
            Self::IronCondor => 4,
            Self::BullPutSpread | Self::BearCallSpread => 2,
            Self::CashSecuredPut | Self::CoveredCall => 1,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IronCondor => write!(f, "IRON_CONDOR"),
            Self::BullPutSpread => write!(f, "BULL_PUT_SPREAD"),
            Self::BearCallSpread => write!(f, "BEAR_CALL_SPREAD"),
            Self::CashSecuredPut => write!(f, "CASH_SECURED_PUT"),
            Self::CoveredCall => write!(f, "COVERED_CALL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_family_mapping() {
        assert_eq!(StrategyKind::IronCondor.family(), StrategyFamily::IronCondor);
        assert_eq!(StrategyKind::BullPutSpread.family(), StrategyFamily::VerticalSpread);
        assert_eq!(StrategyKind::BearCallSpread.family(), StrategyFamily::VerticalSpread);
        assert_eq!(StrategyKind::CashSecuredPut.family(), StrategyFamily::WheelCsp);
        assert_eq!(StrategyKind::CoveredCall.family(), StrategyFamily::WheelCc);
    }

    #[test]
    fn kind_leg_count() {
        assert_eq!(StrategyKind::IronCondor.leg_count(), 4);
        assert_eq!(StrategyKind::BearCallSpread.leg_count(), 2);
        assert_eq!(StrategyKind::CoveredCall.leg_count(), 1);
    }

    #[test]
    fn display_matches_serde() {
        for kind in StrategyKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
        for family in StrategyFamily::ALL {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{family}\""));
        }
    }
}
