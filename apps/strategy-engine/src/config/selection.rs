//! Which builders run and how contracts are sized.

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyKind;

/// Strategy selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Builders invoked by `score_all`, in registration order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<StrategyKind>,
    /// Shares per contract.
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: u32,
    /// Contracts per candidate when the caller does not specify.
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            contract_multiplier: default_contract_multiplier(),
            default_quantity: default_quantity(),
        }
    }
}

fn default_enabled() -> Vec<StrategyKind> {
    vec![
        StrategyKind::IronCondor,
        StrategyKind::BullPutSpread,
        StrategyKind::BearCallSpread,
        StrategyKind::CashSecuredPut,
    ]
}

const fn default_contract_multiplier() -> u32 {
    100
}

const fn default_quantity() -> u32 {
    1
}
