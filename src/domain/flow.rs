//! Order-flow figures from buy/sell volumes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Buy volume as a percentage of total traded volume.
///
/// `Undefined` when buy and sell volume are both zero; the ratio has no
/// value there and callers must decide how to show it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuyStrength {
    Percent(f64),
    Undefined,
}

impl BuyStrength {
    pub fn from_volumes(buy_volume: f64, sell_volume: f64) -> Self {
        let total = buy_volume + sell_volume;
        if total == 0.0 {
            BuyStrength::Undefined
        } else {
            BuyStrength::Percent(buy_volume / total * 100.0)
        }
    }

    pub fn percent(self) -> Option<f64> {
        match self {
            BuyStrength::Percent(p) => Some(p),
            BuyStrength::Undefined => None,
        }
    }
}

impl fmt::Display for BuyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuyStrength::Percent(p) => write!(f, "{p:.1}%"),
            BuyStrength::Undefined => f.write_str("n/a"),
        }
    }
}

impl Serialize for BuyStrength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.percent().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowFigures {
    pub buy_flow: f64,
    pub sell_flow: f64,
    pub net_flow: f64,
    pub buy_strength: BuyStrength,
}

impl FlowFigures {
    pub fn compute(buy_volume: f64, sell_volume: f64, price: f64) -> Self {
        let buy_flow = buy_volume * price;
        let sell_flow = sell_volume * price;
        FlowFigures {
            buy_flow,
            sell_flow,
            net_flow: buy_flow - sell_flow,
            buy_strength: BuyStrength::from_volumes(buy_volume, sell_volume),
        }
    }
}
