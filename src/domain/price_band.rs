//! Session price bounds and price-move classification.
//!
//! HOSE-style bounds: ceiling and floor sit 7% either side of the reference
//! price, snapped to the 10 VND tick.

use serde::Serialize;
use std::fmt;

pub const PRICE_TICK: f64 = 10.0;
pub const BAND_LIMIT: f64 = 0.07;

/// Round to the nearest tick.
pub fn round_to_tick(price: f64) -> f64 {
    (price / PRICE_TICK).round() * PRICE_TICK
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub reference: f64,
    pub ceiling: f64,
    pub floor: f64,
}

impl PriceBand {
    pub fn from_reference(reference: f64) -> Self {
        PriceBand {
            reference,
            ceiling: round_to_tick(reference * (1.0 + BAND_LIMIT)),
            floor: round_to_tick(reference * (1.0 - BAND_LIMIT)),
        }
    }

    pub fn classify(&self, price: f64) -> PriceMove {
        PriceMove::classify(price, self.reference, self.ceiling, self.floor)
    }
}

/// Where a price sits relative to the session bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceMove {
    Ceiling,
    Floor,
    Up,
    Down,
    Reference,
}

impl PriceMove {
    pub fn classify(price: f64, reference: f64, ceiling: f64, floor: f64) -> Self {
        if price >= ceiling {
            PriceMove::Ceiling
        } else if price <= floor {
            PriceMove::Floor
        } else if price > reference {
            PriceMove::Up
        } else if price < reference {
            PriceMove::Down
        } else {
            PriceMove::Reference
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            PriceMove::Ceiling => "^^",
            PriceMove::Floor => "vv",
            PriceMove::Up => "^",
            PriceMove::Down => "v",
            PriceMove::Reference => "=",
        }
    }
}

impl fmt::Display for PriceMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceMove::Ceiling => "ceiling",
            PriceMove::Floor => "floor",
            PriceMove::Up => "up",
            PriceMove::Down => "down",
            PriceMove::Reference => "reference",
        };
        f.write_str(s)
    }
}
