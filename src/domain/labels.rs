//! The rice variety label table.
//!
//! Index `i` of the classifier output corresponds to `RICE_VARIETIES[i]`. The
//! order is fixed by the trained model; reordering it without retraining
//! silently corrupts every prediction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rice variety the classifier can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiceVariety {
    Arborio,
    Basmati,
    Jasmine,
    #[serde(rename = "Brown Rice")]
    BrownRice,
    #[serde(rename = "Wild Rice")]
    WildRice,
    #[serde(rename = "Sushi Rice")]
    SushiRice,
}

/// Every variety, in model output order.
pub const RICE_VARIETIES: [RiceVariety; 6] = [
    RiceVariety::Arborio,
    RiceVariety::Basmati,
    RiceVariety::Jasmine,
    RiceVariety::BrownRice,
    RiceVariety::WildRice,
    RiceVariety::SushiRice,
];

impl RiceVariety {
    /// Display name of the variety.
    pub fn name(self) -> &'static str {
        match self {
            RiceVariety::Arborio => "Arborio",
            RiceVariety::Basmati => "Basmati",
            RiceVariety::Jasmine => "Jasmine",
            RiceVariety::BrownRice => "Brown Rice",
            RiceVariety::WildRice => "Wild Rice",
            RiceVariety::SushiRice => "Sushi Rice",
        }
    }

    /// Position of the variety in the model output.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a variety by model output index.
    pub fn from_index(index: usize) -> Option<Self> {
        RICE_VARIETIES.get(index).copied()
    }
}

impl fmt::Display for RiceVariety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiceVariety {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RICE_VARIETIES
            .iter()
            .copied()
            .find(|variety| variety.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown rice variety: {}", wanted))
    }
}
