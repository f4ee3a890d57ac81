//! Protocol fork flags
//!
//! [`Forks`] is the chain's schedule of activation blocks, loaded from
//! configuration. [`ForksInTime`] is the resolved set of flags at a
//! single block and is what the engine consults.

use serde::{Deserialize, Serialize};

/// Fork activation schedule; `None` means the fork never activates
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Forks {
    /// Homestead
    pub homestead: Option<u64>,
    /// Byzantium
    pub byzantium: Option<u64>,
    /// Constantinople
    pub constantinople: Option<u64>,
    /// Petersburg
    pub petersburg: Option<u64>,
    /// Istanbul
    pub istanbul: Option<u64>,
    /// London
    pub london: Option<u64>,
    /// EIP-150 gas repricing
    #[serde(rename = "EIP150")]
    pub eip150: Option<u64>,
    /// EIP-155 replay protection
    #[serde(rename = "EIP155")]
    pub eip155: Option<u64>,
    /// EIP-158 state clearing
    #[serde(rename = "EIP158")]
    pub eip158: Option<u64>,
}

impl Forks {
    /// Schedule with every fork active from genesis
    pub fn all_enabled() -> Self {
        Self {
            homestead: Some(0),
            byzantium: Some(0),
            constantinople: Some(0),
            petersburg: Some(0),
            istanbul: Some(0),
            london: Some(0),
            eip150: Some(0),
            eip155: Some(0),
            eip158: Some(0),
        }
    }

    /// Resolve the flags active at `block`
    pub fn at(&self, block: u64) -> ForksInTime {
        let active = |fork: Option<u64>| fork.is_some_and(|start| start <= block);
        ForksInTime {
            homestead: active(self.homestead),
            byzantium: active(self.byzantium),
            constantinople: active(self.constantinople),
            petersburg: active(self.petersburg),
            istanbul: active(self.istanbul),
            london: active(self.london),
            eip150: active(self.eip150),
            eip155: active(self.eip155),
            eip158: active(self.eip158),
        }
    }
}

/// Fork flags in effect for one execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ForksInTime {
    pub homestead: bool,
    pub byzantium: bool,
    pub constantinople: bool,
    pub petersburg: bool,
    pub istanbul: bool,
    pub london: bool,
    pub eip150: bool,
    pub eip155: bool,
    pub eip158: bool,
}

impl ForksInTime {
    /// Every flag set
    pub const fn all_enabled() -> Self {
        Self {
            homestead: true,
            byzantium: true,
            constantinople: true,
            petersburg: true,
            istanbul: true,
            london: true,
            eip150: true,
            eip155: true,
            eip158: true,
        }
    }

    /// Frontier rules, no flag set
    pub const fn frontier() -> Self {
        Self {
            homestead: false,
            byzantium: false,
            constantinople: false,
            petersburg: false,
            istanbul: false,
            london: false,
            eip150: false,
            eip155: false,
            eip158: false,
        }
    }

    /// SSTORE charges the flat pre-Constantinople schedule
    pub fn legacy_sstore_metering(&self) -> bool {
        !self.istanbul && (self.petersburg || !self.constantinople)
    }
}
