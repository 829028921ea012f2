// In crates/indicators/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// The period of the fast ("short") simple moving average.
    #[serde(default = "default_short_period")]
    pub short_period: u32,
    /// The period of the slow ("long") simple moving average.
    #[serde(default = "default_long_period")]
    pub long_period: u32,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
        }
    }
}

fn default_short_period() -> u32 { 9 }
fn default_long_period() -> u32 { 21 }
