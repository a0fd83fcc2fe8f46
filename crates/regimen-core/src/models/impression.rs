//! Session impression enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a training session felt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Impression {
    Bad,

    /// Used for days that have logs but no recorded session
    #[default]
    Neutral,

    Good,
}

impl FromStr for Impression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bad" => Ok(Impression::Bad),
            "neutral" => Ok(Impression::Neutral),
            "good" => Ok(Impression::Good),
            _ => Err(format!("Invalid impression: {s}")),
        }
    }
}

impl Impression {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Impression::Bad => "bad",
            Impression::Neutral => "neutral",
            Impression::Good => "good",
        }
    }

    /// Single character marker used in the calendar grid.
    ///
    /// ```rust
    /// use regimen_core::models::Impression;
    ///
    /// assert_eq!(Impression::Good.marker(), '+');
    /// assert_eq!(Impression::Neutral.marker(), '~');
    /// assert_eq!(Impression::Bad.marker(), '-');
    /// ```
    pub fn marker(&self) -> char {
        match self {
            Impression::Bad => '-',
            Impression::Neutral => '~',
            Impression::Good => '+',
        }
    }
}
