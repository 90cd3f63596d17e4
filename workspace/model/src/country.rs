use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Countries (and the euro area aggregate) for which survey term structures are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    De,
    Es,
    Ez,
    Fr,
    It,
    Nl,
}

impl Country {
    /// All supported countries in selector order.
    pub const ALL: [Country; 6] = [
        Country::De,
        Country::Es,
        Country::Ez,
        Country::Fr,
        Country::It,
        Country::Nl,
    ];

    /// The euro area is preselected.
    pub const DEFAULT: Country = Country::Ez;

    /// Two-letter code, also the name of the per-country data directory.
    pub fn code(&self) -> &'static str {
        match self {
            Country::De => "de",
            Country::Es => "es",
            Country::Ez => "ez",
            Country::Fr => "fr",
            Country::It => "it",
            Country::Nl => "nl",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Country::De => "Germany",
            Country::Es => "Spain",
            Country::Ez => "Euro area",
            Country::Fr => "France",
            Country::It => "Italy",
            Country::Nl => "Netherlands",
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Country::DEFAULT
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Country::ALL
            .iter()
            .copied()
            .find(|country| country.code() == code)
            .ok_or_else(|| ModelError::UnknownCountry(s.to_string()))
    }
}
