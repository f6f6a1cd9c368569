//! Continent classification used for grouping and filtering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of continents. Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continent {
    Europe,
    Asia,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Oceania,
    Antarctica,
    /// Catch-all for records without an assigned continent.
    #[default]
    None,
}

impl Continent {
    /// Every continent in display order.
    pub const ALL: [Continent; 8] = [
        Continent::Europe,
        Continent::Asia,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Africa,
        Continent::Oceania,
        Continent::Antarctica,
        Continent::None,
    ];

    /// Display name for section headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
            Self::Antarctica => "Antarctica",
            Self::None => "Unassigned",
        }
    }

    /// Wire name, as used in catalog files.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Europe => "EUROPE",
            Self::Asia => "ASIA",
            Self::NorthAmerica => "NORTH_AMERICA",
            Self::SouthAmerica => "SOUTH_AMERICA",
            Self::Africa => "AFRICA",
            Self::Oceania => "OCEANIA",
            Self::Antarctica => "ANTARCTICA",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a string names no continent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown continent: {0}")]
pub struct UnknownContinent(pub String);

impl FromStr for Continent {
    type Err = UnknownContinent;

    /// Accepts wire names (`NORTH_AMERICA`) and display names
    /// (`North America`), case-insensitive. Spaces, dashes and underscores
    /// are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Continent::ALL
            .into_iter()
            .find(|c| c.wire_name() == normalized)
            .or_else(|| match normalized.as_str() {
                "UNASSIGNED" => Some(Continent::None),
                _ => None,
            })
            .ok_or_else(|| UnknownContinent(s.to_string()))
    }
}
