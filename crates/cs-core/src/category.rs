//! Passenger / subsection category.
//!
//! Every passenger carries exactly one category and every subsection serves
//! exactly one.  Routing in `cs-sim` is a straight equality match on this
//! enum.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Processing lane a passenger belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Nationals.
    Domestic,
    /// Everyone else.
    Foreign,
}

impl Category {
    /// All categories in canonical (report) order.
    pub const ALL: [Category; 2] = [Category::Domestic, Category::Foreign];

    /// Label used in CSV columns and report rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Domestic => "domestic",
            Category::Foreign  => "foreign",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Category::Domestic),
            "foreign"  => Ok(Category::Foreign),
            other => Err(CoreError::Parse(format!(
                "invalid category {other:?}: expected \"domestic\" or \"foreign\""
            ))),
        }
    }
}
