//! Passenger and booth identifiers.
//!
//! Ordering matters: the server pool breaks queue-length ties by the lowest
//! `ServerId`, and passengers arriving on the same tick join their line in
//! `PassengerId` order.

use std::fmt;
use std::str::FromStr;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) as $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        /// Accepts the bare number as it appears in input CSVs.
        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }
    };
}

typed_id! {
    /// Passenger identity, taken from the arrivals manifest.
    pub struct PassengerId(u64) as "#";
}

typed_id! {
    /// Booth identity.  Unique across all subsections.
    pub struct ServerId(u32) as "S";
}
