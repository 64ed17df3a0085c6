use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a candle on the cake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandleId(pub u32);

/// Cake flavor. A closed two-way choice: anything that is not `"vanilla"`
/// falls back to chocolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Chocolate,
    Vanilla,
}

impl Flavor {
    /// Tag used in share fragments and by the flavor select.
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Chocolate => "chocolate",
            Flavor::Vanilla => "vanilla",
        }
    }

    /// Resolve a tag. Only an exact `"vanilla"` selects vanilla.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "vanilla" {
            Flavor::Vanilla
        } else {
            Flavor::Chocolate
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_fall_back_to_chocolate() {
        assert_eq!(Flavor::from_tag("vanilla"), Flavor::Vanilla);
        assert_eq!(Flavor::from_tag("chocolate"), Flavor::Chocolate);
        assert_eq!(Flavor::from_tag("Vanilla"), Flavor::Chocolate);
        assert_eq!(Flavor::from_tag(""), Flavor::Chocolate);
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(Flavor::Vanilla.to_string(), "vanilla");
        assert_eq!(Flavor::default().to_string(), "chocolate");
    }
}
