use std::{fmt::Display, str::FromStr};

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time-bucketing unit applied to a daily series.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Sequence, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

use Granularity::*;

#[derive(Debug, Error)]
pub enum ParseGranularityError {
    #[error("failed to parse granularity {0}")]
    UnknownGranularity(String),
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Daily),
            "weekly" => Ok(Weekly),
            "monthly" => Ok(Monthly),
            unknown => Err(ParseGranularityError::UnknownGranularity(
                unknown.to_string(),
            )),
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Daily => write!(f, "daily"),
            Weekly => write!(f, "weekly"),
            Monthly => write!(f, "monthly"),
        }
    }
}

impl Granularity {
    /// Label used in chart titles, e.g. "Weekly".
    pub fn title(&self) -> &'static str {
        match self {
            Daily => "Daily",
            Weekly => "Weekly",
            Monthly => "Monthly",
        }
    }
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;

    use super::*;

    #[test]
    fn all_granularities_test() {
        let granularities = all::<Granularity>().collect::<Vec<_>>();
        assert_eq!(granularities, vec![Daily, Weekly, Monthly]);
    }

    #[test]
    fn parse_test() {
        assert_eq!("weekly".parse::<Granularity>().unwrap(), Weekly);
        assert!("W-MON".parse::<Granularity>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for granularity in all::<Granularity>() {
            assert_eq!(
                granularity.to_string().parse::<Granularity>().unwrap(),
                granularity
            );
        }
    }

    #[test]
    fn deserializes_lowercase_test() {
        let granularity: Granularity = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(granularity, Monthly);
        assert_eq!(granularity.title(), "Monthly");
    }
}
