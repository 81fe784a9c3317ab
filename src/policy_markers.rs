//! Hand-curated stability fee change dates, drawn as reference lines on every chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeDirection {
    Increased,
    Reduced,
}

impl FeeDirection {
    fn default_label(&self) -> &'static str {
        match self {
            FeeDirection::Increased => " Increased stability fee",
            FeeDirection::Reduced => " Reduced stability fee",
        }
    }
}

/// Where the marker's text sits relative to its line.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationPosition {
    TopRight,
    BottomRight,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PolicyMarker {
    pub date: NaiveDate,
    pub direction: FeeDirection,
    #[serde(default)]
    label: Option<String>,
}

impl PolicyMarker {
    pub fn new(date: NaiveDate, direction: FeeDirection) -> Self {
        Self {
            date,
            direction,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.direction.default_label())
    }

    pub fn position(&self) -> AnnotationPosition {
        match self.direction {
            FeeDirection::Reduced => AnnotationPosition::TopRight,
            FeeDirection::Increased => AnnotationPosition::BottomRight,
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid marker date")
}

/// The fee changes shown when the config file doesn't list any.
pub fn default_markers() -> Vec<PolicyMarker> {
    vec![
        PolicyMarker::new(ymd(2021, 6, 21), FeeDirection::Reduced),
        PolicyMarker::new(ymd(2021, 7, 19), FeeDirection::Increased),
        PolicyMarker::new(ymd(2022, 1, 25), FeeDirection::Reduced),
    ]
}
