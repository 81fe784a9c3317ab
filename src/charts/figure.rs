//! Figures serialized the way plotly.js expects them: `{"data": [...], "layout": {...}}`.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum YAxis {
    #[serde(rename = "y")]
    Primary,
    #[serde(rename = "y2")]
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    /// Non-finite values serialize as null, which plotly draws as a gap.
    pub y: Vec<f64>,
    pub yaxis: YAxis,
}

impl ScatterTrace {
    pub fn new(name: impl Into<String>, x: Vec<NaiveDate>, y: Vec<f64>, yaxis: YAxis) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: name.into(),
            x,
            y,
            yaxis,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
    pub dash: &'static str,
}

/// A line shape. `x` is in data coordinates, `y` in paper coordinates where 0..1 spans the plot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x0: NaiveDate,
    pub x1: NaiveDate,
    pub y0: f64,
    pub y1: f64,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: NaiveDate,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub showarrow: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<ScatterTrace>,
    pub layout: Layout,
}

const FIGURE_WIDTH: u32 = 800;
const FIGURE_HEIGHT: u32 = 600;

impl Figure {
    pub fn new(title: &str) -> Self {
        Self {
            data: vec![],
            layout: Layout {
                title: title.into(),
                xaxis: Axis::default(),
                yaxis: Axis::default(),
                yaxis2: None,
                shapes: vec![],
                annotations: vec![],
                autosize: true,
                width: FIGURE_WIDTH,
                height: FIGURE_HEIGHT,
            },
        }
    }

    pub fn add_trace(&mut self, trace: ScatterTrace) {
        if trace.yaxis == YAxis::Secondary && self.layout.yaxis2.is_none() {
            self.layout.yaxis2 = Some(Axis {
                title: None,
                overlaying: Some("y"),
                side: Some("right"),
            });
        }
        self.data.push(trace);
    }

    pub fn set_x_title(&mut self, text: &str) {
        self.layout.xaxis.title = Some(text.into());
    }

    pub fn set_y_title(&mut self, yaxis: YAxis, text: &str) {
        match yaxis {
            YAxis::Primary => self.layout.yaxis.title = Some(text.into()),
            YAxis::Secondary => {
                let axis = self.layout.yaxis2.get_or_insert_with(|| Axis {
                    title: None,
                    overlaying: Some("y"),
                    side: Some("right"),
                });
                axis.title = Some(text.into());
            }
        }
    }
}
