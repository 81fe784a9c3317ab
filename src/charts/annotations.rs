use crate::policy_markers::{AnnotationPosition, PolicyMarker};

use super::figure::{Annotation, Figure, Line, Shape};

pub const DEFAULT_LINE_COLOR: &str = "black";

/// Draws a dashed vertical line across the full plot height for every marker, labeled at its top
/// or bottom right.
pub fn plot_vlines(figure: &mut Figure, markers: &[PolicyMarker], color: &str) {
    for marker in markers {
        figure.layout.shapes.push(Shape {
            kind: "line",
            xref: "x",
            yref: "paper",
            x0: marker.date,
            x1: marker.date,
            y0: 0.0,
            y1: 1.0,
            line: Line {
                color: color.to_string(),
                width: 2,
                dash: "dash",
            },
        });

        let (y, yanchor) = match marker.position() {
            AnnotationPosition::TopRight => (1.0, "top"),
            AnnotationPosition::BottomRight => (0.0, "bottom"),
        };

        figure.layout.annotations.push(Annotation {
            text: marker.label().to_string(),
            xref: "x",
            yref: "paper",
            x: marker.date,
            y,
            xanchor: "left",
            yanchor,
            showarrow: false,
        });
    }
}
