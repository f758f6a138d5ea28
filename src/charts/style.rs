//! Uniform look & feel for all charts.
//!
//! Presentation policy, not logic: every figure passes through [`apply`]
//! exactly once, so the dashboard reads as one system regardless of which
//! builder produced the chart.

use crate::charts::figure::{Figure, Font, Legend, Margin, Title};

pub const TEMPLATE: &str = "plotly_white";
pub const DEFAULT_HEIGHT: u32 = 360;

/// Apply the shared cosmetic contract: template, height, margins, a
/// left-anchored title, horizontal legend above the plot, closest-point
/// hover, and the common font size.
pub fn apply(mut fig: Figure, title: &str, height: u32) -> Figure {
    fig.layout.title = Some(Title {
        text: title.to_string(),
        x: 0.02,
        xanchor: "left".to_string(),
    });
    fig.layout.template = TEMPLATE.to_string();
    fig.layout.height = height;
    fig.layout.margin = Margin {
        t: 60,
        r: 16,
        b: 16,
        l: 16,
    };
    fig.layout.legend = Legend {
        orientation: "h".to_string(),
        yanchor: "bottom".to_string(),
        y: 1.02,
        xanchor: "left".to_string(),
        x: 0.0,
    };
    fig.layout.hover_mode = "closest".to_string();
    fig.layout.bar_gap = 0.15;
    fig.layout.font = Font { size: 12 };
    fig
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosmetic_contract_is_uniform() {
        let fig = apply(Figure::new(Vec::new()), "Some Chart", DEFAULT_HEIGHT);
        let layout = &fig.layout;

        let title = layout.title.as_ref().unwrap();
        assert_eq!(title.text, "Some Chart");
        assert_eq!(title.x, 0.02);
        assert_eq!(title.xanchor, "left");

        assert_eq!(layout.template, TEMPLATE);
        assert_eq!(layout.height, 360);
        assert_eq!((layout.margin.t, layout.margin.r), (60, 16));
        assert_eq!(layout.legend.orientation, "h");
        assert_eq!(layout.legend.y, 1.02);
        assert_eq!(layout.hover_mode, "closest");
        assert_eq!(layout.bar_gap, 0.15);
        assert_eq!(layout.font.size, 12);
    }

    #[test]
    fn height_override_is_respected() {
        let fig = apply(Figure::new(Vec::new()), "Tall", 420);
        assert_eq!(fig.layout.height, 420);
    }
}
