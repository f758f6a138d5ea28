//! Serializable figure specification.
//!
//! A figure is traces plus layout, mirroring the wire shape the
//! presentation layer renders. Nothing here draws; the builders in this
//! crate only assemble data and the renderer applies it.

use serde::Serialize;

/// A renderable chart specification.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self {
            traces,
            layout: Layout::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Histogram(HistogramTrace),
    Pie(PieTrace),
    Box(BoxTrace),
    Heatmap(HeatmapTrace),
}

/// Axis data is either numeric or categorical labels.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AxisData {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScatterMode {
    #[serde(rename = "lines+markers")]
    LinesMarkers,
    #[serde(rename = "markers")]
    Markers,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: AxisData,
    pub y: Vec<f64>,
    pub mode: ScatterMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: AxisData,
    pub y: AxisData,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramTrace {
    pub x: Vec<f64>,
    pub nbinsx: usize,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// 0 for a full pie, fractions carve a donut.
    pub hole: f64,
    pub text_info: String,
    pub text_position: String,
}

/// Precomputed box; the renderer draws exactly these fences.
#[derive(Debug, Clone, Serialize)]
pub struct BoxTrace {
    pub name: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
    pub colorscale: String,
    pub zmin: f64,
    pub zmax: f64,
    pub show_values: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub template: String,
    pub height: u32,
    pub margin: Margin,
    pub legend: Legend,
    pub hover_mode: String,
    pub bar_gap: f64,
    pub font: Font,
    pub x_axis: Axis,
    pub y_axis: Axis,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<VerticalLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            title: None,
            template: String::new(),
            height: 0,
            margin: Margin::default(),
            legend: Legend::default(),
            hover_mode: String::new(),
            bar_gap: 0.0,
            font: Font { size: 0 },
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            shapes: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub xanchor: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
    pub b: u32,
    pub l: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Legend {
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    /// Explicit category order for ranked bars; renderers must not fall
    /// back to alphabetic ordering when this is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

/// Dotted marker line, used for the quartile overlay.
#[derive(Debug, Clone, Serialize)]
pub struct VerticalLine {
    pub x: f64,
    pub dash: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traces_serialize_with_a_type_tag() {
        let trace = Trace::Histogram(HistogramTrace {
            x: vec![1.0, 2.0],
            nbinsx: 10,
            opacity: 0.9,
        });
        let v = serde_json::to_value(&trace).unwrap();
        assert_eq!(v["type"], "histogram");
        assert_eq!(v["nbinsx"], 10);
    }

    #[test]
    fn axis_data_serializes_untagged() {
        let nums = serde_json::to_value(AxisData::Numbers(vec![1.0])).unwrap();
        assert!(nums.is_array());
        let labels = serde_json::to_value(AxisData::Labels(vec!["a".into()])).unwrap();
        assert_eq!(labels[0], "a");
    }

    #[test]
    fn orientation_uses_single_letter_codes() {
        assert_eq!(
            serde_json::to_value(Orientation::Horizontal).unwrap(),
            "h"
        );
        assert_eq!(serde_json::to_value(Orientation::Vertical).unwrap(), "v");
    }
}
