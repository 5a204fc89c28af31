//! Presentation-neutral dashboard views.
//!
//! Sections, tabs and panels describe *what* is shown (series, bars, map
//! markers, tables, text) from the assembler's data, already restricted by a
//! [`DashboardFilter`]. Front-ends only decide *how* to draw them.

mod metrics;
mod sections;
mod text;

pub use metrics::{format_number, format_thousands, key_metrics};
pub use sections::build_sections;

use serde::Serialize;

/// Whether a metric's deviation is good or bad news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Improving,
    Worsening,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    Line,
    Area,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: impl Into<String>, kind: SeriesKind, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
        }
    }
}

/// Horizontal reference line drawn across a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub guide: Option<Guide>,
}

impl ChartView {
    /// Smallest and largest x and y over all series and the guide.
    /// Returns `None` when there is nothing to plot.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter().copied());
        let (x0, y0) = points.next()?;
        let mut x = [x0, x0];
        let mut y = [y0, y0];
        for (px, py) in points {
            x = [x[0].min(px), x[1].max(px)];
            y = [y[0].min(py), y[1].max(py)];
        }
        if let Some(guide) = &self.guide {
            y = [y[0].min(guide.value), y[1].max(guide.value)];
        }
        Some((x, y))
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

/// Ranked horizontal bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    pub title: String,
    pub unit: String,
    pub bars: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub unit: String,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSection {
    pub heading: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub title: String,
    pub sections: Vec<TextSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Panel {
    Chart(ChartView),
    Bars(BarView),
    Map(MapView),
    Table(TableView),
    Text(TextBlock),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Chart(v) => &v.title,
            Panel::Bars(v) => &v.title,
            Panel::Map(v) => &v.title,
            Panel::Table(v) => &v.title,
            Panel::Text(v) => &v.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub title: String,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub tabs: Vec<Tab>,
}
