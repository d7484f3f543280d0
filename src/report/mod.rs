/// Presentation model: what a dashboard page shows, independent of how it
/// is drawn.
///
/// ```text
///   Dataset ──► stats::{summarize, group_means, correlate, …}
///                    │
///                    ▼
///   page builder (explorer / eda) ──► Report { blocks }
///                    │
///          ┌─────────┴─────────┐
///          ▼                   ▼
///   TextRenderer          egui dashboard
/// ```

pub mod eda;
pub mod explorer;
pub mod json;
mod sections;
pub mod text;

use serde::Serialize;

use crate::data::Dataset;
use crate::stats::{CorrelationMatrix, FiveNumber, Histogram};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The two dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Page {
    /// Pair plot, box plots and correlation heatmap.
    #[default]
    Explorer,
    /// Line, bar, histogram and scatter charts.
    EdaReport,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Explorer, Page::EdaReport];

    pub fn title(self) -> &'static str {
        match self {
            Page::Explorer => "Iris Dataset Explorer",
            Page::EdaReport => "Exploratory Data Analysis of the Iris Dataset",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Page::Explorer => "Explorer",
            Page::EdaReport => "EDA report",
        }
    }

    /// Build this page's report. Never fails: a derived view that cannot be
    /// computed becomes a [`Block::Notice`].
    pub fn build(self, dataset: &Dataset) -> Report {
        match self {
            Page::Explorer => explorer::build(dataset),
            Page::EdaReport => eda::build(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Report blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Report {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Heading(text.into()));
    }

    pub fn subheading(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Subheading(text.into()));
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Text(text.into()));
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Notice(text.into()));
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn chart(&mut self, chart: Chart) {
        self.blocks.push(Block::Chart(chart));
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Chart(c) => Some(c),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Heading(String),
    Subheading(String),
    /// Prose; `**bold**` spans and `- ` bullet lines are the only markup.
    Text(String),
    /// Something could not be computed for the current selection.
    Notice(String),
    Table(Table),
    Chart(Chart),
}

/// A table whose first column holds row names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Points belonging to one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPanel {
    pub attribute: String,
    pub boxes: Vec<(String, FiveNumber)>,
}

/// Scatter-matrix data: `values[label][attribute]` plus per-label histograms
/// on the diagonal sharing one set of bin edges per attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairGrid {
    pub attributes: Vec<String>,
    pub labels: Vec<String>,
    pub values: Vec<Vec<Vec<f64>>>,
    pub diagonal: Vec<Vec<Histogram>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Chart {
    Line {
        axes: Axes,
        series: Vec<Series>,
    },
    Bar {
        axes: Axes,
        bars: Vec<(String, f64)>,
    },
    Histogram {
        axes: Axes,
        histogram: Histogram,
        /// KDE curve scaled to counts.
        density: Option<Vec<[f64; 2]>>,
    },
    Scatter {
        axes: Axes,
        series: Vec<Series>,
    },
    PairGrid(PairGrid),
    BoxGrid(Vec<BoxPanel>),
    Heatmap(CorrelationMatrix),
}

impl Chart {
    pub fn kind(&self) -> &'static str {
        match self {
            Chart::Line { .. } => "line chart",
            Chart::Bar { .. } => "bar chart",
            Chart::Histogram { .. } => "histogram",
            Chart::Scatter { .. } => "scatter plot",
            Chart::PairGrid(_) => "pair plot",
            Chart::BoxGrid(_) => "box plots",
            Chart::Heatmap(_) => "correlation heatmap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;

    #[test]
    fn test_pages_have_their_charts() {
        let ds = load_bundled().unwrap();

        let explorer = Page::Explorer.build(&ds);
        let kinds: Vec<&str> = explorer.charts().map(Chart::kind).collect();
        assert_eq!(kinds, vec!["pair plot", "box plots", "correlation heatmap"]);

        let eda = Page::EdaReport.build(&ds);
        let kinds: Vec<&str> = eda.charts().map(Chart::kind).collect();
        assert_eq!(kinds, vec!["line chart", "bar chart", "histogram", "scatter plot"]);
    }

    #[test]
    fn test_empty_selection_builds_notices() {
        let ds = load_bundled().unwrap().subset(&[]);
        for page in Page::ALL {
            let report = page.build(&ds);
            assert!(report.blocks.iter().any(|b| matches!(b, Block::Notice(_))));
            assert_eq!(report.charts().count(), 0);
        }
    }
}
