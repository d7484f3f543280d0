use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use iris_explorer::data::loader::DEFAULT_LABEL_FIELD;
use iris_explorer::report::Page;

/// Explore the Iris dataset (or any CSV/JSON/Parquet file with the same shape).
#[derive(Parser, Debug)]
#[command(name = "iris-explorer", version, about)]
pub struct Args {
    /// Load this file instead of the bundled Iris dataset
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Name of the categorical label column in --data and in files opened
    /// from the window; the bundled dataset always uses "species"
    #[arg(long, default_value = DEFAULT_LABEL_FIELD)]
    pub label_field: String,

    /// Which dashboard to open
    #[arg(short, long, value_enum, default_value_t = PageArg::Explorer)]
    pub page: PageArg,

    /// Print the report to stdout instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Output format for --headless
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Args {
    /// The requested label field when it cannot apply to the bundled dataset.
    pub fn unused_label_field(&self) -> Option<&str> {
        (self.data.is_none() && self.label_field != DEFAULT_LABEL_FIELD)
            .then_some(self.label_field.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    Explorer,
    Eda,
}

impl From<PageArg> for Page {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::Explorer => Page::Explorer,
            PageArg::Eda => Page::EdaReport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered report
    Text,
    /// Summary, grouped means and correlation as JSON
    Json,
}
