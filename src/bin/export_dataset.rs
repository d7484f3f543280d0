//! Write the bundled Iris dataset to disk so it can be reopened through the
//! dashboard's File menu or used by other tools.
//!
//! ```text
//! export_dataset iris.parquet iris.json iris.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use iris_explorer::data::export::save_file;
use iris_explorer::data::loader::load_bundled;

#[derive(Parser, Debug)]
#[command(name = "export_dataset", version, about)]
struct Args {
    /// Output files; the format follows each extension (.csv, .json, .parquet)
    #[arg(required = true, value_name = "FILE")]
    outputs: Vec<PathBuf>,

    /// Keep only the first N records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut dataset = load_bundled()?;
    if let Some(limit) = args.limit {
        let indices: Vec<usize> = (0..limit.min(dataset.len())).collect();
        dataset = dataset.subset(&indices);
    }

    for path in &args.outputs {
        save_file(&dataset, path).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {} records to {}", dataset.len(), path.display());
        println!("Wrote {}", path.display());
    }
    Ok(())
}
