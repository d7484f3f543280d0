mod app;
mod cli;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::IrisExplorerApp;
use cli::{Args, OutputFormat};
use iris_explorer::data::loader::{DEFAULT_LABEL_FIELD, load_bundled, load_file};
use iris_explorer::report::text::TextRenderer;
use iris_explorer::report::{Page, json};
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = match &args.data {
        Some(path) => load_file(path, &args.label_field)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            if let Some(field) = args.unused_label_field() {
                log::warn!(
                    "--label-field '{field}' does not apply to the bundled dataset \
                     (label column '{DEFAULT_LABEL_FIELD}'); it only applies to --data and File → Open"
                );
            }
            load_bundled()?
        }
    };
    log::info!(
        "Loaded {} records with attributes {:?}",
        dataset.len(),
        dataset.attributes()
    );

    let page = Page::from(args.page);

    if args.headless {
        let output = match args.format {
            OutputFormat::Text => TextRenderer.render(&page.build(&dataset)),
            OutputFormat::Json => json::to_string_pretty(&dataset).context("serializing views")?,
        };
        println!("{output}");
        return Ok(());
    }

    let mut state = AppState::new(page, args.label_field);
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iris Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(IrisExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
