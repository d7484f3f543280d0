use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use iris_explorer::report::{Block, Report, Table};

use crate::color::ColorMap;
use crate::state::AppState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Report view (central panel)
// ---------------------------------------------------------------------------

/// Render the current report in the central panel.
pub fn report_view(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore it  (File → Open…)");
        });
        return;
    };

    let fallback;
    let colors = match &state.color_map {
        Some(cm) => cm,
        None => {
            fallback = ColorMap::new(&[]);
            &fallback
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.set_max_width(1000.0);
            render_report(ui, report, colors);
        });
}

fn render_report(ui: &mut Ui, report: &Report, colors: &ColorMap) {
    ui.label(RichText::new(&report.title).size(28.0).strong());
    ui.add_space(8.0);

    for (idx, block) in report.blocks.iter().enumerate() {
        match block {
            Block::Heading(h) => {
                ui.add_space(12.0);
                ui.heading(h);
                ui.separator();
            }
            Block::Subheading(h) => {
                ui.add_space(8.0);
                ui.label(RichText::new(h).size(18.0).strong());
            }
            Block::Text(t) => rich_text(ui, t),
            Block::Notice(n) => {
                ui.label(RichText::new(n).color(Color32::from_rgb(200, 120, 0)));
            }
            Block::Table(t) => table(ui, idx, t),
            Block::Chart(c) => charts::chart(ui, idx, c, colors),
        }
        ui.add_space(4.0);
    }
}

/// Prose with `**bold**` spans; every line is laid out separately.
fn rich_text(ui: &mut Ui, text: &str) {
    for line in text.lines() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for (i, part) in line.split("**").enumerate() {
                if part.is_empty() {
                    continue;
                }
                if i % 2 == 1 {
                    ui.label(RichText::new(part).strong());
                } else {
                    ui.label(part);
                }
            }
        });
    }
}

fn table(ui: &mut Ui, idx: usize, table: &Table) {
    let n = table.columns.len();
    if n == 0 {
        return;
    }
    ui.push_id(("table", idx), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(90.0))
            .columns(Column::auto().at_least(70.0), n - 1)
            .header(22.0, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in &table.rows {
                    body.row(20.0, |mut cells| {
                        for cell in row.iter().take(n) {
                            cells.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
