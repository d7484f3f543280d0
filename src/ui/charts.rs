use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, pos2, vec2};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, PlotUi, Points,
};
use iris_explorer::report::{Axes, BoxPanel, Chart, PairGrid, Series};
use iris_explorer::stats::{CorrelationMatrix, Histogram};

use crate::color::{ColorMap, diverging, text_on};

const CHART_HEIGHT: f32 = 320.0;
const PAIR_CELL: f32 = 170.0;
const HEATMAP_CELL: f32 = 90.0;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Draw one chart block. `idx` keeps plot ids unique within the report.
pub fn chart(ui: &mut Ui, idx: usize, chart: &Chart, colors: &ColorMap) {
    match chart {
        Chart::Line { axes, series } => line_chart(ui, idx, axes, series, colors),
        Chart::Bar { axes, bars } => bar_chart(ui, idx, axes, bars, colors),
        Chart::Histogram {
            axes,
            histogram,
            density,
        } => histogram_chart(ui, idx, axes, histogram, density.as_deref()),
        Chart::Scatter { axes, series } => scatter_chart(ui, idx, axes, series, colors),
        Chart::PairGrid(grid) => pair_grid(ui, idx, grid, colors),
        Chart::BoxGrid(panels) => box_grid(ui, idx, panels, colors),
        Chart::Heatmap(matrix) => heatmap(ui, matrix),
    }
}

/// Title label followed by a full-width plot with legend and axis labels.
fn titled_plot(ui: &mut Ui, id: impl std::hash::Hash, axes: &Axes, add: impl FnOnce(&mut PlotUi)) {
    ui.label(egui::RichText::new(&axes.title).strong());
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(axes.x_label.clone())
        .y_axis_label(axes.y_label.clone())
        .allow_scroll(false)
        .show(ui, add);
}

// ---------------------------------------------------------------------------
// Single-panel charts
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, idx: usize, axes: &Axes, series: &[Series], colors: &ColorMap) {
    titled_plot(ui, ("line", idx), axes, |plot_ui| {
        for s in series {
            let line = Line::new(PlotPoints::from(s.points.clone()))
                .name(&s.label)
                .color(colors.color_for(&s.label))
                .width(2.0);
            plot_ui.line(line);
        }
    });
}

fn scatter_chart(ui: &mut Ui, idx: usize, axes: &Axes, series: &[Series], colors: &ColorMap) {
    titled_plot(ui, ("scatter", idx), axes, |plot_ui| {
        for s in series {
            let points = Points::new(PlotPoints::from(s.points.clone()))
                .name(&s.label)
                .color(colors.color_for(&s.label))
                .radius(3.0);
            plot_ui.points(points);
        }
    });
}

fn bar_chart(ui: &mut Ui, idx: usize, axes: &Axes, bars: &[(String, f64)], colors: &ColorMap) {
    titled_plot(ui, ("bar", idx), axes, |plot_ui| {
        for (i, (label, value)) in bars.iter().enumerate() {
            let bar = Bar::new(i as f64, *value)
                .name(label)
                .fill(colors.color_for(label))
                .width(0.6);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(colors.color_for(label)));
        }
    });
}

fn histogram_chart(
    ui: &mut Ui,
    idx: usize,
    axes: &Axes,
    histogram: &Histogram,
    density: Option<&[[f64; 2]]>,
) {
    let fill = Color32::from_rgb(76, 114, 176);
    titled_plot(ui, ("histogram", idx), axes, |plot_ui| {
        plot_ui.bar_chart(histogram_bars(histogram, fill).name("count"));
        if let Some(curve) = density {
            plot_ui.line(
                Line::new(PlotPoints::from(curve.to_vec()))
                    .name("density")
                    .color(fill)
                    .width(2.0),
            );
        }
    });
}

fn histogram_bars(histogram: &Histogram, fill: Color32) -> BarChart {
    let width = histogram.bin_width();
    let bars = histogram
        .centers()
        .into_iter()
        .zip(&histogram.counts)
        .map(|(center, &count)| {
            Bar::new(center, count as f64)
                .width(width)
                .fill(fill.gamma_multiply(0.6))
                .stroke(Stroke::new(1.0, fill))
        })
        .collect();
    BarChart::new(bars).color(fill)
}

// ---------------------------------------------------------------------------
// Multi-panel charts
// ---------------------------------------------------------------------------

/// Fixed-size, non-interactive plot for grid cells.
fn small_plot(ui: &mut Ui, id: impl std::hash::Hash, size: f32, add: impl FnOnce(&mut PlotUi)) {
    Plot::new(id)
        .width(size)
        .height(size)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, add);
}

fn pair_grid(ui: &mut Ui, idx: usize, grid: &PairGrid, colors: &ColorMap) {
    legend_row(ui, &grid.labels, colors);
    egui::ScrollArea::horizontal()
        .id_salt(("pair_scroll", idx))
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new(("pair_grid", idx))
                .spacing(vec2(4.0, 4.0))
                .show(ui, |ui: &mut Ui| {
                    // header row
                    ui.label("");
                    for attr in &grid.attributes {
                        ui.vertical_centered(|ui: &mut Ui| ui.small(attr));
                    }
                    ui.end_row();

                    for (row, y_attr) in grid.attributes.iter().enumerate() {
                        ui.small(y_attr);
                        for col in 0..grid.attributes.len() {
                            let id = ("pair", idx, row, col);
                            if row == col {
                                small_plot(ui, id, PAIR_CELL, |plot_ui| {
                                    let cells = grid.labels.iter().zip(&grid.diagonal[row]);
                                    for (label, hist) in cells {
                                        let color = colors.color_for(label);
                                        plot_ui.bar_chart(histogram_bars(hist, color).name(label));
                                    }
                                });
                            } else {
                                small_plot(ui, id, PAIR_CELL, |plot_ui| {
                                    for (label, columns) in grid.labels.iter().zip(&grid.values) {
                                        let points: PlotPoints = columns[col]
                                            .iter()
                                            .zip(&columns[row])
                                            .map(|(&x, &y)| [x, y])
                                            .collect();
                                        plot_ui.points(
                                            Points::new(points)
                                                .name(label)
                                                .color(colors.color_for(label))
                                                .radius(2.0),
                                        );
                                    }
                                });
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

fn box_grid(ui: &mut Ui, idx: usize, panels: &[BoxPanel], colors: &ColorMap) {
    let labels: Vec<String> = panels
        .first()
        .map(|p| p.boxes.iter().map(|(l, _)| l.clone()).collect())
        .unwrap_or_default();
    legend_row(ui, &labels, colors);

    egui::Grid::new(("box_grid", idx))
        .spacing(vec2(8.0, 8.0))
        .show(ui, |ui: &mut Ui| {
            for (i, panel) in panels.iter().enumerate() {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(egui::RichText::new(&panel.attribute).strong());
                    Plot::new(("box", idx, i))
                        .width(420.0)
                        .height(260.0)
                        .allow_scroll(false)
                        .show(ui, |plot_ui| {
                            for (pos, (label, spread)) in panel.boxes.iter().enumerate() {
                                let color = colors.color_for(label);
                                let elem = BoxElem::new(
                                    pos as f64,
                                    BoxSpread::new(
                                        spread.lower_whisker,
                                        spread.q1,
                                        spread.median,
                                        spread.q3,
                                        spread.upper_whisker,
                                    ),
                                )
                                .name(label)
                                .box_width(0.6)
                                .fill(color.gamma_multiply(0.5))
                                .stroke(Stroke::new(1.5, color));
                                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label).color(color));
                            }
                        });
                });
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });
}

fn legend_row(ui: &mut Ui, labels: &[String], colors: &ColorMap) {
    ui.horizontal(|ui: &mut Ui| {
        for label in labels {
            ui.label(egui::RichText::new(format!("● {label}")).color(colors.color_for(label)));
        }
    });
}

/// Annotated correlation grid painted cell by cell.
fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.len();
    if n == 0 {
        return;
    }
    let label_w = 150.0;
    let size = vec2(label_w + HEATMAP_CELL * n as f32, 24.0 + HEATMAP_CELL * n as f32);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(13.0);

    for (j, name) in matrix.attributes.iter().enumerate() {
        let center = pos2(
            rect.left() + label_w + HEATMAP_CELL * (j as f32 + 0.5),
            rect.top() + 12.0,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            short(name),
            FontId::proportional(11.0),
            text_color,
        );
    }

    for (i, name) in matrix.attributes.iter().enumerate() {
        let top = rect.top() + 24.0 + HEATMAP_CELL * i as f32;
        painter.text(
            pos2(rect.left() + label_w - 6.0, top + HEATMAP_CELL / 2.0),
            Align2::RIGHT_CENTER,
            short(name),
            FontId::proportional(11.0),
            text_color,
        );
        for j in 0..n {
            let r = matrix.at(i, j);
            let fill = diverging(r);
            let cell = Rect::from_min_size(
                pos2(rect.left() + label_w + HEATMAP_CELL * j as f32, top),
                vec2(HEATMAP_CELL - 1.0, HEATMAP_CELL - 1.0),
            );
            painter.rect_filled(cell, 0.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                format!("{r:.2}"),
                font.clone(),
                text_on(fill),
            );
        }
    }
}

fn short(name: &str) -> &str {
    match name.find(" (") {
        Some(pos) => &name[..pos],
        None => name,
    }
}
