use std::fmt::Write;

use super::{Block, Chart, Report, Table};

const BAR_WIDTH: usize = 40;

/// Plain-text rendering of a [`Report`] for terminals and logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        underline(&mut out, &report.title, '=');
        for block in &report.blocks {
            match block {
                Block::Heading(h) => {
                    out.push('\n');
                    underline(&mut out, h, '=');
                }
                Block::Subheading(h) => {
                    out.push('\n');
                    underline(&mut out, h, '-');
                }
                Block::Text(t) => {
                    let _ = writeln!(out, "{}\n", t.replace("**", ""));
                }
                Block::Notice(n) => {
                    let _ = writeln!(out, "[!] {n}\n");
                }
                Block::Table(t) => {
                    out.push_str(&render_table(t));
                    out.push('\n');
                }
                Block::Chart(c) => {
                    out.push_str(&render_chart(c));
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn underline(out: &mut String, text: &str, ch: char) {
    let _ = writeln!(out, "{text}");
    let _ = writeln!(out, "{}", ch.to_string().repeat(text.chars().count()));
}

/// Columns padded to their widest cell; the first column is left-aligned,
/// the rest right-aligned.
pub fn render_table(table: &Table) -> String {
    let n = table.columns.len();
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(n) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .take(n)
            .map(|(i, c)| {
                if i == 0 {
                    format!("{c:<w$}", w = widths[i])
                } else {
                    format!("{c:>w$}", w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(&table.columns));
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row));
    }
    out
}

pub fn render_chart(chart: &Chart) -> String {
    let mut out = String::new();
    match chart {
        Chart::Line { axes, series } | Chart::Scatter { axes, series } => {
            let points: usize = series.iter().map(|s| s.points.len()).sum();
            let _ = writeln!(
                out,
                "[{}] {} ({} vs {}): {} series, {points} points",
                chart.kind(),
                axes.title,
                axes.y_label,
                axes.x_label,
                series.len()
            );
        }
        Chart::Bar { axes, bars } => {
            let _ = writeln!(out, "[{}] {}", chart.kind(), axes.title);
            let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
            let label_w = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
            for (label, value) in bars {
                let len = if max > 0.0 {
                    ((value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let _ = writeln!(out, "  {label:<label_w$} {} {value:.2}", "#".repeat(len));
            }
        }
        Chart::Histogram { axes, histogram, .. } => {
            let _ = writeln!(out, "[{}] {}", chart.kind(), axes.title);
            let max = histogram.counts.iter().copied().max().unwrap_or(0);
            for (center, count) in histogram.centers().iter().zip(&histogram.counts) {
                let len = if max > 0 { count * BAR_WIDTH / max } else { 0 };
                let _ = writeln!(out, "  {center:>7.3} | {:<BAR_WIDTH$} {count}", "#".repeat(len));
            }
        }
        Chart::PairGrid(grid) => {
            let _ = writeln!(
                out,
                "[{}] {} x {} panels, coloured by {} labels",
                chart.kind(),
                grid.attributes.len(),
                grid.attributes.len(),
                grid.labels.len()
            );
        }
        Chart::BoxGrid(panels) => {
            let _ = writeln!(out, "[{}]", chart.kind());
            for panel in panels {
                let table = Table {
                    columns: ["", "whisker", "q1", "median", "q3", "whisker"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    rows: panel
                        .boxes
                        .iter()
                        .map(|(label, f)| {
                            let mut row = vec![label.clone()];
                            row.extend(
                                [f.lower_whisker, f.q1, f.median, f.q3, f.upper_whisker]
                                    .iter()
                                    .map(|v| format!("{v:.2}")),
                            );
                            row
                        })
                        .collect(),
                };
                let _ = writeln!(out, "  {}", panel.attribute);
                out.push_str(&render_table(&table));
            }
        }
        Chart::Heatmap(matrix) => {
            let _ = writeln!(out, "[{}]", chart.kind());
            let mut columns = vec![String::new()];
            columns.extend(matrix.attributes.iter().cloned());
            let rows = matrix
                .attributes
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let mut row = vec![name.clone()];
                    row.extend((0..matrix.len()).map(|j| format!("{:.2}", matrix.at(i, j))));
                    row
                })
                .collect();
            out.push_str(&render_table(&Table { columns, rows }));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::report::Page;

    #[test]
    fn test_table_alignment() {
        let table = Table {
            columns: vec!["".into(), "value".into()],
            rows: vec![vec!["a".into(), "1.5".into()], vec!["long".into(), "10.25".into()]],
        };
        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "      value");
        assert_eq!(lines[1], "a       1.5");
        assert_eq!(lines[2], "long  10.25");
    }

    #[test]
    fn test_renders_whole_report() {
        let ds = load_bundled().unwrap();
        let text = TextRenderer.render(&Page::Explorer.build(&ds));
        assert!(text.starts_with("Iris Dataset Explorer\n====="));
        assert!(text.contains("[correlation heatmap]"));
        assert!(text.contains("0.96"));
        assert!(!text.contains("**"));
    }
}
