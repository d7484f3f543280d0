//! "Iris Dataset Explorer": pair plot, box plots and correlation heatmap.

use super::sections::{self, bare, pick_attribute, pretty};
use super::{BoxPanel, Chart, Page, PairGrid, Report};
use crate::data::Dataset;
use crate::stats::{CorrelationMatrix, Histogram, correlate, five_number, histogram};

const PAIR_BINS: usize = 10;

pub fn build(dataset: &Dataset) -> Report {
    let mut report = Report::new(Page::Explorer.title());
    sections::intro(&mut report, dataset);
    sections::overview(&mut report, dataset);
    let summary = sections::summary_section(&mut report, dataset);
    let grouped = sections::comparison_section(&mut report, dataset);

    report.heading("Visualizations");

    report.subheading("Pair Plot");
    if dataset.is_empty() {
        report.notice("No records selected; nothing to plot.");
    } else {
        report.text(format!(
            "The pair plot shows every pair of features against each other, coloured by {}. \
             The diagonal holds each feature's histogram.",
            dataset.label_field()
        ));
        report.chart(Chart::PairGrid(pair_grid(dataset)));
        if let Some(text) = separation_commentary(dataset) {
            report.text(text);
        }
    }

    report.subheading("Box Plots");
    if dataset.is_empty() {
        report.notice("No records selected; nothing to plot.");
    } else {
        report.text(format!(
            "Box plots of each feature across {} values show how much the distributions overlap:",
            dataset.label_field()
        ));
        report.chart(Chart::BoxGrid(box_panels(dataset)));
        if let Some(text) = overlap_commentary(dataset) {
            report.text(text);
        }
    }

    report.subheading("Correlation Matrix");
    let correlation = match correlate(dataset) {
        Ok(c) => {
            report.text("Pearson correlations between the numerical features:");
            report.chart(Chart::Heatmap(c.clone()));
            report.text(correlation_commentary(&c));
            Some(c)
        }
        Err(e) => {
            report.notice(format!("Correlation matrix unavailable: {e}"));
            None
        }
    };

    report.heading("Key Insights");
    let mut bullets = vec![format!(
        "- The selection holds {} records across {} {} values.",
        dataset.len(),
        dataset.labels().len(),
        dataset.label_field()
    )];
    if let Some(g) = &grouped {
        let petal = pick_attribute(dataset, "petal length (cm)", 2);
        if let Some(((lo, lo_v), (hi, hi_v))) = sections::extremes(g, petal) {
            if lo != hi {
                bullets.push(format!(
                    "- **{lo}** has the smallest mean {} ({lo_v:.2} cm) and **{hi}** the largest \
                     ({hi_v:.2} cm).",
                    bare(&dataset.attributes()[petal])
                ));
            }
        }
    }
    if let Some((i, j, r)) = correlation.as_ref().and_then(CorrelationMatrix::strongest_pair) {
        bullets.push(format!(
            "- {} and {} are the most strongly correlated pair (r = {r:.2}); one of them may \
             be enough for classification.",
            pretty(bare(&dataset.attributes()[i])),
            bare(&dataset.attributes()[j])
        ));
    }
    if let Some(s) = &summary {
        if let Some(most) = s
            .attributes
            .iter()
            .filter(|a| a.std.is_some())
            .max_by(|a, b| a.std.unwrap_or(0.0).total_cmp(&b.std.unwrap_or(0.0)))
        {
            bullets.push(format!(
                "- {} varies the most (std {:.2} cm).",
                pretty(bare(&most.name)),
                most.std.unwrap_or(0.0)
            ));
        }
    }
    report.text(bullets.join("\n"));

    report
}

pub(crate) fn pair_grid(dataset: &Dataset) -> PairGrid {
    let attrs = dataset.attributes().len();
    let values: Vec<Vec<Vec<f64>>> = dataset
        .labels()
        .iter()
        .map(|label| {
            (0..attrs)
                .map(|idx| dataset.column_for_label(idx, label))
                .collect()
        })
        .collect();

    // Shared edges per attribute so stacked label histograms line up.
    let diagonal = (0..attrs)
        .map(|idx| {
            let all = dataset.column(idx);
            let Some(shared) = histogram(&all, PAIR_BINS) else {
                return Vec::new();
            };
            values
                .iter()
                .map(|per_label| rebin(&per_label[idx], &shared.edges))
                .collect()
        })
        .collect();

    PairGrid {
        attributes: dataset.attributes().to_vec(),
        labels: dataset.labels().to_vec(),
        values,
        diagonal,
    }
}

/// Count `values` into the equal-width bins described by `edges`; values
/// past either end land in the outermost bin.
fn rebin(values: &[f64], edges: &[f64]) -> Histogram {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins > 0 {
        let width = edges[1] - edges[0];
        for &v in values {
            let idx = ((v - edges[0]) / width).max(0.0) as usize;
            counts[idx.min(bins - 1)] += 1;
        }
    }
    Histogram {
        edges: edges.to_vec(),
        counts,
    }
}

pub(crate) fn box_panels(dataset: &Dataset) -> Vec<BoxPanel> {
    dataset
        .attributes()
        .iter()
        .enumerate()
        .map(|(idx, attr)| BoxPanel {
            attribute: attr.clone(),
            boxes: dataset
                .labels()
                .iter()
                .filter_map(|label| {
                    five_number(&dataset.column_for_label(idx, label)).map(|f| (label.clone(), f))
                })
                .collect(),
        })
        .collect()
}

/// Names the label whose range on some attribute does not touch any other
/// label's range, if there is one.
fn separation_commentary(dataset: &Dataset) -> Option<String> {
    if dataset.labels().len() < 2 {
        return None;
    }
    for (idx, attr) in dataset.attributes().iter().enumerate().rev() {
        for label in dataset.labels() {
            let own = dataset.column_for_label(idx, label);
            let own_max = own.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let own_min = own.iter().copied().fold(f64::INFINITY, f64::min);
            let others: Vec<f64> = dataset
                .records()
                .iter()
                .filter(|r| &r.label != label)
                .map(|r| r.values[idx])
                .collect();
            let others_min = others.iter().copied().fold(f64::INFINITY, f64::min);
            let others_max = others.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if own_max < others_min || own_min > others_max {
                return Some(format!(
                    "**{label}** forms a distinct cluster: its {} never overlaps with the other \
                     groups, while the remaining groups overlap more.",
                    bare(attr)
                ));
            }
        }
    }
    Some(format!(
        "No single feature separates one {} value from all the others; the groups overlap \
         on every axis.",
        dataset.label_field()
    ))
}

/// Picks the feature whose interquartile boxes overlap least across labels.
fn overlap_commentary(dataset: &Dataset) -> Option<String> {
    if dataset.labels().len() < 2 {
        return None;
    }
    let panels = box_panels(dataset);
    let overlap = |panel: &BoxPanel| -> f64 {
        let mut total = 0.0;
        for (i, (_, a)) in panel.boxes.iter().enumerate() {
            for (_, b) in &panel.boxes[i + 1..] {
                total += (a.q3.min(b.q3) - a.q1.max(b.q1)).max(0.0);
            }
        }
        total
    };
    let best = panels
        .iter()
        .min_by(|a, b| overlap(a).total_cmp(&overlap(b)))?;
    let worst = panels
        .iter()
        .max_by(|a, b| overlap(a).total_cmp(&overlap(b)))?;
    Some(format!(
        "{} shows the least overlap between groups and {} the most, so {} is the better \
         feature for telling the groups apart.",
        pretty(bare(&best.attribute)),
        bare(&worst.attribute),
        bare(&best.attribute)
    ))
}

fn correlation_commentary(c: &CorrelationMatrix) -> String {
    match c.strongest_pair() {
        Some((i, j, r)) => format!(
            "The strongest relationship is between {} and {} ({r:.2}): {}",
            bare(&c.attributes[i]),
            bare(&c.attributes[j]),
            if r >= 0.0 {
                "flowers with a larger value of one tend to have a larger value of the other."
            } else {
                "as one grows, the other tends to shrink."
            }
        ),
        None => "There is only one feature, so there are no pairs to compare.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::report::Block;

    #[test]
    fn test_pair_grid_diagonal_counts_match_labels() {
        let ds = load_bundled().unwrap();
        let grid = pair_grid(&ds);
        assert_eq!(grid.labels.len(), 3);
        assert_eq!(grid.values[0].len(), 4);
        for per_attr in &grid.diagonal {
            let total: usize = per_attr.iter().map(|h| h.total()).sum();
            assert_eq!(total, 150);
        }
    }

    #[test]
    fn test_box_panels_one_box_per_label() {
        let ds = load_bundled().unwrap();
        let panels = box_panels(&ds);
        assert_eq!(panels.len(), 4);
        assert!(panels.iter().all(|p| p.boxes.len() == 3));
    }

    #[test]
    fn test_commentary_mentions_setosa_and_petals() {
        let ds = load_bundled().unwrap();
        let report = build(&ds);
        let text: String = report
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("**setosa** forms a distinct cluster"));
        assert!(text.contains("between petal length and petal width (0.96)"));
    }

    #[test]
    fn test_degenerate_selection_reports_notice() {
        let ds = load_bundled().unwrap().subset(&[0]);
        let report = build(&ds);
        assert!(report.blocks.iter().any(
            |b| matches!(b, Block::Notice(n) if n.starts_with("Correlation matrix unavailable"))
        ));
    }
}
