//! Blocks shared by both pages.

use super::{Report, Series, Table};
use crate::data::Dataset;
use crate::stats::{AttributeSummary, GroupedMeans, SummaryStatistics, group_means, summarize};

pub(crate) const HEAD_ROWS: usize = 5;

pub(crate) fn fmt_num(v: f64) -> String {
    format!("{v:.3}")
}

/// "petal length (cm)" → "Petal Length (cm)"
pub(crate) fn pretty(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) if c.is_alphabetic() => c.to_uppercase().chain(chars).collect(),
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "petal length (cm)" → "petal length"
pub(crate) fn bare(name: &str) -> &str {
    match name.find(" (") {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Index of `preferred` if the schema has it, otherwise `fallback` clamped
/// to the last attribute.
pub(crate) fn pick_attribute(dataset: &Dataset, preferred: &str, fallback: usize) -> usize {
    dataset
        .attribute_index(preferred)
        .unwrap_or_else(|| fallback.min(dataset.attributes().len().saturating_sub(1)))
}

pub(crate) fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// One series per label: `(x, y)` taken from two attributes.
pub(crate) fn label_series(dataset: &Dataset, x_idx: usize, y_idx: usize) -> Vec<Series> {
    dataset
        .labels()
        .iter()
        .map(|label| Series {
            label: label.clone(),
            points: dataset
                .records()
                .iter()
                .filter(|r| &r.label == label)
                .map(|r| [r.values[x_idx], r.values[y_idx]])
                .collect(),
        })
        .collect()
}

/// Labels with the smallest and largest mean of one attribute.
pub(crate) fn extremes(
    grouped: &GroupedMeans,
    attr_idx: usize,
) -> Option<((&str, f64), (&str, f64))> {
    let mut iter = grouped.groups.iter().map(|g| (g.label.as_str(), g.means[attr_idx]));
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), cur| {
        (
            if cur.1 < lo.1 { cur } else { lo },
            if cur.1 > hi.1 { cur } else { hi },
        )
    }))
}

pub(crate) fn intro(report: &mut Report, dataset: &Dataset) {
    report.text(format!(
        "The Iris dataset is a classic in machine learning, introduced by the statistician \
         Ronald Fisher in 1936. This selection holds {} flowers across {} {} values ({}), each \
         described by {} measurements: {}. The sections below summarise the measurements, \
         compare the groups and chart the relationships between features.",
        dataset.len(),
        dataset.labels().len(),
        dataset.label_field(),
        join_names(dataset.labels()),
        dataset.attributes().len(),
        join_names(
            &dataset
                .attributes()
                .iter()
                .map(|a| bare(a).to_string())
                .collect::<Vec<_>>()
        ),
    ));
}

pub(crate) fn head_table(dataset: &Dataset, rows: usize) -> Table {
    let mut columns = vec![String::new()];
    columns.extend(dataset.attributes().iter().cloned());
    columns.push(dataset.label_field().to_string());

    let rows = dataset
        .records()
        .iter()
        .take(rows)
        .enumerate()
        .map(|(i, r)| {
            let mut row = vec![i.to_string()];
            row.extend(r.values.iter().map(|v| format!("{v:.1}")));
            row.push(r.label.clone());
            row
        })
        .collect();

    Table { columns, rows }
}

pub(crate) fn overview(report: &mut Report, dataset: &Dataset) {
    report.heading("Dataset Overview");
    report.text(format!(
        "Here are the first {} rows of the data:",
        HEAD_ROWS.min(dataset.len())
    ));
    report.table(head_table(dataset, HEAD_ROWS));
    report.text(format!(
        "Dataset shape: ({}, {}), {} numeric features plus the {} label. \
         Every value was validated on load, so there are no missing values.",
        dataset.len(),
        dataset.attributes().len() + 1,
        dataset.attributes().len(),
        dataset.label_field(),
    ));
}

pub(crate) fn summary_table(summary: &SummaryStatistics) -> Table {
    let mut columns = vec![String::new()];
    columns.extend(summary.attributes.iter().map(|a| a.name.clone()));

    let rows = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .iter()
        .map(|stat| {
            let mut row = vec![stat.to_string()];
            row.extend(summary.attributes.iter().map(|a| stat_cell(a, stat)));
            row
        })
        .collect();

    Table { columns, rows }
}

fn stat_cell(a: &AttributeSummary, stat: &str) -> String {
    match stat {
        "count" => a.count.to_string(),
        "mean" => fmt_num(a.mean),
        "std" => a.std.map(fmt_num).unwrap_or_else(|| "NaN".into()),
        "min" => fmt_num(a.min),
        "25%" => fmt_num(a.q25),
        "50%" => fmt_num(a.median),
        "75%" => fmt_num(a.q75),
        _ => fmt_num(a.max),
    }
}

/// Summary table plus commentary. Returns the statistics for later insights.
pub(crate) fn summary_section(report: &mut Report, dataset: &Dataset) -> Option<SummaryStatistics> {
    report.heading("Summary Statistics");
    let summary = match summarize(dataset) {
        Ok(s) => s,
        Err(e) => {
            report.notice(format!("Summary statistics unavailable: {e}"));
            return None;
        }
    };
    report.text("Summary statistics of the numerical features (in cm):");
    report.table(summary_table(&summary));

    let widest = summary
        .attributes
        .iter()
        .max_by(|a, b| (a.max - a.min).total_cmp(&(b.max - b.min)));
    let narrowest = summary
        .attributes
        .iter()
        .min_by(|a, b| (a.max - a.min).total_cmp(&(b.max - b.min)));
    if let (Some(w), Some(n)) = (widest, narrowest) {
        report.text(format!(
            "The features have different scales: {} ranges from {:.1} to {:.1} cm, while {} \
             ranges from {:.1} to {:.1} cm. The standard deviations differ too, so the \
             measurements vary by different amounts.",
            bare(&w.name),
            w.min,
            w.max,
            bare(&n.name),
            n.min,
            n.max,
        ));
    }
    Some(summary)
}

pub(crate) fn grouped_table(grouped: &GroupedMeans) -> Table {
    let mut columns = vec![grouped.label_field.clone()];
    columns.extend(grouped.attributes.iter().cloned());

    let rows = grouped
        .groups
        .iter()
        .map(|g| {
            let mut row = vec![g.label.clone()];
            row.extend(g.means.iter().map(|&m| fmt_num(m)));
            row
        })
        .collect();

    Table { columns, rows }
}

/// Grouped-means table plus commentary on which group is smallest and
/// largest per feature.
pub(crate) fn comparison_section(report: &mut Report, dataset: &Dataset) -> Option<GroupedMeans> {
    report.heading(format!("{} Comparison", pretty(dataset.label_field())));
    let grouped = match group_means(dataset, dataset.label_field()) {
        Ok(g) if !g.groups.is_empty() => g,
        Ok(_) => {
            report.notice("No records selected; nothing to compare.");
            return None;
        }
        Err(e) => {
            report.notice(format!("Group means unavailable: {e}"));
            return None;
        }
    };
    report.text(format!(
        "Mean values of each feature grouped by {}:",
        dataset.label_field()
    ));
    report.table(grouped_table(&grouped));

    if grouped.groups.len() > 1 {
        let lines: Vec<String> = grouped
            .attributes
            .iter()
            .enumerate()
            .filter_map(|(idx, attr)| {
                let ((lo, lo_v), (hi, hi_v)) = extremes(&grouped, idx)?;
                Some(format!(
                    "- {}: smallest in **{lo}** ({lo_v:.2} cm), largest in **{hi}** ({hi_v:.2} cm)",
                    pretty(bare(attr))
                ))
            })
            .collect();
        report.text(lines.join("\n"));
    }
    Some(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_and_bare() {
        assert_eq!(pretty("petal length (cm)"), "Petal Length (cm)");
        assert_eq!(bare("petal length (cm)"), "petal length");
        assert_eq!(bare("width"), "width");
    }

    #[test]
    fn test_join_names() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_names(&names(&["a"])), "a");
        assert_eq!(join_names(&names(&["a", "b", "c"])), "a, b and c");
    }
}
