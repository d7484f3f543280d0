//! "Exploratory Data Analysis" page: line, bar, histogram and scatter charts.

use super::sections::{self, bare, extremes, label_series, pick_attribute, pretty};
use super::{Axes, Chart, Page, Report, Series};
use crate::data::Dataset;
use crate::stats::distribution::{mean, sample_std, sorted_copy};
use crate::stats::{GroupedMeans, gaussian_kde, histogram};

const HISTOGRAM_BINS: usize = 20;
const KDE_POINTS: usize = 100;

pub fn build(dataset: &Dataset) -> Report {
    let mut report = Report::new(Page::EdaReport.title());
    sections::intro(&mut report, dataset);
    sections::overview(&mut report, dataset);
    sections::summary_section(&mut report, dataset);
    let grouped = sections::comparison_section(&mut report, dataset);

    let petal = pick_attribute(dataset, "petal length (cm)", 2);
    let sepal = pick_attribute(dataset, "sepal length (cm)", 0);

    report.heading("Visualizations");
    if dataset.is_empty() {
        report.notice("No records selected; nothing to plot.");
    } else {
        report.text(
            "Four views of the data: a line chart, a bar chart, a histogram and a scatter plot.",
        );
        line_section(&mut report, dataset, petal);
        bar_section(&mut report, dataset, petal);
        histogram_section(&mut report, dataset, sepal);
        scatter_section(&mut report, dataset, sepal, petal);
    }

    report.heading("Key Insights");
    let mut bullets = vec![format!(
        "- **Dataset**: {} records, {} {} values, {} features, no missing values.",
        dataset.len(),
        dataset.labels().len(),
        dataset.label_field(),
        dataset.attributes().len()
    )];
    if let Some(g) = grouped.as_ref().filter(|g| g.groups.len() >= 2) {
        let ranked = separation_ranking(dataset, g);
        for group in &g.groups {
            let summary: Vec<String> = ranked
                .iter()
                .take(2)
                .map(|&(idx, _)| format!("{} ~{:.2}", bare(&g.attributes[idx]), group.means[idx]))
                .collect();
            bullets.push(format!("- **{}**: {}", group.label, summary.join(", ")));
        }
        if let [(best, best_gap), .., (worst, worst_gap)] = ranked.as_slice() {
            bullets.push(format!(
                "- {} separates the groups best (group means {best_gap:.1} standard deviations \
                 apart) and {} least ({worst_gap:.1}), which makes {} the most useful feature \
                 for classification.",
                pretty(bare(&g.attributes[*best])),
                bare(&g.attributes[*worst]),
                bare(&g.attributes[*best])
            ));
        }
    }
    report.text(bullets.join("\n"));

    report
}

/// Attributes ordered by the distance between the lowest and highest group
/// mean, measured in overall standard deviations.
fn separation_ranking(dataset: &Dataset, grouped: &GroupedMeans) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = (0..grouped.attributes.len())
        .filter_map(|idx| {
            let ((_, lo), (_, hi)) = extremes(grouped, idx)?;
            let std = sample_std(&dataset.column(idx))?;
            (std > 0.0).then_some((idx, (hi - lo) / std))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

fn line_section(report: &mut Report, dataset: &Dataset, attr: usize) {
    let name = &dataset.attributes()[attr];
    report.subheading(format!(
        "Line Chart: Sorted {} by {}",
        pretty(bare(name)),
        pretty(dataset.label_field())
    ));
    report.text(format!(
        "{} sorted in ascending order within each {}.",
        pretty(bare(name)),
        dataset.label_field()
    ));

    let series: Vec<Series> = dataset
        .labels()
        .iter()
        .map(|label| Series {
            label: label.clone(),
            points: sorted_copy(&dataset.column_for_label(attr, label))
                .into_iter()
                .enumerate()
                .map(|(i, v)| [i as f64, v])
                .collect(),
        })
        .collect();

    let ranges: Vec<String> = series
        .iter()
        .filter_map(|s| {
            let lo = s.points.first()?[1];
            let hi = s.points.last()?[1];
            Some(format!("{} spans {lo:.1} to {hi:.1} cm", s.label))
        })
        .collect();

    report.chart(Chart::Line {
        axes: Axes {
            title: format!("Sorted {} by {}", pretty(bare(name)), pretty(dataset.label_field())),
            x_label: "Sample Index".into(),
            y_label: pretty(name),
        },
        series,
    });
    report.text(format!("**Insight**: {}.", sections::join_names(&ranges)));
}

fn bar_section(report: &mut Report, dataset: &Dataset, attr: usize) {
    let name = &dataset.attributes()[attr];
    report.subheading(format!(
        "Bar Chart: Average {} by {}",
        pretty(bare(name)),
        pretty(dataset.label_field())
    ));
    report.text(format!("Average {} for each {}.", bare(name), dataset.label_field()));

    let mut bars: Vec<(String, f64)> = dataset
        .labels()
        .iter()
        .filter_map(|label| Some((label.clone(), mean(&dataset.column_for_label(attr, label))?)))
        .collect();

    report.chart(Chart::Bar {
        axes: Axes {
            title: format!("Average {} by {}", pretty(bare(name)), pretty(dataset.label_field())),
            x_label: pretty(dataset.label_field()),
            y_label: pretty(name),
        },
        bars: bars.clone(),
    });

    bars.sort_by(|a, b| b.1.total_cmp(&a.1));
    let ranked: Vec<String> = bars
        .iter()
        .map(|(label, m)| format!("{label} (~{m:.2} cm)"))
        .collect();
    report.text(format!(
        "**Insight**: ranked from longest to shortest: {}.",
        ranked.join(", ")
    ));
}

fn histogram_section(report: &mut Report, dataset: &Dataset, attr: usize) {
    let name = &dataset.attributes()[attr];
    report.subheading(format!("Histogram: Distribution of {}", pretty(bare(name))));
    report.text(format!("Distribution of {} across all selected records.", bare(name)));

    let values = dataset.column(attr);
    let Some(hist) = histogram(&values, HISTOGRAM_BINS) else {
        report.notice("Histogram unavailable: no values.");
        return;
    };

    // KDE rescaled from density to expected counts per bin.
    let lo = hist.edges[0];
    let hi = hist.edges[hist.edges.len() - 1];
    let grid: Vec<f64> = (0..KDE_POINTS)
        .map(|i| lo + (hi - lo) * i as f64 / (KDE_POINTS - 1) as f64)
        .collect();
    let scale = values.len() as f64 * hist.bin_width();
    let density = gaussian_kde(&values, &grid).map(|d| {
        grid.iter()
            .zip(d)
            .map(|(&x, y)| [x, y * scale])
            .collect::<Vec<_>>()
    });

    let peak = hist
        .counts
        .iter()
        .enumerate()
        .max_by_key(|(_, c)| **c)
        .map(|(i, _)| hist.centers()[i]);

    report.chart(Chart::Histogram {
        axes: Axes {
            title: format!("Distribution of {}", pretty(bare(name))),
            x_label: pretty(name),
            y_label: "Frequency".into(),
        },
        histogram: hist,
        density,
    });
    if let Some(peak) = peak {
        report.text(format!(
            "**Insight**: values run from {lo:.1} to {hi:.1} cm with the most common bin around \
             {peak:.2} cm; the several bumps reflect the different {} values.",
            dataset.label_field()
        ));
    }
}

fn scatter_section(report: &mut Report, dataset: &Dataset, x: usize, y: usize) {
    let (x_name, y_name) = (&dataset.attributes()[x], &dataset.attributes()[y]);
    report.subheading(format!(
        "Scatter Plot: {} vs. {} by {}",
        pretty(bare(x_name)),
        pretty(bare(y_name)),
        pretty(dataset.label_field())
    ));
    report.text(format!(
        "Relationship between {} and {}, coloured by {}.",
        bare(x_name),
        bare(y_name),
        dataset.label_field()
    ));

    let series = label_series(dataset, x, y);
    let ranges: Vec<String> = series
        .iter()
        .filter(|s| !s.points.is_empty())
        .map(|s| {
            let lo = s.points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
            let hi = s.points.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);
            format!("{} ({lo:.1}-{hi:.1} cm)", s.label)
        })
        .collect();

    report.chart(Chart::Scatter {
        axes: Axes {
            title: format!(
                "{} vs. {} by {}",
                pretty(bare(x_name)),
                pretty(bare(y_name)),
                pretty(dataset.label_field())
            ),
            x_label: pretty(x_name),
            y_label: pretty(y_name),
        },
        series,
    });
    report.text(format!(
        "**Insight**: {} ranges per group: {}.",
        pretty(bare(y_name)),
        ranges.join(", ")
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::report::Block;
    use crate::stats::group_means;

    fn charts(dataset: &Dataset) -> Vec<Chart> {
        build(dataset).charts().cloned().collect()
    }

    #[test]
    fn test_line_chart_is_sorted_per_label() {
        let ds = load_bundled().unwrap();
        let Some(Chart::Line { series, .. }) = charts(&ds).into_iter().next() else {
            panic!("first chart should be the line chart");
        };
        assert_eq!(series.len(), 3);
        for s in &series {
            assert_eq!(s.points.len(), 50);
            assert!(s.points.windows(2).all(|w| w[0][1] <= w[1][1]));
        }
        // setosa petals stay under 2 cm, virginica reaches 6.9
        assert!(series[0].points.last().unwrap()[1] < 2.0);
        assert_eq!(series[2].points.last().unwrap()[1], 6.9);
    }

    #[test]
    fn test_bar_chart_uses_group_means() {
        let ds = load_bundled().unwrap();
        let bars = charts(&ds)
            .into_iter()
            .find_map(|c| match c {
                Chart::Bar { bars, .. } => Some(bars),
                _ => None,
            })
            .unwrap();
        let virginica = bars.iter().find(|(l, _)| l == "virginica").unwrap().1;
        assert!((virginica - 5.552).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_has_twenty_bins_and_density() {
        let ds = load_bundled().unwrap();
        let (hist, density) = charts(&ds)
            .into_iter()
            .find_map(|c| match c {
                Chart::Histogram { histogram, density, .. } => Some((histogram, density)),
                _ => None,
            })
            .unwrap();
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.total(), 150);
        assert_eq!(density.map(|d| d.len()), Some(KDE_POINTS));
    }

    fn text_of(report: &Report) -> String {
        report
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_single_label_selection_still_renders() {
        let ds = load_bundled().unwrap();
        let setosa: Vec<usize> = (0..50).collect();
        let report = build(&ds.subset(&setosa));
        assert_eq!(report.charts().count(), 4);
        assert!(!text_of(&report).contains("separates the groups"));
    }

    #[test]
    fn test_insights_rank_features_by_group_separation() {
        let ds = load_bundled().unwrap();
        let ranked = separation_ranking(&ds, &group_means(&ds, "species").unwrap());
        let order: Vec<usize> = ranked.iter().map(|&(idx, _)| idx).collect();
        // petal width, petal length, sepal length, sepal width
        assert_eq!(order, vec![3, 2, 0, 1]);

        let text = text_of(&build(&ds));
        assert!(text.contains("- Petal Width separates the groups best"));
        assert!(text.contains("- **virginica**: petal width ~2.03, petal length ~5.55"));
    }
}
