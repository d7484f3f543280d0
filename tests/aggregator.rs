//! Aggregator behaviour against the bundled Iris dataset and small
//! hand-built datasets.

use iris_explorer::StatsError;
use iris_explorer::data::loader::load_bundled;
use iris_explorer::data::{Dataset, Record, Schema};
use iris_explorer::stats::{correlate, group_means, summarize};

const TOL: f64 = 1e-6;

fn iris() -> Dataset {
    load_bundled().expect("bundled dataset loads")
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn summary_matches_known_iris_values() {
    let s = summarize(&iris()).unwrap();
    assert_eq!(s.attributes.len(), 4);

    let sepal = s.get("sepal length (cm)").unwrap();
    assert_eq!(sepal.count, 150);
    assert!(close(sepal.mean, 5.843333, TOL));
    assert!(close(sepal.std.unwrap(), 0.828066, TOL));
    assert_eq!(sepal.min, 4.3);
    assert!(close(sepal.q25, 5.1, 1e-9));
    assert!(close(sepal.median, 5.8, 1e-9));
    assert!(close(sepal.q75, 6.4, 1e-9));
    assert_eq!(sepal.max, 7.9);

    let petal = s.get("petal length (cm)").unwrap();
    assert!(close(petal.mean, 3.758, TOL));
    assert!(close(petal.median, 4.35, 1e-9));
    assert!(close(petal.std.unwrap(), 1.765298, TOL));
}

#[test]
fn summary_quartiles_are_ordered_for_every_attribute() {
    let s = summarize(&iris()).unwrap();
    for a in &s.attributes {
        assert!(a.min <= a.q25, "{}", a.name);
        assert!(a.q25 <= a.median, "{}", a.name);
        assert!(a.median <= a.q75, "{}", a.name);
        assert!(a.q75 <= a.max, "{}", a.name);
    }
}

#[test]
fn three_groups_of_fifty() {
    let ds = iris();
    let g = group_means(&ds, "species").unwrap();
    assert_eq!(g.groups.len(), 3);
    assert!(g.groups.iter().all(|group| group.count == 50));
    assert_eq!(g.groups.iter().map(|group| group.count).sum::<usize>(), ds.len());

    assert!(close(g.mean_of("setosa", "petal length (cm)").unwrap(), 1.462, TOL));
    assert!(close(g.mean_of("setosa", "petal width (cm)").unwrap(), 0.246, TOL));
    assert!(close(g.mean_of("versicolor", "sepal width (cm)").unwrap(), 2.770, TOL));
    assert!(close(g.mean_of("virginica", "petal length (cm)").unwrap(), 5.552, TOL));
    assert!(close(g.mean_of("virginica", "petal width (cm)").unwrap(), 2.026, TOL));
}

#[test]
fn group_sizes_sum_to_dataset_size_for_any_selection() {
    let ds = iris();
    let picks: Vec<usize> = (0..ds.len()).filter(|i| i % 7 == 0 || i % 11 == 3).collect();
    let sub = ds.subset(&picks);
    let g = group_means(&sub, sub.label_field()).unwrap();
    assert_eq!(g.groups.iter().map(|group| group.count).sum::<usize>(), sub.len());
}

#[test]
fn unknown_label_field_fails() {
    assert_eq!(
        group_means(&iris(), "genus").unwrap_err(),
        StatsError::UnknownField("genus".into())
    );
}

#[test]
fn iris_correlations() {
    let c = correlate(&iris()).unwrap();
    let r = |a: &str, b: &str| c.get(a, b).unwrap();
    assert!(close(r("petal length (cm)", "petal width (cm)"), 0.962865, TOL));
    assert!(close(r("sepal length (cm)", "petal length (cm)"), 0.871754, TOL));
    assert!(close(r("sepal length (cm)", "sepal width (cm)"), -0.117570, TOL));

    for i in 0..c.len() {
        assert_eq!(c.at(i, i), 1.0);
        for j in 0..c.len() {
            assert_eq!(c.at(i, j), c.at(j, i));
        }
    }
}

#[test]
fn doubled_attribute_correlates_exactly() {
    let schema = Schema::new(vec!["x".into(), "y".into()], "label");
    let records = [0.3, 1.7, 2.2, 5.9, 4.1, 8.05]
        .iter()
        .map(|&y| Record::new(vec![2.0 * y, y], "a"))
        .collect();
    let ds = Dataset::new(schema, records).unwrap();
    assert_eq!(correlate(&ds).unwrap().get("x", "y"), Some(1.0));
}

#[test]
fn empty_dataset_fails_to_summarize() {
    let empty = iris().subset(&[]);
    assert_eq!(summarize(&empty).unwrap_err(), StatsError::EmptyDataset);
}
