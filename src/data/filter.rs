use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: which labels are selected
// ---------------------------------------------------------------------------

/// Set of selected label values. An empty set means nothing is shown.
pub type FilterState = BTreeSet<String>;

/// Initialise a [`FilterState`] with every label selected (i.e., show everything).
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    dataset.labels().iter().cloned().collect()
}

/// Return indices of records whose label is selected.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    if filters.is_empty() {
        return Vec::new();
    }
    // Everything selected, no filtering needed
    if dataset.labels().iter().all(|l| filters.contains(l)) {
        return (0..dataset.len()).collect();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.contains(&r.label))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, Schema};

    fn dataset() -> Dataset {
        Dataset::new(
            Schema::new(vec!["v".into()], "kind"),
            vec![
                Record::new(vec![1.0], "a"),
                Record::new(vec![2.0], "b"),
                Record::new(vec![3.0], "a"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_all_selected_shows_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn test_partial_selection() {
        let ds = dataset();
        let filters: FilterState = ["a".to_string()].into_iter().collect();
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn test_empty_selection_hides_everything() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &FilterState::new()).is_empty());
    }
}
