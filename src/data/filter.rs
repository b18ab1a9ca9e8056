use std::collections::{BTreeMap, BTreeSet};

use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// FilterSpec: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection: maps dimension name → set of allowed values.
/// A dimension absent from the map means "no filter" (everything allowed);
/// a dimension present with an empty set means "exclude everything".
/// The two states are deliberately distinct.
pub type FilterSpec = BTreeMap<String, BTreeSet<String>>;

/// Initialise a [`FilterSpec`] with every value of every dimension selected
/// (the UI's starting state: show everything).
pub fn init_filter_spec(dataset: &SalesDataset) -> FilterSpec {
    super::model::DIMENSIONS
        .iter()
        .filter_map(|dim| {
            dataset
                .unique_values(dim)
                .map(|vals| (dim.to_string(), vals.clone()))
        })
        .collect()
}

/// Return indices of records that pass all active filters, in dataset order.
///
/// A record passes a dimension filter when:
/// * The dimension is not present in `spec` → passes (no constraint)
/// * The dimension name is unknown → ignored (permissive UI-driven usage)
/// * The allowed set is empty → nothing selected → fails
/// * The record's value is a member of the allowed set → passes
///
/// Membership is exact; no partial or fuzzy matching. Dimensions combine by
/// conjunction.
pub fn filtered_indices(dataset: &SalesDataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            for (dim, allowed) in spec {
                let Some(value) = rec.dimension_value(dim) else {
                    continue;
                };
                if allowed.is_empty() {
                    // Nothing selected for this dimension → hide everything
                    return false;
                }
                if !allowed.contains(value) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{SalesRecord, DIM_CATEGORY, DIM_STATE};
    use chrono::NaiveDate;

    fn dataset() -> SalesDataset {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        SalesDataset::from_records(vec![
            SalesRecord::new(d(2023, 1, 5), "CA".into(), "Electronics".into(), 100.0),
            SalesRecord::new(d(2023, 1, 20), "CA".into(), "Books".into(), 50.0),
            SalesRecord::new(d(2023, 2, 10), "NY".into(), "Electronics".into(), 75.0),
        ])
    }

    fn spec(pairs: &[(&str, &[&str])]) -> FilterSpec {
        pairs
            .iter()
            .map(|(dim, vals)| {
                (
                    dim.to_string(),
                    vals.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn no_spec_entries_passes_everything() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &FilterSpec::new()), vec![0, 1, 2]);
    }

    #[test]
    fn all_values_selected_returns_full_dataset() {
        let ds = dataset();
        let spec = init_filter_spec(&ds);
        assert_eq!(filtered_indices(&ds, &spec), vec![0, 1, 2]);
    }

    #[test]
    fn membership_is_a_conjunction_across_dimensions() {
        let ds = dataset();
        let spec = spec(&[
            (DIM_STATE, &["CA"]),
            (DIM_CATEGORY, &["Electronics", "Books"]),
        ]);
        assert_eq!(filtered_indices(&ds, &spec), vec![0, 1]);
    }

    #[test]
    fn empty_allowed_set_excludes_everything() {
        let ds = dataset();
        let spec = spec(&[(DIM_STATE, &[]), (DIM_CATEGORY, &["Electronics"])]);
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn unknown_dimensions_are_ignored() {
        let ds = dataset();
        let spec = spec(&[("warehouse", &["W1"]), (DIM_STATE, &["NY"])]);
        assert_eq!(filtered_indices(&ds, &spec), vec![2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let spec = spec(&[(DIM_STATE, &["CA"])]);
        let once = filtered_indices(&ds, &spec);
        let twice = filtered_indices(&ds, &spec);
        assert_eq!(once, twice);
    }
}
