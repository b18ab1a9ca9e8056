use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::filter::{filtered_indices, FilterSpec};
use super::model::{MonthBucket, SalesDataset};

// ---------------------------------------------------------------------------
// SalesSummary – KPIs plus chart-ready aggregate tables
// ---------------------------------------------------------------------------

/// Everything the dashboard derives from the filtered rows. Transient; rebuilt
/// on every filter change. `Default` is the empty-result degradation:
/// zero sales, zero orders, no top category, empty tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesSummary {
    /// Sum of sale amounts over the filtered rows.
    pub total_sales: f64,
    /// Number of filtered rows.
    pub total_orders: usize,
    /// Mode of the category column; ties go to the first-encountered
    /// category in filter order. `None` when no rows pass the filter.
    pub top_category: Option<String>,
    /// Category → summed amount, sorted ascending by amount.
    pub category_sales: Vec<(String, f64)>,
    /// Month → summed amount, chronological.
    pub monthly_sales: Vec<(MonthBucket, f64)>,
}

impl SalesSummary {
    /// Top-category KPI text, with the `N/A` sentinel for empty results.
    pub fn top_category_label(&self) -> &str {
        self.top_category.as_deref().unwrap_or("N/A")
    }

    /// Total-sales KPI text: `₹` plus the thousands-grouped rounded amount.
    pub fn total_sales_label(&self) -> String {
        format!("₹{}", group_thousands(self.total_sales.round() as i64))
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    let first_group = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == first_group % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ---------------------------------------------------------------------------
// The filter-aggregate pipeline
// ---------------------------------------------------------------------------

/// Run the full pipeline: filter the dataset, then aggregate the survivors.
/// Pure function of `(dataset, spec)`; no state persists between calls.
pub fn apply(dataset: &SalesDataset, spec: &FilterSpec) -> (Vec<usize>, SalesSummary) {
    let indices = filtered_indices(dataset, spec);
    let summary = summarize(dataset, &indices);
    (indices, summary)
}

/// Aggregate an already-filtered index set into KPIs and chart tables.
pub fn summarize(dataset: &SalesDataset, indices: &[usize]) -> SalesSummary {
    let mut total_sales = 0.0;
    // category → (occurrence count, first position in filter order)
    let mut category_counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut category_totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut monthly_totals: BTreeMap<MonthBucket, f64> = BTreeMap::new();

    for (pos, &idx) in indices.iter().enumerate() {
        let rec = &dataset.records[idx];
        total_sales += rec.amount;

        let entry = category_counts.entry(&rec.category).or_insert((0, pos));
        entry.0 += 1;

        *category_totals.entry(&rec.category).or_default() += rec.amount;
        *monthly_totals.entry(rec.month).or_default() += rec.amount;
    }

    let top_category = category_counts
        .into_iter()
        .min_by_key(|&(_, (count, first_seen))| (Reverse(count), first_seen))
        .map(|(cat, _)| cat.to_string());

    // BTreeMap iteration is alphabetical, and the sort is stable, so amount
    // ties keep a deterministic order.
    let mut category_sales: Vec<(String, f64)> = category_totals
        .into_iter()
        .map(|(cat, sum)| (cat.to_string(), sum))
        .collect();
    category_sales.sort_by(|a, b| a.1.total_cmp(&b.1));

    let monthly_sales: Vec<(MonthBucket, f64)> = monthly_totals.into_iter().collect();

    SalesSummary {
        total_sales,
        total_orders: indices.len(),
        top_category,
        category_sales,
        monthly_sales,
    }
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

    fn allow(pairs: &[(&str, &[&str])]) -> FilterSpec {
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
    fn ca_scenario_matches_expected_aggregates() {
        let ds = dataset();
        let spec = allow(&[
            (DIM_STATE, &["CA"]),
            (DIM_CATEGORY, &["Electronics", "Books"]),
        ]);

        let (indices, summary) = apply(&ds, &spec);
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(summary.total_sales, 150.0);
        assert_eq!(summary.total_orders, 2);
        // Both categories occur once; first-encountered wins the tie.
        assert_eq!(summary.top_category.as_deref(), Some("Electronics"));
        assert_eq!(
            summary.category_sales,
            vec![("Books".to_string(), 50.0), ("Electronics".to_string(), 100.0)]
        );
        assert_eq!(
            summary.monthly_sales,
            vec![(MonthBucket { year: 2023, month: 1 }, 150.0)]
        );
    }

    #[test]
    fn empty_result_degrades_to_zero_and_na() {
        let ds = dataset();
        let spec = allow(&[(DIM_STATE, &[])]);

        let (indices, summary) = apply(&ds, &spec);
        assert!(indices.is_empty());
        assert_eq!(summary.total_sales, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.top_category, None);
        assert_eq!(summary.top_category_label(), "N/A");
        assert!(summary.category_sales.is_empty());
        assert!(summary.monthly_sales.is_empty());
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn top_category_is_the_mode() {
        let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
        let ds = SalesDataset::from_records(vec![
            SalesRecord::new(d(1, 1), "CA".into(), "Books".into(), 1.0),
            SalesRecord::new(d(1, 2), "CA".into(), "Toys".into(), 1.0),
            SalesRecord::new(d(1, 3), "CA".into(), "Toys".into(), 1.0),
        ]);
        let summary = summarize(&ds, &[0, 1, 2]);
        assert_eq!(summary.top_category.as_deref(), Some("Toys"));
    }

    #[test]
    fn tables_sum_to_total_sales() {
        let ds = dataset();
        let (_, summary) = apply(&ds, &FilterSpec::new());

        let category_sum: f64 = summary.category_sales.iter().map(|(_, v)| v).sum();
        let monthly_sum: f64 = summary.monthly_sales.iter().map(|(_, v)| v).sum();
        assert_eq!(category_sum, summary.total_sales);
        assert_eq!(monthly_sum, summary.total_sales);
    }

    #[test]
    fn category_table_is_sorted_ascending_by_amount() {
        let ds = dataset();
        let (_, summary) = apply(&ds, &FilterSpec::new());
        let amounts: Vec<f64> = summary.category_sales.iter().map(|(_, v)| *v).collect();
        assert!(amounts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn monthly_table_is_chronological() {
        let ds = dataset();
        let (_, summary) = apply(&ds, &FilterSpec::new());
        let months: Vec<MonthBucket> = summary.monthly_sales.iter().map(|(m, _)| *m).collect();
        assert!(months.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(months.len(), 2);
    }

    #[test]
    fn currency_label_groups_thousands() {
        let summary = SalesSummary {
            total_sales: 1234567.4,
            ..Default::default()
        };
        assert_eq!(summary.total_sales_label(), "₹1,234,567");

        let refunds = SalesSummary {
            total_sales: -1500.0,
            ..Default::default()
        };
        assert_eq!(refunds.total_sales_label(), "₹-1,500");
    }
}
