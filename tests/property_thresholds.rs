//! Property tests for threshold metric queries
//!
//! Checks lookup and result-shaping invariants over random tables:
//! - nearest lookup picks a globally closest row
//! - list and "all" queries preserve order and length
//! - error transforms are exact complements
//! - aliases resolve to identical values
//! - confusion matrices account for every observation

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use umbral::metrics::{
    MaxCriteriaTable, MaxCriterion, MetricsTable, Summary, ThresholdMetric, ThresholdMetrics, ThresholdRow,
    ThresholdSpec,
};

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Rows with distinct thresholds in shuffled order, sharing one observation count
fn rows() -> impl Strategy<Value = Vec<ThresholdRow>> {
    (1u64..200, 1u64..200, btree_set(0u32..=1000, 1..25))
        .prop_flat_map(|(pos, neg, ts)| {
            let n = ts.len();
            let ts: Vec<f64> = ts.into_iter().map(|x| f64::from(x) / 1000.0).collect();
            (Just(ts).prop_shuffle(), vec((0..=pos, 0..=neg), n), Just(pos), Just(neg))
        })
        .prop_map(|(ts, counts, pos, neg)| {
            ts.into_iter()
                .zip(counts)
                .map(|(t, (tp, fp))| ThresholdRow::from_counts(t, neg - fp, fp, pos - tp, tp))
                .collect()
        })
}

/// Facade whose criteria table holds the true argmax of every metric
fn build(rows: Vec<ThresholdRow>) -> ThresholdMetrics {
    let criteria = ThresholdMetric::ALL
        .iter()
        .map(|&m| {
            let best = rows
                .iter()
                .max_by(|a, b| a.value(m).total_cmp(&b.value(m)))
                .expect("at least one row");
            MaxCriterion::new(m, best.threshold, best.value(m))
        })
        .collect();
    let table = MetricsTable::new(rows).expect("consistent counts");
    ThresholdMetrics::new(table, MaxCriteriaTable::new(criteria), ["0".to_string(), "1".to_string()])
}

// =============================================================================
// Lookup Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_locate_returns_closest_row(rows in rows(), t in 0.0f64..=1.0) {
        let metrics = build(rows);
        let found = metrics.locate_threshold(t).unwrap();
        let best = metrics
            .table()
            .thresholds()
            .map(|c| (c - t).abs())
            .fold(f64::INFINITY, f64::min);

        prop_assert_eq!((found.actual - t).abs(), best);
        prop_assert_eq!(metrics.table().rows()[found.row].threshold, found.actual);
        prop_assert_eq!(found.requested, t);
    }

    #[test]
    fn prop_stored_thresholds_match_exactly(rows in rows(), pick in any::<prop::sample::Index>()) {
        let metrics = build(rows);
        let idx = pick.index(metrics.table().len());
        let t = metrics.table().rows()[idx].threshold;
        let found = metrics.locate_threshold(t).unwrap();

        prop_assert_eq!(found.row, idx);
        prop_assert!(!found.is_fallback());
    }

    #[test]
    fn prop_out_of_range_rejected(rows in rows(), t in prop_oneof![1.0001f64..10.0, -10.0f64..-0.0001]) {
        let metrics = build(rows);
        prop_assert!(metrics.locate_threshold(t).is_err());
    }

    // -------------------------------------------------------------------------
    // Result Shaping Properties
    // -------------------------------------------------------------------------

    #[test]
    fn prop_list_preserves_order(rows in rows(), ts in vec(0.0f64..=1.0, 0..20)) {
        let metrics = build(rows);
        let result = metrics.metric("f1", ts.clone()).unwrap();

        prop_assert_eq!(result.len(), ts.len());
        prop_assert_eq!(result.thresholds().collect::<Vec<_>>(), ts);
        prop_assert!(matches!(result.summary(), Summary::Values(_)));
    }

    #[test]
    fn prop_all_follows_table_order(rows in rows()) {
        let metrics = build(rows);
        let result = metrics.metric("precision", ThresholdSpec::All).unwrap();

        prop_assert_eq!(result.len(), metrics.table().len());
        prop_assert_eq!(
            result.thresholds().collect::<Vec<_>>(),
            metrics.table().thresholds().collect::<Vec<_>>()
        );
    }

    #[test]
    fn prop_scalar_requests_collapse(rows in rows(), t in 0.0f64..=1.0) {
        let metrics = build(rows);
        prop_assert!(metrics.metric("accuracy", t).unwrap().value().is_some());
        prop_assert!(metrics.metric("accuracy", ThresholdSpec::Max).unwrap().value().is_some());
        prop_assert!(metrics.metric("accuracy", vec![t]).unwrap().value().is_none());
    }

    // -------------------------------------------------------------------------
    // Derived Metric Properties
    // -------------------------------------------------------------------------

    #[test]
    fn prop_error_complements_accuracy(rows in rows(), t in 0.0f64..=1.0) {
        let metrics = build(rows);
        let acc = metrics.accuracy(t).unwrap().value().unwrap();
        let err = metrics.error(t).unwrap().value().unwrap();
        prop_assert!((err - (1.0 - acc)).abs() < 1e-12);

        let min_acc = metrics.metric("min_per_class_accuracy", t).unwrap().value().unwrap();
        let max_err = metrics.max_per_class_error(t).unwrap().value().unwrap();
        prop_assert!((max_err - (1.0 - min_acc)).abs() < 1e-12);
    }

    #[test]
    fn prop_aliases_agree(rows in rows(), t in 0.0f64..=1.0) {
        let metrics = build(rows);
        let tpr = metrics.metric("tpr", t).unwrap().value();
        prop_assert_eq!(metrics.metric("recall", t).unwrap().value(), tpr);
        prop_assert_eq!(metrics.metric("sensitivity", t).unwrap().value(), tpr);
        prop_assert_eq!(metrics.metric("fallout", t).unwrap().value(), metrics.metric("fpr", t).unwrap().value());
        prop_assert_eq!(metrics.metric("missrate", t).unwrap().value(), metrics.metric("fnr", t).unwrap().value());
        prop_assert_eq!(metrics.metric("specificity", t).unwrap().value(), metrics.metric("tnr", t).unwrap().value());
    }

    // -------------------------------------------------------------------------
    // Confusion Matrix Properties
    // -------------------------------------------------------------------------

    #[test]
    fn prop_confusion_counts_sum_to_total(rows in rows(), ts in vec(0.0f64..=1.0, 0..5)) {
        let metrics = build(rows);
        let total = metrics.table().total_observations();
        let cms = metrics.confusion_matrices(&["f1", "accuracy"], &ts).unwrap().into_vec();

        prop_assert_eq!(cms.len(), ts.len() + 2);
        for cm in &cms {
            prop_assert_eq!(cm.total(), total);
        }
    }

    #[test]
    fn prop_default_confusion_is_single(rows in rows()) {
        let metrics = build(rows);
        let cms = metrics.confusion_matrices(&[], &[]).unwrap();
        prop_assert!(cms.single().is_some());
        prop_assert_eq!(cms.single().unwrap().total(), metrics.table().total_observations());
    }
}
