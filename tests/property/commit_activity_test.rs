//! Property-based tests for the weekly-to-monthly commit aggregation.

use std::collections::HashMap;

use chrono::DateTime;
use proptest::prelude::*;
use reposcope::services::commit_activity::monthly_series;
use reposcope::types::github::CommitWeekPayload;

// 2020-01-05 .. 2026-01-04, one timestamp per week
const FIRST_WEEK: i64 = 1_578_182_400;
const WEEK: i64 = 7 * 86_400;

fn arb_weeks() -> impl Strategy<Value = Vec<CommitWeekPayload>> {
    proptest::collection::vec((0i64..313, 0u64..500), 0..60).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(offset, total)| CommitWeekPayload {
                week: FIRST_WEEK + offset * WEEK,
                total,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn aggregation_preserves_totals_and_first_appearance(weeks in arb_weeks()) {
        let series = monthly_series(&weeks);

        prop_assert_eq!(series.labels.len(), series.data.len());
        prop_assert_eq!(
            series.data.iter().sum::<u64>(),
            weeks.iter().map(|w| w.total).sum::<u64>()
        );

        let mut expected_order: Vec<String> = Vec::new();
        let mut expected_sums: HashMap<String, u64> = HashMap::new();
        for w in &weeks {
            let month = DateTime::from_timestamp(w.week, 0).unwrap().format("%Y-%m").to_string();
            if !expected_order.contains(&month) {
                expected_order.push(month.clone());
            }
            *expected_sums.entry(month).or_default() += w.total;
        }
        prop_assert_eq!(&series.labels, &expected_order);
        for (label, count) in series.labels.iter().zip(&series.data) {
            prop_assert_eq!(expected_sums[label], *count);
        }
    }
}

#[test]
fn test_two_weeks_in_same_month_are_summed() {
    // 2024-05-05 and 2024-05-12 (UTC)
    let weeks = [
        CommitWeekPayload { week: 1_714_867_200, total: 5 },
        CommitWeekPayload { week: 1_715_472_000, total: 3 },
    ];
    let series = monthly_series(&weeks);
    assert_eq!(series.labels, vec!["2024-05".to_string()]);
    assert_eq!(series.data, vec![8]);
}
