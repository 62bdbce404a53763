//! Property-based tests for chart URL building.

use proptest::prelude::*;
use reposcope::services::chart_builder::{palette_color, ChartBuilder, BAR_LABELS, PALETTE};
use reposcope::types::repository::{CommitActivitySeries, LanguageBreakdown};
use reposcope::types::settings::ChartSettings;
use reqwest::Url;
use serde_json::Value;

fn builder() -> ChartBuilder {
    ChartBuilder::new(&ChartSettings::default())
}

/// Decodes the chart specification from the `c` query parameter.
fn chart_spec(url: &str) -> Value {
    let url = Url::parse(url).expect("chart URL should parse");
    let (_, spec) = url
        .query_pairs()
        .find(|(k, _)| k == "c")
        .expect("chart URL should carry a c parameter");
    serde_json::from_str(&spec).expect("c parameter should be JSON")
}

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        1.0..1e7f64,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn bar_chart_is_empty_iff_no_finite_nonzero_value(values in prop::array::uniform5(arb_value())) {
        let url = builder().bar_chart_url_from_values(values);
        let has_data = values.iter().any(|v| v.is_finite() && *v != 0.0);

        prop_assert_eq!(url.is_empty(), !has_data);
        if has_data {
            let spec = chart_spec(&url);
            let labels: Vec<&str> = spec["data"]["labels"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            prop_assert_eq!(labels, BAR_LABELS.to_vec());
            for v in spec["data"]["datasets"][0]["data"].as_array().unwrap() {
                prop_assert!(v.as_f64().unwrap().is_finite());
            }
        }
    }

    #[test]
    fn pie_colors_cycle_through_palette(count in 1usize..60) {
        let languages = LanguageBreakdown::new((0..count).map(|i| (format!("Lang{:02}", i), 1000 + i as u64)));
        let spec = chart_spec(&builder().pie_chart_url(&languages));

        let colors = spec["data"]["datasets"][0]["backgroundColor"].as_array().unwrap().clone();
        prop_assert_eq!(colors.len(), count);
        for (i, color) in colors.iter().enumerate() {
            prop_assert_eq!(color.as_str().unwrap(), palette_color(i));
            prop_assert_eq!(palette_color(i), palette_color(i % PALETTE.len()));
        }
    }
}

#[test]
fn test_bar_chart_carries_all_labels() {
    let url = builder().bar_chart_url_from_values([1500.0, 200.0, 12.0, 3.0, 40.0]);
    assert!(url.starts_with("https://quickchart.io/chart?"));
    let spec = chart_spec(&url);
    assert_eq!(spec["type"], "bar");
    for label in ["Stars", "Forks", "Open Issues", "Open PRs", "Closed PRs"] {
        assert!(spec["data"]["labels"]
            .as_array()
            .unwrap()
            .iter()
            .any(|l| l == label));
    }
}

#[test]
fn test_pie_chart_empty_for_no_languages() {
    assert_eq!(builder().pie_chart_url(&LanguageBreakdown::default()), "");
}

#[test]
fn test_palette_has_twenty_distinct_colors() {
    let mut colors = PALETTE.to_vec();
    colors.sort();
    colors.dedup();
    assert_eq!(colors.len(), 20);
}

#[test]
fn test_line_chart() {
    let empty = CommitActivitySeries::default();
    assert_eq!(builder().line_chart_url(&empty), "");

    let quiet = CommitActivitySeries {
        labels: vec!["2024-01".to_string()],
        data: vec![0],
    };
    assert_eq!(builder().line_chart_url(&quiet), "");

    let busy = CommitActivitySeries {
        labels: vec!["2024-01".to_string(), "2024-02".to_string()],
        data: vec![8, 13],
    };
    let spec = chart_spec(&builder().line_chart_url(&busy));
    assert_eq!(spec["type"], "line");
    assert_eq!(spec["data"]["labels"][1], "2024-02");
    assert_eq!(spec["data"]["datasets"][0]["data"][0], 8);
}

#[test]
fn test_invalid_chart_base_degrades_to_empty() {
    let builder = ChartBuilder::new(&ChartSettings {
        base_url: "not a url".to_string(),
        ..ChartSettings::default()
    });
    assert_eq!(builder.bar_chart_url_from_values([1.0, 0.0, 0.0, 0.0, 0.0]), "");
}
