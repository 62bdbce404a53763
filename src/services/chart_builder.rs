//! Chart image URLs for the visualization report.
//!
//! Nothing here touches the network: each builder serializes a Chart.js
//! style specification into the `c` query parameter of the configured
//! chart service. An empty string means "no chart".

use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};

use crate::types::repository::{CommitActivitySeries, LanguageBreakdown, RepositoryStatistics};
use crate::types::settings::ChartSettings;

pub const BAR_LABELS: [&str; 5] = ["Stars", "Forks", "Open Issues", "Open PRs", "Closed PRs"];

/// Slice colors for the language pie, reused cyclically.
pub const PALETTE: [&str; 20] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF",
    "#FF9F40", "#C9CBCF", "#8DD17E", "#E7717D", "#5D6D7E",
    "#F67019", "#F53794", "#537BC4", "#ACC236", "#166A8F",
    "#00A950", "#58595B", "#8549BA", "#B4656F", "#2E86AB",
];

/// Color of the `index`-th pie slice.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// The three chart URLs of a visualization report; empty means omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartUrls {
    pub bar: String,
    pub pie: String,
    pub line: String,
}

/// Builds chart URLs against one chart service.
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    base_url: String,
    width: u32,
    height: u32,
}

impl ChartBuilder {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            width: settings.width,
            height: settings.height,
        }
    }

    pub fn build_all(
        &self,
        stats: &RepositoryStatistics,
        languages: &LanguageBreakdown,
        commits: &CommitActivitySeries,
    ) -> ChartUrls {
        ChartUrls {
            bar: self.bar_chart_url(stats),
            pie: self.pie_chart_url(languages),
            line: self.line_chart_url(commits),
        }
    }

    /// Bar chart of stars, forks, open issues, open PRs and closed PRs.
    pub fn bar_chart_url(&self, stats: &RepositoryStatistics) -> String {
        self.bar_chart_url_from_values([
            stats.stars as f64,
            stats.forks as f64,
            stats.open_issues as f64,
            stats.pull_requests.open as f64,
            stats.pull_requests.closed as f64,
        ])
    }

    /// Bar chart over the five `BAR_LABELS` values. Non-finite values count
    /// as zero; an all-zero vector yields no chart.
    pub fn bar_chart_url_from_values(&self, values: [f64; 5]) -> String {
        let values: Vec<f64> = values
            .iter()
            .map(|v| if v.is_finite() { *v } else { 0.0 })
            .collect();
        if values.iter().all(|v| *v == 0.0) {
            return String::new();
        }

        let spec = json!({
            "type": "bar",
            "data": {
                "labels": BAR_LABELS,
                "datasets": [{
                    "label": "Repository Statistics",
                    "data": values,
                    "backgroundColor": [
                        palette_color(0),
                        palette_color(1),
                        palette_color(2),
                        palette_color(3),
                        palette_color(4),
                    ],
                }],
            },
            "options": {
                "title": { "display": true, "text": "Repository Statistics" },
                "legend": { "display": false },
            },
        });
        self.render(&spec)
    }

    /// Pie chart with one slice per language.
    pub fn pie_chart_url(&self, languages: &LanguageBreakdown) -> String {
        if languages.total_bytes() == 0 {
            return String::new();
        }

        let labels: Vec<&str> = languages.iter().map(|(name, _)| name).collect();
        let data: Vec<u64> = languages.iter().map(|(_, bytes)| bytes).collect();
        let colors: Vec<&str> = (0..labels.len()).map(palette_color).collect();

        let spec = json!({
            "type": "pie",
            "data": {
                "labels": labels,
                "datasets": [{ "data": data, "backgroundColor": colors }],
            },
            "options": {
                "title": { "display": true, "text": "Language Distribution" },
                "legend": { "position": "right" },
            },
        });
        self.render(&spec)
    }

    /// Line chart of commits per month.
    pub fn line_chart_url(&self, series: &CommitActivitySeries) -> String {
        if series.total_commits() == 0 {
            return String::new();
        }

        let spec = json!({
            "type": "line",
            "data": {
                "labels": series.labels,
                "datasets": [{
                    "label": "Commits",
                    "data": series.data,
                    "fill": false,
                    "borderColor": palette_color(1),
                }],
            },
            "options": {
                "title": { "display": true, "text": "Commits Over Time" },
            },
        });
        self.render(&spec)
    }

    fn render(&self, spec: &Value) -> String {
        let encoded = match serde_json::to_string(spec) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "chart specification not serializable");
                return String::new();
            }
        };
        let width = self.width.to_string();
        let height = self.height.to_string();
        match Url::parse_with_params(
            &self.base_url,
            [("c", encoded.as_str()), ("width", width.as_str()), ("height", height.as_str())],
        ) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(base_url = %self.base_url, error = %e, "invalid chart service URL");
                String::new()
            }
        }
    }
}
