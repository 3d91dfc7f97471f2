//! Dataset analysis, widget insights and chart suggestions.
//!
//! Handlers talk to a [`SuggestionService`]; the shipped
//! [`HeuristicSuggestions`] derives everything from column profiles and
//! simple statistics so results are reproducible and need no network.

use common::chart::spec::BaseSpec;
use common::chart::value::{as_number, display};
use common::model::analysis::AiAnalysis;
use common::model::column::{ColumnProfile, ColumnType};
use common::model::datasource::DataSource;
use common::model::widget::Widget;
use common::model::widget_config::ChartType;
use common::model::Row;

const MAX_INSIGHTS: usize = 5;

/// An analysis before it gets an id and a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDraft {
    pub summary: String,
    pub insights: Vec<String>,
    pub suggested_chart_types: Vec<ChartType>,
    pub data_quality_notes: Vec<String>,
}

impl AnalysisDraft {
    pub fn into_analysis(self, id: String, data_source_id: String, created_at: String) -> AiAnalysis {
        AiAnalysis {
            id,
            data_source_id,
            summary: self.summary,
            insights: self.insights,
            suggested_chart_types: self.suggested_chart_types,
            data_quality_notes: self.data_quality_notes,
            created_at,
        }
    }
}

pub trait SuggestionService: Send + Sync {
    /// Describes a data source from its metadata and rows.
    fn analyze(&self, source: &DataSource, rows: &[Row]) -> AnalysisDraft;

    /// One-paragraph reading of a widget's rows; `None` when there is
    /// nothing worth saying.
    fn widget_insight(&self, widget: &Widget, rows: &[Row]) -> Option<String>;

    /// Chart types that suit the profiled columns, best first.
    fn suggest_chart_types(&self, profile: &[ColumnProfile]) -> Vec<ChartType>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSuggestions;

impl SuggestionService for HeuristicSuggestions {
    fn analyze(&self, source: &DataSource, rows: &[Row]) -> AnalysisDraft {
        let metadata = &source.metadata;
        let numeric: Vec<&ColumnProfile> = metadata
            .profile
            .iter()
            .filter(|p| p.column_type.is_numeric())
            .collect();

        let summary = format!(
            "{} has {} rows across {} columns, {} of them numeric.",
            source.name,
            metadata.row_count,
            metadata.column_count,
            numeric.len()
        );

        let insights = numeric
            .iter()
            .filter_map(|p| match (p.min, p.max, p.mean) {
                (Some(min), Some(max), Some(mean)) => Some(format!(
                    "{} ranges from {} to {} with an average of {}.",
                    p.name,
                    format_number(min),
                    format_number(max),
                    format_number(mean)
                )),
                _ => None,
            })
            .take(MAX_INSIGHTS)
            .collect();

        let mut data_quality_notes = Vec::new();
        if rows.is_empty() && metadata.row_count == 0 {
            data_quality_notes.push("The source holds no rows.".to_string());
        }
        for p in &metadata.profile {
            let missing = metadata.row_count.saturating_sub(p.non_empty);
            if missing > 0 {
                data_quality_notes.push(format!(
                    "{} is empty in {} of {} rows.",
                    p.name, missing, metadata.row_count
                ));
            }
        }

        AnalysisDraft {
            summary,
            insights,
            suggested_chart_types: self.suggest_chart_types(&metadata.profile),
            data_quality_notes,
        }
    }

    fn widget_insight(&self, widget: &Widget, rows: &[Row]) -> Option<String> {
        let keys = BaseSpec::from_config(&widget.config).axis_keys(rows);
        let points: Vec<(String, f64)> = rows
            .iter()
            .filter_map(|row| {
                let value = row.get(&keys.y).and_then(as_number)?;
                let label = row.get(&keys.x).map(display).unwrap_or_default();
                Some((label, value))
            })
            .collect();
        if points.is_empty() {
            return None;
        }

        let (high_label, high) = points
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .cloned()?;
        let (low_label, low) = points
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .cloned()?;
        let mean = points.iter().map(|(_, v)| v).sum::<f64>() / points.len() as f64;

        let mut text = format!(
            "{} peaks at {} ({}) and is lowest at {} ({}), averaging {}.",
            keys.y,
            format_number(high),
            high_label,
            format_number(low),
            low_label,
            format_number(mean)
        );
        if let (Some((_, first)), Some((_, last))) = (points.first(), points.last()) {
            if points.len() > 1 && *first != 0.0 {
                let change = (last - first) / first.abs() * 100.0;
                let direction = if change >= 0.0 { "up" } else { "down" };
                text.push_str(&format!(
                    " From first to last it is {} {}%.",
                    direction,
                    format_number(change.abs())
                ));
            }
        }
        Some(text)
    }

    fn suggest_chart_types(&self, profile: &[ColumnProfile]) -> Vec<ChartType> {
        let numeric = profile.iter().filter(|p| p.column_type.is_numeric()).count();
        let has = |t: ColumnType| profile.iter().any(|p| p.column_type == t);

        let mut suggested = Vec::new();
        if numeric > 0 {
            if has(ColumnType::Date) {
                suggested.extend([ChartType::Line, ChartType::Area]);
            }
            if has(ColumnType::Text) {
                suggested.extend([ChartType::Bar, ChartType::Pie]);
            }
            if numeric >= 2 {
                suggested.push(ChartType::Scatter);
            }
            if profile.len() == 1 {
                suggested.extend([ChartType::Stat, ChartType::Gauge]);
            }
            if suggested.is_empty() {
                suggested.push(ChartType::Bar);
            }
        }
        suggested.push(ChartType::Table);

        let mut unique = Vec::with_capacity(suggested.len());
        for chart in suggested {
            if !unique.contains(&chart) {
                unique.push(chart);
            }
        }
        unique
    }
}

/// Whole numbers without decimals, others with two.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::datasource::{
        DataSourceKind, DataSourceMetadata, DataSourceStatus, FileFormat,
    };
    use serde_json::json;

    fn profile(name: &str, column_type: ColumnType, non_empty: usize) -> ColumnProfile {
        ColumnProfile {
            name: name.into(),
            column_type,
            non_empty,
            sample: None,
            min: column_type.is_numeric().then_some(1.0),
            max: column_type.is_numeric().then_some(9.0),
            mean: column_type.is_numeric().then_some(4.5),
        }
    }

    #[test]
    fn suggestions_follow_column_types() {
        let service = HeuristicSuggestions;
        let dated = [
            profile("day", ColumnType::Date, 3),
            profile("sales", ColumnType::Number, 3),
        ];
        assert_eq!(
            service.suggest_chart_types(&dated),
            vec![ChartType::Line, ChartType::Area, ChartType::Table]
        );
        let text_only = [profile("name", ColumnType::Text, 3)];
        assert_eq!(service.suggest_chart_types(&text_only), vec![ChartType::Table]);
    }

    #[test]
    fn analysis_reports_ranges_and_gaps() {
        let source = DataSource {
            id: "ds".into(),
            user_id: "u".into(),
            organization_id: None,
            name: "Sales".into(),
            kind: DataSourceKind::File,
            format: FileFormat::Csv,
            raw_payload: None,
            metadata: DataSourceMetadata {
                row_count: 4,
                column_count: 2,
                columns: vec!["region".into(), "sales".into()],
                profile: vec![
                    profile("region", ColumnType::Text, 3),
                    profile("sales", ColumnType::Number, 4),
                ],
            },
            status: DataSourceStatus::Ready,
            error_message: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let draft = HeuristicSuggestions.analyze(&source, &[]);
        assert_eq!(
            draft.summary,
            "Sales has 4 rows across 2 columns, 1 of them numeric."
        );
        assert_eq!(
            draft.insights,
            vec!["sales ranges from 1 to 9 with an average of 4.50."]
        );
        assert_eq!(draft.data_quality_notes, vec!["region is empty in 1 of 4 rows."]);
        assert_eq!(draft.suggested_chart_types[0], ChartType::Bar);
    }

    #[test]
    fn widget_insight_reads_extremes_and_trend() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "w", "dashboardId": "d", "type": "bar", "title": "Sales",
            "config": {"xAxis": "month", "yAxis": "sales"}
        }))
        .unwrap();
        let rows: Vec<Row> = serde_json::from_value(json!([
            {"month": "Jan", "sales": 100},
            {"month": "Feb", "sales": 150}
        ]))
        .unwrap();
        assert_eq!(
            HeuristicSuggestions.widget_insight(&widget, &rows).as_deref(),
            Some(
                "sales peaks at 150 (Feb) and is lowest at 100 (Jan), averaging 125. \
                 From first to last it is up 50%."
            )
        );
        assert_eq!(HeuristicSuggestions.widget_insight(&widget, &[]), None);
    }
}
