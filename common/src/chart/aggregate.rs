//! Row filtering and grouping applied before a chart builds its series.

use crate::chart::spec::{AxisKeys, GroupSpec};
use crate::chart::value::{as_number, display};
use crate::model::widget_config::Aggregation;
use crate::model::Row;
use serde_json::{Map, Number, Value};

/// Keeps rows matching every filter. A scalar expects equality (compared as
/// displayed text, so `"1"` matches `1`); an array expects membership.
/// Null or structured expectations are ignored.
pub fn apply_filters(rows: &[Row], filters: Option<&Map<String, Value>>) -> Vec<Row> {
    let Some(filters) = filters.filter(|f| !f.is_empty()) else {
        return rows.to_vec();
    };
    rows.iter()
        .filter(|row| {
            filters.iter().all(|(field, expected)| {
                let actual = row.get(field).map(display);
                match expected {
                    Value::Array(options) => actual
                        .map(|a| options.iter().any(|o| display(o) == a))
                        .unwrap_or(false),
                    Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                        actual.as_deref() == Some(display(expected).as_str())
                    }
                    Value::Null | Value::Object(_) => true,
                }
            })
        })
        .cloned()
        .collect()
}

/// Groups rows by the group key (the x key when unset) in first-seen order
/// and aggregates the y column.
///
/// Output rows carry the group label under `keys.x` and the aggregate under
/// the returned y key, which is `keys.y`, or `"count"` when counting rows
/// without a value column.
pub fn group_rows(rows: &[Row], keys: &AxisKeys, group: &GroupSpec) -> (Vec<Row>, AxisKeys) {
    let group_key = group.group_by.as_deref().unwrap_or(keys.x.as_str());
    let y_key = if keys.y.is_empty() {
        "count".to_string()
    } else {
        keys.y.clone()
    };

    let mut groups: Vec<(String, Value, Vec<f64>, usize)> = Vec::new();
    for row in rows {
        let label_value = row.get(group_key).cloned().unwrap_or(Value::Null);
        let label = display(&label_value);
        let index = match groups.iter().position(|(l, ..)| *l == label) {
            Some(index) => index,
            None => {
                groups.push((label, label_value, Vec::new(), 0));
                groups.len() - 1
            }
        };
        let entry = &mut groups[index];
        entry.3 += 1;
        if let Some(n) = row.get(&keys.y).and_then(as_number) {
            entry.2.push(n);
        }
    }

    let grouped = groups
        .into_iter()
        .map(|(_, label_value, values, count)| {
            let mut row = Row::new();
            row.insert(keys.x.clone(), label_value);
            row.insert(y_key.clone(), aggregate(group.aggregation, &values, count));
            row
        })
        .collect();

    (
        grouped,
        AxisKeys {
            x: keys.x.clone(),
            y: y_key,
        },
    )
}

fn aggregate(aggregation: Aggregation, values: &[f64], count: usize) -> Value {
    let result = match aggregation {
        Aggregation::Count => Some(count as f64),
        Aggregation::Sum => Some(values.iter().sum()),
        Aggregation::Avg if values.is_empty() => None,
        Aggregation::Avg => Some(values.iter().sum::<f64>() / values.len() as f64),
        Aggregation::Min => values.iter().copied().reduce(f64::min),
        Aggregation::Max => values.iter().copied().reduce(f64::max),
    };
    result
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    fn keys(x: &str, y: &str) -> AxisKeys {
        AxisKeys {
            x: x.into(),
            y: y.into(),
        }
    }

    #[test]
    fn sums_per_group_in_first_seen_order() {
        let input = rows(json!([
            {"region": "North", "sales": 10},
            {"region": "South", "sales": 5},
            {"region": "North", "sales": "7"},
        ]));
        let group = GroupSpec {
            group_by: None,
            aggregation: Aggregation::Sum,
        };
        let (out, out_keys) = group_rows(&input, &keys("region", "sales"), &group);
        assert_eq!(out_keys, keys("region", "sales"));
        assert_eq!(
            out,
            rows(json!([
                {"region": "North", "sales": 17.0},
                {"region": "South", "sales": 5.0},
            ]))
        );
    }

    #[test]
    fn count_without_value_column_uses_count_key() {
        let input = rows(json!([{"k": "a"}, {"k": "a"}, {"k": "b"}]));
        let group = GroupSpec {
            group_by: None,
            aggregation: Aggregation::Count,
        };
        let (out, out_keys) = group_rows(&input, &keys("k", ""), &group);
        assert_eq!(out_keys.y, "count");
        assert_eq!(out[0]["count"], json!(2.0));
        assert_eq!(out[1]["count"], json!(1.0));
    }

    #[test]
    fn average_of_a_group_without_numbers_is_null() {
        let input = rows(json!([{"k": "a", "v": "n/a"}]));
        let group = GroupSpec {
            group_by: None,
            aggregation: Aggregation::Avg,
        };
        let (out, _) = group_rows(&input, &keys("k", "v"), &group);
        assert_eq!(out[0]["v"], Value::Null);
    }

    #[test]
    fn filters_match_scalars_and_memberships() {
        let input = rows(json!([
            {"region": "North", "year": 2023},
            {"region": "South", "year": 2024},
            {"region": "East", "year": 2024},
        ]));
        let filters: Map<String, Value> =
            serde_json::from_value(json!({"year": "2024", "region": ["South", "West"]})).unwrap();
        let out = apply_filters(&input, Some(&filters));
        assert_eq!(out, rows(json!([{"region": "South", "year": 2024}])));
        assert_eq!(apply_filters(&input, None).len(), 3);
    }
}
