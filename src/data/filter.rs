use super::model::SurveyTable;
use super::schema;

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return indices of rows whose State, Survey and Area columns all equal
/// the given values, by exact string comparison (no case or whitespace
/// normalization). An empty result is a valid outcome, not an error.
///
/// A well-formed dataset yields at most one row per triple; nothing here
/// checks or relies on that.
pub fn filter_rows(table: &SurveyTable, state: &str, survey: &str, area: &str) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.get(schema::canonical::STATE).is_some_and(|c| c.text_eq(state))
                && row.get(schema::canonical::SURVEY).is_some_and(|c| c.text_eq(survey))
                && row.get(schema::canonical::AREA).is_some_and(|c| c.text_eq(area))
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Indicator extraction
// ---------------------------------------------------------------------------

/// A single displayed indicator: a value rounded to one decimal place, or
/// the "N/A" sentinel. Display code never sees an error from extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Value(f64),
    Unavailable,
}

impl std::fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorValue::Value(v) => write!(f, "{v}"),
            IndicatorValue::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Pull one indicator out of a filtered subset.
///
/// Every failure mode collapses to `Unavailable`: empty subset, column
/// absent from the table, value that won't coerce to a number. When the
/// subset holds more than one row the first row wins and the rest are
/// ignored.
pub fn extract_indicator(table: &SurveyTable, subset: &[usize], column: &str) -> IndicatorValue {
    let Some(&first) = subset.first() else {
        return IndicatorValue::Unavailable;
    };
    let Some(row) = table.rows.get(first) else {
        return IndicatorValue::Unavailable;
    };
    match row.get(column).and_then(|cell| cell.to_numeric()) {
        Some(v) => IndicatorValue::Value(round_tenth(v)),
        None => IndicatorValue::Unavailable,
    }
}

/// Round to one decimal place.
fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Cross-state comparison
// ---------------------------------------------------------------------------

/// Per-state values of one indicator, restricted by (Survey, Area) but
/// spanning all states. Entry order follows the row order of the table;
/// values that fail numeric coercion stay in as `None` so the series keeps
/// one entry per matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    /// Indicator column the values were taken from.
    pub column: String,
    /// (state, value) pairs, one per matching row.
    pub points: Vec<(String, Option<f64>)>,
}

impl ComparisonSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build the comparison series for one indicator column: rows matching the
/// (survey, area) pair, projected to (State, value). State is deliberately
/// unconstrained so the series carries one entry per state present.
pub fn compare_states(
    table: &SurveyTable,
    survey: &str,
    area: &str,
    column: &str,
) -> ComparisonSeries {
    let points = table
        .rows
        .iter()
        .filter(|row| {
            row.get(schema::canonical::SURVEY).is_some_and(|c| c.text_eq(survey))
                && row.get(schema::canonical::AREA).is_some_and(|c| c.text_eq(area))
        })
        .map(|row| {
            let state = row
                .get(schema::canonical::STATE)
                .map(|c| c.to_string())
                .unwrap_or_default();
            let value = row.get(column).and_then(|cell| cell.to_numeric());
            (state, value)
        })
        .collect();

    ComparisonSeries {
        column: column.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, SurveyRow, SurveyTable};

    const EDU: &str = "Female school attendance (%)";

    fn row(state: &str, survey: &str, area: &str, edu: &str) -> SurveyRow {
        SurveyRow {
            cells: [
                ("State", state),
                ("Survey", survey),
                ("Area", area),
                (EDU, edu),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), CellValue::from_raw(v)))
            .collect(),
        }
    }

    fn table(rows: Vec<SurveyRow>) -> SurveyTable {
        SurveyTable::from_rows(
            vec![
                "State".to_string(),
                "Survey".to_string(),
                "Area".to_string(),
                EDU.to_string(),
            ],
            rows,
        )
    }

    fn sample() -> SurveyTable {
        table(vec![
            row("Bihar", "NFHS-5", "Total", "45.2"),
            row("Bihar", "NFHS-5", "Urban", "60.1"),
            row("Kerala", "NFHS-5", "Total", "96.1"),
            row("Kerala", "NFHS-4", "Total", "94.0"),
            row("Assam", "NFHS-5", "Total", "*"),
        ])
    }

    #[test]
    fn filter_matches_all_three_columns_exactly() {
        let t = sample();
        let subset = filter_rows(&t, "Bihar", "NFHS-5", "Total");
        assert_eq!(subset, vec![0]);
        let row = &t.rows[subset[0]];
        assert!(row.get("State").unwrap().text_eq("Bihar"));
        assert!(row.get("Survey").unwrap().text_eq("NFHS-5"));
        assert!(row.get("Area").unwrap().text_eq("Total"));
    }

    #[test]
    fn filter_does_not_normalize_case_or_whitespace() {
        let t = sample();
        assert!(filter_rows(&t, "bihar", "NFHS-5", "Total").is_empty());
        assert!(filter_rows(&t, "Bihar ", "NFHS-5", "Total").is_empty());
    }

    #[test]
    fn filter_on_absent_triple_returns_empty_not_error() {
        let t = sample();
        assert!(filter_rows(&t, "Goa", "NFHS-5", "Total").is_empty());
        assert!(filter_rows(&t, "Bihar", "NFHS-4", "Urban").is_empty());
    }

    #[test]
    fn extract_on_empty_subset_is_unavailable() {
        let t = sample();
        assert_eq!(extract_indicator(&t, &[], EDU), IndicatorValue::Unavailable);
        assert_eq!(
            extract_indicator(&t, &[], "no such column"),
            IndicatorValue::Unavailable
        );
    }

    #[test]
    fn extract_on_absent_column_is_unavailable() {
        let t = sample();
        let subset = filter_rows(&t, "Bihar", "NFHS-5", "Total");
        assert_eq!(
            extract_indicator(&t, &subset, "no such column"),
            IndicatorValue::Unavailable
        );
    }

    #[test]
    fn extract_on_non_numeric_value_is_unavailable() {
        let t = sample();
        let subset = filter_rows(&t, "Assam", "NFHS-5", "Total");
        assert_eq!(subset.len(), 1);
        assert_eq!(
            extract_indicator(&t, &subset, EDU),
            IndicatorValue::Unavailable
        );
    }

    #[test]
    fn extract_rounds_to_one_decimal() {
        let t = table(vec![
            row("A", "NFHS-5", "Total", "42.37"),
            row("B", "NFHS-5", "Total", "42.34"),
        ]);
        let a = filter_rows(&t, "A", "NFHS-5", "Total");
        let b = filter_rows(&t, "B", "NFHS-5", "Total");
        assert_eq!(extract_indicator(&t, &a, EDU), IndicatorValue::Value(42.4));
        assert_eq!(extract_indicator(&t, &b, EDU), IndicatorValue::Value(42.3));
    }

    #[test]
    fn extract_first_row_wins_on_duplicate_triples() {
        let t = table(vec![
            row("Bihar", "NFHS-5", "Total", "45.2"),
            row("Bihar", "NFHS-5", "Total", "abc"),
        ]);
        let subset = filter_rows(&t, "Bihar", "NFHS-5", "Total");
        assert_eq!(subset.len(), 2);
        assert_eq!(
            extract_indicator(&t, &subset, EDU),
            IndicatorValue::Value(45.2)
        );
    }

    #[test]
    fn unavailable_displays_as_na() {
        assert_eq!(IndicatorValue::Unavailable.to_string(), "N/A");
        assert_eq!(IndicatorValue::Value(42.4).to_string(), "42.4");
    }

    #[test]
    fn compare_keeps_one_entry_per_matching_row() {
        let t = sample();
        let series = compare_states(&t, "NFHS-5", "Total", EDU);
        assert_eq!(
            series.points,
            vec![
                ("Bihar".to_string(), Some(45.2)),
                ("Kerala".to_string(), Some(96.1)),
                ("Assam".to_string(), None),
            ]
        );
    }

    #[test]
    fn compare_preserves_input_row_order() {
        let t = table(vec![
            row("Zanzibar", "NFHS-5", "Total", "1"),
            row("Alpha", "NFHS-5", "Total", "2"),
        ]);
        let series = compare_states(&t, "NFHS-5", "Total", EDU);
        let states: Vec<&str> = series.points.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(states, vec!["Zanzibar", "Alpha"]);
    }

    #[test]
    fn compare_with_no_matches_is_empty_not_error() {
        let t = sample();
        let series = compare_states(&t, "NFHS-3", "Rural", EDU);
        assert!(series.is_empty());
    }

    #[test]
    fn absent_triple_end_to_end_yields_na_and_empty_views() {
        let t = sample();
        let subset = filter_rows(&t, "Goa", "NFHS-4", "Rural");
        assert!(subset.is_empty());
        for column in [EDU, "another column"] {
            assert_eq!(
                extract_indicator(&t, &subset, column),
                IndicatorValue::Unavailable
            );
        }
    }
}
