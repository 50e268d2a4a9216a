use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DataError;
use super::schema;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell. Loaders type-guess each cell: an empty
/// field becomes `Missing`, a numeric literal becomes `Number`, anything
/// else stays `Text` verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl CellValue {
    /// Type-guess a raw text field from a delimited file.
    pub fn from_raw(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Missing;
        }
        if let Some(v) = parse_numeric(s) {
            return CellValue::Number(v);
        }
        CellValue::Text(s.to_string())
    }

    /// Coerce the cell to `f64`. `Number` cells pass through; `Text` cells
    /// go through [`parse_numeric`]; `Missing` is `None`. Numeric text and
    /// already-numeric cells coerce identically.
    pub fn to_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => parse_numeric(s),
            CellValue::Missing => None,
        }
    }

    /// Exact string comparison against a selector value. `Missing` never
    /// matches; `Number` compares by its display form (the same form the
    /// distinct-value lists are built from).
    pub fn text_eq(&self, wanted: &str) -> bool {
        match self {
            CellValue::Text(s) => s == wanted,
            CellValue::Number(v) => format!("{v}") == wanted,
            CellValue::Missing => false,
        }
    }
}

/// Parse a numeric literal: optional sign, ASCII digits, at most one
/// decimal point, digits on at least one side of it. Surrounding
/// whitespace is ignored. Exponents, `inf`, `nan`, underscores and
/// thousands separators are all rejected.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let t = s.trim();
    let unsigned = t.strip_prefix(['+', '-']).unwrap_or(t);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    let has_digit = int_part.chars().any(|c| c.is_ascii_digit())
        || frac_part.is_some_and(|f| f.chars().any(|c| c.is_ascii_digit()));
    if !has_digit {
        return None;
    }
    t.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// SurveyRow – one row of the table
// ---------------------------------------------------------------------------

/// A single survey record (one row of the source file).
#[derive(Debug, Clone)]
pub struct SurveyRow {
    /// Dynamic columns: column_name → value.
    pub cells: BTreeMap<String, CellValue>,
}

impl SurveyRow {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once per load and never mutated; every
/// downstream view works with row indices into `rows`.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    /// Column names in source-file order.
    pub columns: Vec<String>,
    /// All records (rows).
    pub rows: Vec<SurveyRow>,
    /// For each canonical selector column present, the sorted set of
    /// distinct values (the UI's candidate lists).
    pub selector_values: BTreeMap<String, BTreeSet<String>>,
}

impl SurveyTable {
    /// Build the table and its selector-value index from parsed rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<SurveyRow>) -> Self {
        let mut selector_values: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for col in schema::canonical::ALL {
            if !columns.iter().any(|c| c == col) {
                continue;
            }
            let values: BTreeSet<String> = rows
                .iter()
                .filter_map(|row| row.get(col))
                .filter(|cell| !matches!(cell, CellValue::Missing))
                .map(|cell| cell.to_string())
                .collect();
            selector_values.insert(col.to_string(), values);
        }
        SurveyTable {
            columns,
            rows,
            selector_values,
        }
    }

    /// Sorted distinct values of a selector column, empty if unknown.
    pub fn distinct(&self, column: &str) -> Vec<String> {
        self.selector_values
            .get(column)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Column normalization
// ---------------------------------------------------------------------------

/// Rename source columns to their canonical names, leaving all other
/// columns untouched. Idempotent: an entry whose canonical name is already
/// present and whose source name is gone is a no-op. A column absent under
/// both names is a schema error.
pub fn rename_columns(
    table: &SurveyTable,
    mapping: &[(&str, &str)],
) -> Result<SurveyTable, DataError> {
    let mut active: Vec<(&str, &str)> = Vec::new();
    for &(from, to) in mapping {
        if table.columns.iter().any(|c| c == from) {
            if from != to {
                active.push((from, to));
            }
        } else if !table.columns.iter().any(|c| c == to) {
            return Err(DataError::MissingColumn(from.to_string()));
        }
    }

    if active.is_empty() {
        return Ok(table.clone());
    }

    let columns = table
        .columns
        .iter()
        .map(|name| {
            active
                .iter()
                .find(|(from, _)| *from == name.as_str())
                .map(|(_, to)| to.to_string())
                .unwrap_or_else(|| name.clone())
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = row.cells.clone();
            for &(from, to) in &active {
                if let Some(value) = cells.remove(from) {
                    cells.insert(to.to_string(), value);
                }
            }
            SurveyRow { cells }
        })
        .collect();

    Ok(SurveyTable::from_rows(columns, rows))
}

// ---------------------------------------------------------------------------
// Duplicate-key validation
// ---------------------------------------------------------------------------

/// Report rows that repeat a (State, Survey, Area) triple. The dataset is
/// expected to hold at most one row per triple but this is never enforced;
/// duplicates are logged and the extractor's first-row-wins policy applies.
/// Returns the number of duplicate rows found.
pub fn report_duplicate_triples(table: &SurveyTable) -> usize {
    let mut seen: BTreeSet<(String, String, String)> = BTreeSet::new();
    let mut duplicates = 0;
    for row in &table.rows {
        let triple = (
            row.get(schema::canonical::STATE)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            row.get(schema::canonical::SURVEY)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            row.get(schema::canonical::AREA)
                .map(|c| c.to_string())
                .unwrap_or_default(),
        );
        if !seen.insert(triple.clone()) {
            log::warn!(
                "duplicate rows for {} | {} | {}",
                triple.0,
                triple.1,
                triple.2
            );
            duplicates += 1;
        }
    }
    duplicates
}
