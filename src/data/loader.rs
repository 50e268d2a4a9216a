use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{rename_columns, report_duplicate_triples, CellValue, SurveyRow, SurveyTable};
use super::schema;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a survey table from a file: parse, rename the
/// selector columns to their canonical names, and report (without
/// rejecting) duplicate selector triples.
pub fn load_survey(path: &Path) -> Result<SurveyTable, DataError> {
    let raw = load_file(path)?;
    let table = rename_columns(&raw, &schema::RENAME)?;
    let duplicates = report_duplicate_triples(&table);
    if duplicates > 0 {
        log::warn!("{duplicates} duplicate State/Survey/Area rows in {}", path.display());
    }
    Ok(table)
}

/// Parse a survey table from a file, without normalization. Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the primary format)
/// * `.json`    – records-oriented array, `df.to_json(orient='records')`
/// * `.parquet` – flat table of scalar columns
pub fn load_file(path: &Path) -> Result<SurveyTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SurveyTable, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::access(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells = columns
            .iter()
            .zip(record.iter())
            .map(|(name, field)| (name.clone(), CellValue::from_raw(field)))
            .collect();
        rows.push(SurveyRow { cells });
    }

    Ok(SurveyTable::from_rows(columns, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected shape: a top-level array of flat objects, one per record.
fn load_json(path: &Path) -> Result<SurveyTable, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::access(path, e))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::Malformed("expected top-level JSON array".to_string()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::Malformed(format!("row {i} is not a JSON object")))?;

        let mut cells = std::collections::BTreeMap::new();
        for (key, val) in obj {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            cells.insert(key.clone(), json_to_cell(val));
        }
        rows.push(SurveyRow { cells });
    }

    Ok(SurveyTable::from_rows(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Missing,
        JsonValue::Number(n) => match n.as_f64() {
            Some(v) => CellValue::Number(v),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) => CellValue::from_raw(s),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Scalar columns only: strings, ints, floats
/// and bools; nulls become `Missing`. Works with files written by both
/// Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SurveyTable, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::access(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        if columns.is_empty() {
            columns = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let cells = columns
                .iter()
                .enumerate()
                .map(|(col_idx, name)| (name.clone(), arrow_cell(batch.column(col_idx), row)))
                .collect();
            rows.push(SurveyRow { cells });
        }
    }

    Ok(SurveyTable::from_rows(columns, rows))
}

/// Read a single scalar cell out of an Arrow column.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            CellValue::from_raw(arr.value(row))
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            CellValue::from_raw(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Text(arr.value(row).to_string())
        }
        other => CellValue::Text(format!("{other:?}")),
    }
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

/// (modification time, byte length) of the file at load time. A changed
/// signature invalidates the cached table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileSignature {
    modified: SystemTime,
    len: u64,
}

impl FileSignature {
    fn of(path: &Path) -> Result<Self, DataError> {
        let meta = std::fs::metadata(path).map_err(|e| DataError::access(path, e))?;
        let modified = meta.modified().map_err(|e| DataError::access(path, e))?;
        Ok(FileSignature {
            modified,
            len: meta.len(),
        })
    }
}

/// Keyed memo table for loaded datasets: canonical path → (signature,
/// table). The table is expensive to parse and immutable afterwards, so a
/// hit hands back the same `Arc` until the underlying file changes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, (FileSignature, Arc<SurveyTable>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load through the cache, reparsing only when the file is new to the
    /// cache or its signature changed.
    pub fn load(&mut self, path: &Path) -> Result<Arc<SurveyTable>, DataError> {
        let key = path
            .canonicalize()
            .map_err(|e| DataError::access(path, e))?;
        let signature = FileSignature::of(&key)?;

        if let Some((cached_sig, table)) = self.entries.get(&key) {
            if *cached_sig == signature {
                log::debug!("dataset cache hit for {}", key.display());
                return Ok(Arc::clone(table));
            }
        }

        let table = Arc::new(load_survey(&key)?);
        log::info!(
            "loaded {} rows, {} columns from {}",
            table.len(),
            table.columns.len(),
            key.display()
        );
        self.entries.insert(key, (signature, Arc::clone(&table)));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{extract_indicator, filter_rows, IndicatorValue};
    use std::io::Write;

    const CSV_BODY: &str = "\
India/States/UTs,Survey,Area,Population and Household Profile - Urban population (%)
Bihar,NFHS-5,Total,11.3
Kerala,NFHS-5,Total,abc
Assam,NFHS-5,Total,
";

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_load_normalizes_and_type_guesses() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "survey.csv", CSV_BODY);

        let table = load_survey(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns[0], "State");
        assert_eq!(table.distinct("State"), vec!["Assam", "Bihar", "Kerala"]);

        let urban = "Population and Household Profile - Urban population (%)";
        assert_eq!(
            table.rows[0].get(urban),
            Some(&CellValue::Number(11.3))
        );
        assert_eq!(
            table.rows[1].get(urban),
            Some(&CellValue::Text("abc".to_string()))
        );
        assert_eq!(table.rows[2].get(urban), Some(&CellValue::Missing));
    }

    #[test]
    fn csv_load_feeds_the_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "survey.csv", CSV_BODY);
        let table = load_survey(&path).unwrap();
        let urban = "Population and Household Profile - Urban population (%)";

        let subset = filter_rows(&table, "Bihar", "NFHS-5", "Total");
        assert_eq!(
            extract_indicator(&table, &subset, urban),
            IndicatorValue::Value(11.3)
        );

        // Absent triple: empty raw view, N/A indicator, no error.
        let missing = filter_rows(&table, "Goa", "NFHS-4", "Urban");
        assert!(missing.is_empty());
        assert_eq!(
            extract_indicator(&table, &missing, urban),
            IndicatorValue::Unavailable
        );
    }

    #[test]
    fn missing_file_is_an_access_error() {
        let err = load_survey(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, DataError::Access { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("survey.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn missing_selector_column_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "Survey,Area\nNFHS-5,Total\n");
        let err = load_survey(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(col) if col == "India/States/UTs"));
    }

    #[test]
    fn json_records_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(
            &path,
            r#"[{"India/States/UTs":"Bihar","Survey":"NFHS-5","Area":"Total","x":45.2},
                {"India/States/UTs":"Kerala","Survey":"NFHS-5","Area":"Total","x":null}]"#,
        )
        .unwrap();

        let table = load_survey(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("x"), Some(&CellValue::Number(45.2)));
        assert_eq!(table.rows[1].get("x"), Some(&CellValue::Missing));
        assert_eq!(table.distinct("Survey"), vec!["NFHS-5"]);
    }

    #[test]
    fn cache_returns_the_same_table_for_an_unchanged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "survey.csv", CSV_BODY);

        let mut cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_reloads_when_the_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "survey.csv", CSV_BODY);

        let mut cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        assert_eq!(first.len(), 3);

        let extended = format!("{CSV_BODY}Goa,NFHS-5,Total,62.2\n");
        write_csv(dir.path(), "survey.csv", &extended);

        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 4);
    }
}
