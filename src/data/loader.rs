use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord};

// Column names as written by the cleaning notebook.
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_SITE: &str = "Launch Site";
pub const COL_OUTCOME: &str = "class";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Problems with the shape or content of a launch table.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: outcome flag '{value}' is not 0 or 1")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: payload mass '{value}' is not a non-negative number")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: flight number '{value}' is not a non-negative integer")]
    InvalidFlightNumber { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the cleaned `spacex_launch_dash.csv` export
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – same columns, any numeric type for mass and outcome
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} across sites {:?}",
        dataset.len(),
        path.display(),
        dataset.sites
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by every format
// ---------------------------------------------------------------------------

fn parse_outcome(raw: &str, row: usize) -> Result<bool, DatasetError> {
    match raw.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "false" | "False" => Ok(false),
        other => Err(DatasetError::InvalidOutcome {
            row,
            value: other.to_string(),
        }),
    }
}

fn outcome_from_f64(v: f64, row: usize) -> Result<bool, DatasetError> {
    if v == 1.0 {
        Ok(true)
    } else if v == 0.0 {
        Ok(false)
    } else {
        Err(DatasetError::InvalidOutcome {
            row,
            value: v.to_string(),
        })
    }
}

fn parse_payload(raw: &str, row: usize) -> Result<f64, DatasetError> {
    let invalid = || DatasetError::InvalidPayload {
        row,
        value: raw.to_string(),
    };
    let mass = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    check_payload(mass, row).map_err(|_| invalid())
}

fn check_payload(mass: f64, row: usize) -> Result<f64, DatasetError> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(mass)
    } else {
        Err(DatasetError::InvalidPayload {
            row,
            value: mass.to_string(),
        })
    }
}

/// Pandas writes integer columns with NaNs as floats, so accept `"12.0"`.
fn parse_flight_number(raw: &str, row: usize) -> Result<u32, DatasetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32)
        })
        .ok_or_else(|| DatasetError::InvalidFlightNumber {
            row,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one launch per row.
/// Unknown columns (including the unnamed pandas index) are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

pub(crate) fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<LaunchDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let position = |name: &'static str| headers.iter().position(|h| h.trim() == name);
    let required = |name: &'static str| position(name).ok_or(DatasetError::MissingColumn(name));

    let site_idx = required(COL_SITE)?;
    let payload_idx = required(COL_PAYLOAD)?;
    let category_idx = required(COL_BOOSTER_CATEGORY)?;
    let outcome_idx = required(COL_OUTCOME)?;
    let flight_idx = position(COL_FLIGHT_NUMBER);
    let version_idx = position(COL_BOOSTER_VERSION);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        records.push(LaunchRecord {
            flight_number: match flight_idx {
                Some(i) => parse_flight_number(cell(i), row_no)?,
                None => 0,
            },
            site: cell(site_idx).to_string(),
            payload_mass_kg: parse_payload(cell(payload_idx), row_no)?,
            booster_version: version_idx.map(|i| cell(i).to_string()).unwrap_or_default(),
            booster_category: cell(category_idx).to_string(),
            outcome: parse_outcome(cell(outcome_idx), row_no)?,
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version": "F9 v1.0  B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let payload = match required_field(obj, COL_PAYLOAD)? {
            JsonValue::Number(n) => check_payload(n.as_f64().unwrap_or(f64::NAN), i)?,
            other => parse_payload(&json_text(other), i)?,
        };
        let outcome = match required_field(obj, COL_OUTCOME)? {
            JsonValue::Bool(b) => *b,
            JsonValue::Number(n) => outcome_from_f64(n.as_f64().unwrap_or(f64::NAN), i)?,
            other => parse_outcome(&json_text(other), i)?,
        };
        let flight_number = match obj.get(COL_FLIGHT_NUMBER) {
            None | Some(JsonValue::Null) => 0,
            Some(v) => parse_flight_number(&json_text(v), i)?,
        };

        records.push(LaunchRecord {
            flight_number,
            site: json_text(required_field(obj, COL_SITE)?),
            payload_mass_kg: payload,
            booster_version: obj.get(COL_BOOSTER_VERSION).map(json_text).unwrap_or_default(),
            booster_category: json_text(required_field(obj, COL_BOOSTER_CATEGORY)?),
            outcome,
        });
    }

    Ok(LaunchDataset::from_records(records))
}

fn required_field<'a>(
    obj: &'a Map<String, JsonValue>,
    name: &'static str,
) -> Result<&'a JsonValue, DatasetError> {
    obj.get(name).ok_or(DatasetError::MissingColumn(name))
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the launch table columns.
///
/// Text columns may be Utf8 or LargeUtf8; the payload, outcome and flight
/// number columns may be any integer, float or boolean type. Everything is
/// cast to a common type before rows are read.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, first_row: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site = column_as(batch, COL_SITE, &DataType::Utf8)?;
    let payload = column_as(batch, COL_PAYLOAD, &DataType::Float64)?;
    let category = column_as(batch, COL_BOOSTER_CATEGORY, &DataType::Utf8)?;
    let outcome = column_as(batch, COL_OUTCOME, &DataType::Float64)?;
    let flight = optional_column_as(batch, COL_FLIGHT_NUMBER, &DataType::Float64)?;
    let version = optional_column_as(batch, COL_BOOSTER_VERSION, &DataType::Utf8)?;

    let site = site.as_string::<i32>();
    let payload = payload.as_primitive::<Float64Type>();
    let category = category.as_string::<i32>();
    let outcome = outcome.as_primitive::<Float64Type>();
    let flight = flight.as_ref().map(|a| a.as_primitive::<Float64Type>());
    let version = version.as_ref().map(|a| a.as_string::<i32>());

    for i in 0..batch.num_rows() {
        let row = first_row + i;
        let text = |arr: &arrow::array::StringArray| {
            if arr.is_null(i) {
                String::new()
            } else {
                arr.value(i).to_string()
            }
        };
        let number = |arr: &arrow::array::Float64Array| {
            if arr.is_null(i) { f64::NAN } else { arr.value(i) }
        };

        let flight_number = match flight {
            Some(arr) if !arr.is_null(i) => parse_flight_number(&arr.value(i).to_string(), row)?,
            _ => 0,
        };

        out.push(LaunchRecord {
            flight_number,
            site: text(site),
            payload_mass_kg: check_payload(number(payload), row)?,
            booster_version: version.map(text).unwrap_or_default(),
            booster_category: text(category),
            outcome: outcome_from_f64(number(outcome), row)?,
        });
    }
    Ok(())
}

fn column_as(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef> {
    optional_column_as(batch, name, to)?.ok_or_else(|| DatasetError::MissingColumn(name).into())
}

fn optional_column_as(
    batch: &RecordBatch,
    name: &'static str,
    to: &DataType,
) -> Result<Option<ArrayRef>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let casted = cast(col, to).with_context(|| format!("casting column '{name}' to {to:?}"))?;
    Ok(Some(casted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,4,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
4,5,KSC LC-39A,1,9600.0,F9 FT B1031.2,FT
";

    fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(text.as_bytes())
    }

    #[test]
    fn test_read_csv_with_pandas_index_column() {
        let ds = read_csv(csv_reader(SAMPLE_CSV)).unwrap();

        assert_eq!(ds.len(), 5);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);

        let last = &ds.records[4];
        assert_eq!(last.flight_number, 5);
        assert_eq!(last.site, "KSC LC-39A");
        assert_eq!(last.payload_mass_kg, 9600.0);
        assert_eq!(last.booster_version, "F9 FT B1031.2");
        assert_eq!(last.booster_category, "FT");
        assert!(last.outcome);
        assert!(!ds.records[0].outcome);
    }

    #[test]
    fn test_read_csv_without_optional_columns() {
        let text = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,1\n";
        let ds = read_csv(csv_reader(text)).unwrap();
        assert_eq!(ds.records[0].flight_number, 0);
        assert_eq!(ds.records[0].booster_version, "");
    }

    #[test]
    fn test_read_csv_missing_column() {
        let text = "Launch Site,Payload Mass (kg),class\nA,100,1\n";
        let err = read_csv(csv_reader(text)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn(COL_BOOSTER_CATEGORY))
        );
    }

    #[test]
    fn test_read_csv_rejects_non_binary_outcome() {
        let text = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,2\n";
        let err = read_csv(csv_reader(text)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidOutcome { row: 0, value: "2".into() })
        );
    }

    #[test]
    fn test_read_csv_rejects_negative_payload() {
        let text = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,-5,FT,1\n";
        let err = read_csv(csv_reader(text)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidPayload { row: 0, .. })
        ));
    }

    #[test]
    fn test_parse_json_records() {
        let text = r#"[
            {"Flight Number": 7, "Launch Site": "VAFB SLC-4E", "class": 1,
             "Payload Mass (kg)": 9600, "Booster Version Category": "FT"},
            {"Launch Site": "CCAFS LC-40", "class": false,
             "Payload Mass (kg)": "2395.0", "Booster Version": "F9 v1.1",
             "Booster Version Category": "v1.1"}
        ]"#;
        let ds = parse_json(text).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flight_number, 7);
        assert_eq!(ds.records[0].payload_mass_kg, 9600.0);
        assert!(ds.records[0].outcome);
        assert_eq!(ds.records[1].payload_mass_kg, 2395.0);
        assert_eq!(ds.records[1].booster_version, "F9 v1.1");
        assert!(!ds.records[1].outcome);
    }

    #[test]
    fn test_parse_json_missing_site() {
        let text = r#"[{"class": 1, "Payload Mass (kg)": 1.0, "Booster Version Category": "FT"}]"#;
        let err = parse_json(text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn(COL_SITE))
        );
    }

    #[test]
    fn test_load_parquet_with_integer_outcome() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_OUTCOME, DataType::Int64, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(Float64Array::from(vec![0.0, 5300.0])),
                Arc::new(StringArray::from(vec!["v1.0", "B5"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!("spacex-dash-{}.parquet", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].flight_number, 2);
        assert_eq!(ds.records[1].site, "KSC LC-39A");
        assert_eq!(ds.records[1].payload_mass_kg, 5300.0);
        assert!(ds.records[1].outcome);
        assert!(!ds.records[0].outcome);
        assert_eq!(ds.records[0].booster_version, "");
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(load_file(Path::new("launches.xlsx")).is_err());
    }
}
