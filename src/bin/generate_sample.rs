use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One row of the generated table, in the cleaned dataset's column layout.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// Booster generations in flight order: (category, flights, success rate, max payload).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.2, 800.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.7, 9600.0),
    ("B4", 11, 0.55, 7000.0),
    ("B5", 9, 0.85, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// SplitMix64: small, seedable, good enough for sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(rng: &mut SampleRng) -> Vec<LaunchRow> {
    let mut rows = Vec::new();
    let mut flight = 1;
    let mut serial = 3;

    for &(category, flights, success_rate, max_payload) in &ERAS {
        for _ in 0..flights {
            // Early flights carried dummy payloads recorded as 0 kg.
            let payload = if category == "v1.0" && rng.unit() < 0.4 {
                0.0
            } else {
                (rng.unit() * max_payload / 10.0).round() * 10.0
            };
            rows.push(LaunchRow {
                flight_number: flight,
                site: *rng.pick(&SITES),
                class: i64::from(rng.unit() < success_rate),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category}  B{serial:04}"),
                booster_category: category,
            });
            flight += 1;
            serial += 1;
        }
    }
    rows
}

fn write_csv(rows: &[LaunchRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[LaunchRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    println!(
        "Wrote {} launches to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        rows.len()
    );
    Ok(())
}
