use crate::errors::{DataFormatError, LoadError};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{cmp::Ordering, io::Read, path::Path};
use tokio::fs;
use tracing::info;

pub const OCCUPATION: &str = "Occupation";
pub const QUALITY_OF_SLEEP: &str = "Quality of Sleep";
pub const SLEEP_DURATION: &str = "Sleep Duration";

const REQUIRED_COLUMNS: [&str; 3] = [OCCUPATION, QUALITY_OF_SLEEP, SLEEP_DURATION];

/// One row of the source table. Columns other than the three below are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Quality of Sleep", deserialize_with = "integer_like")]
    pub quality_of_sleep: i64,
    #[serde(rename = "Sleep Duration")]
    pub sleep_duration: f64,
}

impl RawRecord {
    pub fn new(occupation: impl Into<String>, quality_of_sleep: i64, sleep_duration: f64) -> Self {
        Self {
            occupation: occupation.into(),
            quality_of_sleep,
            sleep_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRecord {
    pub occupation: String,
    pub quality_of_sleep: i64,
    pub sleep_duration: f64,
    pub count: u64,
}

/// Aggregated view of the source table. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<AggregatedRecord>,
    raw_count: usize,
}

impl Dataset {
    /// Groups rows by the exact (occupation, quality, duration) triple.
    /// Groups come out sorted by that triple.
    pub fn from_raw(rows: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut rows: Vec<RawRecord> = rows.into_iter().collect();
        let raw_count = rows.len();
        rows.sort_by(compare_raw);

        let mut records: Vec<AggregatedRecord> = Vec::new();
        for row in rows {
            if let Some(last) = records.last_mut() {
                if last.occupation == row.occupation
                    && last.quality_of_sleep == row.quality_of_sleep
                    && last.sleep_duration.total_cmp(&row.sleep_duration) == Ordering::Equal
                {
                    last.count += 1;
                    continue;
                }
            }
            records.push(AggregatedRecord {
                occupation: row.occupation,
                quality_of_sleep: row.quality_of_sleep,
                sleep_duration: row.sleep_duration,
                count: 1,
            });
        }

        Self { records, raw_count }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataFormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DataFormatError::MissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record)? {
            let row: RawRecord = record.deserialize(Some(&headers))?;
            let line = record.position().map_or(0, |pos| pos.line());
            validate_row(&row, line)?;
            rows.push(row);
        }

        Ok(Self::from_raw(rows))
    }

    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    /// Number of source rows the dataset was built from.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct quality values, ascending.
    pub fn quality_options(&self) -> Vec<i64> {
        let mut options: Vec<i64> = self.records.iter().map(|r| r.quality_of_sleep).collect();
        options.sort_unstable();
        options.dedup();
        options
    }

    pub fn default_selection(&self) -> Option<i64> {
        self.quality_options().first().copied()
    }

    pub fn filter(&self, quality: i64) -> Vec<&AggregatedRecord> {
        self.records
            .iter()
            .filter(|record| record.quality_of_sleep == quality)
            .collect()
    }
}

pub async fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path).await?;
    let dataset = Dataset::from_reader(bytes.as_slice())?;
    info!(
        path = %path.display(),
        rows = dataset.raw_count(),
        groups = dataset.records().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn compare_raw(a: &RawRecord, b: &RawRecord) -> Ordering {
    a.occupation
        .cmp(&b.occupation)
        .then(a.quality_of_sleep.cmp(&b.quality_of_sleep))
        .then(a.sleep_duration.total_cmp(&b.sleep_duration))
}

/// Accepts `7` as well as integer-valued floats such as `7.0`.
fn integer_like<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 => {
            Ok(value as i64)
        }
        _ => Err(de::Error::custom(format!("expected an integer, found '{raw}'"))),
    }
}

fn validate_row(row: &RawRecord, line: u64) -> Result<(), DataFormatError> {
    if row.occupation.is_empty() {
        return Err(DataFormatError::InvalidRow {
            line,
            message: format!("empty '{OCCUPATION}'"),
        });
    }
    if !row.sleep_duration.is_finite() {
        return Err(DataFormatError::InvalidRow {
            line,
            message: format!("'{SLEEP_DURATION}' must be a finite number"),
        });
    }
    Ok(())
}
