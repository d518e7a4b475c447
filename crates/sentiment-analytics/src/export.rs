//! CSV export and import of session history.
//!
//! Columns mirror [`AnalysisRecord`]: `text,sentiment,polarity,subjectivity,timestamp,emoji`.
//! Floats are written in shortest round-trip form, timestamps with
//! [`TIMESTAMP_FORMAT`].

use chrono::{Local, NaiveDateTime, TimeZone};
use csv::{Reader, StringRecord, Writer};
use sentiment_core::types::TIMESTAMP_FORMAT;
use sentiment_core::{AnalysisRecord, Result, SentimentCategory, SentimentError};
use std::io::{Read, Write};
use std::path::Path;

pub const CSV_COLUMNS: [&str; 6] = [
    "text",
    "sentiment",
    "polarity",
    "subjectivity",
    "timestamp",
    "emoji",
];

/// Write records as CSV (header included) to any writer.
pub fn write_csv<W: Write>(records: &[AnalysisRecord], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(CSV_COLUMNS)?;

    for record in records {
        writer.write_record([
            record.text.clone(),
            record.sentiment.to_string(),
            record.polarity.to_string(),
            record.subjectivity.to_string(),
            record.formatted_timestamp(),
            record.emoji.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render records as a CSV document.
pub fn to_csv(records: &[AnalysisRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| SentimentError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Save records to a CSV file.
pub fn save_csv(records: &[AnalysisRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    tracing::info!(path = %path.display(), records = records.len(), "Exported history");
    Ok(())
}

/// Parse CSV produced by [`write_csv`]. Columns are matched by header name.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<AnalysisRecord>> {
    let mut reader = Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(columns.parse(&row?)?);
    }
    Ok(records)
}

pub fn from_csv(data: &str) -> Result<Vec<AnalysisRecord>> {
    read_csv(data.as_bytes())
}

/// Load records from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Vec<AnalysisRecord>> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Header positions of the expected columns.
struct ColumnIndex([usize; 6]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut idx = [0usize; 6];
        for (slot, name) in idx.iter_mut().zip(CSV_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| SentimentError::InvalidCsv(format!("missing column '{}'", name)))?;
        }
        Ok(Self(idx))
    }

    fn field<'r>(&self, row: &'r StringRecord, column: usize) -> &'r str {
        row.get(self.0[column]).unwrap_or_default()
    }

    fn parse(&self, row: &StringRecord) -> Result<AnalysisRecord> {
        let sentiment: SentimentCategory = self.field(row, 1).parse()?;
        let polarity = parse_float(self.field(row, 2))?;
        let subjectivity = parse_float(self.field(row, 3))?;

        let raw_ts = self.field(row, 4);
        let naive = NaiveDateTime::parse_from_str(raw_ts.trim(), TIMESTAMP_FORMAT).map_err(|e| {
            SentimentError::Timestamp {
                value: raw_ts.to_string(),
                message: e.to_string(),
            }
        })?;
        let timestamp = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| SentimentError::Timestamp {
                value: raw_ts.to_string(),
                message: "not a valid local time".into(),
            })?;

        Ok(AnalysisRecord {
            text: self.field(row, 0).to_string(),
            sentiment,
            polarity,
            subjectivity,
            timestamp,
            emoji: self.field(row, 5).to_string(),
        })
    }
}

fn parse_float(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| SentimentError::InvalidCsv(format!("invalid number '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn ts(h: u32, m: u32, s: u32) -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 14, h, m, s).earliest().unwrap()
    }

    fn sample() -> Vec<AnalysisRecord> {
        vec![
            AnalysisRecord::new("I love it", 0.5, 0.6, ts(9, 0, 0)),
            AnalysisRecord::new("Well, \"fine\", I guess", 5.0 / 12.0, 0.5, ts(9, 1, 2)),
            AnalysisRecord::new("line one\nline two", -0.35, 0.6, ts(10, 30, 59)),
        ]
    }

    #[test]
    fn test_header_row() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "text,sentiment,polarity,subjectivity,timestamp,emoji");
    }

    #[test]
    fn test_row_format() {
        let csv = to_csv(&sample()[..1]).unwrap();
        let mut lines = csv.lines();
        lines.next();
        assert_eq!(
            lines.next().unwrap(),
            "I love it,Positive,0.5,0.6,2024-03-14 09:00:00,😊"
        );
    }

    #[test]
    fn test_roundtrip_preserves_count_and_fields() {
        let records = sample();
        let parsed = from_csv(&to_csv(&records).unwrap()).unwrap();
        assert_eq!(parsed.len(), records.len());
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        save_csv(&sample(), &path).unwrap();
        let loaded = load_csv(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_columns_matched_by_name() {
        let data = "emoji,timestamp,subjectivity,polarity,sentiment,text\n\
                    😐,2024-03-14 12:00:00,0,0,Neutral,noon\n";
        let parsed = from_csv(data).unwrap();
        assert_eq!(parsed[0].text, "noon");
        assert_eq!(parsed[0].sentiment, SentimentCategory::Neutral);
    }

    #[test]
    fn test_missing_column_is_error() {
        let data = "text,sentiment,polarity\nhi,Neutral,0\n";
        assert!(from_csv(data).is_err());
    }

    #[test]
    fn test_bad_values_are_errors() {
        let header = "text,sentiment,polarity,subjectivity,timestamp,emoji\n";
        let bad_category = format!("{header}hi,Mixed,0,0,2024-03-14 12:00:00,x\n");
        let bad_number = format!("{header}hi,Neutral,abc,0,2024-03-14 12:00:00,x\n");
        let bad_time = format!("{header}hi,Neutral,0,0,yesterday,x\n");
        assert!(matches!(
            from_csv(&bad_category),
            Err(SentimentError::UnknownCategory(_))
        ));
        assert!(from_csv(&bad_number).is_err());
        assert!(matches!(
            from_csv(&bad_time),
            Err(SentimentError::Timestamp { .. })
        ));
    }
}
