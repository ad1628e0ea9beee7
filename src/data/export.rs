//! Feature table writers

use super::FeatureRow;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File format for exported feature rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv or json.", s)),
        }
    }
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(rows: &[FeatureRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FeatureRow::column_names())?;
    for row in rows {
        wtr.write_record(row.values().iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows as a JSON array of objects
pub fn write_json<W: Write>(rows: &[FeatureRow], writer: W) -> Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_rows<W: Write>(rows: &[FeatureRow], format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(rows, writer),
        ExportFormat::Json => write_json(rows, writer),
    }
}

/// Write rows to a file, creating parent directories as needed
pub fn save<P: AsRef<Path>>(rows: &[FeatureRow], format: ExportFormat, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = BufWriter::new(File::create(path)?);
    write_rows(rows, format, &mut file)?;
    file.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FormVector;
    use crate::{MatchResult, Odds};

    fn make_row() -> FeatureRow {
        FeatureRow {
            result: MatchResult::AwayWin,
            odds: Odds {
                home: 2.5,
                draw: 3.25,
                away: 2.75,
            },
            home: FormVector {
                wins: 4,
                draws: 3,
                losses: 3,
                goals: 12,
                ..FormVector::default()
            },
            away: FormVector {
                wins: 7,
                losses: 3,
                shots: 140,
                ..FormVector::default()
            },
        }
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        write_csv(&[make_row(), make_row()], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("result,odds-home,odds-draw,odds-away,home-wins,home-draws"));
        assert!(lines[0].ends_with("away-opposition-shots-on-target"));
        assert!(lines[1].starts_with("A,2.5,3.25,2.75,4,3,3,12,"));
        assert_eq!(lines[1].split(',').count(), FeatureRow::DIM);
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_csv_empty_has_header() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_json(&[make_row()], &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let row = &value[0];
        assert_eq!(row["result"], "A");
        assert_eq!(row["odds-draw"], 3.25);
        assert_eq!(row["home-goals"], 12);
        assert_eq!(row["away-shots"], 140);
        assert_eq!(row.as_object().unwrap().len(), FeatureRow::DIM);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_reports_write_failure() {
        for format in [ExportFormat::Csv, ExportFormat::Json] {
            let result = save(&[make_row()], format, "/dev/full");
            assert!(result.is_err(), "{:?} export to a full device succeeded", format);
        }
    }

    #[test]
    fn test_csv_keeps_decimal_point_on_whole_odds() {
        let mut row = make_row();
        row.odds.home = 4.0;
        let mut csv_buf = Vec::new();
        write_csv(&[row.clone()], &mut csv_buf).unwrap();
        let text = String::from_utf8(csv_buf).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("A,4.0,3.25,"));

        let mut json_buf = Vec::new();
        write_json(&[row], &mut json_buf).unwrap();
        let json = String::from_utf8(json_buf).unwrap();
        assert!(json.contains("\"odds-home\": 4.0"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("parquet".parse::<ExportFormat>().is_err());
    }
}
