//! Writes dashboard data as CSV.

use std::{io::Write, str::FromStr};

use anyhow::Result;
use csv::WriterBuilder;
use serde::Deserialize;
use thiserror::Error;

use crate::{frame::DATE_COLUMN, frame::Frame, reshape::to_long_format};

/// Wide keeps one column per metric, long stacks them into Date, Amount, Context.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Wide,
    Long,
}

#[derive(Debug, Error)]
pub enum ParseDataFormatError {
    #[error("failed to parse data format {0}, expected wide or long")]
    UnknownDataFormat(String),
}

impl FromStr for DataFormat {
    type Err = ParseDataFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide" => Ok(DataFormat::Wide),
            "long" => Ok(DataFormat::Long),
            unknown => Err(ParseDataFormatError::UnknownDataFormat(unknown.to_string())),
        }
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn write_wide_csv(writer: impl Write, frame: &Frame) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    let header = std::iter::once(DATE_COLUMN).chain(frame.columns().iter().map(String::as_str));
    writer.write_record(header)?;

    for row in frame.rows() {
        let record = std::iter::once(row.date.to_string())
            .chain(row.values.iter().copied().map(format_value))
            .collect::<Vec<_>>();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_long_csv(writer: impl Write, frame: &Frame) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record([DATE_COLUMN, "Amount", "Context"])?;
    for record in to_long_format(frame) {
        writer.write_record([
            record.date.to_string(),
            format_value(record.amount),
            record.context,
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_csv(writer: impl Write, frame: &Frame, format: DataFormat) -> Result<()> {
    match format {
        DataFormat::Wide => write_wide_csv(writer, frame),
        DataFormat::Long => write_long_csv(writer, frame),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::frame::FrameRow;

    fn frame() -> Frame {
        Frame::new(
            vec!["Num_minted".to_string(), "Dai_price".to_string()],
            vec![FrameRow {
                date: NaiveDate::from_ymd_opt(2022, 6, 6).unwrap(),
                values: vec![10.5, f64::NAN],
            }],
        )
    }

    #[test]
    fn wide_csv_test() {
        let mut out = Vec::new();
        write_csv(&mut out, &frame(), DataFormat::Wide).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Num_minted,Dai_price\n2022-06-06,10.5,\n"
        );
    }

    #[test]
    fn long_csv_test() {
        let mut out = Vec::new();
        write_csv(&mut out, &frame(), DataFormat::Long).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Amount,Context\n2022-06-06,10.5,Num minted\n2022-06-06,,Dai price\n"
        );
    }

    #[test]
    fn empty_frame_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&mut out, &Frame::empty(), DataFormat::Wide).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Date\n");
    }

    #[test]
    fn parse_data_format_test() {
        assert_eq!("long".parse::<DataFormat>().unwrap(), DataFormat::Long);
        assert!("tall".parse::<DataFormat>().is_err());
    }
}
