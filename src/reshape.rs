use chrono::NaiveDate;
use serde::Serialize;

use crate::frame::{capitalize, Frame};

/// One (date, metric) pair of a wide frame, for plotting several metrics as one series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Context")]
    pub context: String,
}

/// `Num_minted` -> `Num minted`.
pub fn context_label(column: &str) -> String {
    capitalize(&column.replace('_', " "))
}

/// Stacks every metric column of `frame` into long records, column by column.
pub fn to_long_format(frame: &Frame) -> Vec<LongRecord> {
    frame
        .columns()
        .iter()
        .enumerate()
        .flat_map(|(index, column)| {
            let context = context_label(column);
            frame.rows().iter().map(move |row| LongRecord {
                date: row.date,
                amount: row.values[index],
                context: context.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameRow;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 6, day).unwrap()
    }

    #[test]
    fn context_label_test() {
        assert_eq!(context_label("Num_minted"), "Num minted");
        assert_eq!(context_label("Diff_mint_repay"), "Diff mint repay");
        assert_eq!(context_label("A"), "A");
    }

    #[test]
    fn stacks_columns_in_order() {
        let frame = Frame::new(
            vec!["A".to_string(), "B".to_string()],
            vec![
                FrameRow {
                    date: date(1),
                    values: vec![1.0, 10.0],
                },
                FrameRow {
                    date: date(2),
                    values: vec![2.0, 20.0],
                },
            ],
        );

        let long = to_long_format(&frame);

        assert_eq!(long.len(), 4);
        let contexts = long
            .iter()
            .map(|record| record.context.as_str())
            .collect::<Vec<_>>();
        assert_eq!(contexts, vec!["A", "A", "B", "B"]);
        assert_eq!(
            long[3],
            LongRecord {
                date: date(2),
                amount: 20.0,
                context: "B".to_string()
            }
        );
        assert_eq!(long[0].amount, 1.0);
    }

    #[test]
    fn empty_frame_gives_no_records() {
        assert!(to_long_format(&Frame::empty()).is_empty());
    }

    #[test]
    fn serializes_with_capitalized_keys() {
        let record = LongRecord {
            date: date(1),
            amount: 1.5,
            context: "Num minted".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"Date": "2022-06-01", "Amount": 1.5, "Context": "Num minted"})
        );
    }
}
