//! Truncates a daily frame to a coarser granularity.
//!
//! Weekly and monthly buckets are left-closed and left-labeled: a bucket covers
//! `[start, next start)` and carries `start` as its date. Weeks start on Monday, months on the
//! first. Buckets between the first and last row that received no rows are still emitted, with
//! zero sums, so the output is calendar-contiguous.
//!
//! Daily truncation drops the most recent row, which is assumed incomplete. Weekly and monthly
//! truncation keep the trailing, possibly partial, bucket.

use chrono::{Datelike, Duration, Months, NaiveDate};
use tracing::trace;

use crate::{
    frame::{Frame, FrameRow},
    granularity::Granularity,
};

pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => {
            date - Duration::days(date.weekday().num_days_from_monday().into())
        }
        Granularity::Monthly => date
            .with_day(1)
            .expect("first of the month exists for every month"),
    }
}

fn next_bucket_start(start: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => start + Duration::days(1),
        Granularity::Weekly => start + Duration::days(7),
        Granularity::Monthly => start
            .checked_add_months(Months::new(1))
            .expect("next month to be in range"),
    }
}

/// Sums each column of the rows, skipping NaN values.
fn sum_rows(rows: &[FrameRow], width: usize) -> Vec<f64> {
    let mut sums = vec![0.0; width];
    for row in rows {
        for (sum, value) in sums.iter_mut().zip(&row.values) {
            if !value.is_nan() {
                *sum += value;
            }
        }
    }
    sums
}

fn resample(frame: &Frame, granularity: Granularity) -> Frame {
    let mut rows = frame.rows().to_vec();
    rows.sort_by_key(|row| row.date);

    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (
            bucket_start(first.date, granularity),
            bucket_start(last.date, granularity),
        ),
        _ => return Frame::new(frame.columns().to_vec(), vec![]),
    };

    let width = frame.columns().len();
    let mut buckets = Vec::new();
    let mut remaining = rows.as_slice();
    let mut start = first;

    while start <= last {
        let end = next_bucket_start(start, granularity);
        let in_bucket = remaining.partition_point(|row| row.date < end);
        let (bucket_rows, rest) = remaining.split_at(in_bucket);
        trace!(%start, %end, rows = bucket_rows.len(), "bucket");
        buckets.push(FrameRow {
            date: start,
            values: sum_rows(bucket_rows, width),
        });
        remaining = rest;
        start = end;
    }

    Frame::new(frame.columns().to_vec(), buckets)
}

/// Resamples `frame` to `granularity`, output sorted ascending by date.
pub fn trunc_by(frame: &Frame, granularity: Granularity) -> Frame {
    match granularity {
        Granularity::Daily => {
            let mut rows = frame.rows().to_vec();
            rows.sort_by_key(|row| row.date);
            rows.pop();
            Frame::new(frame.columns().to_vec(), rows)
        }
        Granularity::Weekly | Granularity::Monthly => resample(frame, granularity),
    }
}

/// All three views of a daily frame at once. Unlike [`trunc_by`], the daily view here is the
/// frame as given, its last row included.
#[derive(Clone, Debug, PartialEq)]
pub struct DateTruncations {
    pub daily: Frame,
    pub weekly: Frame,
    pub monthly: Frame,
}

impl DateTruncations {
    pub fn get(&self, granularity: Granularity) -> &Frame {
        match granularity {
            Granularity::Daily => &self.daily,
            Granularity::Weekly => &self.weekly,
            Granularity::Monthly => &self.monthly,
        }
    }
}

pub fn date_truncations(frame: &Frame) -> DateTruncations {
    DateTruncations {
        daily: frame.clone(),
        weekly: trunc_by(frame, Granularity::Weekly),
        monthly: trunc_by(frame, Granularity::Monthly),
    }
}
