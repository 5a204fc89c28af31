use std::cmp::Ordering;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::types::{PolicyEvent, YearKeyed, YearlyTrendRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("No {dataset} record for year {year}")]
    NotFound { dataset: &'static str, year: i32 },
}

/// Return the record whose year equals `year`
pub fn select_by_year<T: YearKeyed>(rows: &[T], year: i32) -> Result<&T, DatasetError> {
    rows.iter()
        .find(|row| row.year() == year)
        .ok_or(DatasetError::NotFound {
            dataset: T::DATASET,
            year,
        })
}

/// Records whose year falls inside `years`, in their original order
pub fn filter_years<T: YearKeyed + Clone>(rows: &[T], years: &RangeInclusive<i32>) -> Vec<T> {
    rows.iter()
        .filter(|row| years.contains(&row.year()))
        .cloned()
        .collect()
}

/// Stable sort on a derived column. Rows with equal (or incomparable) keys
/// keep their input order in both directions.
pub fn sort_by_column<T, K, F>(rows: &[T], column: F, ascending: bool) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = column(a).partial_cmp(&column(b)).unwrap_or(Ordering::Equal);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    sorted
}

/// Left join of trend records with the policy events of the same year.
///
/// A year without events yields a single row with `None`; a year with several
/// events yields one row per event, in policy order.
pub fn join_trend_with_policy<'a>(
    trend: &'a [YearlyTrendRecord],
    policies: &'a [PolicyEvent],
) -> Vec<(&'a YearlyTrendRecord, Option<&'a PolicyEvent>)> {
    let mut joined = Vec::with_capacity(trend.len() + policies.len());

    for record in trend {
        let before = joined.len();
        joined.extend(
            policies
                .iter()
                .filter(|event| event.year() == record.year)
                .map(|event| (record, Some(event))),
        );
        if joined.len() == before {
            joined.push((record, None));
        }
    }

    joined
}
