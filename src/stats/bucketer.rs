//! Day bucketing
//!
//! Groups meals by calendar date (UTC date component of the timestamp).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::MealRecord;

/// Meals per day, keyed and iterated in ascending date order
pub type DayBuckets<'a> = BTreeMap<NaiveDate, Vec<&'a MealRecord>>;

/// Group meals by date. Only days with at least one meal get a bucket, and
/// each bucket keeps the input order of its meals.
pub fn bucket_by_day<'a, I>(meals: I) -> DayBuckets<'a>
where
    I: IntoIterator<Item = &'a MealRecord>,
{
    let mut buckets: DayBuckets<'a> = BTreeMap::new();
    for meal in meals {
        buckets.entry(meal.date()).or_default().push(meal);
    }
    buckets
}
