use rust_decimal::Decimal;

use super::RatingValue;

/// Arithmetic mean of a store's rating values
///
/// Returns `None` when there are no values; an unrated store has no average,
/// which is different from an average of zero.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use store_ratings_api::domain::rating::{average, RatingValue};
///
/// let values = [4, 5].map(|v| RatingValue::new(v).unwrap());
/// assert_eq!(average(values), Some(Decimal::new(45, 1)));
/// assert_eq!(average(Vec::<RatingValue>::new()), None);
/// ```
pub fn average<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = RatingValue>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), value| {
            (sum + i64::from(value.get()), count + 1)
        });

    if count == 0 {
        return None;
    }

    Some((Decimal::from(sum) / Decimal::from(count)).normalize())
}
