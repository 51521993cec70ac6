use std::collections::HashMap;

use crate::product_id;

/// Review statistics for one canonical product id, recomputed per query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatingSummary {
	/// Arithmetic mean of approved ratings, rounded to one decimal place.
	pub average_rating: f64,
	pub review_count: i64,
}

/// Round half away from zero at one decimal place.
pub fn round_to_tenths(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

/// Group stored `(product_id, rating)` pairs by canonical id.
///
/// The stored id of each row is re-canonicalized before grouping: rows
/// matched through different variants of the same product must land in one
/// group or the product's reviews would be undercounted. Rows whose id
/// canonicalizes to an empty string are dropped. Products with no reviews
/// are simply absent from the map.
pub fn summarize<I>(rows: I) -> HashMap<String, RatingSummary>
where
	I: IntoIterator<Item = (String, i32)>,
{
	let mut grouped: HashMap<String, (i64, i64)> = HashMap::new();

	for (stored_id, rating) in rows {
		let canonical = product_id::canonicalize(&stored_id);

		if canonical.is_empty() {
			continue;
		}

		let (total, count) = grouped.entry(canonical).or_insert((0, 0));

		*total += i64::from(rating);
		*count += 1;
	}

	grouped
		.into_iter()
		.map(|(canonical, (total, count))| {
			let summary = RatingSummary {
				average_rating: round_to_tenths(total as f64 / count as f64),
				review_count: count,
			};

			(canonical, summary)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::{round_to_tenths, summarize};

	#[test]
	fn single_review_reports_its_own_rating() {
		let summaries = summarize([("42".to_string(), 5)]);
		let summary = &summaries["42"];

		assert_eq!(summary.average_rating, 5.0);
		assert_eq!(summary.review_count, 1);
	}

	#[test]
	fn pair_of_ratings_averages_to_midpoint() {
		let summaries = summarize([("42".to_string(), 3), ("42".to_string(), 4)]);
		let summary = &summaries["42"];

		assert_eq!(summary.average_rating, 3.5);
		assert_eq!(summary.review_count, 2);
	}

	#[test]
	fn mixed_stored_variants_group_together() {
		let rows = [
			("/product/42".to_string(), 4),
			("42".to_string(), 2),
			("/products/42".to_string(), 3),
		];
		let summaries = summarize(rows);

		assert_eq!(summaries.len(), 1);
		assert_eq!(summaries["42"].review_count, 3);
		assert_eq!(summaries["42"].average_rating, 3.0);
	}

	#[test]
	fn unreviewed_products_are_absent() {
		let summaries = summarize([("42".to_string(), 4)]);

		assert!(!summaries.contains_key("7"));
	}

	#[test]
	fn empty_canonical_ids_are_dropped() {
		let summaries = summarize([("/product/".to_string(), 4)]);

		assert!(summaries.is_empty());
	}

	#[test]
	fn rounds_half_away_from_zero() {
		assert_eq!(round_to_tenths(0.25), 0.3);
		assert_eq!(round_to_tenths(4.25), 4.3);
		assert_eq!(round_to_tenths(4.24), 4.2);
	}

	#[test]
	fn repeating_mean_rounds_to_one_decimal() {
		let rows = [("9".to_string(), 4), ("9".to_string(), 4), ("9".to_string(), 5)];
		let summaries = summarize(rows);

		assert_eq!(summaries["9"].average_rating, 4.3);
	}
}
