use std::collections::{HashMap, HashSet};

use mandi_domain::{
	product_id,
	rating::{self, RatingSummary},
};
use mandi_storage::{db::Db, reviews};

use crate::Result;

/// Compute per-product review statistics for a set of canonical ids.
///
/// Each canonical id is expanded into its three stored variants and the
/// union is used as one membership lookup against the review store. Matched
/// rows are re-canonicalized before grouping, so reviews recorded under
/// different variants of the same product count together. Ids with no
/// approved reviews are absent from the result; callers default those to
/// zero.
pub async fn aggregate(
	db: &Db,
	canonical_ids: &HashSet<String>,
) -> Result<HashMap<String, RatingSummary>> {
	let mut lookup = Vec::with_capacity(canonical_ids.len() * 3);

	for canonical in canonical_ids {
		if canonical.is_empty() {
			continue;
		}

		lookup.extend(product_id::expand_variants(canonical));
	}

	if lookup.is_empty() {
		return Ok(HashMap::new());
	}

	let rows = reviews::approved_ratings(db, &lookup).await?;

	Ok(rating::summarize(rows.into_iter().map(|row| (row.product_id, row.rating))))
}
