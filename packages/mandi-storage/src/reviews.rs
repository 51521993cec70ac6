use crate::{Result, db::Db, models::StoredRating};

/// Approved reviews whose stored product id is in `stored_ids` (the
/// variant-expanded lookup set). Only approved reviews ever contribute to
/// rating statistics.
pub async fn approved_ratings(db: &Db, stored_ids: &[String]) -> Result<Vec<StoredRating>> {
	if stored_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as(
		"\
SELECT product_id, rating
FROM reviews
WHERE status = 'approved' AND product_id = ANY($1)",
	)
	.bind(stored_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
