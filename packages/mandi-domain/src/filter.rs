/// Catalog selection predicate. The base condition (active, non-draft) is
/// always applied by the store adapter; this type only carries what the
/// caller asked for on top of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductFilter {
	/// Every active, non-draft product.
	All,
	/// Exact, case-insensitive category match.
	Category(String),
	/// Case-insensitive substring match across title, description, brand,
	/// category name, and subcategory name.
	Text(String),
}

/// Build the filter for a product query.
///
/// Precedence: an explicit non-sentinel `category` always wins and free
/// text is ignored. Otherwise, free text that equals a known category name
/// (case-insensitively) is promoted to an exact category filter, so typing
/// "Adhesives" lists the category instead of substring-matching every
/// description containing the word. Anything else is a substring search.
pub fn build_filter(
	search_text: &str,
	category: &str,
	all_categories_label: &str,
	known_categories: &[String],
) -> ProductFilter {
	let category = category.trim();

	if !category.is_empty() && category != all_categories_label {
		return ProductFilter::Category(category.to_string());
	}

	let text = search_text.trim();

	if text.is_empty() {
		return ProductFilter::All;
	}

	let lowered = text.to_lowercase();

	if let Some(name) = known_categories.iter().find(|name| name.trim().to_lowercase() == lowered) {
		return ProductFilter::Category(name.trim().to_string());
	}

	ProductFilter::Text(text.to_string())
}

/// Escape a literal for embedding in a LIKE/ILIKE pattern. Without this a
/// search for `100%` would match every row.
pub fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::{ProductFilter, build_filter, escape_like};

	const ALL: &str = "All Categories";

	fn known() -> Vec<String> {
		vec!["Fasteners".to_string(), "Adhesives".to_string()]
	}

	#[test]
	fn no_input_selects_everything() {
		assert_eq!(build_filter("", "", ALL, &known()), ProductFilter::All);
		assert_eq!(build_filter("  ", ALL, ALL, &known()), ProductFilter::All);
	}

	#[test]
	fn explicit_category_wins_over_free_text() {
		let with_text = build_filter("anchor bolt", "Fasteners", ALL, &known());
		let category_only = build_filter("", "Fasteners", ALL, &known());

		assert_eq!(with_text, category_only);
		assert_eq!(with_text, ProductFilter::Category("Fasteners".to_string()));
	}

	#[test]
	fn sentinel_category_is_no_filter() {
		assert_eq!(
			build_filter("anchor bolt", ALL, ALL, &known()),
			ProductFilter::Text("anchor bolt".to_string())
		);
	}

	#[test]
	fn text_matching_a_category_is_promoted() {
		let inferred = build_filter("adhesives", "", ALL, &known());
		let explicit = build_filter("", "Adhesives", ALL, &known());

		assert_eq!(inferred, explicit);
	}

	#[test]
	fn unknown_text_stays_a_substring_search() {
		assert_eq!(
			build_filter("epoxy resin", "", ALL, &known()),
			ProductFilter::Text("epoxy resin".to_string())
		);
	}

	#[test]
	fn text_is_trimmed() {
		assert_eq!(
			build_filter("  epoxy  ", "", ALL, &known()),
			ProductFilter::Text("epoxy".to_string())
		);
	}

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(escape_like("100%_cotton"), "100\\%\\_cotton");
		assert_eq!(escape_like("back\\slash"), "back\\\\slash");
		assert_eq!(escape_like("plain"), "plain");
	}
}
