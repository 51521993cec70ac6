use regex::Regex;

/// Normalize a stored product identifier to its canonical join key.
///
/// The review store's writer historically recorded product ids in three
/// shapes: a bare id, `/product/{id}`, and `/products/{id}`. Rules are
/// applied in order, first match wins:
/// 1. contains `/product/` -> everything after the last occurrence;
/// 2. contains `/products/` -> everything after the last occurrence;
/// 3. starts with `/` and contains a digit -> the first maximal digit run;
/// 4. otherwise the input is already canonical.
///
/// An empty input canonicalizes to an empty string; empty canonical ids
/// cannot be joined and callers must skip them.
pub fn canonicalize(raw: &str) -> String {
	if let Some(at) = raw.rfind("/product/") {
		return raw[at + "/product/".len()..].to_string();
	}
	if let Some(at) = raw.rfind("/products/") {
		return raw[at + "/products/".len()..].to_string();
	}
	if raw.starts_with('/')
		&& raw.chars().any(|ch| ch.is_ascii_digit())
		&& let Some(run) = Regex::new(r"\d+").ok().and_then(|re| re.find(raw).map(|m| m.as_str()))
	{
		return run.to_string();
	}

	raw.to_string()
}

/// All stored forms a canonical id may appear under in the review store.
pub fn expand_variants(canonical: &str) -> [String; 3] {
	[canonical.to_string(), format!("/product/{canonical}"), format!("/products/{canonical}")]
}
