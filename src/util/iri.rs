//! IRI helpers.
use iref::{Iri, IriBuf, IriRef};

/// Checks if the given character is a generic delimiter (RFC 3987).
pub fn is_gen_delim(c: char) -> bool {
	matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

/// Checks if the given string is an absolute IRI.
pub fn is_absolute_iri(s: &str) -> bool {
	Iri::new(s).is_ok()
}

/// Resolves the given IRI reference against `base_iri`.
///
/// Without base IRI, the reference must already be an absolute IRI.
pub fn resolve_iri(iri_ref: &str, base_iri: Option<&Iri>) -> Option<IriBuf> {
	let iri_ref = IriRef::new(iri_ref).ok()?;
	match base_iri {
		Some(base_iri) => Some(iri_ref.resolved(base_iri)),
		None => iri_ref.as_iri().map(ToOwned::to_owned),
	}
}

struct Parts<'a> {
	root: &'a str,
	path: &'a str,
	query: Option<&'a str>,
	fragment: Option<&'a str>,
}

impl<'a> Parts<'a> {
	fn new(iri: &'a str) -> Self {
		let (rest, fragment) = match iri.split_once('#') {
			Some((rest, fragment)) => (rest, Some(fragment)),
			None => (iri, None),
		};

		let (rest, query) = match rest.split_once('?') {
			Some((rest, query)) => (rest, Some(query)),
			None => (rest, None),
		};

		let root_len = match rest.find("://") {
			Some(i) => {
				let after = i + 3;
				after + rest[after..].find('/').unwrap_or(rest.len() - after)
			}
			None => rest.find(':').map(|i| i + 1).unwrap_or(0),
		};

		Self {
			root: &rest[..root_len],
			path: &rest[root_len..],
			query,
			fragment,
		}
	}
}

/// Turns `iri` into an IRI reference relative to `base`, when both share the
/// same scheme and authority.
///
/// Returns `iri` unchanged otherwise.
pub fn relative_iri(iri: &str, base: &Iri) -> String {
	let base = Parts::new(base.as_str());
	let target = Parts::new(iri);

	if base.root != target.root || base.root.is_empty() {
		return iri.to_owned();
	}

	let mut base_segments: Vec<&str> = base.path.split('/').collect();
	let mut iri_segments: Vec<&str> = target.path.split('/').collect();

	// Do not remove the last segment unless there is a query or fragment.
	let last = if target.query.is_some() || target.fragment.is_some() {
		0
	} else {
		1
	};

	let mut common = 0;
	while common < base_segments.len()
		&& iri_segments.len() - common > last
		&& base_segments[common] == iri_segments[common]
	{
		common += 1
	}

	base_segments.drain(..common);
	iri_segments.drain(..common);

	let mut result = String::new();
	if !base_segments.is_empty() {
		base_segments.pop();
		for _ in &base_segments {
			result.push_str("../")
		}
	}

	result.push_str(&iri_segments.join("/"));

	if let Some(query) = target.query {
		result.push('?');
		result.push_str(query)
	}

	if let Some(fragment) = target.fragment {
		result.push('#');
		result.push_str(fragment)
	}

	if result.is_empty() {
		result.push_str("./")
	}

	// A first segment containing `:` would be read as a scheme.
	if let Some(first) = result.split('/').next() {
		if first.contains(':') {
			result.insert_str(0, "./")
		}
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base() -> &'static Iri {
		Iri::new("http://example.org/a/b/c").unwrap()
	}

	#[test]
	fn relative_siblings() {
		assert_eq!(relative_iri("http://example.org/a/b/d", base()), "d");
		assert_eq!(relative_iri("http://example.org/a/e", base()), "../e");
		assert_eq!(relative_iri("http://example.org/a/b/", base()), "./")
	}

	#[test]
	fn relative_fragments() {
		assert_eq!(relative_iri("http://example.org/a/b/c#x", base()), "#x");
		assert_eq!(relative_iri("http://example.org/a/b/c?q", base()), "?q")
	}

	#[test]
	fn foreign_iri_is_kept() {
		assert_eq!(
			relative_iri("https://other.org/a/b/c", base()),
			"https://other.org/a/b/c"
		)
	}

	#[test]
	fn resolution() {
		assert_eq!(
			resolve_iri("../d", Some(base())).unwrap().as_str(),
			"http://example.org/a/d"
		);
		assert!(resolve_iri("relative", None).is_none())
	}
}
