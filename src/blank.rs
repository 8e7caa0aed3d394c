//! Blank node identifiers generation.
use indexmap::IndexMap;

/// Checks if the given string is a blank node identifier (`_:` prefix).
pub fn is_blank_id(s: &str) -> bool {
	s.starts_with("_:")
}

/// Blank node identifier generator.
///
/// A generator issues fresh blank node identifiers and remembers which
/// identifier it issued for each source label, so that every occurrence of a
/// source label is relabeled consistently.
///
/// Generators are owned by a single top-level operation. Cloning a generator
/// forks its state: the clone and the original then evolve independently.
pub trait Generator: Clone {
	/// Generates a blank node identifier.
	///
	/// If `source` is given and was already relabeled by this generator, the
	/// previously issued identifier is returned. Otherwise a fresh identifier
	/// is issued and, if `source` is given, associated to it.
	fn generate(&mut self, source: Option<&str>) -> String;

	/// Returns the identifier previously issued for the given source label,
	/// if any.
	fn mapped(&self, source: &str) -> Option<&str>;
}

/// Default blank node identifier generator.
///
/// Issues `_:b0`, `_:b1`, etc. (the prefix can be changed).
#[derive(Clone, Debug)]
pub struct Blank {
	prefix: String,
	count: usize,
	map: IndexMap<String, String>,
}

impl Blank {
	/// Creates a new generator issuing `_:b0`, `_:b1`, etc.
	pub fn new() -> Self {
		Self::with_prefix("b")
	}

	/// Creates a new generator issuing `_:{prefix}0`, `_:{prefix}1`, etc.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			count: 0,
			map: IndexMap::new(),
		}
	}

	/// Number of identifiers issued so far.
	pub fn count(&self) -> usize {
		self.count
	}

	fn next_id(&mut self) -> String {
		let id = format!("_:{}{}", self.prefix, self.count);
		self.count += 1;
		id
	}
}

impl Default for Blank {
	fn default() -> Self {
		Self::new()
	}
}

impl Generator for Blank {
	fn generate(&mut self, source: Option<&str>) -> String {
		match source {
			Some(source) => {
				if let Some(id) = self.map.get(source) {
					return id.clone();
				}

				let id = self.next_id();
				self.map.insert(source.to_owned(), id.clone());
				id
			}
			None => self.next_id(),
		}
	}

	fn mapped(&self, source: &str) -> Option<&str> {
		self.map.get(source).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stable_relabeling() {
		let mut g = Blank::new();
		let a = g.generate(Some("_:a"));
		let fresh = g.generate(None);
		assert_eq!(a, "_:b0");
		assert_eq!(fresh, "_:b1");
		assert_eq!(g.generate(Some("_:a")), a);
		assert_eq!(g.mapped("_:a"), Some("_:b0"));
		assert_eq!(g.mapped("_:c"), None)
	}

	#[test]
	fn forked_state() {
		let mut g = Blank::new();
		g.generate(Some("_:a"));
		let mut fork = g.clone();
		assert_eq!(fork.generate(Some("_:x")), "_:b1");
		assert_eq!(g.generate(Some("_:y")), "_:b1");
		assert_eq!(fork.mapped("_:y"), None)
	}
}
