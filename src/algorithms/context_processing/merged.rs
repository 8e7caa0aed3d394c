use json_syntax::{Object, Value};

use crate::util::ObjectExt;

/// Context definition merged with the context it imports.
///
/// Entries of the importing context take precedence over the imported ones.
pub struct Merged<'a> {
	base: &'a Object,
	imported: Option<Object>,
}

impl<'a> Merged<'a> {
	pub fn new(base: &'a Object, imported: Option<Object>) -> Self {
		Self { base, imported }
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.base
			.value(key)
			.or_else(|| self.imported.as_ref().and_then(|i| i.value(key)))
	}

	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Iterates over the keys of the merged context, imported keys first.
	pub fn keys(&self) -> impl '_ + Iterator<Item = &str> {
		let imported = self
			.imported
			.iter()
			.flat_map(|i| i.key_strs())
			.filter(|k| !self.base.has(k));
		imported.chain(self.base.key_strs())
	}
}

impl<'a> From<&'a Object> for Merged<'a> {
	fn from(base: &'a Object) -> Self {
		Self {
			base,
			imported: None,
		}
	}
}
