use std::fmt;

use crate::Keyword;

/// Single `@container` item.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerItem {
	#[cfg_attr(feature = "serde", serde(rename = "@graph"))]
	Graph,

	#[cfg_attr(feature = "serde", serde(rename = "@id"))]
	Id,

	#[cfg_attr(feature = "serde", serde(rename = "@index"))]
	Index,

	#[cfg_attr(feature = "serde", serde(rename = "@language"))]
	Language,

	#[cfg_attr(feature = "serde", serde(rename = "@list"))]
	List,

	#[cfg_attr(feature = "serde", serde(rename = "@set"))]
	Set,

	#[cfg_attr(feature = "serde", serde(rename = "@type"))]
	Type,
}

impl ContainerItem {
	pub fn into_keyword(self) -> Keyword {
		self.into()
	}

	pub fn as_str(&self) -> &'static str {
		self.into_keyword().into_str()
	}

	fn bit(&self) -> u8 {
		1 << (*self as u8)
	}
}

impl<'a> TryFrom<&'a str> for ContainerItem {
	type Error = &'a str;

	fn try_from(s: &'a str) -> Result<ContainerItem, &'a str> {
		use ContainerItem::*;
		match s {
			"@graph" => Ok(Graph),
			"@id" => Ok(Id),
			"@index" => Ok(Index),
			"@language" => Ok(Language),
			"@list" => Ok(List),
			"@set" => Ok(Set),
			"@type" => Ok(Type),
			_ => Err(s),
		}
	}
}

impl From<ContainerItem> for Keyword {
	fn from(c: ContainerItem) -> Keyword {
		use ContainerItem::*;
		match c {
			Graph => Keyword::Graph,
			Id => Keyword::Id,
			Index => Keyword::Index,
			Language => Keyword::Language,
			List => Keyword::List,
			Set => Keyword::Set,
			Type => Keyword::Type,
		}
	}
}

const ALL_ITEMS: [ContainerItem; 7] = [
	ContainerItem::Graph,
	ContainerItem::Id,
	ContainerItem::Index,
	ContainerItem::Language,
	ContainerItem::List,
	ContainerItem::Set,
	ContainerItem::Type,
];

/// Container mapping: a set of container items.
///
/// The empty set corresponds to the absence of container mapping.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Container(u8);

/// Invalid combination of container items.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("invalid container mapping")]
pub struct InvalidContainer;

impl Container {
	/// Empty container mapping.
	pub fn new() -> Self {
		Self(0)
	}

	/// Creates a container from the given items, checking that the
	/// combination is legal.
	///
	/// Legal combinations are a single item, `@graph` with `@id` or `@index`
	/// (optionally with `@set`), and `@set` with any of `@index`, `@graph`,
	/// `@id`, `@type` or `@language`.
	pub fn from_items(
		items: impl IntoIterator<Item = ContainerItem>,
	) -> Result<Self, InvalidContainer> {
		let mut result = Self::new();
		for item in items {
			if !result.add(item) {
				return Err(InvalidContainer);
			}
		}

		Ok(result)
	}

	/// Adds an item to this container if the resulting combination is
	/// legal.
	///
	/// Returns `false` if the combination is illegal.
	pub fn add(&mut self, item: ContainerItem) -> bool {
		use ContainerItem::*;
		if self.contains(item) {
			return true;
		}

		let candidate = Self(self.0 | item.bit());
		let items: Vec<_> = candidate.iter().collect();
		let legal = match items.as_slice() {
			[_] => true,
			[Graph, Id] | [Graph, Index] => true,
			[Graph, Id, Set] | [Graph, Index, Set] => true,
			[Set, Type] => true,
			[a, Set] => matches!(a, Index | Graph | Id | Language),
			_ => false,
		};

		if legal {
			*self = candidate
		}

		legal
	}

	pub fn is_empty(&self) -> bool {
		self.0 == 0
	}

	pub fn len(&self) -> usize {
		self.0.count_ones() as usize
	}

	pub fn contains(&self, item: ContainerItem) -> bool {
		self.0 & item.bit() != 0
	}

	/// Iterates over the items, in the order of [`ContainerItem`].
	pub fn iter(&self) -> impl '_ + Iterator<Item = ContainerItem> {
		ALL_ITEMS.into_iter().filter(|i| self.contains(*i))
	}

	/// Returns the container as it would be written in a context.
	pub fn to_json(&self) -> json_syntax::Value {
		let mut items: Vec<json_syntax::Value> = self
			.iter()
			.map(|i| json_syntax::Value::String(i.as_str().into()))
			.collect();
		if items.len() == 1 {
			items.pop().unwrap_or(json_syntax::Value::Null)
		} else {
			json_syntax::Value::Array(items)
		}
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl From<ContainerItem> for Container {
	fn from(item: ContainerItem) -> Self {
		Self(item.bit())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ContainerItem::*;

	#[test]
	fn legal_combinations() {
		assert!(Container::from_items([List]).is_ok());
		assert!(Container::from_items([Graph, Id]).is_ok());
		assert!(Container::from_items([Set, Graph, Index]).is_ok());
		assert!(Container::from_items([Set, Language]).is_ok());
		assert!(Container::from_items([Set, Type]).is_ok());
		assert!(Container::from_items([Set, Set]).is_ok())
	}

	#[test]
	fn illegal_combinations() {
		assert!(Container::from_items([List, Set]).is_err());
		assert!(Container::from_items([Graph, Type]).is_err());
		assert!(Container::from_items([Id, Index]).is_err());
		assert!(Container::from_items([Language, Index, Set]).is_err())
	}
}
