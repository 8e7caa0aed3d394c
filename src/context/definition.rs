use iref::IriBuf;
use std::fmt;

use crate::{util::deep_equals, Container, Direction};

/// Type mapping of a term definition.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Type {
	/// `@id`.
	Id,

	/// `@json`.
	Json,

	/// `@none`.
	None,

	/// `@vocab`.
	Vocab,

	/// Absolute IRI.
	Iri(String),
}

impl Type {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Id => "@id",
			Self::Json => "@json",
			Self::None => "@none",
			Self::Vocab => "@vocab",
			Self::Iri(iri) => iri,
		}
	}

	/// Parses an expanded type mapping.
	pub fn from_expanded(s: &str) -> Self {
		match s {
			"@id" => Self::Id,
			"@json" => Self::Json,
			"@none" => Self::None,
			"@vocab" => Self::Vocab,
			iri => Self::Iri(iri.to_owned()),
		}
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Processed term definition.
///
/// `language` and `direction` distinguish an absent mapping (`None`) from a
/// mapping explicitly set to null (`Some(None)`).
#[derive(Clone, Default, Debug)]
pub struct TermDefinition {
	/// IRI mapping: absolute IRI, blank node identifier or keyword.
	///
	/// `None` when the term is explicitly mapped to null.
	pub iri: Option<String>,

	/// Prefix flag.
	pub prefix: bool,

	/// Protected flag.
	pub protected: bool,

	/// Reverse property flag.
	pub reverse_property: bool,

	/// Base URL used to process the scoped context.
	pub base_url: Option<IriBuf>,

	/// Scoped context, processed when the term is used.
	pub context: Option<Box<json_syntax::Value>>,

	/// Container mapping.
	pub container: Container,

	/// Direction mapping.
	pub direction: Option<Option<Direction>>,

	/// Index mapping.
	pub index: Option<String>,

	/// Language mapping.
	pub language: Option<Option<String>>,

	/// Nest value.
	pub nest: Option<String>,

	/// Type mapping.
	pub typ: Option<Type>,
}

impl TermDefinition {
	/// Returns the IRI mapping as a string slice.
	pub fn iri(&self) -> Option<&str> {
		self.iri.as_deref()
	}

	/// Checks if the IRI mapping is the given keyword.
	pub fn maps_to(&self, keyword: crate::Keyword) -> bool {
		self.iri.as_deref() == Some(keyword.as_str())
	}

	/// Returns a value that can be compared with another definition,
	/// ignoring the `protected` flag.
	pub fn modulo_protected_field(&self) -> ModuloProtected {
		ModuloProtected(self)
	}
}

/// Term definition compared without its protected flag.
pub struct ModuloProtected<'a>(&'a TermDefinition);

impl<'a, 'b> PartialEq<ModuloProtected<'b>> for ModuloProtected<'a> {
	fn eq(&self, other: &ModuloProtected<'b>) -> bool {
		let (a, b) = (self.0, other.0);
		a.iri == b.iri
			&& a.prefix == b.prefix
			&& a.reverse_property == b.reverse_property
			&& a.base_url == b.base_url
			&& a.container == b.container
			&& a.direction == b.direction
			&& a.index == b.index
			&& a.language == b.language
			&& a.nest == b.nest
			&& a.typ == b.typ
			&& match (&a.context, &b.context) {
				(Some(a), Some(b)) => deep_equals(a, b),
				(None, None) => true,
				_ => false,
			}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn equivalence_ignores_protection() {
		let a = TermDefinition {
			iri: Some("http://example.org/name".to_owned()),
			protected: true,
			..Default::default()
		};

		let mut b = a.clone();
		b.protected = false;
		assert!(a.modulo_protected_field() == b.modulo_protected_field());

		b.typ = Some(Type::Id);
		assert!(a.modulo_protected_field() != b.modulo_protected_field())
	}
}
