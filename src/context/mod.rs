//! Active context.
mod definition;
pub mod inverse;

use indexmap::IndexMap;
use iref::{Iri, IriBuf};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::Direction;

pub use definition::*;
pub use inverse::{InverseContext, Selection};

/// Active context.
///
/// Result of the [context processing algorithm][1]. Contexts are values:
/// processing never mutates a context that was handed out, it clones it and
/// mutates the clone. The previous context (set by non-propagated contexts)
/// is shared between snapshots.
///
/// [1]: <https://www.w3.org/TR/json-ld11-api/#context-processing-algorithm>
pub struct ActiveContext {
	original_base_url: Option<IriBuf>,
	base_iri: Option<IriBuf>,
	vocabulary: Option<String>,
	default_language: Option<String>,
	default_base_direction: Option<Direction>,
	previous_context: Option<Arc<ActiveContext>>,
	definitions: IndexMap<String, TermDefinition>,
	inverse: OnceCell<InverseContext>,
}

impl Default for ActiveContext {
	fn default() -> Self {
		Self::new(None)
	}
}

impl ActiveContext {
	/// Create a new context with the given base IRI.
	pub fn new(base_iri: Option<IriBuf>) -> Self {
		Self {
			original_base_url: base_iri.clone(),
			base_iri,
			vocabulary: None,
			default_language: None,
			default_base_direction: None,
			previous_context: None,
			definitions: IndexMap::new(),
			inverse: OnceCell::new(),
		}
	}

	/// Returns a reference to the given `term` definition, if any.
	pub fn get(&self, term: &str) -> Option<&TermDefinition> {
		self.definitions.get(term)
	}

	/// Checks if the given `term` is defined.
	pub fn contains_term(&self, term: &str) -> bool {
		self.definitions.contains_key(term)
	}

	/// Returns the original base URL of the context.
	pub fn original_base_url(&self) -> Option<&Iri> {
		self.original_base_url.as_deref()
	}

	/// Returns the base IRI of the context.
	pub fn base_iri(&self) -> Option<&Iri> {
		self.base_iri.as_deref()
	}

	/// Returns the `@vocab` value, if any.
	pub fn vocabulary(&self) -> Option<&str> {
		self.vocabulary.as_deref()
	}

	/// Returns the default `@language` value.
	pub fn default_language(&self) -> Option<&str> {
		self.default_language.as_deref()
	}

	/// Returns the default `@direction` value.
	pub fn default_base_direction(&self) -> Option<Direction> {
		self.default_base_direction
	}

	/// Returns a reference to the previous context.
	pub fn previous_context(&self) -> Option<&ActiveContext> {
		self.previous_context.as_deref()
	}

	/// Returns the number of terms defined.
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Checks if no terms are defined.
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Iterates over the term definitions.
	pub fn definitions(&self) -> impl Iterator<Item = (&String, &TermDefinition)> {
		self.definitions.iter()
	}

	/// Checks if the context has a protected definition.
	pub fn has_protected_items(&self) -> bool {
		self.definitions.values().any(|d| d.protected)
	}

	/// Returns the inverse of this context.
	pub fn inverse(&self) -> &InverseContext {
		self.inverse.get_or_init(|| self.into())
	}

	/// Sets the definition for the given term, returning the previous one.
	///
	/// A `None` definition removes the term.
	pub fn set(
		&mut self,
		term: String,
		definition: Option<TermDefinition>,
	) -> Option<TermDefinition> {
		self.inverse.take();
		match definition {
			Some(definition) => self.definitions.insert(term, definition),
			None => self.definitions.shift_remove(&term),
		}
	}

	/// Sets the base IRI.
	pub fn set_base_iri(&mut self, iri: Option<IriBuf>) {
		self.inverse.take();
		self.base_iri = iri
	}

	/// Sets the vocabulary mapping.
	pub fn set_vocabulary(&mut self, vocab: Option<String>) {
		self.inverse.take();
		self.vocabulary = vocab
	}

	/// Sets the default language.
	pub fn set_default_language(&mut self, lang: Option<String>) {
		self.inverse.take();
		self.default_language = lang
	}

	/// Sets the default base direction.
	pub fn set_default_base_direction(&mut self, dir: Option<Direction>) {
		self.inverse.take();
		self.default_base_direction = dir
	}

	/// Sets the previous context.
	pub fn set_previous_context(&mut self, previous: ActiveContext) {
		self.inverse.take();
		self.previous_context = Some(Arc::new(previous))
	}

	/// Sets the previous context to an already shared snapshot.
	pub fn set_shared_previous_context(&mut self, previous: Arc<ActiveContext>) {
		self.inverse.take();
		self.previous_context = Some(previous)
	}

	/// Returns the shared previous context, if any.
	pub fn shared_previous_context(&self) -> Option<&Arc<ActiveContext>> {
		self.previous_context.as_ref()
	}
}

impl Clone for ActiveContext {
	fn clone(&self) -> Self {
		Self {
			original_base_url: self.original_base_url.clone(),
			base_iri: self.base_iri.clone(),
			vocabulary: self.vocabulary.clone(),
			default_language: self.default_language.clone(),
			default_base_direction: self.default_base_direction,
			previous_context: self.previous_context.clone(),
			definitions: self.definitions.clone(),
			inverse: OnceCell::default(),
		}
	}
}

impl std::fmt::Debug for ActiveContext {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("ActiveContext")
			.field("base_iri", &self.base_iri)
			.field("vocabulary", &self.vocabulary)
			.field("default_language", &self.default_language)
			.field("default_base_direction", &self.default_base_direction)
			.field("definitions", &self.definitions)
			.field("has_previous_context", &self.previous_context.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clone_resets_inverse() {
		let mut context = ActiveContext::new(None);
		context.set(
			"name".to_owned(),
			Some(TermDefinition {
				iri: Some("http://example.org/name".to_owned()),
				..Default::default()
			}),
		);

		assert!(context.inverse().contains("http://example.org/name"));

		let mut clone = context.clone();
		clone.set("name".to_owned(), None);
		assert!(!clone.inverse().contains("http://example.org/name"));
		assert!(context.inverse().contains("http://example.org/name"))
	}

	#[test]
	fn inverse_selection() {
		let mut context = ActiveContext::new(None);
		context.set_default_language(Some("en".to_owned()));
		context.set(
			"label".to_owned(),
			Some(TermDefinition {
				iri: Some("http://example.org/label".to_owned()),
				..Default::default()
			}),
		);
		context.set(
			"labelFr".to_owned(),
			Some(TermDefinition {
				iri: Some("http://example.org/label".to_owned()),
				language: Some(Some("fr".to_owned())),
				..Default::default()
			}),
		);

		let inverse = context.inverse();
		assert_eq!(
			inverse.select(
				"http://example.org/label",
				&["@none"],
				Selection::Language,
				&["fr", "@none"]
			),
			Some("labelFr")
		);
		assert_eq!(
			inverse.select(
				"http://example.org/label",
				&["@none"],
				Selection::Language,
				&["en", "@none"]
			),
			Some("label")
		)
	}
}
