use super::{define::split_compact_iri, merged::Merged, ContextProcessor, DefinedTerms};
use crate::{
	algorithms::ProcessingEnvironment,
	keyword::{is_keyword, is_keyword_like},
	util::{is_absolute_iri, resolve_iri},
	ActiveContext, Error, Warning,
};

impl<'a> ContextProcessor<'a> {
	/// IRI expansion during context processing.
	///
	/// Terms of the local context are defined on demand before being used.
	#[allow(clippy::too_many_arguments)]
	pub(super) fn expand_iri_with(
		&self,
		env: &mut impl ProcessingEnvironment,
		result: &mut ActiveContext,
		local_context: &Merged,
		defined: &mut DefinedTerms,
		value: &str,
		document_relative: bool,
		vocab: bool,
	) -> Result<Option<String>, Error> {
		if is_keyword(value) {
			return Ok(Some(value.to_owned()));
		}

		if is_keyword_like(value) {
			env.warn(Warning::KeywordLikeValue(value.to_owned()));
			return Ok(None);
		}

		// 3) If `local_context` is not null, it contains an entry with a key
		// that equals value, and the value of the entry for value in defined is
		// not true, invoke the Create Term Definition algorithm, passing active
		// context, local context, value as term, and defined. This will ensure
		// that a term definition is created for value in active context during
		// Context Processing.
		if local_context.contains(value) {
			self.define(env, result, local_context, value, defined)?
		}

		// 6.3) If `local_context` is not null, it contains a `prefix` entry, and
		// the value of the prefix entry in defined is not true, invoke the
		// Create Term Definition algorithm, passing active context, local
		// context, prefix as term, and defined. This will ensure that a term
		// definition is created for prefix in active context during Context
		// Processing.
		if let Some((prefix, suffix)) = split_compact_iri(value) {
			if prefix != "_" && !suffix.starts_with("//") && local_context.contains(prefix) {
				self.define(env, result, local_context, prefix, defined)?
			}
		}

		Ok(expand_iri(env, result, value, document_relative, vocab))
	}
}

/// IRI expansion.
///
/// Returns `None` if the value is mapped to null, or if it has the form of
/// a keyword without being one.
///
/// See <https://www.w3.org/TR/json-ld11-api/#iri-expansion>.
pub fn expand_iri(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	value: &str,
	document_relative: bool,
	vocab: bool,
) -> Option<String> {
	// 1) If `value` is a keyword or null, return value as is.
	if is_keyword(value) {
		return Some(value.to_owned());
	}

	// 2) If `value` has the form of a keyword, a processor SHOULD generate a
	// warning and return null.
	if is_keyword_like(value) {
		env.warn(Warning::KeywordLikeValue(value.to_owned()));
		return None;
	}

	if let Some(definition) = active_context.get(value) {
		// 4) If active context has a term definition for value, and the
		// associated IRI mapping is a keyword, return that keyword.
		if let Some(iri) = definition.iri() {
			if is_keyword(iri) {
				return Some(iri.to_owned());
			}
		}

		// 5) If vocab is true and the active context has a term definition for
		// value, return the associated IRI mapping.
		if vocab {
			return definition.iri.clone();
		}
	}

	// 6) If value contains a colon (:) anywhere after the first character, it
	// is either an IRI, a compact IRI, or a blank node identifier:
	if let Some((prefix, suffix)) = split_compact_iri(value) {
		// 6.2) If `prefix` is underscore (_) or `suffix` begins with
		// double-forward-slash (//), return value as it is already an IRI or a
		// blank node identifier.
		if prefix == "_" || suffix.starts_with("//") {
			return Some(value.to_owned());
		}

		// 6.4) If active context contains a term definition for prefix having a
		// non-null IRI mapping and the prefix flag of the term definition is
		// true, return the result of concatenating the IRI mapping associated
		// with prefix and suffix.
		if let Some(definition) = active_context.get(prefix) {
			if let Some(prefix_iri) = definition.iri() {
				if definition.prefix {
					return Some(format!("{prefix_iri}{suffix}"));
				}
			}
		}

		// 6.5) If value has the form of an IRI, return value.
		if is_absolute_iri(value) {
			return Some(value.to_owned());
		}
	}

	// 7) If vocab is true, and active context has a vocabulary mapping, return
	// the result of concatenating the vocabulary mapping with value.
	if vocab {
		if let Some(vocabulary) = active_context.vocabulary() {
			return Some(format!("{vocabulary}{value}"));
		}
	}

	// 8) Otherwise, if document relative is true set value to the result of
	// resolving value against the base IRI from active context. Only the basic
	// algorithm in section 5.2 of [RFC3986] is used; neither Syntax-Based
	// Normalization nor Scheme-Based Normalization are performed. Characters
	// additionally allowed in IRI references are treated in the same way that
	// unreserved characters are treated in URI references, per section 6.5 of
	// [RFC3987].
	if document_relative {
		if let Some(base) = active_context.base_iri() {
			return match resolve_iri(value, Some(base)) {
				Some(iri) => Some(iri.as_str().to_owned()),
				None => {
					env.warn(Warning::MalformedIri(value.to_owned()));
					Some(value.to_owned())
				}
			};
		}
	}

	// 9) Return value as is.
	Some(value.to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{algorithms::Environment, loader::NoLoader, TermDefinition};

	fn context() -> ActiveContext {
		let mut context = ActiveContext::new(Some(
			iref::IriBuf::new("http://example.org/doc/".to_owned()).unwrap(),
		));
		context.set_vocabulary(Some("http://vocab.org/".to_owned()));
		context.set(
			"ex".to_owned(),
			Some(TermDefinition {
				iri: Some("http://example.org/ns#".to_owned()),
				prefix: true,
				..Default::default()
			}),
		);
		context.set(
			"id".to_owned(),
			Some(TermDefinition {
				iri: Some("@id".to_owned()),
				..Default::default()
			}),
		);
		context
	}

	#[test]
	fn expansion_order() {
		let context = context();
		let mut env = Environment::new(NoLoader);

		assert_eq!(
			expand_iri(&mut env, &context, "id", false, false).as_deref(),
			Some("@id")
		);
		assert_eq!(
			expand_iri(&mut env, &context, "ex:name", false, true).as_deref(),
			Some("http://example.org/ns#name")
		);
		assert_eq!(
			expand_iri(&mut env, &context, "name", false, true).as_deref(),
			Some("http://vocab.org/name")
		);
		assert_eq!(
			expand_iri(&mut env, &context, "page", true, false).as_deref(),
			Some("http://example.org/doc/page")
		);
		assert_eq!(
			expand_iri(&mut env, &context, "_:b0", true, true).as_deref(),
			Some("_:b0")
		);
		assert!(env.warnings().is_empty())
	}

	#[test]
	fn keyword_like_values_are_null() {
		let context = context();
		let mut env = Environment::new(NoLoader);
		assert_eq!(expand_iri(&mut env, &context, "@ignoreMe", false, true), None);
		assert_eq!(env.warnings().len(), 1)
	}
}
