use std::collections::HashMap;

use json_syntax::{Object, Value};
use mown::Mown;

use super::{merged::Merged, ContextProcessor};
use crate::{
	algorithms::ProcessingEnvironment,
	blank::is_blank_id,
	context::Type,
	keyword::{is_keyword, is_keyword_like},
	util::{as_str, is_absolute_iri, is_gen_delim, object1, ObjectExt},
	warning::check_language_tag,
	ActiveContext, Container, ContainerItem, Direction, Error, ErrorCode, ProcessingMode,
	TermDefinition, Warning,
};

/// Entries allowed in an expanded term definition.
const TERM_DEFINITION_ENTRIES: [&str; 11] = [
	"@id",
	"@reverse",
	"@container",
	"@context",
	"@direction",
	"@index",
	"@language",
	"@nest",
	"@prefix",
	"@protected",
	"@type",
];

// Checks if the input term is an IRI ending with a gen-delim character, or a blank node identifier.
fn is_gen_delim_or_blank(iri: &str) -> bool {
	is_blank_id(iri) || iri.chars().last().is_some_and(is_gen_delim)
}

/// Checks if the the given character is included in the given string anywhere but at the first or last position.
fn contains_between_boundaries(id: &str, c: char) -> bool {
	match (id.find(c), id.rfind(c)) {
		(Some(i), Some(j)) => i > 0 && j < id.len() - c.len_utf8(),
		_ => false,
	}
}

/// Splits a compact IRI `prefix:suffix`, where the colon is not the first
/// character.
pub(super) fn split_compact_iri(value: &str) -> Option<(&str, &str)> {
	let (i, _) = value.char_indices().skip(1).find(|(_, c)| *c == ':')?;
	Some((&value[..i], &value[(i + 1)..]))
}

/// Definition state of the terms of a local context.
///
/// A term is either undefined (absent), pending (being defined), or defined.
#[derive(Default)]
pub struct DefinedTerms(HashMap<String, bool>);

impl DefinedTerms {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts the definition of a term.
	///
	/// Returns `false` if the term is already defined, and fails if it is
	/// pending.
	pub fn begin(&mut self, term: &str) -> Result<bool, Error> {
		match self.0.get(term) {
			Some(true) => Ok(false),
			Some(false) => Err(Error::new(ErrorCode::CyclicIriMapping, term)),
			None => {
				self.0.insert(term.to_owned(), false);
				Ok(true)
			}
		}
	}

	pub fn end(&mut self, term: &str) {
		self.0.insert(term.to_owned(), true);
	}
}

fn parse_container(value: &Value, mode: ProcessingMode) -> Result<Container, Error> {
	let item = |v: &Value| -> Result<ContainerItem, Error> {
		as_str(v)
			.and_then(|s| ContainerItem::try_from(s).ok())
			.ok_or_else(|| ErrorCode::InvalidContainerMapping.into())
	};

	match value {
		Value::Array(items) if mode == ProcessingMode::JsonLd1_1 => {
			let items = items.iter().map(item).collect::<Result<Vec<_>, _>>()?;
			Container::from_items(items).map_err(|_| ErrorCode::InvalidContainerMapping.into())
		}
		value => {
			let item = item(value)?;
			if mode == ProcessingMode::JsonLd1_0
				&& matches!(
					item,
					ContainerItem::Graph | ContainerItem::Id | ContainerItem::Type
				) {
				return Err(ErrorCode::InvalidContainerMapping.into());
			}

			Ok(item.into())
		}
	}
}

impl<'a> ContextProcessor<'a> {
	/// Create Term Definition algorithm.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#create-term-definition>.
	pub(super) fn define(
		&self,
		env: &mut impl ProcessingEnvironment,
		result: &mut ActiveContext,
		local_context: &Merged,
		term: &str,
		defined: &mut DefinedTerms,
	) -> Result<(), Error> {
		// 1) If defined contains the entry term and the associated value is true
		// (indicating that the term definition has already been created), return.
		// Otherwise, if the value is false, a cyclic IRI mapping error has been
		// detected and processing is aborted.
		// 2) Set the value associated with defined's term entry to false.
		if defined.begin(term)? {
			log::trace!("defining term `{term}`");
			self.define_term(env, result, local_context, term, defined)?;
			defined.end(term)
		}

		Ok(())
	}

	fn define_term(
		&self,
		env: &mut impl ProcessingEnvironment,
		result: &mut ActiveContext,
		local_context: &Merged,
		term: &str,
		defined: &mut DefinedTerms,
	) -> Result<(), Error> {
		let is_1_0 = self.is_1_0();

		// The term must not be empty.
		if term.is_empty() {
			if is_1_0 {
				env.warn(Warning::EmptyTerm);
				return Ok(());
			}

			return Err(Error::new(ErrorCode::InvalidTermDefinition, "empty term"));
		}

		// 3) Initialize `value` to a copy of the value associated with the entry
		// `term` in `local_context`.
		let Some(value) = local_context.get(term) else {
			return Ok(());
		};

		if term == "@type" {
			// 4) If term is @type, and processing mode is json-ld-1.0, a keyword
			// redefinition error has been detected and processing is aborted.
			// At this point, `value` MUST be a map with only either or both of
			// the following entries:
			// - An entry for @container with value @set.
			// - An entry for @protected.
			// Any other value means that a keyword redefinition error has been
			// detected and processing is aborted.
			let valid = !is_1_0
				&& match value {
					Value::Object(o) => {
						!o.is_empty()
							&& o.key_strs()
								.all(|k| k == "@container" || k == "@protected")
							&& o.value("@container")
								.map_or(true, |c| as_str(c) == Some("@set"))
					}
					_ => false,
				};

			if !valid {
				return Err(Error::new(ErrorCode::KeywordRedefinition, term));
			}
		} else if is_keyword(term) {
			// 5) Otherwise, since keywords cannot be overridden, term MUST NOT be
			// a keyword and a keyword redefinition error has been detected and
			// processing is aborted.
			return Err(Error::new(ErrorCode::KeywordRedefinition, term));
		} else if is_keyword_like(term) {
			// If term has the form of a keyword, return; processors SHOULD
			// generate a warning.
			env.warn(Warning::KeywordLikeTerm(term.to_owned()));
			return Ok(());
		}

		// 6) Initialize `previous_definition` to any existing term definition
		// for `term` in `active_context`, removing that term definition from
		// active context.
		let previous_definition = result.set(term.to_owned(), None);

		// 7) If value is null, convert it to a map consisting of a single entry
		// whose key is @id and whose value is null.
		// 8) Otherwise, if value is a string, convert it to a map consisting of
		// a single entry whose key is @id and whose value is value. Set simple
		// term to true.
		// 9) Otherwise, value MUST be a map, if not, an invalid term definition
		// error has been detected and processing is aborted. Set simple term to
		// false.
		let (value, simple_term): (Mown<Object>, bool) = match value {
			Value::Null => (Mown::Owned(object1("@id", Value::Null)), false),
			Value::String(_) => (Mown::Owned(object1("@id", value.clone())), true),
			Value::Object(o) => (Mown::Borrowed(o), false),
			_ => return Err(Error::new(ErrorCode::InvalidTermDefinition, term)),
		};

		// 10) Create a new term definition, `definition`, initializing `prefix`
		// flag to `false`, `protected` to `protected`, and `reverse_property` to
		// `false`.
		let mut definition = TermDefinition {
			protected: matches!(local_context.get("@protected"), Some(Value::Boolean(true))),
			..Default::default()
		};

		// 11) If the @protected entry in value is true set the protected flag in
		// definition to true.
		if let Some(protected) = value.value("@protected") {
			// If processing mode is json-ld-1.0, an invalid term definition has
			// been detected and processing is aborted.
			if is_1_0 {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}

			match protected {
				Value::Boolean(b) => definition.protected = *b,
				_ => return Err(ErrorCode::InvalidProtectedValue.into()),
			}
		}

		// 12) If value contains the entry @type:
		if let Some(typ) = value.value("@type") {
			// 12.1) Initialize `typ` to the value associated with the @type entry,
			// which MUST be a string. Otherwise, an invalid type mapping error
			// has been detected and processing is aborted.
			let Value::String(typ) = typ else {
				return Err(ErrorCode::InvalidTypeMapping.into());
			};

			// 12.2) Set `typ` to the result of IRI expanding type, using
			// local context, and defined.
			let typ = self
				.expand_iri_with(env, result, local_context, defined, typ, false, true)?
				.map(|t| Type::from_expanded(&t));

			// 12.3) If the expanded type is @json or @none, and processing mode is
			// json-ld-1.0, an invalid type mapping error has been detected and
			// processing is aborted.
			// 12.4) Otherwise, if the expanded type is neither @id, nor @json, nor
			// @none, nor @vocab, nor an IRI, an invalid type mapping error has
			// been detected and processing is aborted.
			match &typ {
				Some(Type::Json | Type::None) if is_1_0 => {
					return Err(ErrorCode::InvalidTypeMapping.into())
				}
				Some(Type::Iri(iri)) if !is_absolute_iri(iri) => {
					return Err(Error::new(ErrorCode::InvalidTypeMapping, iri))
				}
				None => return Err(ErrorCode::InvalidTypeMapping.into()),
				_ => (),
			}

			// 12.5) Set the type mapping for definition to type.
			definition.typ = typ
		}

		// 13) If value contains the entry @reverse:
		if let Some(reverse) = value.value("@reverse") {
			// 13.1) If value contains @id or @nest, entries, an invalid reverse
			// property error has been detected and processing is aborted.
			if value.has("@id") || value.has("@nest") {
				return Err(Error::new(ErrorCode::InvalidReverseProperty, term));
			}

			// 13.2) If the value associated with the @reverse entry is not a
			// string, an invalid IRI mapping error has been detected and
			// processing is aborted.
			let Value::String(reverse) = reverse else {
				return Err(Error::new(ErrorCode::InvalidIriMapping, term));
			};

			// 13.3) If the value associated with the @reverse entry is a string
			// having the form of a keyword, return; processors SHOULD generate a
			// warning.
			if is_keyword_like(reverse) {
				env.warn(Warning::KeywordLikeValue(reverse.to_string()));
				return Ok(());
			}

			// 13.4) Otherwise, set the IRI mapping of definition to the result of
			// IRI expanding the value associated with the @reverse entry. If the
			// result does not have the form of an IRI or a blank node
			// identifier, an invalid IRI mapping error has been detected and
			// processing is aborted.
			match self.expand_iri_with(env, result, local_context, defined, reverse, false, true)? {
				Some(iri) if is_absolute_iri(&iri) || is_blank_id(&iri) => {
					definition.iri = Some(iri)
				}
				_ => return Err(Error::new(ErrorCode::InvalidIriMapping, term)),
			}

			// 13.5) If value contains an @container entry, set the container
			// mapping of definition to its value; if its value is neither @set,
			// nor @index, nor null, an invalid reverse property error has been
			// detected (reverse properties only support set- and
			// index-containers) and processing is aborted.
			if let Some(container) = value.value("@container") {
				match container {
					Value::Null => (),
					Value::String(s) if s.as_str() == "@set" => {
						definition.container = ContainerItem::Set.into()
					}
					Value::String(s) if s.as_str() == "@index" => {
						definition.container = ContainerItem::Index.into()
					}
					_ => return Err(Error::new(ErrorCode::InvalidReverseProperty, term)),
				}
			}

			// 13.6) Set the `reverse_property` flag of definition to `true`.
			definition.reverse_property = true;

			// 13.7) Set the term definition of term in active context to
			// definition and the value associated with defined's entry term to
			// true and return.
			return self.commit(result, term, definition, previous_definition);
		}

		match value.value("@id") {
			// 14) If value contains the entry @id and its value does not equal
			// term:
			Some(id) if as_str(id) != Some(term) => match id {
				// 14.1) If the @id entry of value is null, the term is not used
				// for IRI expansion, but is retained to be able to detect future
				// redefinitions of this term.
				Value::Null => (),
				Value::String(id) => {
					// 14.2.2) If the value associated with the @id entry is not a
					// keyword, but has the form of a keyword, return; processors
					// SHOULD generate a warning.
					if !is_keyword(id) && is_keyword_like(id) {
						env.warn(Warning::KeywordLikeValue(id.to_string()));
						return Ok(());
					}

					// 14.2.3) Otherwise, set the IRI mapping of `definition` to
					// the result of IRI expanding the value associated with the
					// @id entry. If the resulting IRI mapping is neither a
					// keyword, nor an IRI, nor a blank node identifier, an
					// invalid IRI mapping error has been detected and processing
					// is aborted; if it equals @context, an invalid keyword alias
					// error has been detected and processing is aborted.
					let iri = match self.expand_iri_with(
						env,
						result,
						local_context,
						defined,
						id,
						false,
						true,
					)? {
						Some(iri)
							if is_keyword(&iri) || is_absolute_iri(&iri) || is_blank_id(&iri) =>
						{
							iri
						}
						_ => return Err(Error::new(ErrorCode::InvalidIriMapping, term)),
					};

					if iri == "@context" {
						return Err(Error::new(ErrorCode::InvalidKeywordAlias, term));
					}

					// 14.2.4) If the term contains a colon (:) anywhere but as the
					// first or last character of term, or if it contains a slash
					// (/) anywhere:
					if contains_between_boundaries(term, ':') || term.contains('/') {
						// 14.2.4.1) Set the value associated with defined's term
						// entry to true.
						defined.end(term);

						// 14.2.4.2) If the result of IRI expanding term using
						// local context, and defined, is not the same as the IRI
						// mapping of definition, an invalid IRI mapping error has
						// been detected and processing is aborted.
						let expanded_term = self.expand_iri_with(
							env,
							result,
							local_context,
							defined,
							term,
							false,
							true,
						)?;

						if expanded_term.as_deref() != Some(iri.as_str()) {
							return Err(Error::new(ErrorCode::InvalidIriMapping, term));
						}
					}

					// 14.2.5) If term contains neither a colon (:) nor a slash
					// (/), simple term is true, and if the IRI mapping of
					// definition is either an IRI ending with a gen-delim
					// character, or a blank node identifier, set the `prefix`
					// flag in `definition` to true.
					if !term.contains(':')
						&& !term.contains('/') && simple_term
						&& is_gen_delim_or_blank(&iri)
					{
						definition.prefix = true;
					}

					definition.iri = Some(iri)
				}
				// 14.2.1) If the value associated with the @id entry is not a
				// string, an invalid IRI mapping error has been detected and
				// processing is aborted.
				_ => return Err(Error::new(ErrorCode::InvalidIriMapping, term)),
			},
			_ => {
				definition.iri = Some(if let Some((prefix, suffix)) = split_compact_iri(term) {
					// 15) Otherwise if the `term` contains a colon (:) anywhere after
					// the first character.
					// 15.1) If `term` is a compact IRI with a prefix that is an
					// entry in local context a dependency has been found. Use this
					// algorithm recursively passing `active_context`,
					// `local_context`, the prefix as term, and `defined`.
					if local_context.contains(prefix) {
						self.define(env, result, local_context, prefix, defined)?
					}

					// 15.2) If `term`'s prefix has a term definition in
					// `active_context`, set the IRI mapping of `definition` to
					// the result of concatenating the value associated with the
					// prefix's IRI mapping and the term's suffix.
					match result.get(prefix).and_then(TermDefinition::iri) {
						Some(prefix_iri) if !suffix.starts_with("//") => {
							format!("{prefix_iri}{suffix}")
						}
						// 15.3) Otherwise, term is an IRI or blank node
						// identifier. Set the IRI mapping of definition to term.
						_ => term.to_owned(),
					}
				} else if term.contains('/') {
					// 16) Term is a relative IRI reference.
					// Set the IRI mapping of definition to the result of IRI
					// expanding term. If the resulting IRI mapping is not an
					// IRI, an invalid IRI mapping error has been detected and
					// processing is aborted.
					match self.expand_iri_with(env, result, local_context, defined, term, false, true)? {
						Some(iri) if is_absolute_iri(&iri) => iri,
						_ => return Err(Error::new(ErrorCode::InvalidIriMapping, term)),
					}
				} else if term == "@type" {
					// 17) Otherwise, if `term` is ``@type`, set the IRI mapping of
					// definition to @type.
					"@type".to_owned()
				} else {
					// 18) Otherwise, if `active_context` has a vocabulary mapping,
					// the IRI mapping of `definition` is set to the result of
					// concatenating the value associated with the vocabulary
					// mapping and `term`. If it does not have a vocabulary
					// mapping, an invalid IRI mapping error been detected and
					// processing is aborted.
					match result.vocabulary() {
						Some(vocab) => format!("{vocab}{term}"),
						None => return Err(Error::new(ErrorCode::InvalidIriMapping, term)),
					}
				})
			}
		}

		// 19) If value contains the entry @container:
		if let Some(container) = value.value("@container") {
			// 19.1) Initialize `container` to the value associated with the
			// @container entry, which MUST be either @graph, @id, @index,
			// @language, @list, @set, @type, or an array containing exactly any
			// one of those keywords, an array containing @graph and either @id
			// or @index optionally including @set, or an array containing a
			// combination of @set and any of @index, @graph, @id, @type,
			// @language in any order. Otherwise, an invalid container mapping
			// has been detected and processing is aborted.
			let container = parse_container(container, self.options.processing_mode)?;

			// 19.3) If the container mapping of definition includes @type:
			if container.contains(ContainerItem::Type) {
				match &definition.typ {
					// 19.3.1) If type mapping in definition is undefined, set it
					// to @id.
					None => definition.typ = Some(Type::Id),
					// 19.3.2) If type mapping is neither @id nor @vocab, an
					// invalid type mapping error has been detected and
					// processing is aborted.
					Some(Type::Id | Type::Vocab) => (),
					Some(_) => return Err(Error::new(ErrorCode::InvalidTypeMapping, term)),
				}
			}

			// 19.2) Set the container mapping of definition to container.
			definition.container = container
		}

		// 20) If value contains the entry @index:
		if let Some(index) = value.value("@index") {
			// 20.1) If processing mode is json-ld-1.0 or container mapping does
			// not include @index, an invalid term definition has been detected
			// and processing is aborted.
			if is_1_0 || !definition.container.contains(ContainerItem::Index) {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}

			// 20.2) Initialize `index` to the value associated with the @index
			// entry. If the result of IRI expanding that value is not an IRI, an
			// invalid term definition has been detected and processing is
			// aborted.
			let Value::String(index) = index else {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			};

			match self.expand_iri_with(env, result, local_context, defined, index, false, true)? {
				Some(iri) if is_absolute_iri(&iri) => (),
				_ => return Err(Error::new(ErrorCode::InvalidTermDefinition, term)),
			}

			// 20.3) Set the index mapping of definition to index
			definition.index = Some(index.to_string())
		}

		// 21) If `value` contains the entry @context:
		if let Some(context) = value.value("@context") {
			// 21.1) If processing mode is json-ld-1.0, an invalid term definition
			// has been detected and processing is aborted.
			if is_1_0 {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}

			// 21.3) Invoke the Context Processing algorithm using the
			// `active_context`, `context` as local context, `base_url`, `true`
			// for override protected, a copy of remote contexts, and `false` for
			// `validate_scoped_context`. If any error is detected, an invalid
			// scoped context error has been detected and processing is aborted.
			let options = self.options.with_override().without_scoped_validation();
			self.for_sub_context(result, self.base_url, options)
				.process(env, context)
				.map_err(|e| Error::new(ErrorCode::InvalidScopedContext, e))?;

			// 21.4) Set the local context of definition to context, and base URL
			// to base URL.
			definition.context = Some(Box::new(context.clone()));
			definition.base_url = self.base_url.map(ToOwned::to_owned);
		}

		// 22) If `value` contains the entry @language and does not contain the
		// entry @type:
		if !value.has("@type") {
			if let Some(language) = value.value("@language") {
				// 22.1) Initialize `language` to the value associated with the
				// @language entry, which MUST be either null or a string. If
				// language is not well-formed according to section 2.2.9 of
				// [BCP47], processors SHOULD issue a warning. Otherwise, an
				// invalid language mapping error has been detected and
				// processing is aborted.
				definition.language = Some(match language {
					Value::Null => None,
					Value::String(tag) => {
						if let Some(w) = check_language_tag(tag) {
							env.warn(w)
						}

						Some(tag.to_string())
					}
					_ => return Err(Error::new(ErrorCode::InvalidLanguageMapping, term)),
				})
			}

			// 23) If `value` contains the entry @direction and does not contain
			// the entry @type:
			if let Some(direction) = value.value("@direction") {
				// 23.1) Initialize `direction` to the value associated with the
				// @direction entry, which MUST be either null, "ltr", or "rtl".
				// Otherwise, an invalid base direction error has been detected
				// and processing is aborted.
				definition.direction = Some(match direction {
					Value::Null => None,
					Value::String(d) => match Direction::try_from(d.as_str()) {
						Ok(d) => Some(d),
						Err(_) => {
							return Err(Error::new(ErrorCode::InvalidBaseDirection, term))
						}
					},
					_ => return Err(Error::new(ErrorCode::InvalidBaseDirection, term)),
				})
			}
		}

		// 24) If value contains the entry @nest:
		if let Some(nest) = value.value("@nest") {
			// 24.1) If processing mode is json-ld-1.0, an invalid term definition
			// has been detected and processing is aborted.
			if is_1_0 {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}

			// 24.2) Initialize `nest` value in `definition` to the value
			// associated with the @nest entry, which MUST be a string and MUST
			// NOT be a keyword other than @nest. Otherwise, an invalid @nest
			// value error has been detected and processing is aborted.
			match nest {
				Value::String(n) if n.as_str() == "@nest" || !is_keyword(n) => {
					definition.nest = Some(n.to_string())
				}
				_ => return Err(Error::new(ErrorCode::InvalidNestValue, term)),
			}
		}

		// 25) If value contains the entry @prefix:
		if let Some(prefix) = value.value("@prefix") {
			// 25.1) If processing mode is json-ld-1.0, or if `term` contains a
			// colon (:) or slash (/), an invalid term definition has been
			// detected and processing is aborted.
			if is_1_0 || term.contains(':') || term.contains('/') {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}

			// 25.2) Initialize the `prefix` flag to the value associated with the
			// @prefix entry, which MUST be a boolean. Otherwise, an invalid
			// @prefix value error has been detected and processing is aborted.
			match prefix {
				Value::Boolean(b) => definition.prefix = *b,
				_ => return Err(Error::new(ErrorCode::InvalidPrefixValue, term)),
			}

			// 25.3) If the `prefix` flag of `definition` is set to `true`, and its
			// IRI mapping is a keyword, an invalid term definition has been
			// detected and processing is aborted.
			if definition.prefix && definition.iri().is_some_and(is_keyword) {
				return Err(Error::new(ErrorCode::InvalidTermDefinition, term));
			}
		}

		// 26) If `value` contains any entry other than @id, @reverse,
		// @container, @context, @direction, @index, @language, @nest, @prefix,
		// @protected, or @type, an invalid term definition error has been
		// detected and processing is aborted.
		if let Some(key) = value
			.key_strs()
			.find(|k| !TERM_DEFINITION_ENTRIES.contains(k))
		{
			return Err(Error::new(
				ErrorCode::InvalidTermDefinition,
				format!("unexpected entry `{key}` in definition of `{term}`"),
			));
		}

		self.commit(result, term, definition, previous_definition)
	}

	fn commit(
		&self,
		result: &mut ActiveContext,
		term: &str,
		mut definition: TermDefinition,
		previous_definition: Option<TermDefinition>,
	) -> Result<(), Error> {
		// 27) If `override_protected` is false and `previous_definition` exists
		// and is protected;
		if !self.options.override_protected {
			if let Some(previous_definition) = previous_definition {
				if previous_definition.protected {
					// 27.1) If `definition` is not the same as
					// `previous_definition` (other than the value of protected),
					// a protected term redefinition error has been detected, and
					// processing is aborted.
					if definition.modulo_protected_field()
						!= previous_definition.modulo_protected_field()
					{
						return Err(Error::new(ErrorCode::ProtectedTermRedefinition, term));
					}

					// 27.2) Set `definition` to `previous definition` to retain
					// the value of protected.
					definition = previous_definition;
				}
			}
		}

		// 28) Set the term definition of `term` in `active_context` to
		// `definition` and set the value associated with `defined`'s entry term
		// to true.
		result.set(term.to_owned(), Some(definition));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn compact_iri_split() {
		assert_eq!(split_compact_iri("ex:name"), Some(("ex", "name")));
		assert_eq!(split_compact_iri(":name"), None);
		assert_eq!(split_compact_iri("name"), None)
	}

	#[test]
	fn boundaries() {
		assert!(contains_between_boundaries("ex:name", ':'));
		assert!(!contains_between_boundaries("name:", ':'));
		assert!(!contains_between_boundaries(":name", ':'))
	}

	#[test]
	fn cycle_detection() {
		let mut defined = DefinedTerms::new();
		assert!(defined.begin("a").unwrap());
		assert_eq!(
			defined.begin("a").unwrap_err().code(),
			ErrorCode::CyclicIriMapping
		);
		defined.end("a");
		assert!(!defined.begin("a").unwrap())
	}
}
