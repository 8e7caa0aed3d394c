//! Compaction algorithm.
//!
//! See: <https://www.w3.org/TR/json-ld11-api/#compaction-algorithms>
use json_syntax::{Object, Value};

use crate::{
	algorithms::ProcessingEnvironment,
	util::{is_keyword_key, ObjectExt},
	ActiveContext, Error,
};

mod element;
mod iri;
mod options;
mod property;
mod value;

pub use iri::compact_iri;
pub use options::*;

/// Compactor.
///
/// Holds the parameters shared by the recursive calls of the compaction
/// algorithm.
#[derive(Clone, Copy)]
pub struct Compactor<'a> {
	pub options: CompactionOptions,
	pub active_context: &'a ActiveContext,
	pub active_property: Option<&'a str>,
}

impl<'a> Compactor<'a> {
	pub fn new(active_context: &'a ActiveContext, options: CompactionOptions) -> Self {
		Self {
			options,
			active_context,
			active_property: None,
		}
	}

	pub fn with_active_context<'b>(&self, active_context: &'b ActiveContext) -> Compactor<'b>
	where
		'a: 'b,
	{
		Compactor {
			options: self.options,
			active_context,
			active_property: self.active_property,
		}
	}

	pub fn with_active_property<'b>(&self, active_property: Option<&'b str>) -> Compactor<'b>
	where
		'a: 'b,
	{
		Compactor {
			options: self.options,
			active_context: self.active_context,
			active_property,
		}
	}

	/// Compacts `iri` with the given context.
	pub(crate) fn compact_iri_with(
		&self,
		active_context: &ActiveContext,
		iri: &str,
		vocab: bool,
	) -> Result<String, Error> {
		compact_iri(active_context, iri, None, vocab, false, self.options)
	}

	/// Compacts a keyword into its alias, if any.
	pub(crate) fn alias(&self, keyword: &str) -> Result<String, Error> {
		self.compact_iri_with(self.active_context, keyword, true)
	}
}

/// Compacts an expanded document.
///
/// The result is an object: top-level arrays are wrapped into `@graph`.
pub fn compact(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	expanded: &Value,
	options: CompactionOptions,
) -> Result<Value, Error> {
	log::debug!("compacting document");
	let compactor = Compactor::new(active_context, options);
	let compacted = compactor.compact_element(env, expanded)?;

	// If compacted output is an empty array, replace it with a new map.
	// Otherwise, if compacted output is an array, replace it with a new map
	// with a single entry whose key is the result of IRI compacting @graph
	// and value is compacted output.
	match compacted {
		Value::Array(items) if items.is_empty() => Ok(Value::Object(Object::new())),
		Value::Array(items) => {
			let mut result = Object::new();
			result.set(&compactor.alias("@graph")?, Value::Array(items));
			Ok(Value::Object(result))
		}
		Value::Null => Ok(Value::Object(Object::new())),
		compacted => Ok(compacted),
	}
}

/// Adds the `@context` entry to a compacted document.
///
/// Nothing is added when `context` is null or empty. Empty documents still
/// get the context.
pub fn embed_context(document: Value, context: &Value) -> Value {
	let is_empty_context = match context {
		Value::Null => true,
		Value::Array(items) => items.is_empty(),
		Value::Object(object) => object.is_empty(),
		_ => false,
	};

	match document {
		Value::Object(mut object) if !is_empty_context => {
			object.push_front("@context".into(), context.clone());
			Value::Object(object)
		}
		document => document,
	}
}

/// Checks if `key` compacts a keyword.
fn is_keyword_alias(compactor: &Compactor, key: &str, keyword: &str) -> bool {
	key == keyword
		|| (!is_keyword_key(key)
			&& compactor
				.active_context
				.get(key)
				.is_some_and(|d| d.iri() == Some(keyword)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		algorithms::{expansion, process_context, ContextProcessingOptions, ExpansionOptions},
		util::deep_equals,
		NoLoader,
	};
	use iref::Iri;
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn run(expanded: &Value, context: &str) -> Result<Value, Error> {
		let base = Iri::new("http://example.org/doc").unwrap();
		let context_value = parse(context);
		let active_context = process_context(
			&mut NoLoader,
			&ActiveContext::new(Some(base.to_owned())),
			&context_value,
			Some(base),
			ContextProcessingOptions::default(),
		)?;

		let compacted = compact(
			&mut NoLoader,
			&active_context,
			expanded,
			CompactionOptions::default(),
		)?;
		Ok(embed_context(compacted, &context_value))
	}

	fn check(expanded: &str, context: &str, expected: &str) {
		let compacted = run(&parse(expanded), context).unwrap();
		let expected = parse(expected);
		assert!(
			deep_equals(&compacted, &expected),
			"got {compacted:?}, expected {expected:?}"
		)
	}

	#[test]
	fn context_is_embedded_first() {
		let context = parse(r#"{"@vocab": "http://example.org/"}"#);
		let embedded = embed_context(parse(r#"{"p": 1}"#), &context);
		match &embedded {
			Value::Object(o) => assert_eq!(o.entries()[0].key.as_str(), "@context"),
			_ => panic!("expected an object"),
		}

		let empty = embed_context(parse("{}"), &context);
		assert!(deep_equals(
			&empty,
			&parse(r#"{"@context": {"@vocab": "http://example.org/"}}"#)
		));

		let unchanged = embed_context(parse(r#"{"p": 1}"#), &Value::Null);
		assert!(deep_equals(&unchanged, &parse(r#"{"p": 1}"#)))
	}

	#[test]
	fn terms_and_values() {
		check(
			r#"[{
				"@id": "http://example.org/alice",
				"@type": ["http://xmlns.com/foaf/0.1/Person"],
				"http://xmlns.com/foaf/0.1/name": [{"@value": "Alice"}],
				"http://xmlns.com/foaf/0.1/knows": [{"@id": "http://example.org/bob"}]
			}]"#,
			r#"{
				"foaf": "http://xmlns.com/foaf/0.1/",
				"name": "foaf:name",
				"knows": {"@id": "foaf:knows", "@type": "@id"}
			}"#,
			r#"{
				"@context": {
					"foaf": "http://xmlns.com/foaf/0.1/",
					"name": "foaf:name",
					"knows": {"@id": "foaf:knows", "@type": "@id"}
				},
				"@id": "alice",
				"@type": "foaf:Person",
				"name": "Alice",
				"knows": "bob"
			}"#,
		)
	}

	#[test]
	fn top_level_arrays_use_graph() {
		check(
			r#"[
				{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]},
				{"@id": "http://example.org/b", "http://example.org/p": [{"@value": 2}]}
			]"#,
			r#"{"@vocab": "http://example.org/"}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [{"@id": "a", "p": 1}, {"@id": "b", "p": 2}]
			}"#,
		)
	}

	#[test]
	fn list_container_round_trip() {
		let context = r#"{"items": {"@id": "http://example.org/items", "@container": "@list"}}"#;
		let document = format!(r#"{{"@context": {context}, "items": ["a", "b"]}}"#);

		let base = Iri::new("http://example.org/doc").unwrap();
		let expanded = expansion::expand(
			&mut NoLoader,
			&ActiveContext::new(Some(base.to_owned())),
			&parse(&document),
			Some(base),
			ExpansionOptions::default(),
		)
		.unwrap();

		assert!(deep_equals(
			&expanded,
			&parse(
				r#"[{"http://example.org/items": [{"@list": [{"@value": "a"}, {"@value": "b"}]}]}]"#
			)
		));

		let compacted = run(&expanded, context).unwrap();
		assert!(deep_equals(&compacted, &parse(&document)))
	}

	#[test]
	fn language_and_index_maps() {
		check(
			r#"[{
				"http://example.org/label": [
					{"@value": "Hello", "@language": "en"},
					{"@value": "Bonjour", "@language": "fr"}
				],
				"http://example.org/post": [
					{"@id": "http://example.org/p1", "@index": "first"}
				]
			}]"#,
			r#"{
				"label": {"@id": "http://example.org/label", "@container": "@language"},
				"post": {"@id": "http://example.org/post", "@container": "@index", "@type": "@id"}
			}"#,
			r#"{
				"@context": {
					"label": {"@id": "http://example.org/label", "@container": "@language"},
					"post": {"@id": "http://example.org/post", "@container": "@index", "@type": "@id"}
				},
				"label": {"en": "Hello", "fr": "Bonjour"},
				"post": {"first": "p1"}
			}"#,
		)
	}

	#[test]
	fn reverse_properties() {
		check(
			r#"[{
				"@id": "http://example.org/alice",
				"@reverse": {"http://example.org/parent": [{"@id": "http://example.org/bob"}]}
			}]"#,
			r#"{"children": {"@reverse": "http://example.org/parent", "@type": "@id"}}"#,
			r#"{
				"@context": {"children": {"@reverse": "http://example.org/parent", "@type": "@id"}},
				"@id": "alice",
				"children": "bob"
			}"#,
		)
	}

	#[test]
	fn nested_properties() {
		check(
			r#"[{"@id": "http://example.org/a", "http://example.org/p": [{"@value": "x"}]}]"#,
			r#"{"meta": "@nest", "p": {"@id": "http://example.org/p", "@nest": "meta"}}"#,
			r#"{
				"@context": {"meta": "@nest", "p": {"@id": "http://example.org/p", "@nest": "meta"}},
				"@id": "a",
				"meta": {"p": "x"}
			}"#,
		)
	}
}
