//! Expansion algorithm.
//!
//! See: <https://www.w3.org/TR/json-ld11-api/#expansion-algorithms>
use iref::Iri;
use json_syntax::Value;

use crate::{
	algorithms::ProcessingEnvironment, keyword::is_keyword, ActiveContext, Error,
};

mod document;
mod element;
mod environment;
mod iri;
mod node;
mod options;
mod value;

pub use environment::Expander;
pub use options::*;
pub use value::expand_value;

/// Expands `document` with the given active context.
///
/// `base_url` is the document URL, used to resolve relative IRIs found in
/// `@context` entries.
pub fn expand(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	document: &Value,
	base_url: Option<&Iri>,
	options: ExpansionOptions,
) -> Result<Value, Error> {
	Expander::new(active_context, base_url, options).expand_document(env, document)
}

/// Returns the keyword `key` stands for, if any.
///
/// A key stands for a keyword if it is one, or if it is an alias of one.
pub(super) fn keyword_of<'c>(context: &'c ActiveContext, key: &'c str) -> Option<&'c str> {
	if is_keyword(key) {
		return Some(key);
	}

	context
		.get(key)
		.and_then(|d| d.iri())
		.filter(|iri| is_keyword(iri))
}

/// Converts an expanded value into an array. `null` becomes the empty array.
pub(super) fn to_array(value: Value) -> Vec<Value> {
	match value {
		Value::Null => Vec::new(),
		Value::Array(items) => items,
		other => vec![other],
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		util::{deep_equals, deep_equals_unordered},
		Environment, ErrorCode, NoLoader, Warning,
	};
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn run(input: &str, options: ExpansionOptions) -> Result<(Value, Vec<Warning>), Error> {
		let mut env = Environment::new(NoLoader);
		let base = Iri::new("http://example.org/doc").unwrap();
		let context = ActiveContext::new(Some(base.to_owned()));
		let expanded = expand(&mut env, &context, &parse(input), Some(base), options)?;
		Ok((expanded, env.into_warnings()))
	}

	fn check(input: &str, expected: &str) {
		let (expanded, _) = run(input, ExpansionOptions::default()).unwrap();
		let expected = parse(expected);
		assert!(
			deep_equals_unordered(&expanded, &expected),
			"got {expanded:?}, expected {expected:?}"
		)
	}

	#[test]
	fn simple_terms() {
		check(
			r#"{
				"@context": {"name": "http://xmlns.com/foaf/0.1/name"},
				"@id": "alice",
				"name": "Alice"
			}"#,
			r#"[{
				"@id": "http://example.org/alice",
				"http://xmlns.com/foaf/0.1/name": [{"@value": "Alice"}]
			}]"#,
		)
	}

	#[test]
	fn free_floating_values_are_dropped() {
		check(r#"{"@value": "x"}"#, "[]");
		check(r#"[1, "a", {"@id": "http://example.org/x"}]"#, "[]");
		check("null", "[]")
	}

	#[test]
	fn top_level_graph_is_unwrapped() {
		check(
			r#"{"@graph": [{"@id": "http://example.org/a", "http://example.org/p": 1}]}"#,
			r#"[{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]}]"#,
		)
	}

	#[test]
	fn typed_and_language_values() {
		check(
			r#"{
				"@context": {
					"@language": "en",
					"date": {"@id": "http://example.org/date", "@type": "http://www.w3.org/2001/XMLSchema#date"},
					"homepage": {"@id": "http://example.org/homepage", "@type": "@id"},
					"label": "http://example.org/label"
				},
				"date": "2020-01-01",
				"homepage": "home",
				"label": "hello"
			}"#,
			r#"[{
				"http://example.org/date": [{"@value": "2020-01-01", "@type": "http://www.w3.org/2001/XMLSchema#date"}],
				"http://example.org/homepage": [{"@id": "http://example.org/home"}],
				"http://example.org/label": [{"@value": "hello", "@language": "en"}]
			}]"#,
		)
	}

	#[test]
	fn list_and_set_containers() {
		check(
			r#"{
				"@context": {
					"list": {"@id": "http://example.org/list", "@container": "@list"},
					"set": {"@id": "http://example.org/set", "@container": "@set"}
				},
				"list": [1, 2],
				"set": {"@set": [3]}
			}"#,
			r#"[{
				"http://example.org/list": [{"@list": [{"@value": 1}, {"@value": 2}]}],
				"http://example.org/set": [{"@value": 3}]
			}]"#,
		)
	}

	#[test]
	fn language_and_index_maps() {
		check(
			r#"{
				"@context": {
					"label": {"@id": "http://example.org/label", "@container": "@language"},
					"post": {"@id": "http://example.org/post", "@container": "@index"}
				},
				"label": {"en": "Hello", "fr": ["Bonjour", null], "@none": "Salut"},
				"post": {"first": {"@id": "http://example.org/p1"}}
			}"#,
			r#"[{
				"http://example.org/label": [
					{"@value": "Hello", "@language": "en"},
					{"@value": "Bonjour", "@language": "fr"},
					{"@value": "Salut"}
				],
				"http://example.org/post": [{"@id": "http://example.org/p1", "@index": "first"}]
			}]"#,
		)
	}

	#[test]
	fn reverse_properties() {
		check(
			r#"{
				"@context": {"children": {"@reverse": "http://example.org/parent"}},
				"@id": "http://example.org/alice",
				"children": {"@id": "http://example.org/bob"}
			}"#,
			r#"[{
				"@id": "http://example.org/alice",
				"@reverse": {"http://example.org/parent": [{"@id": "http://example.org/bob"}]}
			}]"#,
		)
	}

	#[test]
	fn nested_properties() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/", "meta": "@nest"},
				"@id": "http://example.org/a",
				"meta": {"p": "x"}
			}"#,
			r#"[{"@id": "http://example.org/a", "http://example.org/p": [{"@value": "x"}]}]"#,
		)
	}

	#[test]
	fn colliding_keywords() {
		let err = run(
			r#"{"@context": {"id": "@id"}, "@id": "http://example.org/a", "id": "http://example.org/b"}"#,
			ExpansionOptions::default(),
		)
		.unwrap_err();
		assert_eq!(err.code(), ErrorCode::CollidingKeywords)
	}

	#[test]
	fn invalid_value_object() {
		let err = run(
			r#"{"http://example.org/p": {"@value": "x", "@type": "http://example.org/t", "@language": "en"}}"#,
			ExpansionOptions::default(),
		)
		.unwrap_err();
		assert_eq!(err.code(), ErrorCode::InvalidValueObject)
	}

	#[test]
	fn expansion_policies() {
		let input = r#"{"@id": "http://example.org/a", "undefined": 1, "http://example.org/p": 2}"#;

		let (relaxed, _) = run(
			input,
			ExpansionOptions {
				policy: ExpansionPolicy::Relaxed,
				..Default::default()
			},
		)
		.unwrap();
		let Value::Array(items) = &relaxed else {
			panic!("expected an array")
		};
		let Value::Object(node) = &items[0] else {
			panic!("expected an object")
		};
		assert!(node.get_unique("undefined").unwrap().is_some());

		let (standard, warnings) = run(
			input,
			ExpansionOptions {
				safe_mode: true,
				..Default::default()
			},
		)
		.unwrap();
		assert!(deep_equals(
			&standard,
			&parse(r#"[{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 2}]}]"#)
		));
		assert!(matches!(&warnings[..], [Warning::DroppedProperty(p)] if p == "undefined"));

		let err = run(
			input,
			ExpansionOptions {
				policy: ExpansionPolicy::Strict,
				..Default::default()
			},
		)
		.unwrap_err();
		assert_eq!(err.code(), ErrorCode::KeyExpansionFailed)
	}

	#[test]
	fn frame_expansion_keeps_framing_keywords() {
		let (expanded, _) = run(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Person",
				"@explicit": true,
				"name": {"@default": "Anonymous"}
			}"#,
			ExpansionOptions::default().for_frame(),
		)
		.unwrap();

		assert!(deep_equals_unordered(
			&expanded,
			&parse(
				r#"[{
					"@type": ["http://example.org/Person"],
					"@explicit": [true],
					"http://example.org/name": [{"@default": [{"@value": "Anonymous"}]}]
				}]"#
			)
		))
	}
}
