use json_ld_pipeline::{
	syntax::{Parse, Value},
	util::deep_equals,
	ErrorCode, ExpansionPolicy, JsonLdProcessor, NoLoader, Options, ProcessingMode,
	RemoteDocument, Warning,
};
use static_iref::iri;
use std::collections::HashMap;

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

fn document(s: &str) -> RemoteDocument {
	RemoteDocument::new(Some(iri!("http://example.org/test.jsonld").to_owned()), parse(s))
}

enum Expect {
	Positive(&'static str),
	Negative(ErrorCode),
}

struct Test {
	input: &'static str,
	options: Options,
	expect: Expect,
}

impl Test {
	fn new(input: &'static str, expect: Expect) -> Self {
		Self {
			input,
			options: Options::default(),
			expect,
		}
	}

	fn with_options(self, options: Options) -> Self {
		Self { options, ..self }
	}

	fn run(self) {
		let result = document(self.input).expand(&NoLoader, self.options);
		match self.expect {
			Expect::Positive(expected) => {
				let expected = parse(expected);
				let expanded = result.unwrap().value;
				assert!(
					deep_equals(&expanded, &expected),
					"got {expanded:?}, expected {expected:?}"
				)
			}
			Expect::Negative(code) => match result {
				Ok(expanded) => panic!("expected `{code}`, got {:?}", expanded.value),
				Err(e) => assert_eq!(e.code(), code),
			},
		}
	}
}

#[test]
fn terms_and_typed_values() {
	Test::new(
		r#"{
			"@context": {
				"ex": "http://example.org/vocab#",
				"name": "ex:name",
				"knows": {"@id": "ex:knows", "@type": "@id"},
				"age": {"@id": "ex:age", "@type": "http://www.w3.org/2001/XMLSchema#integer"}
			},
			"@id": "alice",
			"name": "Alice",
			"knows": "bob",
			"age": "42"
		}"#,
		Expect::Positive(
			r#"[{
				"@id": "http://example.org/alice",
				"http://example.org/vocab#name": [{"@value": "Alice"}],
				"http://example.org/vocab#knows": [{"@id": "http://example.org/bob"}],
				"http://example.org/vocab#age": [{
					"@value": "42",
					"@type": "http://www.w3.org/2001/XMLSchema#integer"
				}]
			}]"#,
		),
	)
	.run()
}

#[test]
fn language_maps_and_lists() {
	Test::new(
		r#"{
			"@context": {
				"@vocab": "http://example.org/",
				"label": {"@container": "@language"},
				"steps": {"@container": "@list"}
			},
			"label": {"en": "Hello", "fr": "Bonjour"},
			"steps": ["a", "b"]
		}"#,
		Expect::Positive(
			r#"[{
				"http://example.org/label": [
					{"@value": "Hello", "@language": "en"},
					{"@value": "Bonjour", "@language": "fr"}
				],
				"http://example.org/steps": [{"@list": [{"@value": "a"}, {"@value": "b"}]}]
			}]"#,
		),
	)
	.with_options(Options {
		ordered: true,
		..Options::default()
	})
	.run()
}

#[test]
fn undefined_terms_are_dropped() {
	Test::new(
		r#"{"@context": {"name": "http://example.org/name"}, "name": "x", "other": "y"}"#,
		Expect::Positive(r#"[{"http://example.org/name": [{"@value": "x"}]}]"#),
	)
	.run()
}

#[test]
fn strict_policy_rejects_undefined_terms() {
	Test::new(
		r#"{"@context": {"name": "http://example.org/name"}, "name": "x", "other": "y"}"#,
		Expect::Negative(ErrorCode::KeyExpansionFailed),
	)
	.with_options(Options {
		expansion_policy: ExpansionPolicy::Strict,
		..Options::default()
	})
	.run()
}

#[test]
fn invalid_id_value() {
	Test::new(
		r#"{"@id": 1, "http://example.org/p": "x"}"#,
		Expect::Negative(ErrorCode::InvalidIdValue),
	)
	.run()
}

#[test]
fn colliding_keywords() {
	Test::new(
		r#"{"@context": {"id": "@id"}, "@id": "http://example.org/a", "id": "http://example.org/b"}"#,
		Expect::Negative(ErrorCode::CollidingKeywords),
	)
	.run()
}

#[test]
fn json_literals_require_1_1() {
	Test::new(
		r#"{
			"@context": {"data": {"@id": "http://example.org/data", "@type": "@json"}},
			"data": {"a": [1, 2]}
		}"#,
		Expect::Positive(
			r#"[{"http://example.org/data": [{"@value": {"a": [1, 2]}, "@type": "@json"}]}]"#,
		),
	)
	.run();

	Test::new(
		r#"{
			"@context": {"data": {"@id": "http://example.org/data", "@type": "@json"}},
			"data": {"a": [1, 2]}
		}"#,
		Expect::Negative(ErrorCode::InvalidTypeMapping),
	)
	.with_options(Options {
		processing_mode: ProcessingMode::JsonLd1_0,
		..Options::default()
	})
	.run()
}

#[test]
fn remote_contexts_are_loaded() {
	let mut loader = HashMap::new();
	loader.insert(
		iri!("http://example.org/context.jsonld").to_owned(),
		RemoteDocument::new(
			Some(iri!("http://example.org/context.jsonld").to_owned()),
			parse(r#"{"@context": {"name": "http://xmlns.com/foaf/0.1/name"}}"#),
		),
	);

	let expanded = document(r#"{"@context": "context.jsonld", "name": "Alice"}"#)
		.expand(&loader, Options::default())
		.unwrap();

	assert!(deep_equals(
		&expanded.value,
		&parse(r#"[{"http://xmlns.com/foaf/0.1/name": [{"@value": "Alice"}]}]"#)
	));

	let error = document(r#"{"@context": "missing.jsonld", "name": "Alice"}"#)
		.expand(&loader, Options::default())
		.unwrap_err();
	assert_eq!(error.code(), ErrorCode::LoadingRemoteContextFailed)
}

#[test]
fn safe_mode_reports_dropped_properties() {
	let expanded = document(r#"{"@context": {"name": "http://example.org/name"}, "name": "x", "other": "y"}"#)
		.expand(
			&NoLoader,
			Options {
				safe_mode: true,
				..Options::default()
			},
		)
		.unwrap();

	assert!(matches!(
		&expanded.warnings[..],
		[Warning::DroppedProperty(p)] if p == "other"
	))
}

#[test]
fn expand_context_option() {
	Test::new(
		r#"{"name": "x"}"#,
		Expect::Positive(r#"[{"http://example.org/name": [{"@value": "x"}]}]"#),
	)
	.with_options(Options::default().with_expand_context(parse(r#"{"@vocab": "http://example.org/"}"#)))
	.run()
}
