use json_ld_pipeline::{
	loader::RemoteDocumentReference,
	syntax::{Parse, Value},
	util::deep_equals,
	ErrorCode, JsonLdProcessor, NoLoader, Options, RemoteDocument,
};
use static_iref::iri;
use std::collections::HashMap;

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

fn document(s: &str) -> RemoteDocument {
	RemoteDocument::new(Some(iri!("http://example.org/test.jsonld").to_owned()), parse(s))
}

fn check(input: &str, context: &str, options: Options, expected: &str) {
	let context = RemoteDocumentReference::from(parse(context));
	let compacted = document(input)
		.compact(&context, &NoLoader, options)
		.unwrap()
		.value;
	let expected = parse(expected);
	assert!(
		deep_equals(&compacted, &expected),
		"got {compacted:?}, expected {expected:?}"
	)
}

#[test]
fn compact_with_terms() {
	check(
		r#"{
			"@id": "http://example.org/alice",
			"http://xmlns.com/foaf/0.1/name": "Alice",
			"http://xmlns.com/foaf/0.1/homepage": {"@id": "http://example.org/alice/"}
		}"#,
		r#"{
			"@context": {
				"name": "http://xmlns.com/foaf/0.1/name",
				"homepage": {"@id": "http://xmlns.com/foaf/0.1/homepage", "@type": "@id"}
			}
		}"#,
		Options::default(),
		r#"{
			"@context": {
				"name": "http://xmlns.com/foaf/0.1/name",
				"homepage": {"@id": "http://xmlns.com/foaf/0.1/homepage", "@type": "@id"}
			},
			"@id": "alice",
			"name": "Alice",
			"homepage": "alice/"
		}"#,
	)
}

#[test]
fn absolute_iris_without_relative_compaction() {
	check(
		r#"{"@id": "http://example.org/alice", "http://example.org/p": "x"}"#,
		r#"{"p": "http://example.org/p"}"#,
		Options {
			compact_to_relative: false,
			..Options::default()
		},
		r#"{
			"@context": {"p": "http://example.org/p"},
			"@id": "http://example.org/alice",
			"p": "x"
		}"#,
	)
}

#[test]
fn arrays_are_kept_when_requested() {
	check(
		r#"{"http://example.org/p": "x"}"#,
		r#"{"p": "http://example.org/p"}"#,
		Options {
			compact_arrays: false,
			..Options::default()
		},
		r#"{"@context": {"p": "http://example.org/p"}, "@graph": [{"p": ["x"]}]}"#,
	)
}

#[test]
fn multiple_nodes_use_graph() {
	check(
		r#"[
			{"@id": "http://example.org/a", "http://example.org/p": "x"},
			{"@id": "http://example.org/b", "http://example.org/p": "y"}
		]"#,
		r#"{"@vocab": "http://example.org/"}"#,
		Options {
			compact_to_relative: false,
			..Options::default()
		},
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@graph": [
				{"@id": "http://example.org/a", "p": "x"},
				{"@id": "http://example.org/b", "p": "y"}
			]
		}"#,
	)
}

#[test]
fn type_scoped_contexts() {
	check(
		r#"{
			"@type": "http://example.org/Person",
			"http://example.org/person/name": "Alice"
		}"#,
		r#"{
			"Person": {
				"@id": "http://example.org/Person",
				"@context": {"name": "http://example.org/person/name"}
			}
		}"#,
		Options::default(),
		r#"{
			"@context": {
				"Person": {
					"@id": "http://example.org/Person",
					"@context": {"name": "http://example.org/person/name"}
				}
			},
			"@type": "Person",
			"name": "Alice"
		}"#,
	)
}

#[test]
fn remote_context_by_iri() {
	let context_iri = iri!("http://example.org/context.jsonld").to_owned();
	let mut loader = HashMap::new();
	loader.insert(
		context_iri.clone(),
		RemoteDocument::new(
			Some(context_iri.clone()),
			parse(r#"{"@context": {"name": "http://xmlns.com/foaf/0.1/name"}}"#),
		),
	);

	let compacted = document(r#"{"http://xmlns.com/foaf/0.1/name": "Alice"}"#)
		.compact(&context_iri.clone().into(), &loader, Options::default())
		.unwrap();

	assert!(deep_equals(
		&compacted.value,
		&parse(r#"{"@context": {"name": "http://xmlns.com/foaf/0.1/name"}, "name": "Alice"}"#)
	));

	let error = document(r#"{"http://xmlns.com/foaf/0.1/name": "Alice"}"#)
		.compact(&context_iri.into(), &NoLoader, Options::default())
		.unwrap_err();
	assert_eq!(error.code(), ErrorCode::LoadingRemoteContextFailed)
}

#[test]
fn compaction_is_stable() {
	let context = r#"{"@vocab": "http://example.org/", "tags": {"@container": "@set"}}"#;
	let input = r#"{"@id": "http://example.org/a", "http://example.org/tags": ["x", "y"]}"#;

	let once = document(input)
		.compact(&parse(context).into(), &NoLoader, Options::default())
		.unwrap()
		.value;
	let twice = RemoteDocument::new(Some(iri!("http://example.org/test.jsonld").to_owned()), once.clone())
		.compact(&parse(context).into(), &NoLoader, Options::default())
		.unwrap()
		.value;

	assert!(deep_equals(
		&once,
		&parse(
			r#"{
				"@context": {"@vocab": "http://example.org/", "tags": {"@container": "@set"}},
				"@id": "a",
				"tags": ["x", "y"]
			}"#
		)
	));
	assert!(deep_equals(&once, &twice))
}

#[test]
fn list_containers_round_trip() {
	let context = r#"{"items": {"@id": "http://example.org/items", "@container": "@list"}}"#;
	let input = format!(r#"{{"@context": {context}, "items": ["a", "b"]}}"#);

	let expanded = document(&input)
		.expand(&NoLoader, Options::default())
		.unwrap()
		.value;
	assert!(deep_equals(
		&expanded,
		&parse(r#"[{"http://example.org/items": [{"@list": [{"@value": "a"}, {"@value": "b"}]}]}]"#)
	));

	check(
		&input,
		context,
		Options::default(),
		&format!(r#"{{"@context": {context}, "items": ["a", "b"]}}"#),
	)
}
