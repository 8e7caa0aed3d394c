use json_ld_pipeline::{
	syntax::{Parse, Value},
	util::deep_equals,
	ActiveContext, ChainLoader, ErrorCode, FsLoader, JsonLdProcessor, Options, RemoteDocument,
};
use static_iref::iri;
use std::collections::HashMap;

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

fn fs_loader() -> FsLoader {
	let mut loader = FsLoader::new();
	loader.mount(
		iri!("https://example.org/contexts/").to_owned(),
		concat!(env!("CARGO_MANIFEST_DIR"), "/tests/contexts"),
	);
	loader
}

#[test]
fn remote_contexts_from_the_file_system() {
	let mut loader = fs_loader();
	let context = ActiveContext::new(None)
		.process(
			&mut loader,
			&parse(r#""https://example.org/contexts/schema/extended.jsonld""#),
			None,
		)
		.unwrap();

	assert_eq!(context.get("name").and_then(|d| d.iri()), Some("http://schema.org/name"));
	assert_eq!(context.get("email").and_then(|d| d.iri()), Some("http://schema.org/email"));
	assert!(context.get("name").unwrap().protected);
	assert!(!context.get("email").unwrap().protected)
}

#[test]
fn protected_terms_cannot_be_redefined() {
	let input = RemoteDocument::from(parse(
		r#"{
			"@context": [
				"https://example.org/contexts/schema/person.jsonld",
				{"name": "http://example.org/name"}
			],
			"name": "Alice"
		}"#,
	));

	let error = input.expand(&fs_loader(), Options::default()).unwrap_err();
	assert_eq!(error.code(), ErrorCode::ProtectedTermRedefinition)
}

#[test]
fn identical_redefinitions_are_allowed() {
	let input = RemoteDocument::from(parse(
		r#"{
			"@context": [
				"https://example.org/contexts/schema/person.jsonld",
				{"name": "schema:name"}
			],
			"@type": "Person",
			"name": "Alice",
			"knows": "http://example.org/bob"
		}"#,
	));

	let expanded = input.expand(&fs_loader(), Options::default()).unwrap();
	assert!(deep_equals(
		&expanded.value,
		&parse(
			r#"[{
				"@type": ["http://schema.org/Person"],
				"http://schema.org/name": [{"@value": "Alice"}],
				"http://schema.org/knows": [{"@id": "http://example.org/bob"}]
			}]"#
		)
	))
}

#[test]
fn chained_loaders() {
	let mut preloaded = HashMap::new();
	preloaded.insert(
		iri!("https://example.org/other.jsonld").to_owned(),
		RemoteDocument::new(
			Some(iri!("https://example.org/other.jsonld").to_owned()),
			parse(r#"{"@context": {"@vocab": "http://example.org/vocab#"}}"#),
		),
	);

	let mut loader = ChainLoader::new(preloaded, fs_loader());
	let context = ActiveContext::new(None)
		.process(
			&mut loader,
			&parse(
				r#"[
					"https://example.org/other.jsonld",
					"https://example.org/contexts/schema/person.jsonld"
				]"#,
			),
			None,
		)
		.unwrap();

	assert_eq!(context.vocabulary(), Some("http://example.org/vocab#"));
	assert!(context.contains_term("Person"));

	let error = ActiveContext::new(None)
		.process(&mut loader, &parse(r#""https://example.org/missing.jsonld""#), None)
		.unwrap_err();
	assert_eq!(error.code(), ErrorCode::LoadingRemoteContextFailed)
}

#[test]
fn null_context_resets_definitions() {
	let input = RemoteDocument::from(parse(
		r#"{
			"@context": {"name": "http://example.org/name"},
			"http://example.org/child": {
				"@context": null,
				"name": "dropped",
				"http://example.org/kept": "kept"
			}
		}"#,
	));

	let expanded = input.expand(&fs_loader(), Options::default()).unwrap();
	assert!(deep_equals(
		&expanded.value,
		&parse(
			r#"[{
				"http://example.org/child": [{
					"http://example.org/kept": [{"@value": "kept"}]
				}]
			}]"#
		)
	))
}
