use json_ld_pipeline::{
	syntax::{Parse, Value},
	util::deep_equals,
	Blank, Embed, ErrorCode, JsonLdProcessor, NoLoader, Options, RemoteDocument,
};
use static_iref::iri;
use std::collections::HashMap;

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

const LIBRARY: &str = r#"{
	"@context": {"@vocab": "http://example.org/", "contains": {"@type": "@id"}},
	"@graph": [
		{
			"@id": "http://example.org/library",
			"@type": "Library",
			"contains": "http://example.org/library/the-republic"
		},
		{
			"@id": "http://example.org/library/the-republic",
			"@type": "Book",
			"creator": "Plato",
			"title": "The Republic",
			"contains": "http://example.org/library/the-republic#introduction"
		},
		{
			"@id": "http://example.org/library/the-republic#introduction",
			"@type": "Chapter",
			"description": "An introductory chapter on The Republic.",
			"title": "The Introduction"
		}
	]
}"#;

fn frame(input: &str, frame: &str, options: Options) -> Value {
	parse(input)
		.frame(&parse(frame).into(), &mut Blank::new(), &NoLoader, options)
		.unwrap()
		.value
}

fn check(framed: Value, expected: &str) {
	let expected = parse(expected);
	assert!(
		deep_equals(&framed, &expected),
		"got {framed:?}, expected {expected:?}"
	)
}

#[test]
fn library() {
	check(
		frame(
			LIBRARY,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Library",
				"contains": {
					"@type": "Book",
					"contains": {"@type": "Chapter"}
				}
			}"#,
			Options::default(),
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library",
			"@type": "Library",
			"contains": {
				"@id": "http://example.org/library/the-republic",
				"@type": "Book",
				"creator": "Plato",
				"title": "The Republic",
				"contains": {
					"@id": "http://example.org/library/the-republic#introduction",
					"@type": "Chapter",
					"description": "An introductory chapter on The Republic.",
					"title": "The Introduction"
				}
			}
		}"#,
	)
}

#[test]
fn explicit_option() {
	check(
		frame(
			LIBRARY,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Book",
				"title": {}
			}"#,
			Options {
				explicit: true,
				..Options::default()
			},
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library/the-republic",
			"@type": "Book",
			"title": "The Republic"
		}"#,
	)
}

#[test]
fn never_embed_option() {
	check(
		frame(
			LIBRARY,
			r#"{"@context": {"@vocab": "http://example.org/"}, "@type": "Library"}"#,
			Options {
				embed: Embed::Never,
				..Options::default()
			},
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library",
			"@type": "Library",
			"contains": {"@id": "http://example.org/library/the-republic"}
		}"#,
	)
}

#[test]
fn require_all_option() {
	let input = r#"{
		"@context": {"@vocab": "http://example.org/"},
		"@graph": [
			{"@id": "http://example.org/a", "p": "x", "q": "y"},
			{"@id": "http://example.org/b", "p": "x"}
		]
	}"#;
	let frame_doc = r#"{"@context": {"@vocab": "http://example.org/"}, "p": {}, "q": {}}"#;

	check(
		frame(
			input,
			frame_doc,
			Options {
				require_all: true,
				..Options::default()
			},
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"p": "x",
			"q": "y"
		}"#,
	);

	check(
		frame(input, frame_doc, Options::default()),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@graph": [
				{"@id": "http://example.org/a", "p": "x", "q": "y"},
				{"@id": "http://example.org/b", "p": "x", "q": null}
			]
		}"#,
	)
}

#[test]
fn frame_by_iri() {
	let frame_iri = iri!("http://example.org/frame.jsonld").to_owned();
	let mut loader = HashMap::new();
	loader.insert(
		frame_iri.clone(),
		RemoteDocument::new(
			Some(frame_iri.clone()),
			parse(r#"{"@context": {"@vocab": "http://example.org/"}, "@type": "Chapter"}"#),
		),
	);

	let framed = parse(LIBRARY)
		.frame(&frame_iri.clone().into(), &mut Blank::new(), &loader, Options::default())
		.unwrap();

	check(
		framed.value,
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library/the-republic#introduction",
			"@type": "Chapter",
			"description": "An introductory chapter on The Republic.",
			"title": "The Introduction"
		}"#,
	);

	let error = parse(LIBRARY)
		.frame(&frame_iri.into(), &mut Blank::new(), &NoLoader, Options::default())
		.unwrap_err();
	assert_eq!(error.code(), ErrorCode::LoadingDocumentFailed)
}

#[test]
fn invalid_frame() {
	let error = parse(LIBRARY)
		.frame(
			&parse(r#"[{"@type": "http://example.org/Book"}, {"@type": "http://example.org/Chapter"}]"#)
				.into(),
			&mut Blank::new(),
			&NoLoader,
			Options::default(),
		)
		.unwrap_err();
	assert_eq!(error.code(), ErrorCode::InvalidFrame)
}

#[test]
fn link_embeds_the_same_node_everywhere() {
	let input = r#"{
		"@context": {"@vocab": "http://example.org/"},
		"@graph": [
			{
				"@id": "http://example.org/a",
				"@type": "Top",
				"p": {"@id": "http://example.org/c"},
				"r": {"@id": "http://example.org/c"}
			},
			{"@id": "http://example.org/c", "name": "x"}
		]
	}"#;
	let frame_doc = r#"{"@context": {"@vocab": "http://example.org/"}, "@type": "Top"}"#;

	check(
		frame(
			input,
			frame_doc,
			Options {
				embed: Embed::Link,
				..Options::default()
			},
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"@type": "Top",
			"p": {"@id": "http://example.org/c", "name": "x"},
			"r": {"@id": "http://example.org/c", "name": "x"}
		}"#,
	);

	check(
		frame(input, frame_doc, Options::default()),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"@type": "Top",
			"p": {"@id": "http://example.org/c", "name": "x"},
			"r": {"@id": "http://example.org/c"}
		}"#,
	)
}

#[test]
fn omit_default() {
	let frame_doc = r#"{
		"@context": {"@vocab": "http://example.org/"},
		"@type": "Chapter",
		"creator": {"@omitDefault": true},
		"pages": {}
	}"#;

	check(
		frame(LIBRARY, frame_doc, Options::default()),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library/the-republic#introduction",
			"@type": "Chapter",
			"description": "An introductory chapter on The Republic.",
			"title": "The Introduction",
			"pages": null
		}"#,
	);

	check(
		frame(
			LIBRARY,
			frame_doc,
			Options {
				omit_default: true,
				..Options::default()
			},
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/library/the-republic#introduction",
			"@type": "Chapter",
			"description": "An introductory chapter on The Republic.",
			"title": "The Introduction"
		}"#,
	)
}

#[test]
fn included_frame() {
	check(
		frame(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/a", "@type": "Class"},
					{"@id": "http://example.org/b", "@type": "Prop"},
					{"@id": "http://example.org/c", "@type": "Prop"}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Class",
				"@included": {"@type": "Prop"}
			}"#,
			Options::default(),
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"@type": "Class",
			"@included": [
				{"@id": "http://example.org/b", "@type": "Prop"},
				{"@id": "http://example.org/c", "@type": "Prop"}
			]
		}"#,
	)
}

#[test]
fn reverse_frame() {
	check(
		frame(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/a", "@type": "Person"},
					{"@id": "http://example.org/b", "knows": {"@id": "http://example.org/a"}}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Person",
				"@reverse": {"knows": {}}
			}"#,
			Options::default(),
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"@type": "Person",
			"@reverse": {
				"knows": {
					"@id": "http://example.org/b",
					"knows": {"@id": "http://example.org/a"}
				}
			}
		}"#,
	)
}

#[test]
fn named_graph_subframe() {
	check(
		frame(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@id": "http://example.org/g",
				"@type": "Dataset",
				"@graph": [
					{"@id": "http://example.org/x", "name": "X"},
					{"@id": "http://example.org/y", "name": "Y"}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Dataset",
				"@graph": {}
			}"#,
			Options::default(),
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/g",
			"@type": "Dataset",
			"@graph": [
				{"@id": "http://example.org/x", "name": "X"},
				{"@id": "http://example.org/y", "name": "Y"}
			]
		}"#,
	)
}

#[test]
fn list_subframe() {
	check(
		frame(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{
						"@id": "http://example.org/a",
						"@type": "Top",
						"items": {"@list": [
							{"@id": "http://example.org/x"},
							{"@id": "http://example.org/y"}
						]}
					},
					{"@id": "http://example.org/x", "name": "X", "extra": 1},
					{"@id": "http://example.org/y", "name": "Y", "extra": 2}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Top",
				"items": {"@list": {"@explicit": true, "name": {}}}
			}"#,
			Options::default(),
		),
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"@type": "Top",
			"items": {"@list": [
				{"@id": "http://example.org/x", "name": "X"},
				{"@id": "http://example.org/y", "name": "Y"}
			]}
		}"#,
	)
}
