use json_ld_pipeline::{
	syntax::{Parse, Value},
	util::{deep_equals, deep_equals_unordered},
	Blank, JsonLdProcessor, NoLoader, Options,
};

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

#[test]
fn embedded_nodes_are_lifted() {
	let input = parse(
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"knows": {"name": "Bob", "knows": {"@id": "http://example.org/a"}}
		}"#,
	);

	let flattened = input
		.flatten(None, &mut Blank::new(), &NoLoader, Options::default())
		.unwrap();

	let expected = parse(
		r#"[
			{
				"@id": "http://example.org/a",
				"http://example.org/knows": [{"@id": "_:b0"}]
			},
			{
				"@id": "_:b0",
				"http://example.org/name": [{"@value": "Bob"}],
				"http://example.org/knows": [{"@id": "http://example.org/a"}]
			}
		]"#,
	);
	assert!(
		deep_equals_unordered(&flattened.value, &expected),
		"got {:?}",
		flattened.value
	)
}

#[test]
fn properties_of_the_same_node_are_merged() {
	let input = parse(
		r#"[
			{"@id": "http://example.org/a", "http://example.org/p": "x"},
			{"@id": "http://example.org/a", "http://example.org/p": ["x", "y"], "@type": "http://example.org/T"}
		]"#,
	);

	let flattened = input
		.flatten(None, &mut Blank::new(), &NoLoader, Options::default())
		.unwrap();

	assert!(deep_equals(
		&flattened.value,
		&parse(
			r#"[{
				"@id": "http://example.org/a",
				"@type": ["http://example.org/T"],
				"http://example.org/p": [{"@value": "x"}, {"@value": "y"}]
			}]"#
		)
	))
}

#[test]
fn blank_node_labels_are_relabeled_consistently() {
	let input = parse(
		r#"[
			{"@id": "_:x", "http://example.org/p": {"@id": "_:y"}},
			{"@id": "_:y", "http://example.org/p": {"@id": "_:x"}}
		]"#,
	);

	let mut generator = Blank::with_prefix("n");
	let flattened = input
		.flatten(None, &mut generator, &NoLoader, Options::default())
		.unwrap();

	assert!(deep_equals(
		&flattened.value,
		&parse(
			r#"[
				{"@id": "_:n0", "http://example.org/p": [{"@id": "_:n1"}]},
				{"@id": "_:n1", "http://example.org/p": [{"@id": "_:n0"}]}
			]"#
		)
	));
	assert_eq!(generator.count(), 2)
}

#[test]
fn flatten_and_compact() {
	let input = parse(
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/a",
			"knows": {"@id": "http://example.org/b", "name": "Bob"}
		}"#,
	);

	let context = parse(r#"{"@vocab": "http://example.org/"}"#);
	let flattened = input
		.flatten(
			Some(&context.into()),
			&mut Blank::new(),
			&NoLoader,
			Options {
				ordered: true,
				..Options::default()
			},
		)
		.unwrap();

	assert!(deep_equals(
		&flattened.value,
		&parse(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/a", "knows": {"@id": "http://example.org/b"}},
					{"@id": "http://example.org/b", "name": "Bob"}
				]
			}"#
		)
	))
}

#[test]
fn flattening_twice_changes_nothing() {
	let input = parse(
		r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@id": "http://example.org/g",
			"@graph": {"name": "x", "knows": {"name": "y"}}
		}"#,
	);

	let once = input
		.flatten(None, &mut Blank::new(), &NoLoader, Options::default())
		.unwrap()
		.value;
	let twice = once
		.flatten(None, &mut Blank::new(), &NoLoader, Options::default())
		.unwrap()
		.value;

	assert!(deep_equals_unordered(&once, &twice), "got {twice:?}, expected {once:?}")
}

#[test]
fn conflicting_indexes() {
	let error = parse(
		r#"[
			{"@id": "http://example.org/a", "@index": "1"},
			{"@id": "http://example.org/a", "@index": "2"}
		]"#,
	)
	.flatten(None, &mut Blank::new(), &NoLoader, Options::default())
	.unwrap_err();

	assert_eq!(error.code(), json_ld_pipeline::ErrorCode::ConflictingIndexes)
}
