//! Node map generation and flattening.
//!
//! See <https://www.w3.org/TR/json-ld11-api/#flattening-algorithms>.
use json_syntax::Value;

use crate::{blank::Generator, Error};

mod node_map;

pub use node_map::*;

/// Flattens an expanded document.
///
/// Returns the nodes of the default graph, with every named graph attached
/// to the node of the same identifier.
pub fn flatten(
	expanded: &Value,
	generator: &mut impl Generator,
	ordered: bool,
) -> Result<Value, Error> {
	log::debug!("flattening document");
	let node_map = NodeMap::generate(expanded, generator)?;
	Ok(Value::Array(node_map.flatten(ordered)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{blank::Blank, util::deep_equals};
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	#[test]
	fn named_graphs_are_attached() {
		let input = parse(
			r#"[{
				"@id": "http://example.org/g",
				"@graph": [
					{"@id": "http://example.org/b", "http://example.org/p": [{"@value": "x"}]},
					{"@id": "http://example.org/a"}
				]
			}]"#,
		);

		let flattened = flatten(&input, &mut Blank::new(), true).unwrap();
		assert!(deep_equals(
			&flattened,
			&parse(
				r#"[{
					"@id": "http://example.org/g",
					"@graph": [
						{"@id": "http://example.org/b", "http://example.org/p": [{"@value": "x"}]}
					]
				}]"#
			)
		))
	}

	#[test]
	fn flattening_is_idempotent() {
		let input = parse(
			r#"[{
				"@id": "_:a",
				"http://example.org/knows": [{
					"@id": "_:b",
					"@type": ["http://example.org/Person"],
					"http://example.org/knows": [{"@id": "_:a"}]
				}]
			}]"#,
		);

		let once = flatten(&input, &mut Blank::new(), true).unwrap();
		let twice = flatten(&once, &mut Blank::new(), true).unwrap();
		assert!(deep_equals(&once, &twice))
	}
}
