//! Frame matching.
//!
//! See <https://www.w3.org/TR/json-ld11-framing/#frame-matching-algorithm>.
use json_syntax::{Object, Value};

use super::Flags;
use crate::{
	algorithms::flattening::NodeMapGraph,
	blank::is_blank_id,
	util::{as_array, as_str, deep_equals, is_absolute_iri, is_keyword_key, ObjectExt},
	Error, ErrorCode,
};

/// Checks that `frame` is a single frame object and returns it.
pub(super) fn validate_frame(frame: &Value) -> Result<&Object, Error> {
	let frame = match frame {
		Value::Array(items) if items.len() == 1 => &items[0],
		Value::Object(_) => frame,
		_ => {
			return Err(Error::new(
				ErrorCode::InvalidFrame,
				"a frame must be a single object",
			))
		}
	};

	let Value::Object(frame) = frame else {
		return Err(Error::new(
			ErrorCode::InvalidFrame,
			"a frame must be a single object",
		));
	};

	// @id must be a wildcard or an IRI.
	if let Some(ids) = frame.value("@id") {
		for id in as_array(ids) {
			let valid = match id {
				Value::Object(_) => true,
				Value::String(id) => is_absolute_iri(id) && !is_blank_id(id),
				_ => false,
			};

			if !valid {
				return Err(Error::new(ErrorCode::InvalidFrame, "invalid @id in frame"));
			}
		}
	}

	// @type must be a wildcard, an IRI or @json.
	if let Some(types) = frame.value("@type") {
		for typ in as_array(types) {
			let valid = match typ {
				Value::Object(_) => true,
				Value::String(typ) => {
					(typ.as_str() == "@json" || is_absolute_iri(typ)) && !is_blank_id(typ)
				}
				_ => false,
			};

			if !valid {
				return Err(Error::new(ErrorCode::InvalidFrame, "invalid @type in frame"));
			}
		}
	}

	Ok(frame)
}

fn values<'v>(object: &'v Object, key: &str) -> &'v [Value] {
	object.value(key).map(as_array).unwrap_or_default()
}

fn is_empty_object(value: Option<&Value>) -> bool {
	matches!(value, Some(Value::Object(o)) if o.is_empty())
}

/// Result of matching a single frame entry against a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PropertyMatch {
	/// The entry does not match.
	NoMatch,

	/// The entry matches.
	Match,

	/// The node has no value for the property but the frame provides a
	/// default.
	DefaultMatch,

	/// The node is rejected whatever the other entries.
	Abort,
}

/// Matches a node against a frame.
///
/// `subjects` is the graph in which node references found in property
/// patterns are resolved.
pub(super) fn matches(
	subjects: &NodeMapGraph,
	node: &Object,
	frame: &Object,
	flags: Flags,
) -> Result<bool, Error> {
	let mut wildcard = true;
	let mut matches_some = false;

	for entry in frame.entries() {
		let key = entry.key.as_str();
		let node_values = values(node, key);
		let frame_values = as_array(&entry.value);

		let result = match key {
			"@id" => {
				// Match on a specific identifier, unless the frame holds a
				// wildcard.
				let is_match = match frame_values.first() {
					None => true,
					Some(Value::Object(o)) if o.is_empty() => true,
					Some(_) => node_values
						.first()
						.is_some_and(|id| frame_values.iter().any(|f| deep_equals(f, id))),
				};

				if !flags.require_all {
					return Ok(is_match);
				}

				bool_match(is_match)
			}
			"@type" => {
				wildcard = false;
				if frame_values.is_empty() {
					// Match nodes without type.
					if node_values.is_empty() {
						PropertyMatch::Match
					} else {
						PropertyMatch::Abort
					}
				} else if frame_values.len() == 1 && is_empty_object(frame_values.first()) {
					// Match any typed node.
					bool_match(!node_values.is_empty())
				} else {
					let mut is_match = false;
					for typ in frame_values {
						match typ {
							Value::Object(o) if o.has("@default") => is_match = true,
							typ => is_match |= node_values.iter().any(|t| deep_equals(t, typ)),
						}
					}

					if !flags.require_all {
						return Ok(is_match);
					}

					bool_match(is_match)
				}
			}
			key if is_keyword_key(key) => continue,
			_ => {
				wildcard = false;
				match_property(subjects, node_values, frame_values, flags)?
			}
		};

		match result {
			PropertyMatch::Abort => return Ok(false),
			PropertyMatch::DefaultMatch => (),
			PropertyMatch::NoMatch if flags.require_all => return Ok(false),
			PropertyMatch::NoMatch => (),
			PropertyMatch::Match => matches_some = true,
		}
	}

	log::trace!("node {:?} matched: {}", node.value("@id"), wildcard || matches_some);
	Ok(wildcard || matches_some)
}

fn bool_match(b: bool) -> PropertyMatch {
	if b {
		PropertyMatch::Match
	} else {
		PropertyMatch::NoMatch
	}
}

/// Matches the values of a node property against a property frame.
fn match_property(
	subjects: &NodeMapGraph,
	node_values: &[Value],
	frame_values: &[Value],
	flags: Flags,
) -> Result<PropertyMatch, Error> {
	let pattern = match frame_values.first() {
		Some(pattern) => Some(validate_frame(pattern)?),
		None => None,
	};

	let has_default = pattern.is_some_and(|p| p.has("@default"));

	// Nodes without value match when the frame provides a default.
	if node_values.is_empty() && has_default {
		return Ok(PropertyMatch::DefaultMatch);
	}

	let Some(pattern) = pattern else {
		// An empty array means "match none".
		return Ok(if node_values.is_empty() {
			PropertyMatch::Match
		} else {
			PropertyMatch::Abort
		});
	};

	if let Some(list) = pattern.value("@list") {
		// List pattern: any item of the first list of the node must match
		// the first pattern of the list frame.
		let Some(Value::Object(list_pattern)) = as_array(list).first() else {
			return Ok(PropertyMatch::NoMatch);
		};

		let node_list = match node_values.first() {
			Some(Value::Object(o)) => o.value("@list").map(as_array),
			_ => None,
		};

		let Some(node_list) = node_list else {
			return Ok(PropertyMatch::NoMatch);
		};

		if list_pattern.has("@value") {
			return Ok(bool_match(node_list.iter().any(|v| value_match(list_pattern, v))));
		}

		let mut is_match = false;
		if !list_pattern.has("@list") && !list_pattern.has("@set") {
			for item in node_list {
				if node_match(subjects, list_pattern, item, flags)? {
					is_match = true;
					break;
				}
			}
		}

		return Ok(bool_match(is_match));
	}

	if pattern.has("@value") {
		return Ok(bool_match(node_values.iter().any(|v| value_match(pattern, v))));
	}

	if pattern.len() == 1 && pattern.has("@id") {
		for value in node_values {
			if node_match(subjects, pattern, value, flags)? {
				return Ok(PropertyMatch::Match);
			}
		}

		return Ok(PropertyMatch::NoMatch);
	}

	// Any other node pattern matches nodes having some value.
	Ok(bool_match(!node_values.is_empty()))
}

/// Matches a node reference against a node pattern.
fn node_match(
	subjects: &NodeMapGraph,
	pattern: &Object,
	value: &Value,
	flags: Flags,
) -> Result<bool, Error> {
	let id = match value {
		Value::Object(o) => o.value("@id").and_then(as_str),
		_ => None,
	};

	match id.and_then(|id| subjects.get(id)) {
		Some(node) => matches(subjects, node, pattern, flags),
		None => Ok(false),
	}
}

/// Checks if `candidates` contains `value`, `None` standing for the absence
/// of value.
///
/// An empty candidate list only matches the absence of value, and a
/// wildcard (`{}`) matches any value.
fn value_entry_match(candidates: &[Value], value: Option<&Value>, ignore_case: bool) -> bool {
	match value {
		None => candidates.is_empty(),
		Some(value) => {
			is_empty_object(candidates.first())
				|| candidates.iter().any(|c| match (c, value) {
					(Value::String(a), Value::String(b)) if ignore_case => {
						a.eq_ignore_ascii_case(b)
					}
					(a, b) => deep_equals(a, b),
				})
		}
	}
}

/// Matches a value object against a value pattern.
pub(super) fn value_match(pattern: &Object, value: &Value) -> bool {
	let Value::Object(value) = value else {
		return false;
	};

	let value_candidates = values(pattern, "@value");
	let type_candidates = values(pattern, "@type");
	let language_candidates = values(pattern, "@language");

	if value_candidates.is_empty() && type_candidates.is_empty() && language_candidates.is_empty() {
		return true;
	}

	let value_matches = match value.value("@value") {
		Some(v) => {
			is_empty_object(value_candidates.first())
				|| value_candidates.iter().any(|c| deep_equals(c, v))
		}
		None => false,
	};

	value_matches
		&& value_entry_match(type_candidates, value.value("@type"), false)
		&& value_entry_match(language_candidates, value.value("@language"), true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_syntax::Parse;

	fn object(s: &str) -> Object {
		match Value::parse_str(s).unwrap().0 {
			Value::Object(o) => o,
			_ => panic!("expected an object"),
		}
	}

	fn flags() -> Flags {
		Flags {
			embed: super::super::Embed::Once,
			explicit: false,
			require_all: false,
		}
	}

	#[test]
	fn value_patterns() {
		let value = Value::Object(object(r#"{"@value": "chat", "@language": "fr"}"#));
		assert!(value_match(&object(r#"{}"#), &value));
		assert!(!value_match(&object(r#"{"@value": ["chat"]}"#), &value));
		assert!(value_match(&object(r#"{"@value": ["chat"], "@language": [{}]}"#), &value));
		assert!(value_match(&object(r#"{"@value": [{}], "@language": ["FR"]}"#), &value));
		assert!(!value_match(&object(r#"{"@value": [{}], "@language": ["en"]}"#), &value));
		assert!(!value_match(&object(r#"{"@value": [{}], "@type": [{}]}"#), &value))
	}

	#[test]
	fn type_patterns() {
		let subjects = NodeMapGraph::new();
		let node = object(r#"{"@id": "http://example.org/a", "@type": ["http://example.org/T"]}"#);
		let untyped = object(r#"{"@id": "http://example.org/b"}"#);

		let any_type = object(r#"{"@type": [{}]}"#);
		assert!(matches(&subjects, &node, &any_type, flags()).unwrap());
		assert!(!matches(&subjects, &untyped, &any_type, flags()).unwrap());

		let no_type = object(r#"{"@type": []}"#);
		assert!(!matches(&subjects, &node, &no_type, flags()).unwrap());
		assert!(matches(&subjects, &untyped, &no_type, flags()).unwrap());

		let other = object(r#"{"@type": ["http://example.org/U"]}"#);
		assert!(!matches(&subjects, &node, &other, flags()).unwrap())
	}

	#[test]
	fn match_none_and_defaults() {
		let subjects = NodeMapGraph::new();
		let node = object(r#"{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]}"#);

		let none = object(r#"{"http://example.org/p": []}"#);
		assert!(!matches(&subjects, &node, &none, flags()).unwrap());

		let defaulted = object(r#"{"http://example.org/q": [{"@default": ["x"]}]}"#);
		assert!(!matches(&subjects, &node, &defaulted, flags()).unwrap());

		let both = object(
			r#"{"http://example.org/p": [{}], "http://example.org/q": [{"@default": ["x"]}]}"#,
		);
		let require_all = Flags {
			require_all: true,
			..flags()
		};
		assert!(matches(&subjects, &node, &both, require_all).unwrap())
	}

	#[test]
	fn invalid_frames() {
		let blank_id = Value::parse_str(r#"[{"@id": "_:b0"}]"#).unwrap().0;
		assert_eq!(
			validate_frame(&blank_id).unwrap_err().code(),
			ErrorCode::InvalidFrame
		);

		let two = Value::parse_str(r#"[{}, {}]"#).unwrap().0;
		assert_eq!(
			validate_frame(&two).unwrap_err().code(),
			ErrorCode::InvalidFrame
		)
	}
}
