use json_syntax::{Object, Value};

use crate::{
	algorithms::{context_processing::expand_iri, ProcessingEnvironment},
	context::Type,
	util::{object1, string, ObjectExt},
	ActiveContext,
};

/// Value expansion.
///
/// Turns a scalar into a value object, or into a node reference when the
/// active property has an `@id` or `@vocab` type mapping.
///
/// See <https://www.w3.org/TR/json-ld11-api/#value-expansion>.
pub fn expand_value(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	active_property: Option<&str>,
	value: &Value,
) -> Value {
	let definition = active_property.and_then(|p| active_context.get(p));
	let typ = definition.and_then(|d| d.typ.as_ref());

	if let Value::String(s) = value {
		// 1) If the `active_property` has a type mapping in `active_context`
		// that is @id, and the value is a string, return a new map containing a
		// single entry where the key is @id and the value is the result of IRI
		// expanding value using true for document relative and false for vocab.
		// 2) If active property has a type mapping in active context that is
		// @vocab, and the value is a string, return a new map containing a
		// single entry where the key is @id and the value is the result of IRI
		// expanding value using true for document relative.
		let vocab = match typ {
			Some(Type::Id) => Some(false),
			Some(Type::Vocab) => Some(true),
			_ => None,
		};

		if let Some(vocab) = vocab {
			return match expand_iri(env, active_context, s, true, vocab) {
				Some(id) => Value::Object(object1("@id", string(id))),
				None => Value::Null,
			};
		}
	}

	// 3) Otherwise, initialize `result` to a map with an @value entry whose
	// value is set to `value`.
	let mut result = Object::new();
	result.set("@value", value.clone());

	match typ {
		// 4) If `active_property` has a type mapping in active context, other
		// than @id, @vocab, or @none, add @type to `result` and set its value
		// to the value associated with the type mapping.
		Some(typ @ (Type::Json | Type::Iri(_))) => result.set("@type", string(typ.as_str())),
		// 5) Otherwise, if value is a string:
		_ => {
			if let Value::String(_) = value {
				// 5.1) Initialize `language` to the language mapping for
				// `active_property` in `active_context`, if any, otherwise to
				// the default language of `active_context`.
				let language = match definition.and_then(|d| d.language.as_ref()) {
					Some(language) => language.as_deref(),
					None => active_context.default_language(),
				};

				// 5.2) Initialize `direction` to the direction mapping for
				// `active_property` in `active_context`, if any, otherwise to
				// the default base direction of `active_context`.
				let direction = match definition.and_then(|d| d.direction) {
					Some(direction) => direction,
					None => active_context.default_base_direction(),
				};

				// 5.3) If `language` is not null, add @language to result with
				// the value `language`.
				if let Some(language) = language {
					result.set("@language", string(language))
				}

				// 5.4) If `direction` is not null, add @direction to result
				// with the value `direction`.
				if let Some(direction) = direction {
					result.set("@direction", string(direction.as_str()))
				}
			}
		}
	}

	Value::Object(result)
}
