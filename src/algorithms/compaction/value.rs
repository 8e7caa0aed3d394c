use json_syntax::{object::Entry, Object, Value};

use super::Compactor;
use crate::{
	context::Type,
	util::{as_str, is_keyword_key, string, ObjectExt},
	ActiveContext, ContainerItem, Error,
};

impl<'a> Compactor<'a> {
	/// Value compaction.
	///
	/// Returns a scalar when `value` can be represented by one, otherwise a
	/// copy of `value` with compacted keywords.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#value-compaction>.
	pub fn compact_value(
		&self,
		active_context: &ActiveContext,
		value: &Object,
	) -> Result<Value, Error> {
		let definition = self.active_property.and_then(|p| active_context.get(p));
		let type_mapping = definition.and_then(|d| d.typ.as_ref());
		let container = definition.map(|d| d.container).unwrap_or_default();

		// 3) Initialize language to the language mapping for active property
		// in active context, if any, otherwise to the default language of
		// active context.
		let language = match definition.and_then(|d| d.language.as_ref()) {
			Some(language) => language.as_deref(),
			None => active_context.default_language(),
		};

		// 4) Initialize direction to the direction mapping for active property
		// in active context, if any, otherwise to the default base direction
		// of active context.
		let direction = match definition.and_then(|d| d.direction) {
			Some(direction) => direction,
			None => active_context.default_base_direction(),
		};

		let has_index = value.has("@index");
		let index_allowed = !has_index || container.contains(ContainerItem::Index);
		let value_type = value.value("@type").and_then(as_str);

		// 5) If value has an @id entry and has no other entries other than
		// @index:
		if value.has("@id") && value.key_strs().all(|k| k == "@id" || k == "@index") {
			if let Some(id) = value.value("@id").and_then(as_str) {
				match type_mapping {
					// 5.1) If the type mapping of active property is set to
					// @id, set result to the result of IRI compacting the value
					// associated with the @id entry using false for vocab.
					Some(Type::Id) => return Ok(string(self.compact_iri_with(active_context, id, false)?)),
					// 5.2) Otherwise, if the type mapping of active property is
					// set to @vocab, set result to the result of IRI compacting
					// the value associated with the @id entry.
					Some(Type::Vocab) => return Ok(string(self.compact_iri_with(active_context, id, true)?)),
					_ => (),
				}
			}
		} else if let Some(inner) = value.value("@value") {
			match (value_type, type_mapping) {
				// 6) Otherwise, if value has an @type entry whose value
				// matches the type mapping of active property, set result to
				// the value associated with the @value entry of value.
				(Some(t), Some(mapping)) if t == mapping.as_str() && index_allowed => {
					return Ok(inner.clone())
				}
				// 7) Otherwise, if the type mapping of active property is
				// @none, or value has an @type entry, and the value of @type
				// in value does not match the type mapping of active property,
				// leave value as is, as value compaction is disabled.
				(_, Some(Type::None)) | (Some(_), _) => (),
				_ => {
					if !matches!(inner, Value::String(_)) {
						// 8) Otherwise, if the value of the @value entry is not
						// a string:
						// 8.1) If value has an @index entry, and the container
						// mapping associated to active property includes
						// @index, or if value has no @index entry, set result
						// to the value associated with the @value entry.
						if index_allowed && !value.has("@language") && !value.has("@direction") {
							return Ok(inner.clone());
						}
					} else {
						// 9) Otherwise, if value has an @language entry whose
						// value exactly matches language, using a
						// case-insensitive comparison if it is not null, or is
						// not present, if language is null, and the value has
						// a @direction entry whose value exactly matches
						// direction, if it is not null, or is not present, if
						// direction is null:
						let same_language = match (value.value("@language").and_then(as_str), language) {
							(Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
							(None, None) => true,
							_ => false,
						};

						let same_direction = value.value("@direction").and_then(as_str)
							== direction.map(|d| d.as_str());

						// 9.1) If value has an @index entry, and the container
						// mapping associated to active property includes
						// @index, or value has no @index entry, set result to
						// the value associated with the @value entry.
						if same_language && same_direction && index_allowed {
							return Ok(inner.clone());
						}
					}
				}
			}
		}

		// 10) If result is a map, replace each key in result with the result of
		// IRI compacting that key.
		let mut result = Object::new();
		for Entry { key, value } in value.entries() {
			let key = key.as_str();
			let value = match (key, value) {
				// The type of a value object is compacted as a type.
				("@type", Value::String(t)) => string(self.compact_iri_with(active_context, t, true)?),
				_ => value.clone(),
			};

			if is_keyword_key(key) {
				result.set(&self.compact_iri_with(active_context, key, true)?, value)
			} else {
				result.set(key, value)
			}
		}

		// 11) Return result.
		Ok(Value::Object(result))
	}
}
