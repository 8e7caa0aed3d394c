use json_syntax::{Object, Value};
use mown::Mown;

use super::Compactor;
use crate::{
	algorithms::{process_context, ContextProcessingOptions, ProcessingEnvironment},
	context::Type,
	util::{as_array, as_str, is_scalar, ObjectExt, ObjectKind},
	ContainerItem, Error,
};

impl<'a> Compactor<'a> {
	/// Compacts an expanded element.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#compaction-algorithm>.
	pub fn compact_element(
		&self,
		env: &mut impl ProcessingEnvironment,
		element: &Value,
	) -> Result<Value, Error> {
		match element {
			// 3) If element is an array:
			Value::Array(items) => self.compact_array(env, items),
			// 4) Otherwise element is a map.
			Value::Object(object) => self.compact_object(env, object),
			// 2) If element is a scalar, it is already in its most compact
			// form, so simply return element.
			scalar => Ok(scalar.clone()),
		}
	}

	fn compact_array(
		&self,
		env: &mut impl ProcessingEnvironment,
		items: &[Value],
	) -> Result<Value, Error> {
		// 3.1) Initialize result to an empty array.
		let mut result = Vec::with_capacity(items.len());

		// 3.2) For each item in element:
		for item in items {
			// 3.2.1) Initialize compacted item to the result of using this
			// algorithm recursively, passing active context, active property,
			// item for element, and the compactArrays and ordered flags.
			let compacted = self.compact_element(env, item)?;

			// 3.2.2) If compacted item is not null, then append it to result.
			if !compacted.is_null() {
				result.push(compacted)
			}
		}

		// 3.3) If result is empty or contains more than one value, or
		// compactArrays is false, or active property is either @graph or
		// @set, or container mapping for active property in active context
		// includes either @list or @set, return result.
		let container = self
			.active_property
			.and_then(|p| self.active_context.get(p))
			.map(|d| d.container)
			.unwrap_or_default();

		if result.len() != 1
			|| !self.options.compact_arrays
			|| matches!(self.active_property, Some("@graph" | "@set"))
			|| container.contains(ContainerItem::List)
			|| container.contains(ContainerItem::Set)
		{
			return Ok(Value::Array(result));
		}

		// 3.4) Otherwise, return the value in result.
		Ok(result.into_iter().next().unwrap_or(Value::Null))
	}

	fn compact_object(
		&self,
		env: &mut impl ProcessingEnvironment,
		element: &Object,
	) -> Result<Value, Error> {
		// 1) Initialize type-scoped context to active context. This is used
		// for compacting values that may be relevant to any previous
		// type-scoped context.
		let type_scoped_context = self.active_context;
		let mut active_context = Mown::Borrowed(self.active_context);

		// 5) If active context has a previous context, the active context is
		// not propagated. If element does not contain an @value entry, and
		// element does not consist of a single @id entry, set active context
		// to previous context from active context, as the scope of a
		// term-scoped context does not apply when processing new node
		// objects.
		if let Some(previous_context) = self.active_context.previous_context() {
			if !element.has("@value") && !(element.len() == 1 && element.has("@id")) {
				active_context = Mown::Borrowed(previous_context)
			}
		}

		// 6) If the term definition for active property in active context has
		// a local context:
		let definition = self.active_property.and_then(|p| type_scoped_context.get(p));
		if let Some(definition) = definition {
			if let Some(context) = &definition.context {
				// 6.1) Set active context to the result of the Context
				// Processing algorithm, passing active context, the value of
				// the active property's local context as local context, base
				// URL from the term definition for active property in active
				// context, and true for override protected.
				active_context = Mown::Owned(process_context(
					env,
					&active_context,
					context,
					definition.base_url.as_deref(),
					ContextProcessingOptions::from(self.options).with_override(),
				)?)
			}
		}

		let compactor = self.with_active_context(&active_context);
		let definition = self.active_property.and_then(|p| active_context.get(p));

		// 7) If element has an @value or @id entry and the result of using the
		// Value Compaction algorithm, passing active context, active property,
		// and element as value is a scalar, or the term definition for active
		// property has a type mapping of @json, return that result.
		if element.has("@value") || element.has("@id") {
			let result = compactor.compact_value(&active_context, element)?;
			if is_scalar(&result) || definition.is_some_and(|d| d.typ == Some(Type::Json)) {
				return Ok(result);
			}
		}

		// 8) If element is a list object, and the container mapping for active
		// property in active context includes @list, return the result of
		// using this algorithm recursively, passing active context, active
		// property, value of @list in element for element, and the
		// compactArrays and ordered flags.
		if ObjectKind::of(element) == ObjectKind::List
			&& definition.is_some_and(|d| d.container.contains(ContainerItem::List))
		{
			if let Some(list) = element.value("@list") {
				return compactor.compact_element(env, list);
			}
		}

		// 11) If element has an @type entry, create a new array compacted
		// types initialized by transforming each expanded type of that entry
		// into its compacted form by IRI compacting expanded type. Then, for
		// each term in compacted types ordered lexicographically:
		if let Some(types) = element.value("@type") {
			let mut compacted_types = Vec::new();
			for typ in as_array(types).iter().filter_map(as_str) {
				compacted_types.push(self.compact_iri_with(type_scoped_context, typ, true)?)
			}
			compacted_types.sort_unstable();

			for term in compacted_types {
				// 11.1) If the term definition for term in type-scoped context
				// has a local context set active context to the result of the
				// Context Processing algorithm, passing active context and the
				// value of term's local context in type-scoped context as local
				// context base URL from the term definition for term in
				// type-scoped context, and false for propagate.
				if let Some(definition) = type_scoped_context.get(&term) {
					if let Some(context) = &definition.context {
						active_context = Mown::Owned(process_context(
							env,
							&active_context,
							context,
							definition.base_url.as_deref(),
							ContextProcessingOptions::from(self.options).without_propagation(),
						)?)
					}
				}
			}
		}

		// 12) For each key expanded property and value expanded value in
		// element, ordered lexicographically by expanded property if ordered
		// is true:
		let result = self
			.with_active_context(&active_context)
			.compact_entries(env, type_scoped_context, element)?;

		// 13) Return result.
		Ok(Value::Object(result))
	}
}
