use json_syntax::{Object, Value};
use mown::Mown;

use super::{expand_value, keyword_of, Expander};
use crate::{
	algorithms::{context_processing::expand_iri, process_context, ProcessingEnvironment},
	keyword::is_keyword_like,
	util::{as_array, as_str, is_absolute_iri, object1, sorted_entries, ObjectExt},
	ActiveContext, ContainerItem, Error, ErrorCode, TermDefinition,
};

impl<'a> Expander<'a> {
	/// Expand an element.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#expansion-algorithm>.
	/// The default specified value for `from_map` is `false`.
	pub fn expand_element(
		&self,
		env: &mut impl ProcessingEnvironment,
		element: &Value,
		from_map: bool,
	) -> Result<Value, Error> {
		let active_property_definition = self.active_property_definition();

		match element {
			// 1) If `element` is null, return null.
			Value::Null => Ok(Value::Null),
			// 5) If `element` is an array,
			Value::Array(items) => {
				self.expand_array(env, active_property_definition, items, from_map)
			}
			// 6) Otherwise `element` is a map.
			Value::Object(object) => {
				self.expand_object(env, active_property_definition, object, from_map)
			}
			// 4) If `element` is a scalar,
			scalar => {
				// 4.1) If `active_property` is null or @graph, drop the
				// free-floating scalar by returning null.
				if matches!(self.active_property, None | Some("@graph")) {
					return Ok(Value::Null);
				}

				// 4.2) If `property_scoped_context` is defined, set
				// `active_context` to the result of the Context Processing
				// algorithm, passing `active_context`, `property_scoped_context`
				// as local context, and `base_url` from the term definition for
				// `active_property` in `active_context`.
				if let Some(definition) = active_property_definition {
					if let Some(context) = &definition.context {
						let active_context = process_context(
							env,
							self.active_context,
							context,
							definition.base_url.as_deref(),
							self.options.into(),
						)?;

						return Ok(expand_value(
							env,
							&active_context,
							self.active_property,
							scalar,
						));
					}
				}

				// 4.3) Return the result of the Value Expansion algorithm,
				// passing the `active_context`, `active_property`, and
				// `element` as value.
				Ok(expand_value(
					env,
					self.active_context,
					self.active_property,
					scalar,
				))
			}
		}
	}

	fn expand_array(
		&self,
		env: &mut impl ProcessingEnvironment,
		active_property_definition: Option<&TermDefinition>,
		items: &[Value],
		from_map: bool,
	) -> Result<Value, Error> {
		let is_list = active_property_definition
			.is_some_and(|d| d.container.contains(ContainerItem::List));

		// 5.1) Initialize an empty array, `result`.
		let mut result = Vec::new();

		// 5.2) For each `item` in `element`:
		for item in items {
			// 5.2.1) Initialize `expanded_item` to the result of using this
			// algorithm recursively, passing `active_context`,
			// `active_property`, `item` as element, `base_url`, the
			// `frame_expansion`, `ordered`, and `from_map` flags.
			let mut expanded_item = self.expand_element(env, item, from_map)?;

			// 5.2.2) If the container mapping of `active_property` includes
			// @list, and `expanded_item` is an array, set `expanded_item` to a
			// new map containing the entry @list where the value is the
			// original `expanded_item`.
			if is_list && matches!(expanded_item, Value::Array(_)) {
				expanded_item = Value::Object(object1("@list", expanded_item))
			}

			// 5.2.3) If `expanded_item` is an array, append each of its items
			// to result. Otherwise, if `expanded_item` is not null, append it
			// to result.
			match expanded_item {
				Value::Array(items) => result.extend(items),
				Value::Null => (),
				item => result.push(item),
			}
		}

		// 5.3) Return result.
		Ok(Value::Array(result))
	}

	fn expand_object(
		&self,
		env: &mut impl ProcessingEnvironment,
		active_property_definition: Option<&TermDefinition>,
		element: &Object,
		from_map: bool,
	) -> Result<Value, Error> {
		// Preliminary key expansions.
		let mut has_value_entry = false;
		let mut has_id_entry = false;
		for key in element.key_strs() {
			match keyword_of(self.active_context, key) {
				Some("@value") => has_value_entry = true,
				Some("@id") => has_id_entry = true,
				_ => (),
			}
		}

		// 7) If `active_context` has a `previous_context`, the active context is
		// not propagated. If `from_map` is undefined or false, and `element`
		// does not contain an entry expanding to @value, and `element` does not
		// consist of a single entry expanding to @id (where entries are IRI
		// expanded), set `active_context` to previous context from
		// `active_context`, as the scope of a term-scoped context does not
		// apply when processing new node objects.
		let mut active_context = Mown::Borrowed(self.active_context);
		if let Some(previous_context) = self.active_context.previous_context() {
			if !from_map && !has_value_entry && !(element.len() == 1 && has_id_entry) {
				active_context = Mown::Borrowed(previous_context)
			}
		}

		// 8) If `property_scoped_context` is defined, set `active_context` to
		// the result of the Context Processing algorithm, passing
		// `active_context`, `property_scoped_context` as local context,
		// `base_url` from the term definition for `active_property` in
		// `active_context` and `true` for `override_protected`.
		if let Some(definition) = active_property_definition {
			if let Some(context) = &definition.context {
				active_context = Mown::Owned(process_context(
					env,
					&active_context,
					context,
					definition.base_url.as_deref(),
					self.context_options().with_override(),
				)?)
			}
		}

		// 9) If `element` contains the entry @context, set `active_context` to
		// the result of the Context Processing algorithm, passing
		// `active_context`, the value of the @context entry as local context
		// and `base_url`.
		if let Some(context) = element.value("@context") {
			active_context = Mown::Owned(process_context(
				env,
				&active_context,
				context,
				self.base_url,
				self.context_options(),
			)?)
		}

		// 10) Initialize `type_scoped_context` to `active_context`. This is used
		// for expanding values that may be relevant to any previous type-scoped
		// context.
		let type_scoped_context = active_context;
		let mut active_context = Mown::Borrowed(&*type_scoped_context);

		// 11) For each `key` and `value` in `element` ordered lexicographically
		// by key where key IRI expands to @type:
		let mut type_entry = None;
		for entry in sorted_entries(element, true) {
			if keyword_of(&type_scoped_context, entry.key.as_str()) == Some("@type") {
				if type_entry.is_none() {
					type_entry = Some(&entry.value)
				}

				// 11.2) For each `term` which is a value of `value` ordered
				// lexicographically, if `term` is a string, and `term`'s term
				// definition in `type_scoped_context` has a `local_context`,
				// set `active_context` to the result of the Context Processing
				// algorithm, passing `active_context`, the value of the
				// `term`'s local context as `local_context`, `base_url` from the
				// term definition for value in `active_context`, and `false`
				// for `propagate`.
				let mut terms: Vec<&str> = as_array(&entry.value).iter().filter_map(as_str).collect();
				terms.sort_unstable();
				for term in terms {
					if let Some(definition) = type_scoped_context.get(term) {
						if let Some(context) = &definition.context {
							let base_url = definition.base_url.as_deref();
							active_context = Mown::Owned(process_context(
								env,
								&active_context,
								context,
								base_url,
								self.context_options().without_propagation(),
							)?)
						}
					}
				}
			}
		}

		// 12) Initialize `input_type` to expansion of the last value of the
		// first entry in `element` expanding to @type (if any), ordering
		// entries lexicographically by key.
		let input_type = type_entry
			.and_then(|value| as_array(value).last())
			.and_then(as_str)
			.filter(|t| !is_keyword_like(t))
			.and_then(|t| expand_iri(env, &active_context, t, false, true));

		// 13) Expand the entries.
		let mut result = Object::new();
		self.with(&active_context, self.active_property).expand_entries(
			env,
			&type_scoped_context,
			element,
			input_type.as_deref(),
			&mut result,
		)?;

		self.finalize(result)
	}

	/// Result post-processing (steps 14 to 19 of the expansion algorithm).
	fn finalize(&self, mut result: Object) -> Result<Value, Error> {
		// 14) If result contains the entry @value:
		if result.has("@value") {
			// 14.1) The result must not contain any entries other than
			// @direction, @index, @language, @type, and @value. It must not
			// contain an @type entry if it contains either @language or
			// @direction entries. Otherwise, an invalid value object error has
			// been detected and processing is aborted.
			if result.key_strs().any(|k| {
				!matches!(
					k,
					"@direction" | "@index" | "@language" | "@type" | "@value"
				)
			}) || (result.has("@type") && (result.has("@language") || result.has("@direction")))
			{
				return Err(ErrorCode::InvalidValueObject.into());
			}

			// 14.2) If the result's @type entry is @json, then the @value entry
			// may contain any value, and is treated as a JSON literal.
			let is_json = result.value("@type").and_then(as_str) == Some("@json");
			if !is_json {
				// 14.3) Otherwise, if the value of result's @value entry is null,
				// or an empty array, return null.
				match result.value("@value") {
					Some(Value::Null) => return Ok(Value::Null),
					Some(Value::Array(items)) if items.is_empty() => return Ok(Value::Null),
					_ => (),
				}

				if !self.options.frame_expansion {
					// 14.4) Otherwise, if the value of result's @value entry is
					// not a string and result contains the entry @language, an
					// invalid language-tagged value error has been detected
					// (only strings can be language-tagged) and processing is
					// aborted.
					if !matches!(result.value("@value"), Some(Value::String(_)))
						&& result.has("@language")
					{
						return Err(ErrorCode::InvalidLanguageTaggedValue.into());
					}

					// 14.5) Otherwise, if the result has an @type entry and its
					// value is not an IRI, an invalid typed value error has been
					// detected and processing is aborted.
					if let Some(typ) = result.value("@type") {
						if !as_str(typ).is_some_and(is_absolute_iri) {
							return Err(ErrorCode::InvalidTypedValue.into());
						}
					}
				}
			}
		}
		// 15) Otherwise, if result contains the entry @type and its associated
		// value is not an array, set it to an array containing only the
		// associated value.
		else if let Some(typ) = result.value_mut("@type") {
			if !matches!(typ, Value::Array(_)) {
				let value = std::mem::replace(typ, Value::Null);
				*typ = Value::Array(vec![value])
			}
		}
		// 16) Otherwise, if result contains the entry @set or @list:
		else if result.has("@set") || result.has("@list") {
			// 16.1) The result must contain at most one other entry which must
			// be @index. Otherwise, an invalid set or list object error has
			// been detected and processing is aborted.
			if result.len() > 2 || (result.len() == 2 && !result.has("@index")) {
				return Err(ErrorCode::InvalidSetOrListObject.into());
			}
		}

		// 16.2) If result contains the entry @set, then set result to the
		// entry's associated value.
		let result = match result.take("@set") {
			Some(set) => set,
			None => Value::Object(result),
		};

		if let Value::Object(object) = &result {
			// 17) If result is a map that contains only the entry @language,
			// return null.
			if object.len() == 1 && object.has("@language") {
				return Ok(Value::Null);
			}

			// 18) If active property is null or @graph, drop free-floating
			// values as follows:
			if !self.options.frame_expansion
				&& matches!(self.active_property, None | Some("@graph"))
			{
				// 18.1) If result is a map which is empty, or contains @value
				// or @list, set result to null.
				// 18.2) Otherwise, if result is a map whose only entry is @id,
				// set result to null.
				if object.is_empty()
					|| object.has("@value")
					|| object.has("@list")
					|| (object.len() == 1 && object.has("@id"))
				{
					return Ok(Value::Null);
				}
			}
		}

		// 19) Return result.
		Ok(result)
	}
}

/// Applies the property-scoped context of `key`, if any.
pub(super) fn scoped_context<'c>(
	env: &mut impl ProcessingEnvironment,
	expander: &Expander,
	active_context: &'c ActiveContext,
	key: &str,
) -> Result<Mown<'c, ActiveContext>, Error> {
	match active_context.get(key) {
		Some(definition) => match &definition.context {
			Some(context) => Ok(Mown::Owned(process_context(
				env,
				active_context,
				context,
				definition.base_url.as_deref(),
				expander.context_options().with_override(),
			)?)),
			None => Ok(Mown::Borrowed(active_context)),
		},
		None => Ok(Mown::Borrowed(active_context)),
	}
}
