use json_syntax::{object::Entry, Object, Value};
use mown::Mown;

use super::{element::scoped_context, expand_value, keyword_of, to_array, Expander};
use crate::{
	algorithms::{context_processing::expand_iri, process_context, ProcessingEnvironment},
	context::Type,
	util::{
		add_value, as_array, into_array, is_graph_object, is_list_object, is_scalar,
		is_value_object, kind, object1, sorted_entries, string, ObjectExt, ObjectKind,
	},
	warning::check_language_tag,
	ActiveContext, Container, ContainerItem, Direction, Error, ErrorCode, Keyword,
	ProcessingMode, TermDefinition,
};

impl<'a> Expander<'a> {
	/// Expands the entries of `element` into `result`.
	///
	/// Step 13 and 14 of the expansion algorithm. Nested entries (`@nest`)
	/// are expanded into the same `result`.
	pub(super) fn expand_entries(
		&self,
		env: &mut impl ProcessingEnvironment,
		type_scoped_context: &ActiveContext,
		element: &Object,
		input_type: Option<&str>,
		result: &mut Object,
	) -> Result<(), Error> {
		let mut nests = Vec::new();

		// 13) For each `key` and `value` in `element`, ordered lexicographically
		// by key if `ordered` is `true`:
		for Entry { key, value } in sorted_entries(element, self.options.ordered) {
			let key = key.as_str();

			// 13.1) If key is @context, continue to the next key.
			if key == "@context" {
				continue;
			}

			// 13.2) Initialize `expanded_property` to the result of IRI
			// expanding `key`.
			// 13.3) If `expanded_property` is null or it neither contains a
			// colon (:) nor it is a keyword, drop key by continuing to the next
			// key.
			let Some(expanded_property) = self.expand_key(env, key)? else {
				continue;
			};

			// 13.4) If `expanded_property` is a keyword:
			if let Ok(keyword) = Keyword::try_from(expanded_property.as_str()) {
				// 13.4.1) If `active_property` equals @reverse, an invalid
				// reverse property map error has been detected and processing
				// is aborted.
				if self.active_property == Some("@reverse") {
					return Err(Error::new(ErrorCode::InvalidReversePropertyMap, key));
				}

				// 13.4.2) If `result` already has an `expanded_property` entry,
				// other than @included or @type (unless processing mode is
				// json-ld-1.0), a colliding keywords error has been detected
				// and processing is aborted.
				let may_repeat = matches!(keyword, Keyword::Included | Keyword::Type)
					&& self.options.processing_mode != ProcessingMode::JsonLd1_0;
				if result.has(keyword.as_str()) && !may_repeat {
					return Err(Error::new(ErrorCode::CollidingKeywords, keyword));
				}

				if keyword == Keyword::Nest {
					// 13.4.14) If expanded property is @nest, add key to
					// nests, initializing it to an empty array, if necessary.
					// Continue with the next key from element.
					nests.push(key);
					continue;
				}

				// 13.4.16) Unless `expanded_value` is null, `expanded_property`
				// is @value, and `input_type` is not @json, set the
				// `expanded_property` entry of result to `expanded_value`.
				if let Some(expanded_value) = self.expand_keyword_entry(
					env,
					type_scoped_context,
					keyword,
					value,
					input_type,
					result,
				)? {
					if !expanded_value.is_null() || keyword == Keyword::Value {
						result.set(keyword.as_str(), expanded_value)
					}
				}

				// 13.4.17) Continue with the next key from element.
				continue;
			}

			self.expand_property_entry(env, key, &expanded_property, value, result)?
		}

		// 14) For each key `nesting_key` in nests, ordered lexicographically if
		// ordered is true:
		for nesting_key in nests {
			// 14.1) Initialize `nested_values` to the value of `nesting_key` in
			// element, ensuring that it is an array.
			let Some(nested_values) = element.value(nesting_key) else {
				continue;
			};

			// The property-scoped context of the nesting key applies to the
			// nested entries.
			let nest_context = scoped_context(env, self, self.active_context, nesting_key)?;

			// 14.2) For each `nested_value` in `nested_values`:
			for nested_value in as_array(nested_values) {
				// 14.2.1) If `nested_value` is not a map, or any key within
				// `nested_value` expands to @value, an invalid @nest value
				// error has been detected and processing is aborted.
				let Value::Object(nested_value) = nested_value else {
					return Err(Error::new(ErrorCode::InvalidNestValue, nesting_key));
				};

				if nested_value
					.key_strs()
					.any(|k| keyword_of(&nest_context, k) == Some("@value"))
				{
					return Err(Error::new(ErrorCode::InvalidNestValue, nesting_key));
				}

				// 14.2.2) Recursively repeat steps 3, 8, 13, and 14 using
				// `nesting_key` for active property, and `nested_value` for
				// element.
				self.with(&nest_context, self.active_property).expand_entries(
					env,
					type_scoped_context,
					nested_value,
					input_type,
					result,
				)?
			}
		}

		Ok(())
	}

	/// Expands the value of a keyword entry.
	///
	/// Returns the value to store in the result, if any.
	fn expand_keyword_entry(
		&self,
		env: &mut impl ProcessingEnvironment,
		type_scoped_context: &ActiveContext,
		keyword: Keyword,
		value: &Value,
		input_type: Option<&str>,
		result: &mut Object,
	) -> Result<Option<Value>, Error> {
		let frame_expansion = self.options.frame_expansion;
		let is_1_0 = self.options.processing_mode == ProcessingMode::JsonLd1_0;

		let expanded_value = match keyword {
			// 13.4.3) If `expanded_property` is @id:
			Keyword::Id => {
				// 13.4.3.1) If `value` is not a string, an invalid @id value
				// error has been detected and processing is aborted. When the
				// `frame_expansion` flag is set, value MAY be an empty map, or
				// an array of one or more strings.
				match value {
					Value::String(id) => {
						let id = self.expand_id(env, id);
						if frame_expansion {
							Value::Array(id.into_iter().map(string).collect())
						} else {
							match id {
								Some(id) => string(id),
								None => return Ok(None),
							}
						}
					}
					Value::Object(o) if frame_expansion && o.is_empty() => {
						Value::Array(vec![value.clone()])
					}
					Value::Array(items)
						if frame_expansion && items.iter().all(|i| matches!(i, Value::String(_))) =>
					{
						let mut ids = Vec::with_capacity(items.len());
						for item in items {
							if let Value::String(id) = item {
								ids.extend(self.expand_id(env, id).map(string))
							}
						}

						Value::Array(ids)
					}
					_ => return Err(ErrorCode::InvalidIdValue.into()),
				}
			}

			// 13.4.4) If `expanded_property` is @type:
			Keyword::Type => {
				// 13.4.4.1) If value is neither a string nor an array of
				// strings, an invalid type value error has been detected and
				// processing is aborted. When the frame expansion flag is set,
				// value MAY be an empty map, or a default object.
				let expanded_value = match value {
					// 13.4.4.2) If value is an empty map, set expanded value
					// to value.
					Value::Object(o) if frame_expansion && o.is_empty() => value.clone(),
					// 13.4.4.3) Otherwise, if value is a default object, set
					// expanded value to a new default object with the value of
					// @default set to the result of IRI expanding value using
					// type-scoped context for active context, and true for
					// document relative.
					Value::Object(o) if frame_expansion && o.len() == 1 => {
						match o.value("@default") {
							Some(Value::String(default)) => {
								match self.expand_type(env, type_scoped_context, default) {
									Some(default) => Value::Object(object1("@default", string(default))),
									None => return Ok(None),
								}
							}
							_ => return Err(ErrorCode::InvalidTypeValue.into()),
						}
					}
					// 13.4.4.4) Otherwise, set expanded value to the result of
					// IRI expanding each of its values using type-scoped
					// context for active context, and true for document
					// relative.
					Value::String(typ) => match self.expand_type(env, type_scoped_context, typ) {
						Some(typ) => string(typ),
						None => return Ok(None),
					},
					Value::Array(items) => {
						let mut types = Vec::with_capacity(items.len());
						for item in items {
							match item {
								Value::String(typ) => {
									types.extend(self.expand_type(env, type_scoped_context, typ).map(string))
								}
								_ => return Err(ErrorCode::InvalidTypeValue.into()),
							}
						}

						Value::Array(types)
					}
					_ => return Err(ErrorCode::InvalidTypeValue.into()),
				};

				// 13.4.4.5) If result already has an entry for @type, prepend
				// the value of @type in result to expanded value, transforming
				// it into an array, if necessary.
				match result.take("@type") {
					Some(previous) => {
						let mut types = into_array(previous);
						types.extend(into_array(expanded_value));
						Value::Array(types)
					}
					None if frame_expansion => Value::Array(into_array(expanded_value)),
					None => expanded_value,
				}
			}

			// 13.4.5) If `expanded_property` is @graph, set `expanded_value` to
			// the result of using this algorithm recursively passing
			// `active_context`, @graph for active property, `value` for
			// element, `base_url`, and the `frame_expansion` and `ordered`
			// flags, ensuring that `expanded_value` is an array of one or more
			// maps.
			Keyword::Graph => {
				let expanded = self
					.with(self.active_context, Some("@graph"))
					.expand_element(env, value, false)?;
				Value::Array(to_array(expanded))
			}

			// 13.4.6) If `expanded_property` is @included:
			Keyword::Included => {
				// 13.4.6.1) If processing mode is json-ld-1.0, continue with
				// the next key from element.
				if is_1_0 {
					return Ok(None);
				}

				// 13.4.6.2) Set `expanded_value` to the result of using this
				// algorithm recursively passing `active_context`,
				// `active_property`, `value` for element, `base_url`, and the
				// `frame_expansion` and `ordered` flags, ensuring that the
				// result is an array.
				let expanded = to_array(self.expand_element(env, value, false)?);

				// 13.4.6.3) If any element of `expanded_value` is not a node
				// object, an invalid @included value error has been detected
				// and processing is aborted.
				if !expanded.iter().all(|item| {
					matches!(
						kind(item),
						Some(ObjectKind::Node | ObjectKind::NodeReference | ObjectKind::Graph)
					)
				}) {
					return Err(ErrorCode::InvalidIncludedValue.into());
				}

				// 13.4.6.4) If result already has an entry for @included,
				// prepend the value of @included in result to expanded value.
				match result.take("@included") {
					Some(previous) => {
						let mut included = into_array(previous);
						included.extend(expanded);
						Value::Array(included)
					}
					None => Value::Array(expanded),
				}
			}

			// 13.4.7) If `expanded_property` is @value:
			Keyword::Value => {
				if input_type == Some("@json") {
					// 13.4.7.1) If `input_type` is @json, set expanded value to
					// value. If processing mode is json-ld-1.0, an invalid value
					// object value error has been detected and processing is
					// aborted.
					if is_1_0 {
						return Err(ErrorCode::InvalidValueObjectValue.into());
					}

					value.clone()
				} else {
					// 13.4.7.2) Otherwise, if value is not a scalar or null, an
					// invalid value object value error has been detected and
					// processing is aborted. When the frame expansion flag is
					// set, value MAY be an empty map or an array of scalar
					// values.
					match value {
						Value::Null => value.clone(),
						v if is_scalar(v) => {
							if frame_expansion {
								Value::Array(vec![v.clone()])
							} else {
								v.clone()
							}
						}
						Value::Object(o) if frame_expansion && o.is_empty() => {
							Value::Array(vec![value.clone()])
						}
						Value::Array(items) if frame_expansion && items.iter().all(is_scalar) => {
							value.clone()
						}
						_ => return Err(ErrorCode::InvalidValueObjectValue.into()),
					}
				}
			}

			// 13.4.8) If `expanded_property` is @language:
			Keyword::Language => match value {
				// 13.4.8.1) If value is not a string, an invalid
				// language-tagged string error has been detected and
				// processing is aborted. When the frame expansion flag is set,
				// value MAY be an empty map or an array of zero or more
				// strings.
				Value::String(tag) => {
					// 13.4.8.2) If value is not well-formed according to section
					// 2.2.9 of [BCP47], processors SHOULD issue a warning.
					if let Some(w) = check_language_tag(tag) {
						env.warn(w)
					}

					if frame_expansion {
						Value::Array(vec![value.clone()])
					} else {
						value.clone()
					}
				}
				Value::Object(o) if frame_expansion && o.is_empty() => {
					Value::Array(vec![value.clone()])
				}
				Value::Array(items)
					if frame_expansion && items.iter().all(|i| matches!(i, Value::String(_))) =>
				{
					value.clone()
				}
				_ => return Err(ErrorCode::InvalidLanguageTaggedString.into()),
			},

			// 13.4.9) If `expanded_property` is @direction:
			Keyword::Direction => {
				// 13.4.9.1) If processing mode is json-ld-1.0, continue with
				// the next key from element.
				if is_1_0 {
					return Ok(None);
				}

				// 13.4.9.2) If value is neither "ltr" nor "rtl", an invalid
				// base direction error has been detected and processing is
				// aborted. When the frame expansion flag is set, value MAY be
				// an empty map or an array of zero or more strings.
				match value {
					Value::String(d) if Direction::try_from(d.as_str()).is_ok() => {
						if frame_expansion {
							Value::Array(vec![value.clone()])
						} else {
							value.clone()
						}
					}
					Value::Object(o) if frame_expansion && o.is_empty() => {
						Value::Array(vec![value.clone()])
					}
					Value::Array(items)
						if frame_expansion && items.iter().all(|i| matches!(i, Value::String(_))) =>
					{
						value.clone()
					}
					_ => return Err(ErrorCode::InvalidBaseDirection.into()),
				}
			}

			// 13.4.10) If `expanded_property` is @index:
			Keyword::Index => match value {
				Value::String(_) => value.clone(),
				// 13.4.10.1) If value is not a string, an invalid @index value
				// error has been detected and processing is aborted.
				_ => return Err(ErrorCode::InvalidIndexValue.into()),
			},

			// 13.4.11) If `expanded_property` is @list:
			Keyword::List => {
				// 13.4.11.1) If `active_property` is null or @graph, continue
				// with the next key from element to remove the free-floating
				// list.
				if matches!(self.active_property, None | Some("@graph")) {
					return Ok(None);
				}

				// 13.4.11.2) Otherwise, initialize `expanded_value` to the
				// result of using this algorithm recursively passing
				// `active_context`, `active_property`, `value` for element,
				// `base_url`, and the `frame_expansion` and `ordered` flags,
				// ensuring that the result is an array.
				Value::Array(to_array(self.expand_element(env, value, false)?))
			}

			// 13.4.12) If `expanded_property` is @set, set `expanded_value` to
			// the result of using this algorithm recursively, passing
			// `active_context`, `active_property`, `value` for element,
			// `base_url`, and the `frame_expansion` and `ordered` flags.
			Keyword::Set => self.expand_element(env, value, false)?,

			// 13.4.13) If `expanded_property` is @reverse:
			Keyword::Reverse => {
				self.expand_reverse_entry(env, value, result)?;
				return Ok(None);
			}

			// 13.4.15) When the frame expansion flag is set, and
			// `expanded_property` is any other framing keyword (@default,
			// @embed, @explicit, @omitDefault, or @requireAll), set expanded
			// value to the result of performing the Expansion Algorithm
			// recursively.
			Keyword::Default if frame_expansion => match value {
				Value::String(s) if s.as_str() == "@null" => Value::Array(vec![value.clone()]),
				_ => {
					let mut options = self.options;
					options.frame_expansion = false;
					let expander = Expander {
						active_context: self.active_context,
						active_property: Some("@default"),
						base_url: self.base_url,
						options,
					};

					Value::Array(to_array(expander.expand_element(env, value, false)?))
				}
			},
			Keyword::Embed | Keyword::Explicit | Keyword::OmitDefault | Keyword::RequireAll
				if frame_expansion =>
			{
				Value::Array(into_array(value.clone()))
			}

			// Handled by the caller, or meaningless in a node object.
			Keyword::Nest
			| Keyword::Context
			| Keyword::Base
			| Keyword::Container
			| Keyword::Import
			| Keyword::Json
			| Keyword::None
			| Keyword::Prefix
			| Keyword::Propagate
			| Keyword::Protected
			| Keyword::Version
			| Keyword::Vocab
			| Keyword::Default
			| Keyword::Embed
			| Keyword::Explicit
			| Keyword::OmitDefault
			| Keyword::RequireAll
			| Keyword::Preserve => return Ok(None),
		};

		Ok(Some(expanded_value))
	}

	fn expand_reverse_entry(
		&self,
		env: &mut impl ProcessingEnvironment,
		value: &Value,
		result: &mut Object,
	) -> Result<(), Error> {
		// 13.4.13.1) If value is not a map, an invalid @reverse value error has
		// been detected and processing is aborted.
		if !matches!(value, Value::Object(_)) {
			return Err(ErrorCode::InvalidReverseValue.into());
		}

		// 13.4.13.2) Otherwise initialize `expanded_value` to the result of
		// using this algorithm recursively passing `active_context`, @reverse
		// as active property, value as element, `base_url`, and the
		// `frame_expansion` and `ordered` flags.
		let expanded = self
			.with(self.active_context, Some("@reverse"))
			.expand_element(env, value, false)?;

		let Value::Object(mut expanded) = expanded else {
			return Ok(());
		};

		// 13.4.13.3) If `expanded_value` contains an @reverse entry, i.e.,
		// properties that are reversed twice, execute for each of its property
		// and item the following steps:
		if let Some(Value::Object(reverse)) = expanded.take("@reverse") {
			for Entry { key, value } in reverse.entries() {
				add_value(result, key.as_str(), value.clone(), true)
			}
		}

		// 13.4.13.4) If `expanded_value` contains an entry other than @reverse:
		if !expanded.is_empty() {
			// 13.4.13.4.1) Set `reverse_map` to the value of the @reverse entry
			// in result, initializing it to an empty map, if necessary.
			let mut reverse_map = match result.take("@reverse") {
				Some(Value::Object(map)) => map,
				_ => Object::new(),
			};

			// 13.4.13.4.2) For each property and items in expanded value other
			// than @reverse:
			for Entry { key, value } in expanded.entries() {
				for item in as_array(value) {
					// 13.4.13.4.2.1.1) If item is a value object or list
					// object, an invalid reverse property value has been
					// detected and processing is aborted.
					if is_value_object(item) || is_list_object(item) {
						return Err(Error::new(ErrorCode::InvalidReversePropertyValue, key));
					}

					// 13.4.13.4.2.1.2) Use add value to add item to the
					// property entry in reverse map using true for as array.
					add_value(&mut reverse_map, key.as_str(), item.clone(), true)
				}
			}

			result.set("@reverse", Value::Object(reverse_map))
		}

		Ok(())
	}

	/// Expands the value of a non-keyword entry (steps 13.5 to 13.14).
	fn expand_property_entry(
		&self,
		env: &mut impl ProcessingEnvironment,
		key: &str,
		expanded_property: &str,
		value: &Value,
		result: &mut Object,
	) -> Result<(), Error> {
		let definition = self.active_context.get(key);

		// 13.5) Initialize `container_mapping` to `key`'s container mapping in
		// `active_context`.
		let container = definition.map(|d| d.container).unwrap_or_default();

		let mut expanded_value = match value {
			// 13.6) If `key`'s term definition in `active_context` has a type
			// mapping of @json, set expanded value to a new map, set the entry
			// @value to value, and set the entry @type to @json.
			_ if definition.is_some_and(|d| d.typ == Some(Type::Json)) => {
				let mut object = object1("@value", value.clone());
				object.set("@type", string("@json"));
				Value::Object(object)
			}
			// 13.7) Otherwise, if `container_mapping` includes @language and
			// value is a map then value is expanded from a language map.
			Value::Object(map) if container.contains(ContainerItem::Language) => {
				self.expand_language_map(env, definition, map)?
			}
			// 13.8) Otherwise, if `container_mapping` includes @index, @type,
			// or @id and value is a map then value is expanded from an
			// map as follows:
			Value::Object(map)
				if container.contains(ContainerItem::Index)
					|| container.contains(ContainerItem::Type)
					|| container.contains(ContainerItem::Id) =>
			{
				self.expand_index_map(env, key, definition, container, map)?
			}
			// 13.9) Otherwise, initialize `expanded_value` to the result of
			// using this algorithm recursively, passing `active_context`,
			// `key` for active property, `value` for element, `base_url`, and
			// the `frame_expansion` and `ordered` flags.
			_ => self
				.with(self.active_context, Some(key))
				.expand_element(env, value, false)?,
		};

		// 13.10) If `expanded_value` is null, ignore key by continuing to the
		// next key from element.
		if expanded_value.is_null() {
			return Ok(());
		}

		// 13.11) If `container_mapping` includes @list and `expanded_value` is
		// not already a list object, convert `expanded_value` to a list
		// object by first setting it to an array containing only
		// `expanded_value` if it is not already an array, and then by setting
		// it to a map containing the key-value pair @list-`expanded_value`.
		if container.contains(ContainerItem::List) && !is_list_object(&expanded_value) {
			expanded_value = Value::Object(object1(
				"@list",
				Value::Array(to_array(expanded_value)),
			))
		}

		// 13.12) If `container_mapping` includes @graph, and includes neither
		// @id nor @index, convert `expanded_value` into an array, if
		// necessary, then set `expanded_value` to the result of converting
		// each `ev` into a graph object.
		if container.contains(ContainerItem::Graph)
			&& !container.contains(ContainerItem::Id)
			&& !container.contains(ContainerItem::Index)
		{
			expanded_value = Value::Array(
				to_array(expanded_value)
					.into_iter()
					.map(|ev| Value::Object(object1("@graph", Value::Array(to_array(ev)))))
					.collect(),
			)
		}

		if definition.is_some_and(|d| d.reverse_property) {
			// 13.13) Otherwise, if the term definition associated to key
			// indicates that it is a reverse property
			// 13.13.1) If result has no @reverse entry, create one and
			// initialize its value to an empty map.
			let mut reverse_map = match result.take("@reverse") {
				Some(Value::Object(map)) => map,
				_ => Object::new(),
			};

			// 13.13.3) For each item in expanded value
			for item in to_array(expanded_value) {
				// 13.13.4.1) If item is a value object or list object, an
				// invalid reverse property value has been detected and
				// processing is aborted.
				if is_value_object(&item) || is_list_object(&item) {
					return Err(Error::new(ErrorCode::InvalidReversePropertyValue, key));
				}

				// 13.13.4.2) Use add value to add item to the expanded property
				// entry in reverse map using true for as array.
				add_value(&mut reverse_map, expanded_property, item, true)
			}

			result.set("@reverse", Value::Object(reverse_map))
		} else {
			// 13.14) Otherwise, key is not a reverse property use add value to
			// add expanded value to the expanded property entry in result using
			// true for as array.
			add_value(result, expanded_property, expanded_value, true)
		}

		Ok(())
	}

	/// Expands a language map (step 13.7).
	fn expand_language_map(
		&self,
		env: &mut impl ProcessingEnvironment,
		definition: Option<&TermDefinition>,
		map: &Object,
	) -> Result<Value, Error> {
		// 13.7.1) Initialize `expanded_value` to an empty array.
		let mut expanded_value = Vec::new();

		// 13.7.2) Initialize `direction` to the default base direction from
		// active context.
		// 13.7.3) If key's term definition in active context has a direction
		// mapping, update direction with that value.
		let direction = match definition.and_then(|d| d.direction) {
			Some(direction) => direction,
			None => self.active_context.default_base_direction(),
		};

		// 13.7.4) For each key-value pair `language`-`language_value` in value,
		// ordered lexicographically by key if ordered is true:
		for Entry {
			key: language,
			value: language_value,
		} in sorted_entries(map, self.options.ordered)
		{
			let language = language.as_str();
			let is_none = language == "@none"
				|| expand_iri(env, self.active_context, language, false, true).as_deref()
					== Some("@none");

			// 13.7.4.1) If `language_value` is not an array set
			// `language_value` to an array containing only `language_value`.
			// 13.7.4.2) For each item in `language_value`:
			for item in as_array(language_value) {
				match item {
					// 13.7.4.2.1) If item is null, continue to the next entry
					// in language value.
					Value::Null => continue,
					Value::String(_) => {
						// 13.7.4.2.3) Initialize a new map `v` consisting of
						// two key-value pairs: (@value-item) and
						// (@language-language).
						let mut v = object1("@value", item.clone());

						// 13.7.4.2.4) If language is @none, or expands to
						// @none, remove @language from v.
						if !is_none {
							// If language is not well-formed according to
							// section 2.2.9 of [BCP47], processors SHOULD issue
							// a warning.
							if let Some(w) = check_language_tag(language) {
								env.warn(w)
							}

							v.set("@language", string(language))
						}

						// 13.7.4.2.5) If direction is not null, add an entry for
						// @direction to v with direction.
						if let Some(direction) = direction {
							v.set("@direction", string(direction.as_str()))
						}

						// 13.7.4.2.6) Append v to expanded value.
						expanded_value.push(Value::Object(v))
					}
					// 13.7.4.2.2) item must be a string, otherwise an invalid
					// language map value error has been detected and processing
					// is aborted.
					_ => return Err(ErrorCode::InvalidLanguageMapValue.into()),
				}
			}
		}

		Ok(Value::Array(expanded_value))
	}

	/// Expands an index, id or type map (step 13.8).
	fn expand_index_map(
		&self,
		env: &mut impl ProcessingEnvironment,
		key: &str,
		definition: Option<&TermDefinition>,
		container: Container,
		map: &Object,
	) -> Result<Value, Error> {
		let active_context = self.active_context;

		// 13.8.1) Initialize `expanded_value` to an empty array.
		let mut expanded_value = Vec::new();

		// 13.8.2) Initialize `index_key` to the key's index mapping in active
		// context, or @index, if it does not exist.
		let index_key = definition
			.and_then(|d| d.index.as_deref())
			.unwrap_or("@index");

		// 13.8.3) For each key-value pair index-index value in value, ordered
		// lexicographically by key if ordered is true:
		for Entry {
			key: index,
			value: index_value,
		} in sorted_entries(map, self.options.ordered)
		{
			let index = index.as_str();

			// 13.8.3.1) If container mapping includes @id or @type, initialize
			// `map_context` to the `previous_context` from `active_context` if
			// it exists, otherwise, set `map_context` to `active_context`.
			let mut map_context = Mown::Borrowed(active_context);
			if container.contains(ContainerItem::Type) || container.contains(ContainerItem::Id) {
				if let Some(previous_context) = active_context.previous_context() {
					map_context = Mown::Borrowed(previous_context)
				}
			}

			// 13.8.3.2) If container mapping includes @type and index's term
			// definition in map context has a local context, update map context
			// to the result of the Context Processing algorithm, passing map
			// context as active context the value of the index's local context
			// as local context and base URL from the term definition for index
			// in map context.
			if container.contains(ContainerItem::Type) {
				let scoped = map_context
					.get(index)
					.and_then(|d| Some((d.context.clone()?, d.base_url.clone())));

				if let Some((context, base_url)) = scoped {
					map_context = Mown::Owned(process_context(
						env,
						&map_context,
						&context,
						base_url.as_deref(),
						self.context_options(),
					)?)
				}
			}

			// 13.8.3.4) Initialize `expanded_index` to the result of IRI
			// expanding index.
			let expanded_index = expand_iri(env, active_context, index, false, true);
			let is_none = expanded_index.as_deref() == Some("@none");

			// 13.8.3.6) Initialize `index_value` to the result of using this
			// algorithm recursively, passing `map_context` as active context,
			// key as active property, `index_value` as element, `base_url`,
			// `true` for `from_map`, and the `frame_expansion` and `ordered`
			// flags.
			let items = to_array(
				self.with(&map_context, Some(key))
					.expand_element(env, index_value, true)?,
			);

			// 13.8.3.7) For each item in index value:
			for mut item in items {
				// 13.8.3.7.1) If container mapping includes @graph, and item is
				// not a graph object, set item to a new map containing the
				// key-value pair @graph-item, ensuring that the value is
				// represented using an array.
				if container.contains(ContainerItem::Graph) && !is_graph_object(&item) {
					item = Value::Object(object1("@graph", Value::Array(to_array(item))))
				}

				if container.contains(ContainerItem::Index) && index_key != "@index" && !is_none {
					// 13.8.3.7.2) If container mapping includes @index, index
					// key is not @index, and expanded index is not @none:
					// 13.8.3.7.2.1) Initialize re-expanded index to the result
					// of calling the Value Expansion algorithm, passing the
					// active context, index key as active property, and index
					// as value.
					let re_expanded_index =
						expand_value(env, active_context, Some(index_key), &string(index));

					// 13.8.3.7.2.2) Initialize expanded index key to the result
					// of IRI expanding index key.
					let expanded_index_key = expand_iri(env, active_context, index_key, false, true);

					// 13.8.3.7.2.5) If item is a value object, it MUST NOT
					// contain any extra properties; an invalid value object
					// error has been detected and processing is aborted.
					if is_value_object(&item) {
						return Err(Error::new(ErrorCode::InvalidValueObject, key));
					}

					if let (Some(expanded_index_key), Value::Object(object)) =
						(expanded_index_key, &mut item)
					{
						// 13.8.3.7.2.3) Initialize index property values to an
						// array consisting of re-expanded index followed by the
						// existing values of the concatenation of expanded
						// index key in item, if any.
						let mut values = vec![re_expanded_index];
						if let Some(existing) = object.take(&expanded_index_key) {
							values.extend(into_array(existing))
						}

						// 13.8.3.7.2.4) Add the key-value pair (expanded index
						// key-index property values) to item.
						object.set(&expanded_index_key, Value::Array(values))
					}
				} else if let Value::Object(object) = &mut item {
					if container.contains(ContainerItem::Index) {
						// 13.8.3.7.3) Otherwise, if container mapping includes
						// @index, item does not have an entry @index, and
						// expanded index is not @none, add the key-value pair
						// (@index-index) to item.
						if !object.has("@index") && !is_none {
							object.set("@index", string(index))
						}
					} else if container.contains(ContainerItem::Id) {
						// 13.8.3.7.4) Otherwise, if container mapping includes
						// @id item does not have the entry @id, and expanded
						// index is not @none, add the key-value pair
						// (@id-expanded index) to item, where expanded index is
						// set to the result of IRI expanding index using true
						// for document relative and false for vocab.
						if !object.has("@id") && !is_none {
							if let Some(id) = expand_iri(env, active_context, index, true, false) {
								object.set("@id", string(id))
							}
						}
					} else if container.contains(ContainerItem::Type) && !is_none {
						// 13.8.3.7.5) Otherwise, if container mapping includes
						// @type and expanded index is not @none, initialize
						// types to a new array consisting of expanded index
						// followed by any existing values of @type in item. Add
						// the key-value pair (@type-types) to item.
						if let Some(expanded_index) = &expanded_index {
							let mut types = vec![string(expanded_index.as_str())];
							if let Some(existing) = object.take("@type") {
								types.extend(into_array(existing))
							}

							object.set("@type", Value::Array(types))
						}
					}
				}

				// 13.8.3.7.6) Append item to expanded value.
				expanded_value.push(item)
			}
		}

		Ok(Value::Array(expanded_value))
	}
}

