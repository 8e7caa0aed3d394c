use json_syntax::{Object, Value};

use super::{compact_iri, is_keyword_alias, Compactor};
use crate::{
	algorithms::{expand_iri, ProcessingEnvironment},
	util::{
		add_value, as_array, as_str, is_graph_object, is_list_object, is_simple_graph_object,
		object1, sorted_entries, string, ObjectExt,
	},
	ActiveContext, ContainerItem, Error, ErrorCode, ProcessingMode,
};

/// Removes the object stored under `key`, or returns a new one.
///
/// The object must be put back with [`Object::set`] once updated.
fn take_object(object: &mut Object, key: &str) -> Object {
	match object.take(key) {
		Some(Value::Object(o)) => o,
		_ => Object::new(),
	}
}

impl<'a> Compactor<'a> {
	/// Compacts the entries of a node object (step 12 of the compaction
	/// algorithm).
	pub(super) fn compact_entries(
		&self,
		env: &mut impl ProcessingEnvironment,
		type_scoped_context: &ActiveContext,
		element: &Object,
	) -> Result<Object, Error> {
		let active_context = self.active_context;
		let inside_reverse = self.active_property == Some("@reverse");
		let mut result = Object::new();

		for entry in sorted_entries(element, self.options.ordered) {
			let expanded_property = entry.key.as_str();
			let expanded_value = &entry.value;

			match expanded_property {
				// 12.1) If expanded property is @id:
				"@id" => {
					// 12.1.1) If expanded value is a string, then initialize
					// compacted value by IRI compacting expanded value with
					// vocab set to false.
					let compacted_value = match expanded_value {
						Value::String(id) => string(self.compact_iri_with(active_context, id, false)?),
						other => other.clone(),
					};

					// 12.1.2) Initialize alias by IRI compacting expanded
					// property.
					// 12.1.3) Add an entry alias to result whose value is set
					// to compacted value and continue to the next expanded
					// property.
					result.set(&self.alias("@id")?, compacted_value);
					continue;
				}
				// 12.2) If expanded property is @type:
				"@type" => {
					// 12.2.2) Otherwise, expanded value must be a @type array.
					// Initialize compacted value to an empty array. For each
					// item expanded type in expanded value, IRI compact it
					// using type-scoped context for active context.
					let mut compacted_value = Vec::new();
					for typ in as_array(expanded_value) {
						match typ {
							Value::String(t) => compacted_value.push(string(
								self.compact_iri_with(type_scoped_context, t, true)?,
							)),
							other => compacted_value.push(other.clone()),
						}
					}

					// 12.2.3) Initialize alias by IRI compacting expanded
					// property.
					let alias = self.alias("@type")?;

					// 12.2.4) Initialize as array to true if processing mode is
					// json-ld-1.1 and the container mapping for alias in the
					// active context includes @set, otherwise to the negation
					// of compactArrays.
					let as_array = (self.options.processing_mode != ProcessingMode::JsonLd1_0
						&& active_context
							.get(&alias)
							.is_some_and(|d| d.container.contains(ContainerItem::Set)))
						|| !self.options.compact_arrays;

					// 12.2.5) Use add value to add compacted value to the alias
					// entry in result using as array.
					let compacted_value = if compacted_value.len() == 1 && !as_array {
						compacted_value.pop().unwrap_or(Value::Null)
					} else {
						Value::Array(compacted_value)
					};

					add_value(&mut result, &alias, compacted_value, as_array);
					continue;
				}
				// 12.3) If expanded property is @reverse:
				"@reverse" => {
					// 12.3.1) Initialize compacted value to the result of
					// using this algorithm recursively, passing active context,
					// @reverse for active property, and expanded value for
					// element.
					let compacted_value = self
						.with_active_property(Some("@reverse"))
						.compact_element(env, expanded_value)?;

					if let Value::Object(compacted_value) = compacted_value {
						let mut remaining = Object::new();

						// 12.3.2) For each property and value in compacted
						// value:
						for entry in compacted_value.entries() {
							let property = entry.key.as_str();
							match active_context.get(property) {
								// 12.3.2.1) If the term definition for property
								// in the active context indicates that property
								// is a reverse property
								Some(definition) if definition.reverse_property => {
									// 12.3.2.1.1) Initialize as array to true
									// if the container mapping for property in
									// the active context includes @set,
									// otherwise the negation of compactArrays.
									let as_array = definition.container.contains(ContainerItem::Set)
										|| !self.options.compact_arrays;

									// 12.3.2.1.2) Use add value to add value to
									// the property entry in result using as
									// array.
									add_value(&mut result, property, entry.value.clone(), as_array)

									// 12.3.2.1.3) Remove the property entry
									// from compacted value.
								}
								_ => remaining.set(property, entry.value.clone()),
							}
						}

						// 12.3.3) If compacted value has some remaining map
						// entries, i.e., it is not an empty map:
						if !remaining.is_empty() {
							// 12.3.3.1) Initialize alias by IRI compacting
							// @reverse.
							// 12.3.3.2) Set the value of the alias entry of
							// result to compacted value.
							result.set(&self.alias("@reverse")?, Value::Object(remaining))
						}
					}

					// 12.3.4) Continue with the next expanded property from
					// element.
					continue;
				}
				// 12.4) If expanded property is @preserve then:
				"@preserve" => {
					// 12.4.1) Initialize compacted value to the result of
					// using this algorithm recursively, passing active context,
					// property for active property, and expanded value for
					// element.
					let compacted_value = self
						.with_active_property(Some("@preserve"))
						.compact_element(env, expanded_value)?;

					// 12.4.2) Add compacted value as the value of @preserve in
					// result unless expanded value is an empty array.
					if !matches!(&compacted_value, Value::Array(items) if items.is_empty()) {
						result.set("@preserve", compacted_value)
					}

					continue;
				}
				// 12.5) If expanded property is @index and active property has
				// a container mapping in active context that includes @index,
				// then the compacted result will be inside of an @index
				// container, drop the @index entry by continuing to the next
				// expanded property.
				"@index"
					if self
						.active_property
						.and_then(|p| active_context.get(p))
						.is_some_and(|d| d.container.contains(ContainerItem::Index)) =>
				{
					continue
				}
				// 12.6) Otherwise, if expanded property is @direction, @index,
				// @language, or @value:
				"@direction" | "@index" | "@language" | "@value" => {
					// 12.6.1) Initialize alias by IRI compacting expanded
					// property.
					// 12.6.2) Add an entry alias to result whose value is set to
					// expanded value and continue with the next expanded
					// property.
					result.set(&self.alias(expanded_property)?, expanded_value.clone());
					continue;
				}
				_ => (),
			}

			let items = as_array(expanded_value);

			// 12.7) If expanded value is an empty array:
			if items.is_empty() {
				// 12.7.1) Initialize item active property by IRI compacting
				// expanded property, using expanded value for value and
				// inside reverse for reverse.
				let item_active_property = compact_iri(
					active_context,
					expanded_property,
					Some(expanded_value),
					true,
					inside_reverse,
					self.options,
				)?;

				// 12.7.2) If the term definition for item active property in
				// the active context has a nest value entry (nest term):
				match self.nest_term(&item_active_property)? {
					Some(nest_term) => {
						// 12.7.2.2) If result does not have a nest term entry,
						// initialize it to an empty map.
						// 12.7.2.3) Initialize nest result to the value of nest
						// term in result.
						let mut nest_result = take_object(&mut result, &nest_term);

						// 12.7.4) Use add value to add an empty array to the
						// item active property entry in nest result using true
						// for as array.
						add_value(&mut nest_result, &item_active_property, Value::Array(Vec::new()), true);
						result.set(&nest_term, Value::Object(nest_result))
					}
					// 12.7.3) Otherwise, set nest result to result.
					None => add_value(
						&mut result,
						&item_active_property,
						Value::Array(Vec::new()),
						true,
					),
				}
			}

			// 12.8) At this point, expanded value must be an array due to the
			// Expansion algorithm. For each item expanded item in expanded
			// value:
			for expanded_item in items {
				// 12.8.1) Initialize item active property by IRI compacting
				// expanded property, using expanded item for value and inside
				// reverse for reverse.
				let item_active_property = compact_iri(
					active_context,
					expanded_property,
					Some(expanded_item),
					true,
					inside_reverse,
					self.options,
				)?;

				// 12.8.2) If the term definition for item active property in
				// the active context has a nest value entry (nest term):
				let nest_term = self.nest_term(&item_active_property)?;
				let mut nest_result = nest_term.as_deref().map(|n| take_object(&mut result, n));

				// 12.8.3) Otherwise, set nest result to result.
				let target = nest_result.as_mut().unwrap_or(&mut result);

				self.compact_item(
					env,
					target,
					&item_active_property,
					expanded_item,
				)?;

				if let (Some(nest_term), Some(nest_result)) = (nest_term, nest_result) {
					result.set(&nest_term, Value::Object(nest_result))
				}
			}
		}

		Ok(result)
	}

	/// Returns the nest term of `property`, if any.
	///
	/// Fails with an `invalid @nest value` error if the nest term is neither
	/// `@nest` nor a term expanding to `@nest`.
	fn nest_term(&self, property: &str) -> Result<Option<String>, Error> {
		match self.active_context.get(property).and_then(|d| d.nest.as_deref()) {
			Some(nest_term) => {
				// 12.8.2.1) If nest term is not @nest, or a term in the active
				// context that expands to @nest, an invalid @nest value error
				// has been detected, and processing is aborted.
				if nest_term != "@nest"
					&& !self
						.active_context
						.get(nest_term)
						.is_some_and(|d| d.iri() == Some("@nest"))
				{
					return Err(Error::new(
						ErrorCode::InvalidNestValue,
						format!("`{nest_term}` does not expand to @nest"),
					));
				}

				Ok(Some(nest_term.to_owned()))
			}
			None => Ok(None),
		}
	}

	/// Compacts a single property value into `nest_result` (steps 12.8.3 to
	/// 12.8.9 of the compaction algorithm).
	fn compact_item(
		&self,
		env: &mut impl ProcessingEnvironment,
		nest_result: &mut Object,
		item_active_property: &str,
		expanded_item: &Value,
	) -> Result<(), Error> {
		let active_context = self.active_context;
		let definition = active_context.get(item_active_property);

		// 12.8.3) Initialize container to container mapping for item active
		// property in active context, or to a new empty array, if there is no
		// such container mapping.
		let container = definition.map(|d| d.container).unwrap_or_default();

		// 12.8.4) Initialize as array to true if container includes @set, or
		// if item active property is @graph or @list, otherwise the negation
		// of compactArrays.
		let as_array = container.contains(ContainerItem::Set)
			|| matches!(item_active_property, "@graph" | "@list")
			|| !self.options.compact_arrays;

		// 12.8.5) Initialize compacted item to the result of using this
		// algorithm recursively, passing active context, item active property
		// for active property, and expanded item for element. Expanded item
		// is replaced by its @list or @graph value when it is a list or graph
		// object.
		let is_list = is_list_object(expanded_item);
		let is_graph = is_graph_object(expanded_item);
		let inner = match expanded_item {
			Value::Object(o) if is_list => o.value("@list").unwrap_or(expanded_item),
			Value::Object(o) if is_graph => o.value("@graph").unwrap_or(expanded_item),
			_ => expanded_item,
		};

		let compactor = self.with_active_property(Some(item_active_property));
		let mut compacted_item = compactor.compact_element(env, inner)?;
		let item = match expanded_item {
			Value::Object(o) => Some(o),
			_ => None,
		};

		// 12.8.6) If expanded item is a list object:
		if is_list {
			// 12.8.6.1) If compacted item is not an array, then set compacted
			// item to an array containing only compacted item.
			if !matches!(compacted_item, Value::Array(_)) {
				compacted_item = Value::Array(vec![compacted_item])
			}

			if !container.contains(ContainerItem::List) {
				// 12.8.6.2) If container does not include @list:
				// 12.8.6.2.1) Convert compacted item to a list object by
				// setting it to a map containing an entry where the key is the
				// result of IRI compacting @list and the value is the original
				// compacted item.
				let mut list_object = object1(&self.alias("@list")?, compacted_item);

				// 12.8.6.2.2) If expanded item contains the entry @index-value,
				// then add an entry to compacted item where the key is the
				// result of IRI compacting @index and value is value.
				if let Some(index) = item.and_then(|o| o.value("@index")) {
					list_object.set(&self.alias("@index")?, index.clone())
				}

				// 12.8.6.2.3) Use add value to add compacted item to the item
				// active property entry in nest result using as array.
				add_value(nest_result, item_active_property, Value::Object(list_object), as_array)
			} else {
				// 12.8.6.3) Otherwise, set the value of the item active property
				// entry in nest result to compacted item.
				nest_result.set(item_active_property, compacted_item)
			}

			return Ok(());
		}

		// 12.8.7) If expanded item is a graph object:
		if let Some(item) = item.filter(|_| is_graph) {
			if container.contains(ContainerItem::Graph) && container.contains(ContainerItem::Id) {
				// 12.8.7.1) If container includes @graph and @id:
				// 12.8.7.1.1) Initialize map object to the value of item active
				// property in nest result, initializing it to a new empty map,
				// if necessary.
				let mut map_object = take_object(nest_result, item_active_property);

				// 12.8.7.1.2) Initialize map key by IRI compacting the value of
				// @id in expanded item or @none if no such value exists with
				// vocab set to false if there is an @id entry in expanded item.
				let map_key = match item.value("@id").and_then(as_str) {
					Some(id) => self.compact_iri_with(active_context, id, false)?,
					None => self.alias("@none")?,
				};

				// 12.8.7.1.3) Use add value to add compacted item to the map
				// key entry in map object using as array.
				add_value(&mut map_object, &map_key, compacted_item, as_array);
				nest_result.set(item_active_property, Value::Object(map_object))
			} else if container.contains(ContainerItem::Graph)
				&& container.contains(ContainerItem::Index)
				&& is_simple_graph_object(expanded_item)
			{
				// 12.8.7.2) Otherwise, if container includes @graph and @index
				// and expanded item is a simple graph object:
				// 12.8.7.2.1) Initialize map object to the value of item active
				// property in nest result, initializing it to a new empty map,
				// if necessary.
				let mut map_object = take_object(nest_result, item_active_property);

				// 12.8.7.2.2) Initialize map key the value of @index in
				// expanded item or @none if no such value exists.
				let map_key = match item.value("@index").and_then(as_str) {
					Some(index) => index.to_owned(),
					None => self.alias("@none")?,
				};

				// 12.8.7.2.3) Use add value to add compacted item to the map
				// key entry in map object using as array.
				add_value(&mut map_object, &map_key, compacted_item, as_array);
				nest_result.set(item_active_property, Value::Object(map_object))
			} else if container.contains(ContainerItem::Graph) && is_simple_graph_object(expanded_item) {
				// 12.8.7.3) Otherwise, if container includes @graph and expanded
				// item is a simple graph object the value cannot be represented
				// as a map object.
				// 12.8.7.3.1) If compacted item is an array with more than one
				// value, it cannot be directly represented, as multiple objects
				// would be interpreted as different named graphs. Set compacted
				// item to a new map, containing the key from IRI compacting
				// @included and the original compacted item as a value.
				if matches!(&compacted_item, Value::Array(items) if items.len() > 1) {
					compacted_item = Value::Object(object1(&self.alias("@included")?, compacted_item))
				}

				// 12.8.7.3.2) Use add value to add compacted item to the item
				// active property entry in nest result using as array.
				add_value(nest_result, item_active_property, compacted_item, as_array)
			} else {
				// 12.8.7.4) Otherwise, container does not include @graph or
				// otherwise does not match one of the previous cases.
				// 12.8.7.4.1) Set compacted item to a new map containing the key
				// from IRI compacting @graph using the original compacted item
				// as a value.
				let mut graph_object = object1(&self.alias("@graph")?, compacted_item);

				// 12.8.7.4.2) If expanded item contains an @id entry, add an
				// entry in compacted item using the key from IRI compacting @id
				// using the value of IRI compacting the value of @id in
				// expanded item using false for vocab.
				if let Some(id) = item.value("@id").and_then(as_str) {
					graph_object.set(
						&self.alias("@id")?,
						string(self.compact_iri_with(active_context, id, false)?),
					)
				}

				// 12.8.7.4.3) If expanded item contains an @index entry, add an
				// entry in compacted item using the key from IRI compacting
				// @index and the value of @index in expanded item.
				if let Some(index) = item.value("@index") {
					graph_object.set(&self.alias("@index")?, index.clone())
				}

				// 12.8.7.4.4) Use add value to add compacted item to the item
				// active property entry in nest result using as array.
				add_value(nest_result, item_active_property, Value::Object(graph_object), as_array)
			}

			return Ok(());
		}

		// 12.8.8) Otherwise, if container includes @language, @index, @id, or
		// @type and container does not include @graph:
		let map_item = [
			ContainerItem::Language,
			ContainerItem::Index,
			ContainerItem::Id,
			ContainerItem::Type,
		]
		.into_iter()
		.find(|c| container.contains(*c));

		match map_item {
			Some(map_item) if !container.contains(ContainerItem::Graph) => {
				// 12.8.8.1) Initialize map object to the value of item active
				// property in nest result, initializing it to a new empty map,
				// if necessary.
				let mut map_object = take_object(nest_result, item_active_property);

				// 12.8.8.2) Initialize container key by IRI compacting either
				// @language, @index, @id, or @type based on the contents of
				// container.
				let mut container_key = self.alias(map_item.as_str())?;

				// 12.8.8.3) Initialize index key to the value of index mapping
				// in the term definition associated with item active property
				// in active context, or @index, if no such value exists.
				let index_key = definition.and_then(|d| d.index.as_deref()).unwrap_or("@index");

				let mut map_key: Option<String> = None;
				match map_item {
					// 12.8.8.4) If container includes @language and expanded
					// item contains a @value entry, then set compacted item to
					// the value associated with its @value entry. Set map key
					// to the value of @language in expanded item, if any.
					ContainerItem::Language => {
						if let Some(value) = item.and_then(|o| o.value("@value")) {
							compacted_item = value.clone();
							map_key = item
								.and_then(|o| o.value("@language"))
								.and_then(as_str)
								.map(ToOwned::to_owned)
						}
					}
					// 12.8.8.5) If container includes @index and index key is
					// @index, set map key to the value of @index in expanded
					// item, if any.
					ContainerItem::Index if index_key == "@index" => {
						map_key = item
							.and_then(|o| o.value("@index"))
							.and_then(as_str)
							.map(ToOwned::to_owned)
					}
					// 12.8.8.6) If container includes @index and index key is
					// not @index:
					ContainerItem::Index => {
						// 12.8.8.6.1) Reinitialize container key by IRI
						// compacting index key after first IRI expanding it.
						if let Some(expanded_key) = expand_iri(env, active_context, index_key, false, true) {
							container_key = self.compact_iri_with(active_context, &expanded_key, true)?
						}

						// 12.8.8.6.2) Set map key to the first value of
						// container key in compacted item, if any.
						// 12.8.8.6.3) If there are remaining values in compacted
						// item for container key, use add value to add those
						// remaining values to the container key in compacted
						// item.
						// 12.8.8.6.4) Otherwise, remove that entry from
						// compacted item.
						if let Value::Object(compacted_object) = &mut compacted_item {
							map_key = take_first_string(compacted_object, &container_key)
						}
					}
					// 12.8.8.7) Otherwise, if container includes @id, set map
					// key to the value of container key in compacted item and
					// remove container key from compacted item.
					ContainerItem::Id => {
						if let Value::Object(compacted_object) = &mut compacted_item {
							map_key = match compacted_object.take(&container_key) {
								Some(Value::String(id)) => Some(id.as_str().to_owned()),
								Some(other) => {
									compacted_object.set(&container_key, other);
									None
								}
								None => None,
							}
						}
					}
					// 12.8.8.8) Otherwise, if container includes @type:
					_ => {
						if let Value::Object(compacted_object) = &mut compacted_item {
							// 12.8.8.8.1) Set map key to the first value of
							// container key in compacted item, if any.
							// 12.8.8.8.2) If there are remaining values in
							// compacted item for container key, use add value
							// to add those remaining values to the container
							// key in compacted item.
							// 12.8.8.8.3) Otherwise, remove that entry from
							// compacted item.
							map_key = take_first_string(compacted_object, &container_key);

							// 12.8.8.8.4) If compacted item contains a single
							// entry with a key expanding to @id, set compacted
							// item to the result of using this algorithm
							// recursively, passing active context, item active
							// property for active property, and a map composed
							// of the single entry for @id from expanded item
							// for element.
							let single_id = compacted_object.len() == 1
								&& compacted_object
									.key_strs()
									.all(|k| is_keyword_alias(self, k, "@id"));

							if single_id {
								if let Some(id) = item.and_then(|o| o.value("@id")) {
									let reference = Value::Object(object1("@id", id.clone()));
									compacted_item = compactor.compact_element(env, &reference)?
								}
							}
						}
					}
				}

				// 12.8.8.9) If map key is null, set it to the result of IRI
				// compacting @none.
				let map_key = match map_key {
					Some(key) => key,
					None => self.alias("@none")?,
				};

				// 12.8.8.10) Use add value to add compacted item to the map key
				// entry in map object using as array.
				add_value(&mut map_object, &map_key, compacted_item, as_array);
				nest_result.set(item_active_property, Value::Object(map_object))
			}
			_ => {
				// 12.8.9) Otherwise, use add value to add compacted item to the
				// item active property entry in nest result using as array.
				add_value(nest_result, item_active_property, compacted_item, as_array)
			}
		}

		Ok(())
	}
}

/// Removes the first string value of `key` in `object` and returns it.
///
/// Remaining values are put back, unwrapped if only one is left. Nothing is
/// removed if the first value is not a string.
fn take_first_string(object: &mut Object, key: &str) -> Option<String> {
	let values = object.take(key)?;
	let mut values = crate::util::into_array(values);

	match values.first() {
		Some(Value::String(first)) => {
			let first = first.as_str().to_owned();
			values.remove(0);
			match values.len() {
				0 => (),
				1 => object.set(key, values.remove(0)),
				_ => object.set(key, Value::Array(values)),
			}
			Some(first)
		}
		_ => {
			let values = if values.len() == 1 {
				values.remove(0)
			} else {
				Value::Array(values)
			};
			object.set(key, values);
			None
		}
	}
}
