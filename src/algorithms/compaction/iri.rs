use json_syntax::{Object, Value};

use super::CompactionOptions;
use crate::{
	blank::is_blank_id,
	context::Selection,
	util::{as_array, as_str, is_absolute_iri, relative_iri, ObjectExt, ObjectKind},
	ActiveContext, Error, ErrorCode, ProcessingMode,
};

/// Language and direction key of a value object, as found in the inverse
/// context.
fn language_direction(value: &Object) -> Option<String> {
	let language = value.value("@language").and_then(as_str);
	match value.value("@direction").and_then(as_str) {
		Some(direction) => Some(format!("{}_{}", language.unwrap_or(""), direction).to_lowercase()),
		None => language.map(str::to_lowercase),
	}
}

/// IRI compaction.
///
/// Compacts `var` into a term, a compact IRI, a relative IRI (when `vocab`
/// is `false`), or returns it unchanged.
///
/// See <https://www.w3.org/TR/json-ld11-api/#iri-compaction>.
pub fn compact_iri(
	active_context: &ActiveContext,
	var: &str,
	value: Option<&Value>,
	vocab: bool,
	reverse: bool,
	options: CompactionOptions,
) -> Result<String, Error> {
	// 4) If vocab is true and var is an entry of inverse context:
	if vocab && active_context.inverse().contains(var) {
		if let Some(term) = select_term(active_context, var, value, reverse, options)? {
			return Ok(term);
		}
	}

	// 5) At this point, there is no simple term that var can be compacted to.
	// If vocab is true and active context has a vocabulary mapping:
	if vocab {
		if let Some(vocab_mapping) = active_context.vocabulary() {
			// 5.1) If var begins with the vocabulary mapping's value but is
			// longer, then initialize suffix to the substring of var that does
			// not match. If suffix does not have a term definition in active
			// context, then return suffix.
			if let Some(suffix) = var.strip_prefix(vocab_mapping) {
				if !suffix.is_empty() && !active_context.contains_term(suffix) {
					return Ok(suffix.to_owned());
				}
			}
		}
	}

	// 6) The var could not be compacted using the active context's vocabulary
	// mapping. Try to create a compact IRI, starting by initializing compact
	// IRI to null.
	let mut compact_iri: Option<String> = None;

	// 7) For each term definition definition in active context:
	for (term, definition) in active_context.definitions() {
		// 7.1) If the IRI mapping of definition is null, its IRI mapping
		// equals var, its IRI mapping is not a substring at the beginning of
		// var, or definition does not have a true prefix flag, definition's
		// key cannot be used as a prefix. Continue with the next definition.
		let Some(iri) = definition.iri() else {
			continue;
		};

		if !definition.prefix || iri == var {
			continue;
		}

		let Some(suffix) = var.strip_prefix(iri) else {
			continue;
		};

		// 7.2) Initialize candidate by concatenating definition key, a colon
		// (:), and the substring of var that follows after the value of the
		// definition's IRI mapping.
		let candidate = format!("{term}:{suffix}");

		// 7.3) If either compact IRI is null, candidate is shorter or the same
		// length but lexicographically less than compact IRI and candidate does
		// not have a term definition in active context, or if that term
		// definition has an IRI mapping that equals var and value is null, set
		// compact IRI to candidate.
		let is_better = match &compact_iri {
			None => true,
			Some(current) => {
				candidate.len() < current.len()
					|| (candidate.len() == current.len() && candidate < *current)
			}
		};

		let is_free = match active_context.get(&candidate) {
			None => true,
			Some(d) => d.iri() == Some(var) && value.is_none(),
		};

		if is_better && is_free {
			compact_iri = Some(candidate)
		}
	}

	// 8) If compact IRI is not null, return compact IRI.
	if let Some(compact_iri) = compact_iri {
		return Ok(compact_iri);
	}

	// 9) To ensure that the IRI var is not confused with a compact IRI, if the
	// IRI scheme of var matches any term in active context with prefix flag
	// set to true, and var has no IRI authority (preceded by
	// double-forward-slash (//), an IRI confused with prefix error has been
	// detected, and processing is aborted.
	if options.processing_mode != ProcessingMode::JsonLd1_0 && !is_blank_id(var) {
		if let Some((scheme, rest)) = var.split_once(':') {
			if !rest.starts_with("//")
				&& active_context.get(scheme).is_some_and(|d| d.prefix)
				&& is_absolute_iri(var)
			{
				return Err(Error::new(ErrorCode::IriConfusedWithPrefix, var));
			}
		}
	}

	// 10) If vocab is false, transform var to a relative IRI reference using
	// the base IRI from active context, if it exists.
	if !vocab && options.compact_to_relative && !is_blank_id(var) && is_absolute_iri(var) {
		if let Some(base_iri) = active_context.base_iri() {
			return Ok(relative_iri(var, base_iri));
		}
	}

	// 11) Finally, return var as is.
	Ok(var.to_owned())
}

/// Term selection (step 4 of the IRI compaction algorithm).
fn select_term(
	active_context: &ActiveContext,
	var: &str,
	value: Option<&Value>,
	reverse: bool,
	options: CompactionOptions,
) -> Result<Option<String>, Error> {
	// 4.2) If value is a map containing an @preserve entry, use the first
	// element from the value of @preserve as value.
	let value = match value {
		Some(Value::Object(object)) => match object.value("@preserve") {
			Some(preserved) => as_array(preserved).first(),
			None => value,
		},
		_ => value,
	};

	let object = match value {
		Some(Value::Object(object)) => Some(object),
		_ => None,
	};
	let kind = object.map(ObjectKind::of);
	let has_index = object.is_some_and(|o| o.has("@index"));

	// 4.3) Initialize containers to an empty array. This array will be used to
	// keep track of an ordered list of preferred container mapping for a
	// term, based on what is compatible with value.
	let mut containers: Vec<&str> = Vec::new();

	// 4.4) Initialize type/language to @language, and type/language value to
	// @null.
	let mut selection = Selection::Language;
	let mut type_language_value = "@null".to_owned();

	// 4.5) If value is a map containing an @index entry, and value is not a
	// graph object then append the values @index and @index@set to
	// containers.
	if has_index && kind != Some(ObjectKind::Graph) {
		containers.push("@index");
		containers.push("@index@set");
	}

	let mut is_empty_list = false;

	if reverse {
		// 4.6) If reverse is true, set type/language to @type, type/language
		// value to @reverse, and append @set to containers.
		selection = Selection::Type;
		type_language_value = "@reverse".to_owned();
		containers.push("@set")
	} else {
		match (object, kind) {
			// 4.7) Otherwise, if value is a list object, then set
			// type/language and type/language value to the most specific
			// values that work for all items in the list as follows:
			(Some(object), Some(ObjectKind::List)) => {
				// 4.7.1) If @index is not an entry in value, then append @list
				// to containers.
				if !has_index {
					containers.push("@list")
				}

				// 4.7.2) Initialize list to the array associated with the @list
				// entry in value.
				let list = object.value("@list").map(as_array).unwrap_or_default();
				is_empty_list = list.is_empty();

				// 4.7.3) Initialize common type and common language to null. If
				// list is empty, set common language to default language.
				let mut common_type: Option<String> = None;
				let mut common_language: Option<String> = None;
				if list.is_empty() {
					common_language = Some(default_language(active_context))
				}

				// 4.7.4) For each item in list:
				for item in list {
					// 4.7.4.1) Initialize item language to @none and item type
					// to @none.
					let mut item_language = "@none".to_owned();
					let mut item_type = "@none".to_owned();

					// 4.7.4.2) If item contains an @value entry:
					let is_value = match item {
						Value::Object(item) if item.has("@value") => {
							if let Some(lang_dir) = language_direction(item) {
								// 4.7.4.2.1) If item contains an @direction or
								// @language entry, set item language to their
								// concatenation.
								item_language = lang_dir
							} else if let Some(typ) = item.value("@type").and_then(as_str) {
								// 4.7.4.2.2) Otherwise, if item contains an @type
								// entry, set item type to its associated value.
								item_type = typ.to_owned()
							} else {
								// 4.7.4.2.3) Otherwise, set item language to
								// @null.
								item_language = "@null".to_owned()
							}

							true
						}
						// 4.7.4.3) Otherwise, set item type to @id.
						_ => {
							item_type = "@id".to_owned();
							false
						}
					};

					// 4.7.4.4) If common language is null, set common language
					// to item language.
					// 4.7.4.5) Otherwise, if item language does not equal
					// common language and item contains an @value entry, then
					// set common language to @none because list items have
					// conflicting languages.
					match &common_language {
						None => common_language = Some(item_language),
						Some(common) => {
							if *common != item_language && is_value {
								common_language = Some("@none".to_owned())
							}
						}
					}

					// 4.7.4.6) If common type is null, set common type to item
					// type.
					// 4.7.4.7) Otherwise, if item type does not equal common
					// type, then set common type to @none because list items
					// have conflicting types.
					match &common_type {
						None => common_type = Some(item_type),
						Some(common) => {
							if *common != item_type {
								common_type = Some("@none".to_owned())
							}
						}
					}

					// 4.7.4.8) If common language is @none and common type is
					// @none, then stop processing items in the list because it
					// has been detected that there is no common language or
					// type amongst the items.
					if common_language.as_deref() == Some("@none")
						&& common_type.as_deref() == Some("@none")
					{
						break;
					}
				}

				// 4.7.5) If common language is null, set common language to
				// @none.
				let common_language = common_language.unwrap_or_else(|| "@none".to_owned());

				// 4.7.6) If common type is null, set common type to @none.
				let common_type = common_type.unwrap_or_else(|| "@none".to_owned());

				// 4.7.7) If common type is not @none then set type/language to
				// @type and type/language value to common type.
				// 4.7.8) Otherwise, set type/language value to common language.
				if common_type != "@none" {
					selection = Selection::Type;
					type_language_value = common_type
				} else {
					type_language_value = common_language
				}
			}
			// 4.8) Otherwise, if value is a graph object, prefer a mapping
			// most appropriate for the particular value.
			(Some(object), Some(ObjectKind::Graph)) => {
				let has_id = object.has("@id");

				// 4.8.1) If value contains an @index entry, append the values
				// @graph@index and @graph@index@set to containers.
				if has_index {
					containers.push("@graph@index");
					containers.push("@graph@index@set");
				}

				// 4.8.2) If value contains an @id entry, append the values
				// @graph@id and @graph@id@set to containers.
				if has_id {
					containers.push("@graph@id");
					containers.push("@graph@id@set");
				}

				// 4.8.3) Append the values @graph, @graph@set, and @set to
				// containers.
				containers.push("@graph");
				containers.push("@graph@set");
				containers.push("@set");

				// 4.8.4) If value does not contain an @index entry, append the
				// values @graph@index and @graph@index@set to containers.
				if !has_index {
					containers.push("@graph@index");
					containers.push("@graph@index@set");
				}

				// 4.8.5) If the value does not contain an @id entry, append the
				// values @graph@id and @graph@id@set to containers.
				if !has_id {
					containers.push("@graph@id");
					containers.push("@graph@id@set");
				}

				// 4.8.6) Append the values @index and @index@set to
				// containers.
				containers.push("@index");
				containers.push("@index@set");

				// 4.8.7) Set type/language to @type and set type/language value
				// to @id.
				selection = Selection::Type;
				type_language_value = "@id".to_owned();
			}
			// 4.9) Otherwise:
			_ => {
				match (object, kind) {
					// 4.9.1) If value is a value object:
					(Some(object), Some(ObjectKind::Value)) => {
						match language_direction(object) {
							// 4.9.1.1) If value contains an @direction entry
							// and does not contain an @index entry, then set
							// type/language value to the concatenation of the
							// value's language and direction.
							// 4.9.1.2) Otherwise, if value contains an
							// @language entry and does not contain an @index
							// entry, then set type/language value to the value
							// of @language.
							Some(lang_dir) if !has_index => {
								type_language_value = lang_dir;
								containers.push("@language");
								containers.push("@language@set");
							}
							_ => {
								// 4.9.1.3) Otherwise, if value contains an
								// @type entry, then set type/language value to
								// its associated value and set type/language to
								// @type.
								if let Some(typ) = object.value("@type").and_then(as_str) {
									selection = Selection::Type;
									type_language_value = typ.to_owned()
								}
							}
						}
					}
					// 4.9.2) Otherwise, set type/language to @type and set
					// type/language value to @id, and append @id, @id@set,
					// @type, and @set@type, to containers.
					_ => {
						selection = Selection::Type;
						type_language_value = "@id".to_owned();
						containers.push("@id");
						containers.push("@id@set");
						containers.push("@type");
						containers.push("@set@type");
					}
				}

				// 4.9.3) Append @set to containers.
				containers.push("@set")
			}
		}
	}

	// 4.10) Append @none to containers. This represents the non-existence of a
	// container mapping, and it will be the last container mapping value to
	// be checked as it is the most generic.
	containers.push("@none");

	let is_1_1 = options.processing_mode != ProcessingMode::JsonLd1_0;

	// 4.11) If processing mode is not json-ld-1.0 and value is not a map or
	// does not contain an @index entry, append @index and @index@set to
	// containers.
	if is_1_1 && !has_index {
		containers.push("@index");
		containers.push("@index@set");
	}

	// 4.12) If processing mode is not json-ld-1.0 and value is a map
	// containing only an @value entry, append @language and @language@set to
	// containers.
	if is_1_1 && object.is_some_and(|o| o.len() == 1 && o.has("@value")) {
		containers.push("@language");
		containers.push("@language@set");
	}

	// 4.14) Initialize preferred values to an empty array. This array will
	// indicate, in order, the preferred values for a term's type mapping or
	// language mapping.
	let mut preferred_values: Vec<String> = Vec::new();

	// 4.15) If type/language value is @reverse, append @reverse to preferred
	// values.
	if type_language_value == "@reverse" {
		preferred_values.push("@reverse".to_owned())
	}

	// 4.16) If type/language value is @id or @reverse and value is a map
	// containing an @id entry:
	let id = object.and_then(|o| o.value("@id")).and_then(as_str);
	match id {
		Some(id) if type_language_value == "@id" || type_language_value == "@reverse" => {
			// 4.16.1) If the result of IRI compacting the value of the @id
			// entry in value has a term definition in the active context with
			// an IRI mapping that equals the value of the @id entry in value,
			// then append @vocab, @id, and @none, in that order, to preferred
			// values.
			let compacted = compact_iri(active_context, id, None, true, false, options)?;
			if active_context
				.get(&compacted)
				.is_some_and(|d| d.iri() == Some(id))
			{
				preferred_values.extend(["@vocab", "@id", "@none"].map(str::to_owned))
			} else {
				// 4.16.2) Otherwise, append @id, @vocab, and @none, in that
				// order, to preferred values.
				preferred_values.extend(["@id", "@vocab", "@none"].map(str::to_owned))
			}
		}
		_ => {
			// 4.17) Otherwise, append type/language value and @none, in that
			// order, to preferred values. If value is a list object with an
			// empty array as the value of @list, set type/language to @any.
			preferred_values.push(type_language_value);
			preferred_values.push("@none".to_owned());
			if is_empty_list {
				selection = Selection::Any
			}
		}
	}

	// 4.18) Append @any to preferred values.
	preferred_values.push("@any".to_owned());

	// 4.19) If preferred values contains any entry having an underscore (_),
	// append the substring of that entry from the underscore to the end of
	// the string to preferred values.
	if let Some(direction) = preferred_values
		.iter()
		.find_map(|v| v.find('_').map(|i| v[i..].to_owned()))
	{
		preferred_values.push(direction)
	}

	// 4.20) Initialize term to the result of the Term Selection algorithm,
	// passing var, containers, type/language, and preferred values.
	Ok(active_context
		.inverse()
		.select(var, &containers, selection, &preferred_values)
		.map(str::to_owned))
}

fn default_language(active_context: &ActiveContext) -> String {
	match (
		active_context.default_language(),
		active_context.default_base_direction(),
	) {
		(language, Some(direction)) => {
			format!("{}_{}", language.unwrap_or(""), direction).to_lowercase()
		}
		(Some(language), None) => language.to_lowercase(),
		(None, None) => "@none".to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		algorithms::{process_context, ContextProcessingOptions},
		NoLoader,
	};
	use iref::Iri;
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn context(s: &str) -> ActiveContext {
		let base = Iri::new("http://example.org/base/doc").unwrap();
		process_context(
			&mut NoLoader,
			&ActiveContext::new(Some(base.to_owned())),
			&parse(s),
			Some(base),
			ContextProcessingOptions::default(),
		)
		.unwrap()
	}

	#[test]
	fn terms_and_compact_iris() {
		let ctx = context(
			r#"{
				"ex": "http://example.org/",
				"exv": "http://example.org/vocab#",
				"name": "http://example.org/vocab#name"
			}"#,
		);
		let options = CompactionOptions::default();

		assert_eq!(
			compact_iri(&ctx, "http://example.org/vocab#name", None, true, false, options).unwrap(),
			"name"
		);
		assert_eq!(
			compact_iri(&ctx, "http://example.org/vocab#age", None, true, false, options).unwrap(),
			"exv:age"
		);
		assert_eq!(
			compact_iri(&ctx, "http://example.org/base/other", None, false, false, options)
				.unwrap(),
			"ex:base/other"
		)
	}

	#[test]
	fn relative_iris() {
		let ctx = context(r#"{"@vocab": "http://schema.org/"}"#);
		let options = CompactionOptions::default();

		assert_eq!(
			compact_iri(&ctx, "http://example.org/base/other", None, false, false, options)
				.unwrap(),
			"other"
		);
		assert_eq!(
			compact_iri(&ctx, "http://schema.org/name", None, true, false, options).unwrap(),
			"name"
		);
		assert_eq!(
			compact_iri(&ctx, "_:b0", None, false, false, options).unwrap(),
			"_:b0"
		)
	}

	#[test]
	fn language_selection() {
		let ctx = context(
			r#"{
				"label": "http://example.org/label",
				"labelFr": {"@id": "http://example.org/label", "@language": "fr"}
			}"#,
		);
		let options = CompactionOptions::default();
		let value = parse(r#"{"@value": "Bonjour", "@language": "fr"}"#);

		assert_eq!(
			compact_iri(&ctx, "http://example.org/label", Some(&value), true, false, options)
				.unwrap(),
			"labelFr"
		)
	}

	#[test]
	fn iri_confused_with_prefix() {
		let ctx = context(r#"{"tag": {"@id": "http://example.org/tag#", "@prefix": true}}"#);
		let err = compact_iri(
			&ctx,
			"tag:example.org,2024:x",
			None,
			true,
			false,
			CompactionOptions::default(),
		)
		.unwrap_err();
		assert_eq!(err.code(), ErrorCode::IriConfusedWithPrefix)
	}
}
