//! Inverse context, used to select terms during compaction.
//!
//! See <https://www.w3.org/TR/json-ld11-api/#inverse-context-creation>.
use std::collections::HashMap;

use super::{ActiveContext, TermDefinition, Type};

/// Selection table of a container entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selection {
	/// `@language` table.
	Language,

	/// `@type` table.
	Type,

	/// `@any` table.
	Any,
}

struct InverseContainer {
	language: HashMap<String, String>,
	typ: HashMap<String, String>,
	any: HashMap<String, String>,
}

impl InverseContainer {
	fn new(term: &str) -> Self {
		let mut any = HashMap::new();
		any.insert("@none".to_owned(), term.to_owned());
		Self {
			language: HashMap::new(),
			typ: HashMap::new(),
			any,
		}
	}

	fn table(&self, selection: Selection) -> &HashMap<String, String> {
		match selection {
			Selection::Language => &self.language,
			Selection::Type => &self.typ,
			Selection::Any => &self.any,
		}
	}
}

fn set_default(map: &mut HashMap<String, String>, key: impl Into<String>, term: &str) {
	map.entry(key.into()).or_insert_with(|| term.to_owned());
}

/// Inverse definition: the terms mapped to a given IRI, per container.
#[derive(Default)]
struct InverseDefinition {
	map: HashMap<String, InverseContainer>,
}

/// Inverse context.
pub struct InverseContext {
	map: HashMap<String, InverseDefinition>,
}

impl InverseContext {
	/// Checks if some term maps to the given IRI.
	pub fn contains(&self, iri: &str) -> bool {
		self.map.contains_key(iri)
	}

	/// Term selection.
	///
	/// Returns the first term found for `iri`, trying each container in
	/// order, then each preferred value in order in the `selection` table.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#term-selection>.
	pub fn select<C: AsRef<str>, P: AsRef<str>>(
		&self,
		iri: &str,
		containers: &[C],
		selection: Selection,
		preferred_values: &[P],
	) -> Option<&str> {
		let definition = self.map.get(iri)?;
		for container in containers {
			if let Some(entry) = definition.map.get(container.as_ref()) {
				let table = entry.table(selection);
				for item in preferred_values {
					if let Some(term) = table.get(item.as_ref()) {
						return Some(term);
					}
				}
			}
		}

		None
	}
}

/// Container key of a term definition (`@none` for an empty container
/// mapping).
fn container_key(definition: &TermDefinition) -> String {
	if definition.container.is_empty() {
		"@none".to_owned()
	} else {
		let mut items: Vec<&str> = definition.container.iter().map(|i| i.as_str()).collect();
		items.sort_unstable();
		items.concat()
	}
}

impl<'a> From<&'a ActiveContext> for InverseContext {
	fn from(context: &'a ActiveContext) -> Self {
		let default_language = context
			.default_language()
			.map(str::to_lowercase)
			.unwrap_or_else(|| "@none".to_owned());

		let mut terms: Vec<(&str, &TermDefinition)> = context
			.definitions()
			.map(|(term, definition)| (term.as_str(), definition))
			.collect();
		terms.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

		let mut map: HashMap<String, InverseDefinition> = HashMap::new();
		for (term, definition) in terms {
			let Some(iri) = definition.iri() else {
				continue;
			};

			let container = container_key(definition);
			let entry = map
				.entry(iri.to_owned())
				.or_default()
				.map
				.entry(container)
				.or_insert_with(|| InverseContainer::new(term));

			if definition.reverse_property {
				set_default(&mut entry.typ, "@reverse", term)
			} else if definition.typ == Some(Type::None) {
				set_default(&mut entry.language, "@any", term);
				set_default(&mut entry.typ, "@any", term)
			} else if let Some(typ) = &definition.typ {
				set_default(&mut entry.typ, typ.as_str(), term)
			} else if let (Some(language), Some(direction)) =
				(&definition.language, &definition.direction)
			{
				let lang_dir = match (language, direction) {
					(Some(l), Some(d)) => format!("{}_{}", l, d).to_lowercase(),
					(Some(l), None) => l.to_lowercase(),
					(None, Some(d)) => format!("_{d}"),
					(None, None) => "@null".to_owned(),
				};
				set_default(&mut entry.language, lang_dir, term)
			} else if let Some(language) = &definition.language {
				let language = match language {
					Some(l) => l.to_lowercase(),
					None => "@null".to_owned(),
				};
				set_default(&mut entry.language, language, term)
			} else if let Some(direction) = &definition.direction {
				let direction = match direction {
					Some(d) => format!("_{d}"),
					None => "@none".to_owned(),
				};
				set_default(&mut entry.language, direction, term)
			} else if let Some(direction) = context.default_base_direction() {
				let lang_dir = match context.default_language() {
					Some(l) => format!("{}_{}", l, direction).to_lowercase(),
					None => format!("_{direction}"),
				};
				set_default(&mut entry.language, lang_dir, term);
				set_default(&mut entry.language, "@none", term);
				set_default(&mut entry.typ, "@none", term)
			} else {
				set_default(&mut entry.language, default_language.clone(), term);
				set_default(&mut entry.language, "@none", term);
				set_default(&mut entry.typ, "@none", term)
			}
		}

		Self { map }
	}
}
