//! Framing algorithm.
//!
//! See <https://www.w3.org/TR/json-ld11-framing/#framing-algorithm>.
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use json_syntax::{Object, Value};

use crate::{
	algorithms::{
		flattening::{NodeMap, NodeMapGraph, DEFAULT_GRAPH, MERGED_GRAPH},
		Compactor, ProcessingEnvironment,
	},
	blank::{is_blank_id, Generator},
	util::{
		as_array, as_str, is_keyword_key, is_list_object, is_node_reference, object1, string,
		ObjectExt,
	},
	ActiveContext, Error, ErrorCode,
};

mod matching;
mod options;
mod output;

pub use options::*;

use matching::{matches, validate_frame, value_match};
use output::{Item, Output, Parent, Token};

/// Flags of a frame, read from the frame or from the options.
#[derive(Clone, Copy, Debug)]
struct Flags {
	embed: Embed,
	explicit: bool,
	require_all: bool,
}

fn frame_flag<'f>(frame: &'f Object, key: &str) -> Option<&'f Value> {
	frame.value(key).and_then(|v| as_array(v).first())
}

fn bool_flag(frame: &Object, key: &str, default: bool) -> bool {
	match frame_flag(frame, key) {
		Some(Value::Boolean(b)) => *b,
		Some(Value::Object(o)) => match o.value("@value") {
			Some(Value::Boolean(b)) => *b,
			_ => default,
		},
		Some(Value::String(s)) => match s.as_str() {
			"true" => true,
			"false" => false,
			_ => default,
		},
		_ => default,
	}
}

impl Flags {
	fn new(frame: &Object, options: &FramingOptions) -> Result<Self, Error> {
		Ok(Self {
			embed: match frame_flag(frame, "@embed") {
				Some(value) => Embed::from_value(value)?,
				None => options.embed,
			},
			explicit: bool_flag(frame, "@explicit", options.explicit),
			require_all: bool_flag(frame, "@requireAll", options.require_all),
		})
	}

	/// Frame used for properties the frame does not mention.
	fn implicit_frame(&self) -> Value {
		let mut frame = Object::new();
		frame.set("@embed", Value::Array(vec![string(self.embed.as_str())]));
		frame.set("@explicit", Value::Array(vec![Value::Boolean(self.explicit)]));
		frame.set("@requireAll", Value::Array(vec![Value::Boolean(self.require_all)]));
		Value::Array(vec![Value::Object(frame)])
	}
}

/// Embedding of a node in the output.
struct Embedding {
	/// Embedded framed node.
	node: Token,

	/// Framed node holding the embedding, if any.
	parent: Option<Token>,

	/// Property holding the embedding.
	property: Option<String>,
}

/// Framing state.
struct FramingState<'a> {
	options: FramingOptions,
	node_map: &'a NodeMap,

	/// Graph framed at top level (`@merged` or `@default`).
	subjects: &'a NodeMapGraph,

	/// Name of the graph being framed.
	graph: String,

	/// Names of the enclosing graphs.
	graph_stack: Vec<String>,

	/// Whether nodes are being framed as property values.
	embedded: bool,

	/// Embeddings per graph, by node identifier.
	embeds: HashMap<String, IndexMap<String, Embedding>>,

	/// Framed nodes per graph, by node identifier, for the `@link` policy.
	links: HashMap<String, HashMap<String, Token>>,

	/// Nodes being embedded, with their graph.
	subject_stack: Vec<(String, String)>,

	/// Number of framed nodes using each blank node identifier.
	blank_usage: HashMap<String, usize>,

	output: Output,
}

impl<'a> FramingState<'a> {
	fn new(node_map: &'a NodeMap, graph: &str, options: FramingOptions) -> Result<Self, Error> {
		let subjects = node_map.graph(graph).ok_or_else(|| {
			Error::new(ErrorCode::InvalidFrame, format!("unknown graph `{graph}`"))
		})?;

		Ok(Self {
			options,
			node_map,
			subjects,
			graph: graph.to_owned(),
			graph_stack: Vec::new(),
			embedded: false,
			embeds: HashMap::new(),
			links: HashMap::new(),
			subject_stack: Vec::new(),
			blank_usage: HashMap::new(),
			output: Output::default(),
		})
	}

	fn use_blank_id(&mut self, id: &str) {
		if is_blank_id(id) {
			*self.blank_usage.entry(id.to_owned()).or_default() += 1
		}
	}

	/// Blank node identifiers used only once, removed from the output.
	fn pruned_identifiers(&self) -> HashSet<String> {
		if !self.options.prune_blank_node_identifiers() {
			return HashSet::new();
		}

		self.blank_usage
			.iter()
			.filter(|(_, count)| **count == 1)
			.map(|(id, _)| id.clone())
			.collect()
	}

	/// Nodes of the current graph matching `frame`, among `subjects`, sorted
	/// by identifier.
	fn filter_subjects(
		&self,
		subjects: &[&str],
		frame: &Object,
		flags: Flags,
	) -> Result<Vec<(&'a str, &'a Object)>, Error> {
		let node_map: &'a NodeMap = self.node_map;
		let mut result = Vec::new();

		if let Some(graph) = node_map.graph(&self.graph) {
			for id in subjects {
				if let Some((id, node)) = graph.get_key_value(*id) {
					if matches(self.subjects, node, frame, flags)? {
						result.push((id.as_str(), node))
					}
				}
			}
		}

		result.sort_unstable_by_key(|(id, _)| *id);
		result.dedup_by_key(|(id, _)| *id);
		Ok(result)
	}

	fn creates_cycle(&self, id: &str) -> bool {
		self.subject_stack
			.iter()
			.rev()
			.any(|(subject, graph)| subject == id && *graph == self.graph)
	}

	/// Turns a previous embedding of `id` into a node reference, and forgets
	/// the embeddings it contained.
	fn remove_embed(&mut self, id: &str) {
		let Some(embeds) = self.embeds.get_mut(&self.graph) else {
			return;
		};

		if let Some(embedding) = embeds.get(id) {
			log::trace!(
				"replacing embedding of {id} (property {:?}) with a reference",
				embedding.property
			);
			self.output.clear(embedding.node)
		}

		let mut removed = vec![id.to_owned()];
		while let Some(id) = removed.pop() {
			let dependents: Vec<String> = embeds
				.iter()
				.filter(|(_, e)| e.parent.is_some_and(|p| self.output.id(p) == id))
				.map(|(dependent, _)| dependent.clone())
				.collect();

			for dependent in dependents {
				embeds.shift_remove(&dependent);
				removed.push(dependent)
			}
		}
	}

	/// Frames the nodes `subjects` of the current graph with `frame`, adding
	/// the result to `parent`.
	///
	/// `property` is `None` at top level.
	fn frame(
		&mut self,
		subjects: &[&str],
		frame: &Value,
		parent: &mut Parent,
		property: Option<&str>,
	) -> Result<(), Error> {
		let frame = validate_frame(frame)?;
		let flags = Flags::new(frame, &self.options)?;
		let graph = self.graph.clone();

		for (id, subject) in self.filter_subjects(subjects, frame, flags)? {
			// Embeddings are tracked per top-level node.
			match property {
				None => {
					self.embeds.clear();
					self.embeds.insert(graph.clone(), IndexMap::new());
				}
				Some(_) => {
					self.embeds.entry(graph.clone()).or_default();
				}
			}

			if flags.embed == Embed::Link {
				if let Some(token) = self.links.get(&graph).and_then(|l| l.get(id)) {
					self.output.add(parent, Item::Node(*token));
					continue;
				}
			}

			let token = self.output.create(id);
			self.use_blank_id(id);
			self.links.entry(graph.clone()).or_default().insert(id.to_owned(), token);

			let already_embedded = self.embeds.get(&graph).is_some_and(|e| e.contains_key(id));

			// Skip nodes already included in another node at top level.
			if !self.embedded && already_embedded {
				continue;
			}

			if self.embedded
				&& (flags.embed == Embed::Never
					|| self.creates_cycle(id)
					|| (flags.embed == Embed::Once && already_embedded))
			{
				log::trace!("referencing {id} instead of embedding it");
				self.output.add(parent, Item::Node(token));
				continue;
			}

			if flags.embed == Embed::Last && already_embedded {
				self.remove_embed(id)
			}

			if let Some(embeds) = self.embeds.get_mut(&graph) {
				embeds.insert(
					id.to_owned(),
					Embedding {
						node: token,
						parent: parent.token(),
						property: property.map(ToOwned::to_owned),
					},
				);
			}

			self.subject_stack.push((id.to_owned(), graph.clone()));

			// The node is also the name of a graph.
			let node_map: &'a NodeMap = self.node_map;
			if let Some(named_graph) = node_map.graph(id) {
				let (recurse, subframe) = match frame.value("@graph") {
					None => (graph != MERGED_GRAPH, Object::new()),
					Some(subframe) => {
						let subframe = match as_array(subframe).first() {
							Some(Value::Object(o)) => o.clone(),
							_ => Object::new(),
						};
						(id != MERGED_GRAPH && id != DEFAULT_GRAPH, subframe)
					}
				};

				if recurse {
					let ids: Vec<&str> = named_graph.keys().map(String::as_str).collect();
					let subframe = Value::Array(vec![Value::Object(subframe)]);

					self.graph_stack.push(std::mem::replace(&mut self.graph, id.to_owned()));
					let embedded = std::mem::replace(&mut self.embedded, false);
					let result = self.frame(&ids, &subframe, &mut Parent::Node(token, "@graph"), Some("@graph"));
					self.embedded = embedded;
					if let Some(outer) = self.graph_stack.pop() {
						self.graph = outer
					}
					result?
				}
			}

			// Included nodes are framed with the `@included` sub-frame.
			if let Some(included) = frame.value("@included") {
				let embedded = std::mem::replace(&mut self.embedded, false);
				let result = self.frame(
					subjects,
					included,
					&mut Parent::Node(token, "@included"),
					Some("@included"),
				);
				self.embedded = embedded;
				result?
			}

			let implicit_frame = flags.implicit_frame();
			let mut properties: Vec<(&'a str, &'a Value)> = subject
				.entries()
				.iter()
				.map(|e| (e.key.as_str(), &e.value))
				.collect();
			properties.sort_unstable_by_key(|(key, _)| *key);

			for (key, values) in properties {
				if is_keyword_key(key) {
					self.output.set_raw(token, key, values.clone());
					if key == "@type" {
						for typ in as_array(values).iter().filter_map(as_str) {
							self.use_blank_id(typ)
						}
					}
					continue;
				}

				// Explicit frames only keep the properties they mention.
				if flags.explicit && !frame.has(key) {
					continue;
				}

				let subframe = frame.value(key).unwrap_or(&implicit_frame);

				for value in as_array(values) {
					if is_list_object(value) {
						let list_frame = match as_array(subframe).first() {
							Some(Value::Object(o)) => o.value("@list"),
							_ => None,
						};
						let list_frame = list_frame.unwrap_or(&implicit_frame);

						let mut list = Vec::new();
						let items = match value {
							Value::Object(o) => o.value("@list").map(as_array).unwrap_or_default(),
							_ => &[],
						};

						for item in items {
							match node_reference_id(item) {
								Some(item_id) => {
									let embedded = std::mem::replace(&mut self.embedded, true);
									let result = self.frame(&[item_id], list_frame, &mut Parent::Array(&mut list), Some("@list"));
									self.embedded = embedded;
									result?
								}
								None => list.push(Item::Value(item.clone())),
							}
						}

						self.output.add(&mut Parent::Node(token, key), Item::List(list))
					} else if let Some(value_id) = node_reference_id(value) {
						let embedded = std::mem::replace(&mut self.embedded, true);
						let result = self.frame(&[value_id], subframe, &mut Parent::Node(token, key), Some(key));
						self.embedded = embedded;
						result?
					} else {
						let is_match = match as_array(subframe).first() {
							Some(Value::Object(pattern)) => value_match(pattern, value),
							_ => true,
						};

						if is_match {
							self.output.add(&mut Parent::Node(token, key), Item::Value(value.clone()))
						}
					}
				}
			}

			// Default values.
			let mut frame_keys: Vec<(&str, &Value)> = frame
				.entries()
				.iter()
				.map(|e| (e.key.as_str(), &e.value))
				.collect();
			frame_keys.sort_unstable_by_key(|(key, _)| *key);

			for (key, values) in frame_keys {
				let next = match as_array(values).first() {
					Some(Value::Object(o)) => Some(o),
					_ => None,
				};

				if key == "@type" {
					if !next.is_some_and(|o| o.has("@default")) {
						continue;
					}
				} else if is_keyword_key(key) {
					continue;
				}

				let omit_default = match next {
					Some(next) => bool_flag(next, "@omitDefault", self.options.omit_default),
					None => self.options.omit_default,
				};

				if !omit_default && !self.output.contains(token, key) {
					let default = next
						.and_then(|o| o.value("@default"))
						.and_then(|d| as_array(d).first())
						.cloned()
						.unwrap_or_else(|| string("@null"));

					self.output.add(&mut Parent::Node(token, key), Item::Value(default))
				}
			}

			// Reverse properties: embed the nodes having this node as value.
			if let Some(Value::Object(reverse_frame)) = frame.value("@reverse") {
				let mut reverse: IndexMap<String, Vec<Item>> = IndexMap::new();
				let mut reverse_keys: Vec<(&str, &Value)> = reverse_frame
					.entries()
					.iter()
					.map(|e| (e.key.as_str(), &e.value))
					.collect();
				reverse_keys.sort_unstable_by_key(|(key, _)| *key);

				for (reverse_property, subframe) in reverse_keys {
					let subjects: &'a NodeMapGraph = self.subjects;
					for (subject_id, node) in subjects {
						let references = node
							.value(reverse_property)
							.map(as_array)
							.unwrap_or_default()
							.iter()
							.any(|v| has_id(v, id));

						if references {
							let items = reverse.entry(reverse_property.to_owned()).or_default();
							let embedded = std::mem::replace(&mut self.embedded, true);
							let result = self.frame(
								&[subject_id.as_str()],
								subframe,
								&mut Parent::Array(items),
								Some("@reverse"),
							);
							self.embedded = embedded;
							result?
						}
					}
				}

				if !reverse.is_empty() {
					self.output.set_reverse(token, reverse)
				}
			}

			self.output.add(parent, Item::Node(token));
			self.subject_stack.pop();
		}

		Ok(())
	}
}

/// Identifier of a node reference.
fn node_reference_id(value: &Value) -> Option<&str> {
	if is_node_reference(value) {
		match value {
			Value::Object(o) => o.value("@id").and_then(as_str),
			_ => None,
		}
	} else {
		None
	}
}

fn has_id(value: &Value, id: &str) -> bool {
	match value {
		Value::Object(o) => o.value("@id").and_then(as_str) == Some(id),
		_ => false,
	}
}

/// Framer.
///
/// Frames expanded documents with expanded frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct Framer {
	options: FramingOptions,
	default_graph: bool,
}

impl Framer {
	pub fn new(options: FramingOptions) -> Self {
		Self {
			options,
			default_graph: false,
		}
	}

	/// Frames the default graph only, instead of the merge of all the
	/// graphs of the input.
	///
	/// This is the case when the frame has a top-level `@graph` entry.
	pub fn with_default_graph(self, default_graph: bool) -> Self {
		Self {
			default_graph,
			..self
		}
	}

	pub fn options(&self) -> &FramingOptions {
		&self.options
	}

	/// Frames the expanded document `input` with the expanded `frame`.
	///
	/// Returns the framed nodes, still in expanded form.
	pub fn frame(
		&self,
		input: &Value,
		frame: &Value,
		generator: &mut impl Generator,
	) -> Result<Vec<Value>, Error> {
		log::debug!("framing document");
		let mut node_map = NodeMap::generate(input, generator)?;

		let graph = if self.default_graph {
			DEFAULT_GRAPH
		} else {
			node_map.insert_merged_graph();
			MERGED_GRAPH
		};

		let empty_frame;
		let frame = match frame {
			Value::Array(items) if items.is_empty() => {
				empty_frame = Value::Array(vec![Value::Object(Object::new())]);
				&empty_frame
			}
			frame => frame,
		};

		let mut state = FramingState::new(&node_map, graph, self.options)?;
		let subjects: &NodeMapGraph = state.subjects;
		let ids: Vec<&str> = subjects.keys().map(String::as_str).collect();

		let mut results = Vec::new();
		state.frame(&ids, frame, &mut Parent::Array(&mut results), None)?;

		let pruned = state.pruned_identifiers();
		Ok(state.output.render(&results, &pruned))
	}
}

/// Compacts framed nodes with the context of the frame.
///
/// A top-level `@graph` is used when the result holds more than one node, or
/// always when `omit_graph` is disabled. Default `@null` values are replaced
/// by `null`.
pub fn compact_framed(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	framed: Vec<Value>,
	options: FramingOptions,
) -> Result<Value, Error> {
	let compactor = Compactor::new(active_context, options.into());
	let compacted = compactor.compact_element(env, &Value::Array(framed))?;
	let omit_graph = options.omit_graph();

	let compacted = match compacted {
		Value::Array(items) if omit_graph && options.compact_arrays && items.len() <= 1 => items
			.into_iter()
			.next()
			.unwrap_or_else(|| Value::Object(Object::new())),
		Value::Object(node) if !omit_graph => Value::Array(vec![Value::Object(node)]),
		compacted => compacted,
	};

	let mut compacted = match compacted {
		Value::Array(items) => Value::Object(object1(&compactor.alias("@graph")?, Value::Array(items))),
		compacted => compacted,
	};

	remove_null_defaults(&mut compacted);
	Ok(compacted)
}

/// Replaces `@null` default values with `null`, and removes them from
/// arrays.
fn remove_null_defaults(value: &mut Value) {
	match value {
		Value::Array(items) => {
			for item in items.iter_mut() {
				remove_null_defaults(item)
			}
			items.retain(|item| !item.is_null())
		}
		Value::String(s) if s.as_str() == "@null" => *value = Value::Null,
		Value::Object(object) => {
			let mut result = Object::new();
			for entry in object.entries() {
				let mut value = entry.value.clone();
				remove_null_defaults(&mut value);
				result.set(entry.key.as_str(), value)
			}
			*object = result
		}
		_ => (),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		algorithms::{expansion, process_context, ContextProcessingOptions, ExpansionOptions},
		blank::Blank,
		util::deep_equals,
		NoLoader,
	};
	use iref::Iri;
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn run(input: &str, frame: &str, options: FramingOptions) -> Result<Value, Error> {
		let base = Iri::new("http://example.org/doc").unwrap();
		let context = ActiveContext::new(Some(base.to_owned()));
		let input = expansion::expand(
			&mut NoLoader,
			&context,
			&parse(input),
			Some(base),
			ExpansionOptions::default(),
		)?;

		let frame = parse(frame);
		let expanded_frame = expansion::expand(
			&mut NoLoader,
			&context,
			&frame,
			Some(base),
			ExpansionOptions::default().for_frame(),
		)?;

		let framed = Framer::new(options).frame(&input, &expanded_frame, &mut Blank::new())?;

		let frame_context = match &frame {
			Value::Object(o) => o.value("@context").cloned().unwrap_or(Value::Null),
			_ => Value::Null,
		};
		let active_context = process_context(
			&mut NoLoader,
			&context,
			&frame_context,
			Some(base),
			ContextProcessingOptions::default(),
		)?;

		compact_framed(&mut NoLoader, &active_context, framed, options)
	}

	fn check(input: &str, frame: &str, expected: &str) {
		let framed = run(input, frame, FramingOptions::default()).unwrap();
		let expected = parse(expected);
		assert!(
			deep_equals(&framed, &expected),
			"got {framed:?}, expected {expected:?}"
		)
	}

	#[test]
	fn embeds_referenced_nodes() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/1", "p": {"@id": "http://example.org/2"}},
					{"@id": "http://example.org/2", "q": "v"}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@id": "http://example.org/1"
			}"#,
			r#"{"@id": "1", "p": {"@id": "2", "q": "v"}}"#,
		)
	}

	#[test]
	fn type_frames_and_defaults() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/a", "@type": "Book", "title": "A"},
					{"@id": "http://example.org/b", "@type": "Book"},
					{"@id": "http://example.org/c", "@type": "Film", "title": "C"}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "Book",
				"title": {"@default": "untitled"},
				"author": {}
			}"#,
			r#"{
				"@graph": [
					{"@id": "a", "@type": "Book", "title": "A", "author": null},
					{"@id": "b", "@type": "Book", "title": "untitled", "author": null}
				]
			}"#,
		)
	}

	#[test]
	fn explicit_frames_drop_other_properties() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@id": "http://example.org/a",
				"@type": "T",
				"p": "x",
				"q": "y"
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "T",
				"@explicit": true,
				"p": {}
			}"#,
			r#"{"@id": "a", "@type": "T", "p": "x"}"#,
		)
	}

	#[test]
	fn embed_policies() {
		let input = r#"{
			"@context": {"@vocab": "http://example.org/"},
			"@graph": [
				{"@id": "http://example.org/a", "@type": "T", "p": {"@id": "http://example.org/c"}, "q": {"@id": "http://example.org/c"}},
				{"@id": "http://example.org/c", "v": "x"}
			]
		}"#;
		let frame = r#"{"@context": {"@vocab": "http://example.org/"}, "@type": "T"}"#;

		let once = run(input, frame, FramingOptions::default()).unwrap();
		assert!(deep_equals(
			&once,
			&parse(r#"{"@id": "a", "@type": "T", "p": {"@id": "c", "v": "x"}, "q": {"@id": "c"}}"#)
		));

		let last = run(input, frame, FramingOptions::default().with_embed(Embed::Last)).unwrap();
		assert!(deep_equals(
			&last,
			&parse(r#"{"@id": "a", "@type": "T", "p": {"@id": "c"}, "q": {"@id": "c", "v": "x"}}"#)
		));

		let never = run(input, frame, FramingOptions::default().with_embed(Embed::Never)).unwrap();
		assert!(deep_equals(
			&never,
			&parse(r#"{"@id": "a", "@type": "T", "p": {"@id": "c"}, "q": {"@id": "c"}}"#)
		));

		let always = run(input, frame, FramingOptions::default().with_embed(Embed::Always)).unwrap();
		assert!(deep_equals(
			&always,
			&parse(r#"{"@id": "a", "@type": "T", "p": {"@id": "c", "v": "x"}, "q": {"@id": "c", "v": "x"}}"#)
		))
	}

	#[test]
	fn cycles_become_references() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@graph": [
					{"@id": "http://example.org/a", "@type": "T", "knows": {"@id": "http://example.org/b"}},
					{"@id": "http://example.org/b", "knows": {"@id": "http://example.org/a"}}
				]
			}"#,
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@type": "T",
				"@embed": "@always"
			}"#,
			r#"{"@id": "a", "@type": "T", "knows": {"@id": "b", "knows": {"@id": "a"}}}"#,
		)
	}

	#[test]
	fn blank_node_identifiers_are_pruned() {
		check(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@id": "http://example.org/a",
				"@type": "T",
				"p": {"v": "x"}
			}"#,
			r#"{"@context": {"@vocab": "http://example.org/"}, "@type": "T"}"#,
			r#"{"@id": "a", "@type": "T", "p": {"v": "x"}}"#,
		)
	}

	#[test]
	fn omit_graph_disabled() {
		let framed = run(
			r#"{"@context": {"@vocab": "http://example.org/"}, "@id": "http://example.org/a", "p": "x"}"#,
			r#"{"@context": {"@vocab": "http://example.org/"}}"#,
			FramingOptions::default().with_omit_graph(false),
		)
		.unwrap();

		assert!(deep_equals(
			&framed,
			&parse(r#"{"@graph": [{"@id": "a", "p": "x"}]}"#)
		))
	}

	#[test]
	fn invalid_embed_value() {
		let error = run(
			r#"{"@id": "http://example.org/a", "http://example.org/p": "x"}"#,
			r#"{"@embed": "@sometimes"}"#,
			FramingOptions::default(),
		)
		.unwrap_err();

		assert_eq!(error.code(), ErrorCode::InvalidEmbedValue)
	}
}
