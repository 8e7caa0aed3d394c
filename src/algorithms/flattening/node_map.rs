use indexmap::IndexMap;
use json_syntax::{object::Entry, Object, Value};

use crate::{
	blank::{is_blank_id, Generator},
	util::{add_unique_value, add_value, into_array, object1, sorted_entries, string, ObjectExt},
	Error, ErrorCode, Keyword,
};

/// Name of the default graph in a node map.
pub const DEFAULT_GRAPH: &str = "@default";

/// Name of the graph merging every graph of a node map.
pub const MERGED_GRAPH: &str = "@merged";

/// Subject identifier to node object map.
pub type NodeMapGraph = IndexMap<String, Object>;

/// Graph name to graph map.
///
/// Every node object of a graph is reachable by exactly one subject
/// identifier.
#[derive(Clone, Debug)]
pub struct NodeMap {
	graphs: IndexMap<String, NodeMapGraph>,
}

impl Default for NodeMap {
	fn default() -> Self {
		Self::new()
	}
}

impl NodeMap {
	/// Creates a node map with an empty default graph.
	pub fn new() -> Self {
		let mut graphs = IndexMap::new();
		graphs.insert(DEFAULT_GRAPH.to_owned(), NodeMapGraph::new());
		Self { graphs }
	}

	/// Generates the node map of an expanded document.
	///
	/// Blank node identifiers are relabeled with `generator`, and nodes
	/// without identifier are given a fresh one.
	pub fn generate(document: &Value, generator: &mut impl Generator) -> Result<Self, Error> {
		let mut builder = NodeMapBuilder {
			generator,
			result: Self::new(),
		};

		builder.extend(document, DEFAULT_GRAPH, Subject::None, None, None)?;
		Ok(builder.result)
	}

	pub fn graph(&self, name: &str) -> Option<&NodeMapGraph> {
		self.graphs.get(name)
	}

	pub fn graph_mut(&mut self, name: &str) -> Option<&mut NodeMapGraph> {
		self.graphs.get_mut(name)
	}

	pub fn contains_graph(&self, name: &str) -> bool {
		self.graphs.contains_key(name)
	}

	pub fn default_graph(&self) -> &NodeMapGraph {
		&self.graphs[DEFAULT_GRAPH]
	}

	/// Iterates over the graphs, the default graph first.
	pub fn graphs(&self) -> impl Iterator<Item = (&str, &NodeMapGraph)> {
		self.graphs.iter().map(|(name, graph)| (name.as_str(), graph))
	}

	/// Merges every graph into a single graph.
	///
	/// Keyword entries other than `@type` are overwritten by the last graph
	/// defining them, other entries accumulate their distinct values.
	pub fn merge(&self) -> NodeMapGraph {
		let mut result = NodeMapGraph::new();

		for graph in self.graphs.values() {
			for (id, node) in graph {
				let merged_node = result
					.entry(id.clone())
					.or_insert_with(|| object1("@id", string(id.as_str())));

				for Entry { key, value } in node.entries() {
					let property = key.as_str();
					if property != "@type" && Keyword::try_from(property).is_ok() {
						merged_node.set(property, value.clone())
					} else {
						if !merged_node.has(property) {
							merged_node.set(property, Value::Array(Vec::new()))
						}

						for item in into_array(value.clone()) {
							add_unique_value(merged_node, property, item)
						}
					}
				}
			}
		}

		result
	}

	/// Adds the `@merged` graph.
	pub fn insert_merged_graph(&mut self) {
		let merged = self.merge();
		self.graphs.insert(MERGED_GRAPH.to_owned(), merged);
	}

	/// Turns the node map into a flattened document.
	///
	/// Named graphs are attached to the node of the default graph with the
	/// same identifier. Nodes whose only entry is `@id` are omitted.
	pub fn flatten(mut self, ordered: bool) -> Vec<Value> {
		let mut default_graph = self.graphs.shift_remove(DEFAULT_GRAPH).unwrap_or_default();

		let mut named_graphs: Vec<(String, NodeMapGraph)> = self.graphs.into_iter().collect();
		if ordered {
			named_graphs.sort_by(|(a, _), (b, _)| a.cmp(b))
		}

		for (name, graph) in named_graphs {
			if name == MERGED_GRAPH {
				continue;
			}

			let entry = default_graph
				.entry(name.clone())
				.or_insert_with(|| object1("@id", string(name.as_str())));

			entry.set("@graph", Value::Array(flatten_graph(graph, ordered)))
		}

		flatten_graph(default_graph, ordered)
	}
}

fn is_reference_only(node: &Object) -> bool {
	node.len() == 1 && node.has("@id")
}

fn flatten_graph(graph: NodeMapGraph, ordered: bool) -> Vec<Value> {
	let mut nodes: Vec<(String, Object)> = graph.into_iter().collect();
	if ordered {
		nodes.sort_by(|(a, _), (b, _)| a.cmp(b))
	}

	nodes
		.into_iter()
		.filter(|(_, node)| !is_reference_only(node))
		.map(|(_, node)| Value::Object(node))
		.collect()
}

/// Subject being processed by the node map generation.
#[derive(Clone, Copy)]
enum Subject<'s> {
	None,

	/// Identifier of the node owning the current property.
	Node(&'s str),

	/// Node referencing the current node through a reverse property.
	Reverse(&'s Object),
}

struct NodeMapBuilder<'g, G> {
	generator: &'g mut G,
	result: NodeMap,
}

impl<'g, G: Generator> NodeMapBuilder<'g, G> {
	fn node_mut(&mut self, graph: &str, id: &str) -> &mut Object {
		self.result
			.graphs
			.entry(graph.to_owned())
			.or_default()
			.entry(id.to_owned())
			.or_insert_with(|| object1("@id", string(id)))
	}

	fn relabel(&mut self, id: &str) -> String {
		if is_blank_id(id) {
			self.generator.generate(Some(id))
		} else {
			id.to_owned()
		}
	}

	/// Appends `value` to the active property of the active subject, or to
	/// `list` if any.
	fn append(
		&mut self,
		active_graph: &str,
		active_subject: Subject,
		active_property: Option<&str>,
		list: Option<&mut Vec<Value>>,
		value: Value,
		unique: bool,
	) {
		match list {
			Some(list) => list.push(value),
			None => {
				if let (Subject::Node(subject), Some(property)) = (active_subject, active_property) {
					let node = self.node_mut(active_graph, subject);
					if unique {
						add_unique_value(node, property, value)
					} else {
						add_value(node, property, value, true)
					}
				}
			}
		}
	}

	/// Node map generation algorithm.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#node-map-generation>.
	fn extend(
		&mut self,
		element: &Value,
		active_graph: &str,
		active_subject: Subject,
		active_property: Option<&str>,
		mut list: Option<&mut Vec<Value>>,
	) -> Result<(), Error> {
		let element = match element {
			// 1) If element is an array, process each item in element
			// recursively by passing item for element, node map, active graph,
			// active subject, active property, and list.
			Value::Array(items) => {
				for item in items {
					self.extend(
						item,
						active_graph,
						active_subject,
						active_property,
						list.as_deref_mut(),
					)?
				}

				return Ok(());
			}
			Value::Object(element) => element,
			_ => return Ok(()),
		};

		// 2) Otherwise element is a map. Reference the map which is the value
		// of the active graph entry of node map using the variable graph.
		self.result.graphs.entry(active_graph.to_owned()).or_default();
		let mut element = element.clone();

		// 3) For each item in the @type entry of element, if item is a blank
		// node identifier, replace it with a newly generated blank node
		// identifier passing item for identifier.
		if let Some(types) = element.take("@type") {
			let types = match types {
				Value::Array(items) => Value::Array(
					items
						.into_iter()
						.map(|item| match item {
							Value::String(t) => string(self.relabel(&t)),
							item => item,
						})
						.collect(),
				),
				Value::String(t) => string(self.relabel(&t)),
				other => other,
			};

			element.set("@type", types)
		}

		// 4) If element has an @value entry, perform the following steps:
		if element.has("@value") {
			// 4.1) If list is null: if subject node does not have an active
			// property entry, create one and initialize it to an array
			// containing element. Otherwise, compare element against every
			// item in the array associated with the active property entry of
			// subject node. If there is no item equivalent to element, append
			// element to the array.
			// 4.2) Otherwise, append element to the @list entry of list.
			self.append(
				active_graph,
				active_subject,
				active_property,
				list,
				Value::Object(element),
				true,
			);
			return Ok(());
		}

		// 5) Otherwise, if element has an @list entry, perform the following
		// steps:
		if let Some(items) = element.take("@list") {
			// 5.1) Initialize a new map result consisting of a single entry
			// @list whose value is initialized to an empty array.
			// 5.2) Recursively call this algorithm passing the value of
			// element's @list entry for element, node map, active graph, active
			// subject, active property, and result for list.
			let mut result = Vec::new();
			self.extend(
				&items,
				active_graph,
				active_subject,
				active_property,
				Some(&mut result),
			)?;

			// 5.3) If list is null, append result to the value of the active
			// property entry of subject node.
			// 5.4) Otherwise, append result to the @list entry of list.
			let result = Value::Object(object1("@list", Value::Array(result)));
			self.append(
				active_graph,
				active_subject,
				active_property,
				list,
				result,
				false,
			);
			return Ok(());
		}

		// 6) Otherwise element is a node object, perform the following steps:
		// 6.1) If element has an @id entry, set id to its value and remove the
		// entry from element. If id is a blank node identifier, replace it
		// with a newly generated blank node identifier passing id for
		// identifier.
		// 6.2) Otherwise, set id to the result of the Generate Blank Node
		// Identifier algorithm passing null for identifier.
		let id = match element.take("@id") {
			Some(Value::String(id)) => self.relabel(&id),
			_ => self.generator.generate(None),
		};

		// 6.3) If graph does not contain an entry id, create one and
		// initialize its value to a map consisting of a single entry @id whose
		// value is id.
		self.node_mut(active_graph, &id);

		match active_subject {
			// 6.5) If active subject is a map, a reverse property relationship
			// is being processed. Use add value to add active subject to the
			// active property entry in node, using true for as array, avoiding
			// duplicates.
			Subject::Reverse(subject) => {
				if let Some(property) = active_property {
					let node = self.node_mut(active_graph, &id);
					add_unique_value(node, property, Value::Object(subject.clone()))
				}
			}
			// 6.6) Otherwise, if active property is not null, perform the
			// following steps:
			_ => {
				if active_property.is_some() {
					// 6.6.1) Create a new map reference consisting of a single
					// entry @id whose value is id.
					// 6.6.2) If list is null, use add value to add reference to
					// the active property entry in subject node, avoiding
					// duplicates. Otherwise, append reference to the @list
					// entry of list.
					let reference = Value::Object(object1("@id", string(id.as_str())));
					self.append(
						active_graph,
						active_subject,
						active_property,
						list,
						reference,
						true,
					)
				}
			}
		}

		// 6.7) If element has an @type entry, append each item of its
		// associated array to the array associated with the @type entry in
		// node unless it is already in that array. Finally remove the @type
		// entry from element.
		if let Some(types) = element.take("@type") {
			let node = self.node_mut(active_graph, &id);
			for typ in into_array(types) {
				add_unique_value(node, "@type", typ)
			}
		}

		// 6.8) If element has an @index entry, set the @index entry of node to
		// its value. If node already has an @index entry with a different
		// value, a conflicting indexes error has been detected and processing
		// is aborted. Otherwise, continue by removing the @index entry from
		// element.
		if let Some(index) = element.take("@index") {
			let node = self.node_mut(active_graph, &id);
			match node.value("@index") {
				Some(current) if *current != index => {
					return Err(Error::new(
						ErrorCode::ConflictingIndexes,
						format!("node `{id}` has conflicting indexes"),
					))
				}
				_ => node.set("@index", index),
			}
		}

		// 6.9) If element has an @reverse entry:
		if let Some(reverse_map) = element.take("@reverse") {
			// 6.9.1) Create a map referenced node with a single entry @id whose
			// value is id.
			let referenced_node = object1("@id", string(id.as_str()));

			// 6.9.3) For each key-value pair property-values in reverse map:
			if let Value::Object(reverse_map) = reverse_map {
				for Entry { key, value } in reverse_map.entries() {
					// 6.9.3.1) For each value of values: recursively invoke this
					// algorithm passing value for element, node map, active
					// graph, referenced node for active subject, and property
					// for active property.
					self.extend(
						value,
						active_graph,
						Subject::Reverse(&referenced_node),
						Some(key.as_str()),
						None,
					)?
				}
			}
		}

		// 6.10) If element has an @graph entry, recursively invoke this
		// algorithm passing the value of the @graph entry for element, node
		// map, and id for active graph before removing the @graph entry from
		// element.
		if let Some(graph) = element.take("@graph") {
			self.result.graphs.entry(id.clone()).or_default();
			self.extend(&graph, &id, Subject::None, None, None)?
		}

		// 6.11) If element has an @included entry, recursively invoke this
		// algorithm passing the value of the @included entry for element,
		// node map, and active graph before removing the @included entry from
		// element.
		if let Some(included) = element.take("@included") {
			self.extend(&included, active_graph, Subject::None, None, None)?
		}

		// 6.12) Finally, for each key-value pair property-value in element
		// ordered by property perform the following steps:
		for Entry { key, value } in sorted_entries(&element, true) {
			// 6.12.1) If property is a blank node identifier, replace it with a
			// newly generated blank node identifier passing property for
			// identifier.
			let property = self.relabel(key.as_str());

			// 6.12.2) If node does not have a property entry, create one and
			// initialize its value to an empty array.
			let node = self.node_mut(active_graph, &id);
			if !node.has(&property) {
				node.set(&property, Value::Array(Vec::new()))
			}

			// 6.12.3) Recursively invoke this algorithm passing value for
			// element, node map, active graph, id for active subject, and
			// property for active property.
			self.extend(
				value,
				active_graph,
				Subject::Node(&id),
				Some(&property),
				None,
			)?
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		blank::Blank,
		util::{deep_equals, deep_equals_unordered},
	};
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	#[test]
	fn blank_nodes_are_labeled() {
		let input = parse(
			r#"[{
				"http://example.org/knows": [{"http://example.org/name": [{"@value": "Bob"}]}],
				"http://example.org/friend": [{"@id": "_:x"}, {"@id": "_:x"}]
			}]"#,
		);

		let node_map = NodeMap::generate(&input, &mut Blank::new()).unwrap();
		let graph = node_map.default_graph();
		assert_eq!(graph.len(), 3);

		let root = &graph["_:b0"];
		assert!(deep_equals(
			root.value("http://example.org/friend").unwrap(),
			&parse(r#"[{"@id": "_:b1"}]"#)
		));
		assert!(deep_equals(
			root.value("http://example.org/knows").unwrap(),
			&parse(r#"[{"@id": "_:b2"}]"#)
		))
	}

	#[test]
	fn conflicting_indexes() {
		let input = parse(
			r#"[
				{"@id": "http://example.org/a", "@index": "1"},
				{"@id": "http://example.org/a", "@index": "2"}
			]"#,
		);

		let err = NodeMap::generate(&input, &mut Blank::new()).unwrap_err();
		assert_eq!(err.code(), ErrorCode::ConflictingIndexes)
	}

	#[test]
	fn reverse_properties_become_forward() {
		let input = parse(
			r#"[{
				"@id": "http://example.org/alice",
				"@reverse": {"http://example.org/parent": [{"@id": "http://example.org/bob"}]}
			}]"#,
		);

		let node_map = NodeMap::generate(&input, &mut Blank::new()).unwrap();
		let bob = &node_map.default_graph()["http://example.org/bob"];
		assert!(deep_equals(
			bob.value("http://example.org/parent").unwrap(),
			&parse(r#"[{"@id": "http://example.org/alice"}]"#)
		))
	}

	#[test]
	fn named_graphs_and_merging() {
		let input = parse(
			r#"[{
				"@id": "http://example.org/g",
				"@graph": [{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]}]
			}, {
				"@id": "http://example.org/a",
				"http://example.org/p": [{"@value": 2}]
			}]"#,
		);

		let mut node_map = NodeMap::generate(&input, &mut Blank::new()).unwrap();
		assert!(node_map.contains_graph("http://example.org/g"));

		node_map.insert_merged_graph();
		let merged = &node_map.graph(MERGED_GRAPH).unwrap()["http://example.org/a"];
		assert!(deep_equals_unordered(
			merged.value("http://example.org/p").unwrap(),
			&parse(r#"[{"@value": 1}, {"@value": 2}]"#)
		))
	}

	#[test]
	fn lists_are_kept() {
		let input = parse(
			r#"[{
				"@id": "http://example.org/a",
				"http://example.org/l": [{"@list": [{"@value": 1}, {"@id": "http://example.org/b"}]}]
			}]"#,
		);

		let node_map = NodeMap::generate(&input, &mut Blank::new()).unwrap();
		let flattened = Value::Array(node_map.flatten(true));
		assert!(deep_equals(
			&flattened,
			&parse(
				r#"[{
					"@id": "http://example.org/a",
					"http://example.org/l": [{"@list": [{"@value": 1}, {"@id": "http://example.org/b"}]}]
				}]"#
			)
		))
	}
}
