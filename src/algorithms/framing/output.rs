//! Framed output under construction.
//!
//! Framed nodes are allocated in an arena and referred to by token, so that
//! an embedding can be turned into a node reference after it has been added
//! to its parent (`@last` embed policy), and so that the same node can be
//! added at several places (`@link` embed policy).
use std::collections::HashSet;

use indexmap::IndexMap;
use json_syntax::{Object, Value};

use crate::util::{string, ObjectExt};

/// Framed node token.
pub type Token = usize;

/// Framed value.
pub enum Item {
	/// Framed node.
	Node(Token),

	/// Value copied from the input, or default value.
	Value(Value),

	/// List of framed values.
	List(Vec<Item>),
}

enum Entry {
	/// Keyword entry copied from the input node.
	Raw(Value),

	/// Framed values.
	Items(Vec<Item>),

	/// Framed reverse properties.
	Reverse(IndexMap<String, Vec<Item>>),
}

struct OutputNode {
	id: String,
	entries: IndexMap<String, Entry>,
}

/// Where framed values are added.
pub enum Parent<'p> {
	/// Array of framed values (top-level results, lists, reverse
	/// properties).
	Array(&'p mut Vec<Item>),

	/// Property of a framed node.
	Node(Token, &'p str),
}

impl<'p> Parent<'p> {
	/// Framed node holding the added values, if any.
	pub fn token(&self) -> Option<Token> {
		match self {
			Self::Array(_) => None,
			Self::Node(token, _) => Some(*token),
		}
	}
}

/// Framed node arena.
#[derive(Default)]
pub struct Output {
	nodes: Vec<OutputNode>,
}

impl Output {
	/// Allocates a framed node with the given identifier and no other entry.
	pub fn create(&mut self, id: &str) -> Token {
		self.nodes.push(OutputNode {
			id: id.to_owned(),
			entries: IndexMap::new(),
		});
		self.nodes.len() - 1
	}

	/// Identifier of the given framed node.
	pub fn id(&self, token: Token) -> &str {
		&self.nodes[token].id
	}

	/// Checks if the given framed node has an entry for `key`.
	pub fn contains(&self, token: Token, key: &str) -> bool {
		self.nodes[token].entries.contains_key(key)
	}

	/// Copies a keyword entry of the input node.
	pub fn set_raw(&mut self, token: Token, key: &str, value: Value) {
		self.nodes[token].entries.insert(key.to_owned(), Entry::Raw(value));
	}

	/// Sets the reverse properties of a framed node.
	pub fn set_reverse(&mut self, token: Token, reverse: IndexMap<String, Vec<Item>>) {
		self.nodes[token]
			.entries
			.insert("@reverse".to_owned(), Entry::Reverse(reverse));
	}

	/// Adds a framed value to `parent`.
	pub fn add(&mut self, parent: &mut Parent, item: Item) {
		match parent {
			Parent::Array(items) => items.push(item),
			Parent::Node(token, key) => {
				let entries = &mut self.nodes[*token].entries;
				match entries.get_mut(*key) {
					Some(Entry::Items(items)) => items.push(item),
					_ => {
						entries.insert((*key).to_owned(), Entry::Items(vec![item]));
					}
				}
			}
		}
	}

	/// Turns a framed node into a node reference.
	pub fn clear(&mut self, token: Token) {
		self.nodes[token].entries.clear()
	}

	/// Renders framed values into JSON.
	///
	/// The `@id` entry of nodes whose identifier belongs to `pruned` is
	/// removed. A node found inside itself (possible with the `@link` embed
	/// policy) is rendered as a node reference.
	pub fn render(&self, items: &[Item], pruned: &HashSet<String>) -> Vec<Value> {
		let mut stack = Vec::new();
		items
			.iter()
			.map(|item| self.render_item(item, pruned, &mut stack))
			.collect()
	}

	fn render_items(&self, items: &[Item], pruned: &HashSet<String>, stack: &mut Vec<Token>) -> Value {
		Value::Array(
			items
				.iter()
				.map(|item| self.render_item(item, pruned, stack))
				.collect(),
		)
	}

	fn render_item(&self, item: &Item, pruned: &HashSet<String>, stack: &mut Vec<Token>) -> Value {
		match item {
			Item::Node(token) => self.render_node(*token, pruned, stack),
			Item::Value(value) => value.clone(),
			Item::List(items) => {
				let mut list = Object::new();
				list.set("@list", self.render_items(items, pruned, stack));
				Value::Object(list)
			}
		}
	}

	fn render_node(&self, token: Token, pruned: &HashSet<String>, stack: &mut Vec<Token>) -> Value {
		let node = &self.nodes[token];
		let mut result = Object::new();

		if !pruned.contains(&node.id) {
			result.set("@id", string(node.id.as_str()))
		}

		if stack.contains(&token) {
			return Value::Object(result);
		}

		stack.push(token);
		for (key, entry) in &node.entries {
			if key == "@id" {
				continue;
			}

			let value = match entry {
				Entry::Raw(value) => value.clone(),
				Entry::Items(items) => self.render_items(items, pruned, stack),
				Entry::Reverse(reverse) => {
					let mut object = Object::new();
					for (property, items) in reverse {
						object.set(property, self.render_items(items, pruned, stack))
					}
					Value::Object(object)
				}
			};

			result.set(key, value)
		}
		stack.pop();

		Value::Object(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cleared_nodes_become_references() {
		let mut output = Output::default();
		let a = output.create("http://example.org/a");
		let b = output.create("_:b0");
		output.add(&mut Parent::Node(a, "http://example.org/p"), Item::Node(b));
		output.set_raw(b, "@type", Value::Array(vec![string("http://example.org/T")]));
		output.clear(b);

		let mut pruned = HashSet::new();
		pruned.insert("_:b0".to_owned());
		let rendered = output.render(&[Item::Node(a)], &pruned);

		let Value::Object(node) = &rendered[0] else {
			panic!("expected a node object")
		};
		let Some(Value::Array(values)) = node.value("http://example.org/p") else {
			panic!("expected an array")
		};
		assert_eq!(values, &vec![Value::Object(Object::new())])
	}

	#[test]
	fn self_links_are_cut() {
		let mut output = Output::default();
		let a = output.create("http://example.org/a");
		output.add(&mut Parent::Node(a, "http://example.org/self"), Item::Node(a));

		let rendered = output.render(&[Item::Node(a)], &HashSet::new());
		let Value::Object(node) = &rendered[0] else {
			panic!("expected a node object")
		};
		let Some(Value::Array(values)) = node.value("http://example.org/self") else {
			panic!("expected an array")
		};
		let Value::Object(inner) = &values[0] else {
			panic!("expected a node reference")
		};
		assert_eq!(inner.len(), 1)
	}
}
