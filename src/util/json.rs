//! JSON helpers shared by all the algorithms.
use json_syntax::object::{Entry, Key};
use json_syntax::{Object, Value};

use crate::Keyword;

/// Object access by key.
///
/// JSON-LD processing only deals with objects without duplicate keys. When a
/// key is duplicated anyway, the object behaves as if the key was absent.
pub trait ObjectExt {
	/// Returns the value associated to the given key.
	fn value(&self, key: &str) -> Option<&Value>;

	/// Returns a mutable reference to the value associated to the given key.
	fn value_mut(&mut self, key: &str) -> Option<&mut Value>;

	/// Checks if the object has an entry for the given key.
	fn has(&self, key: &str) -> bool {
		self.value(key).is_some()
	}

	/// Sets the value associated to the given key, replacing the previous
	/// one.
	fn set(&mut self, key: &str, value: Value);

	/// Removes the entry associated to the given key and returns its value.
	fn take(&mut self, key: &str) -> Option<Value>;

	/// Iterates over the keys of the object.
	fn key_strs(&self) -> Keys;
}

impl ObjectExt for Object {
	fn value(&self, key: &str) -> Option<&Value> {
		self.get_unique(key).ok().flatten()
	}

	fn value_mut(&mut self, key: &str) -> Option<&mut Value> {
		self.get_unique_mut(key).ok().flatten()
	}

	fn set(&mut self, key: &str, value: Value) {
		self.insert(Key::from(key), value);
	}

	fn take(&mut self, key: &str) -> Option<Value> {
		self.remove_unique(key).ok().flatten().map(|e| e.value)
	}

	fn key_strs(&self) -> Keys {
		Keys(self.entries().iter())
	}
}

/// Iterator over the keys of an object.
pub struct Keys<'a>(std::slice::Iter<'a, Entry>);

impl<'a> Iterator for Keys<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		self.0.next().map(|e| e.key.as_str())
	}
}

/// Returns the keys of the given object as owned strings, sorted if
/// `ordered` is set.
pub fn sorted_keys(object: &Object, ordered: bool) -> Vec<String> {
	let mut keys: Vec<String> = object.key_strs().map(ToOwned::to_owned).collect();
	if ordered {
		keys.sort_unstable();
	}
	keys
}

/// Returns the entries of the given object, sorted by key if `ordered` is
/// set.
pub fn sorted_entries(object: &Object, ordered: bool) -> Vec<&Entry> {
	let mut entries: Vec<&Entry> = object.entries().iter().collect();
	if ordered {
		entries.sort_by(|a, b| a.key.as_str().cmp(b.key.as_str()));
	}
	entries
}

/// Views any value as an array.
///
/// Arrays are returned as is, other values as a one-element array.
pub fn as_array(value: &Value) -> &[Value] {
	match value {
		Value::Array(items) => items,
		other => std::slice::from_ref(other),
	}
}

/// Converts any value into an array.
pub fn into_array(value: Value) -> Vec<Value> {
	match value {
		Value::Array(items) => items,
		other => vec![other],
	}
}

/// Returns the string value of `value`, if any.
pub fn as_str(value: &Value) -> Option<&str> {
	match value {
		Value::String(s) => Some(s.as_str()),
		_ => None,
	}
}

/// Creates a string value.
pub fn string(s: impl Into<String>) -> Value {
	Value::String(s.into().into())
}

/// Creates a single-entry object.
pub fn object1(key: &str, value: Value) -> Object {
	let mut object = Object::new();
	object.set(key, value);
	object
}

/// Appends `value` to the entry `key` of `map`.
///
/// If `value` is an array, all its items are appended. The entry is always
/// an array if `as_array` is set, or if it holds more than one item.
pub fn add_value(map: &mut Object, key: &str, value: Value, as_array: bool) {
	let promote = match map.value(key) {
		Some(current) => !matches!(current, Value::Array(_)),
		None => {
			if as_array {
				map.set(key, Value::Array(Vec::new()))
			}
			false
		}
	};

	if promote {
		if let Some(current) = map.take(key) {
			map.set(key, Value::Array(vec![current]))
		}
	}

	match value {
		Value::Array(values) => {
			if values.is_empty() && !map.has(key) {
				map.set(key, Value::Array(Vec::new()))
			}

			for value in values {
				add_value(map, key, value, false)
			}
		}
		value => match map.value_mut(key) {
			Some(Value::Array(items)) => items.push(value),
			_ => map.set(key, value),
		},
	}
}

/// Appends `value` to the array entry `key` of `map` unless an equal value
/// is already present.
pub fn add_unique_value(map: &mut Object, key: &str, value: Value) {
	match map.value_mut(key) {
		Some(Value::Array(items)) => {
			if !items.iter().any(|item| deep_equals(item, &value)) {
				items.push(value)
			}
		}
		Some(other) => {
			if !deep_equals(other, &value) {
				let current = std::mem::replace(other, Value::Null);
				*other = Value::Array(vec![current, value])
			}
		}
		None => map.set(key, Value::Array(vec![value])),
	}
}

/// Checks if the array entry `key` of `map` contains `value`.
pub fn has_value(map: &Object, key: &str, value: &Value) -> bool {
	match map.value(key) {
		Some(current) => as_array(current).iter().any(|item| deep_equals(item, value)),
		None => false,
	}
}

/// Structural equality where the order of object entries is not
/// significant.
///
/// Array order is significant.
pub fn deep_equals(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Null, Value::Null) => true,
		(Value::Boolean(a), Value::Boolean(b)) => a == b,
		(Value::Number(a), Value::Number(b)) => a == b,
		(Value::String(a), Value::String(b)) => a.as_str() == b.as_str(),
		(Value::Array(a), Value::Array(b)) => {
			a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_equals(a, b))
		}
		(Value::Object(a), Value::Object(b)) => {
			a.len() == b.len()
				&& a.entries().iter().all(|Entry { key, value }| {
					b.value(key.as_str()).is_some_and(|other| deep_equals(value, other))
				})
		}
		_ => false,
	}
}

/// Structural equality where the order of array items is not significant
/// either.
///
/// Used to compare JSON-LD documents where arrays are sets.
pub fn deep_equals_unordered(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Array(a), Value::Array(b)) => {
			if a.len() != b.len() {
				return false;
			}

			let mut used = vec![false; b.len()];
			a.iter().all(|item| {
				let found = b
					.iter()
					.enumerate()
					.position(|(i, other)| !used[i] && deep_equals_unordered(item, other));
				match found {
					Some(i) => {
						used[i] = true;
						true
					}
					None => false,
				}
			})
		}
		(Value::Object(a), Value::Object(b)) => {
			a.len() == b.len()
				&& a.entries().iter().all(|Entry { key, value }| {
					b.value(key.as_str())
						.is_some_and(|other| deep_equals_unordered(value, other))
				})
		}
		(a, b) => deep_equals(a, b),
	}
}

/// Kind of a JSON-LD object, computed from the keys it holds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObjectKind {
	/// Object with a `@value` entry.
	Value,

	/// Object with a `@list` entry.
	List,

	/// Object with a `@set` entry.
	Set,

	/// Object with a `@graph` entry and at most `@id`, `@index` and
	/// `@context` beside it.
	Graph,

	/// Object with only an `@id` entry.
	NodeReference,

	/// Any other object.
	Node,
}

impl ObjectKind {
	/// Classifies the given object.
	pub fn of(object: &Object) -> Self {
		if object.has("@value") {
			Self::Value
		} else if object.has("@list") {
			Self::List
		} else if object.has("@set") {
			Self::Set
		} else if object.has("@graph")
			&& object
				.key_strs()
				.all(|k| matches!(k, "@graph" | "@id" | "@index" | "@context"))
		{
			Self::Graph
		} else if object.len() == 1 && object.has("@id") {
			Self::NodeReference
		} else {
			Self::Node
		}
	}
}

/// Returns the kind of `value` if it is an object.
pub fn kind(value: &Value) -> Option<ObjectKind> {
	match value {
		Value::Object(o) => Some(ObjectKind::of(o)),
		_ => None,
	}
}

pub fn is_value_object(value: &Value) -> bool {
	kind(value) == Some(ObjectKind::Value)
}

pub fn is_list_object(value: &Value) -> bool {
	kind(value) == Some(ObjectKind::List)
}

pub fn is_graph_object(value: &Value) -> bool {
	kind(value) == Some(ObjectKind::Graph)
}

/// Checks if `value` is a graph object without `@id`.
pub fn is_simple_graph_object(value: &Value) -> bool {
	match value {
		Value::Object(o) => ObjectKind::of(o) == ObjectKind::Graph && !o.has("@id"),
		_ => false,
	}
}

/// Checks if `value` is a node object (including node references).
pub fn is_node_object(value: &Value) -> bool {
	matches!(
		kind(value),
		Some(ObjectKind::Node) | Some(ObjectKind::NodeReference)
	)
}

pub fn is_node_reference(value: &Value) -> bool {
	kind(value) == Some(ObjectKind::NodeReference)
}

/// Checks if the given key is a keyword or something a keyword alias could
/// expand to.
pub fn is_keyword_key(key: &str) -> bool {
	Keyword::try_from(key).is_ok()
}

/// Checks if `value` is a scalar (string, number or boolean).
pub fn is_scalar(value: &Value) -> bool {
	matches!(
		value,
		Value::String(_) | Value::Number(_) | Value::Boolean(_)
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	#[test]
	fn add_value_promotes_to_array() {
		let mut map = Object::new();
		add_value(&mut map, "a", string("x"), false);
		assert_eq!(map.value("a"), Some(&string("x")));
		add_value(&mut map, "a", string("y"), false);
		assert!(deep_equals(
			&Value::Object(map.clone()),
			&parse(r#"{"a": ["x", "y"]}"#)
		));
		add_value(&mut map, "b", Value::Array(Vec::new()), true);
		assert!(deep_equals(
			map.value("b").unwrap(),
			&Value::Array(Vec::new())
		))
	}

	#[test]
	fn entry_order_is_not_significant() {
		let a = parse(r#"{"a": 1, "b": [1, 2]}"#);
		let b = parse(r#"{"b": [1, 2], "a": 1}"#);
		let c = parse(r#"{"b": [2, 1], "a": 1}"#);
		assert!(deep_equals(&a, &b));
		assert!(!deep_equals(&a, &c));
		assert!(deep_equals_unordered(&a, &c))
	}

	#[test]
	fn classification() {
		let o = |s| match parse(s) {
			Value::Object(o) => ObjectKind::of(&o),
			_ => unreachable!(),
		};

		assert_eq!(o(r#"{"@value": 1}"#), ObjectKind::Value);
		assert_eq!(o(r#"{"@list": []}"#), ObjectKind::List);
		assert_eq!(o(r#"{"@id": "_:a"}"#), ObjectKind::NodeReference);
		assert_eq!(o(r#"{"@graph": [], "@id": "ex:g"}"#), ObjectKind::Graph);
		assert_eq!(o(r#"{"@graph": [], "ex:p": 1}"#), ObjectKind::Node)
	}
}
