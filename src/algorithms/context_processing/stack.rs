use std::sync::Arc;

use iref::{Iri, IriBuf};

/// Context processing stack.
///
/// Contains the list of the loaded remote contexts, to detect loops and
/// enforce the remote context limit.
#[derive(Clone, Default)]
pub struct ProcessingStack {
	head: Option<Arc<StackNode>>,
	len: usize,
}

impl ProcessingStack {
	/// Creates a new empty processing stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Checks if the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.head.is_none()
	}

	/// Number of remote contexts in the stack.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Checks if the given URL is already in the stack.
	pub fn contains(&self, url: &Iri) -> bool {
		match &self.head {
			Some(head) => head.contains(url),
			None => false,
		}
	}

	/// Push a new URL to the stack.
	pub fn push(&mut self, url: IriBuf) {
		let previous = self.head.take();
		self.head = Some(Arc::new(StackNode { previous, url }));
		self.len += 1
	}
}

/// Single frame of the context processing stack.
struct StackNode {
	/// Previous frame.
	previous: Option<Arc<StackNode>>,

	/// URL of the last loaded context.
	url: IriBuf,
}

impl StackNode {
	/// Checks if this frame or any parent holds the given URL.
	fn contains(&self, url: &Iri) -> bool {
		if self.url.as_str() == url.as_str() {
			true
		} else {
			match &self.previous {
				Some(prev) => prev.contains(url),
				None => false,
			}
		}
	}
}
