//! JSON-LD algorithms.
pub mod compaction;
pub mod context_processing;
pub mod expansion;
pub mod flattening;
pub mod framing;

pub use compaction::{CompactionOptions, Compactor};
pub use context_processing::{expand_iri, process_context, ContextProcessingOptions};
pub use expansion::{ExpansionOptions, ExpansionPolicy, Expander};
pub use flattening::{flatten, NodeMap};
pub use framing::{Embed, Framer, FramingOptions};

use crate::{Loader, Warning};

/// Processing environment.
///
/// Gives the algorithms access to the remote context provider, and collects
/// the warnings they emit.
pub trait ProcessingEnvironment {
	type Loader: Loader;

	fn loader(&self) -> &Self::Loader;

	fn warn(&mut self, w: Warning);
}

impl<L: Loader> ProcessingEnvironment for L {
	type Loader = Self;

	fn loader(&self) -> &Self::Loader {
		self
	}

	fn warn(&mut self, w: Warning) {
		log::warn!("{w}")
	}
}

/// Processing environment collecting warnings.
pub struct Environment<L> {
	loader: L,
	warnings: Vec<Warning>,
}

impl<L> Environment<L> {
	pub fn new(loader: L) -> Self {
		Self {
			loader,
			warnings: Vec::new(),
		}
	}

	/// Returns the warnings emitted so far.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}

	/// Consumes the environment and returns the warnings it collected.
	pub fn into_warnings(self) -> Vec<Warning> {
		self.warnings
	}
}

impl<L: Loader> ProcessingEnvironment for Environment<L> {
	type Loader = L;

	fn loader(&self) -> &L {
		&self.loader
	}

	fn warn(&mut self, w: Warning) {
		log::warn!("{w}");
		self.warnings.push(w)
	}
}
