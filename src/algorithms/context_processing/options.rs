use crate::ProcessingMode;

/// Default maximum number of remote contexts dereferenced while processing
/// a single context.
pub const DEFAULT_REMOTE_CONTEXT_LIMIT: usize = 32;

/// Options of the Context Processing Algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextProcessingOptions {
	/// The processing mode.
	pub processing_mode: ProcessingMode,

	/// Override protected definitions.
	pub override_protected: bool,

	/// Propagate the processed context.
	pub propagate: bool,

	/// Re-validate scoped contexts already seen through remote contexts.
	pub validate_scoped: bool,

	/// Maximum number of remote contexts dereferenced.
	pub remote_context_limit: usize,
}

impl ContextProcessingOptions {
	/// Return the same set of options, but with `override_protected` set to `true`.
	#[must_use]
	pub fn with_override(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.override_protected = true;
		opt
	}

	/// Return the same set of options, but with `override_protected` set to `false`.
	#[must_use]
	pub fn with_no_override(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.override_protected = false;
		opt
	}

	/// Return the same set of options, but with `propagate` set to `false`.
	#[must_use]
	pub fn without_propagation(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.propagate = false;
		opt
	}

	/// Return the same set of options, but with `validate_scoped` set to `false`.
	#[must_use]
	pub fn without_scoped_validation(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.validate_scoped = false;
		opt
	}

	/// Options used to process a remote context: only the processing mode
	/// and limits are kept.
	#[must_use]
	pub fn for_remote(&self) -> ContextProcessingOptions {
		ContextProcessingOptions {
			processing_mode: self.processing_mode,
			override_protected: false,
			propagate: true,
			validate_scoped: self.validate_scoped,
			remote_context_limit: self.remote_context_limit,
		}
	}
}

impl Default for ContextProcessingOptions {
	fn default() -> ContextProcessingOptions {
		ContextProcessingOptions {
			processing_mode: ProcessingMode::default(),
			override_protected: false,
			propagate: true,
			validate_scoped: true,
			remote_context_limit: DEFAULT_REMOTE_CONTEXT_LIMIT,
		}
	}
}
