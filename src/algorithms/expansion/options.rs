use crate::{
	algorithms::context_processing::{ContextProcessingOptions, DEFAULT_REMOTE_CONTEXT_LIMIT},
	ProcessingMode,
};

/// Expansion options.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpansionOptions {
	/// Sets the processing mode.
	pub processing_mode: ProcessingMode,

	/// Term expansion policy.
	///
	/// Default is `ExpansionPolicy::Standard`.
	pub policy: ExpansionPolicy,

	/// If set to true, input document entries are processed lexicographically.
	/// If false, order is not considered in processing.
	pub ordered: bool,

	/// Expands a frame rather than a document.
	///
	/// Framing keywords are kept and free-floating nodes are not dropped.
	pub frame_expansion: bool,

	/// Report every property or value dropped because it does not expand to
	/// an absolute IRI.
	pub safe_mode: bool,

	/// Maximum number of remote contexts dereferenced.
	pub remote_context_limit: usize,
}

impl ExpansionOptions {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}

	/// Returns the same options with frame expansion enabled.
	pub fn for_frame(self) -> Self {
		Self {
			frame_expansion: true,
			..self
		}
	}
}

impl Default for ExpansionOptions {
	fn default() -> Self {
		Self {
			processing_mode: ProcessingMode::default(),
			policy: ExpansionPolicy::default(),
			ordered: false,
			frame_expansion: false,
			safe_mode: false,
			remote_context_limit: DEFAULT_REMOTE_CONTEXT_LIMIT,
		}
	}
}

impl From<ExpansionOptions> for ContextProcessingOptions {
	fn from(options: ExpansionOptions) -> ContextProcessingOptions {
		ContextProcessingOptions {
			processing_mode: options.processing_mode,
			remote_context_limit: options.remote_context_limit,
			..Default::default()
		}
	}
}

/// Key expansion policy.
///
/// The default behavior of the expansion algorithm
/// is to drop keys that are not defined in the context unless:
///   - there is a vocabulary mapping (`@vocab`) defined in the context; or
///   - the term contains a `:` character.
///
/// In other words, a key that cannot be expanded into an
/// IRI or a blank node identifier is dropped unless it contains a `:` character.
///
/// Sometimes, it is preferable to keep undefined keys in the
/// expanded document, or to forbid them completely by raising an error.
/// You can define your preferred policy using one of this type variant
/// with the [`ExpansionOptions::policy`] field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpansionPolicy {
	/// Relaxed policy.
	///
	/// Undefined keys are always kept in the expanded document, verbatim.
	Relaxed,

	/// Standard policy.
	///
	/// Every key that cannot be expanded into an
	/// IRI or a blank node identifier is dropped unless it contains a `:` character.
	#[default]
	Standard,

	/// Strict policy.
	///
	/// Every key that cannot be expanded into an IRI or a blank node identifier
	/// will raise an error unless the term contains a `:` character.
	Strict,

	/// Strictest policy.
	///
	/// Every key that cannot be expanded into an IRI or a blank node identifier
	/// will raise an error.
	Strictest,
}

impl ExpansionPolicy {
	/// Returns `true` is the policy is `Strict` or `Strictest`.
	pub fn is_strict(&self) -> bool {
		matches!(self, Self::Strict | Self::Strictest)
	}
}
