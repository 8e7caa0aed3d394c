use iref::IriBuf;

use crate::algorithms::{
	context_processing::DEFAULT_REMOTE_CONTEXT_LIMIT, CompactionOptions, ContextProcessingOptions,
	Embed, ExpansionOptions, ExpansionPolicy, FramingOptions,
};
use crate::ProcessingMode;

/// JSON-LD Processor options.
#[derive(Clone, Debug)]
pub struct Options {
	/// The base IRI to use when expanding or compacting the document.
	///
	/// If set, this overrides the input document's IRI.
	pub base: Option<IriBuf>,

	/// If set to true, the JSON-LD processor replaces arrays with just one element with that element during compaction.
	///
	/// If set to false, all arrays will remain arrays even if they have just one element.
	///
	/// Defaults to `true`.
	pub compact_arrays: bool,

	/// Determines if IRIs are compacted relative to the base option or document
	/// location when compacting.
	///
	/// Defaults to `true`.
	pub compact_to_relative: bool,

	/// A context that is used to initialize the active context when expanding a document.
	pub expand_context: Option<json_syntax::Value>,

	/// If set to `true`, certain algorithm processing steps where indicated are
	/// ordered lexicographically.
	///
	/// If `false`, order is not considered in processing.
	///
	/// Defaults to `false`.
	pub ordered: bool,

	/// Sets the processing mode.
	///
	/// Defaults to `ProcessingMode::JsonLd1_1`.
	pub processing_mode: ProcessingMode,

	/// Reports every property and value dropped during expansion because it
	/// does not expand to an absolute IRI.
	pub safe_mode: bool,

	/// Term expansion policy, passed to the document expansion algorithm.
	pub expansion_policy: ExpansionPolicy,

	/// Maximum number of remote contexts dereferenced while processing a
	/// single context.
	pub remote_context_limit: usize,

	/// Default embed policy used by framing.
	pub embed: Embed,

	/// Only output the properties listed in frames.
	pub explicit: bool,

	/// Frames match only when all their properties match.
	pub require_all: bool,

	/// Do not add default values while framing.
	pub omit_default: bool,

	/// Omit the top-level `@graph` of framed documents holding a single
	/// node.
	///
	/// Defaults to `true` in JSON-LD 1.1.
	pub omit_graph: Option<bool>,
}

impl Options {
	/// Returns these options with the `ordered` flag set to `false`.
	///
	/// This means entries will not be ordered by keys before being processed.
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}

	/// Returns these options with the `expand_context` set to the given
	/// `context`.
	pub fn with_expand_context(self, context: json_syntax::Value) -> Self {
		Self {
			expand_context: Some(context),
			..self
		}
	}

	/// Returns these options with the given base IRI.
	pub fn with_base(self, base: IriBuf) -> Self {
		Self {
			base: Some(base),
			..self
		}
	}

	/// Builds options for the context processing algorithm from these options.
	pub fn context_processing_options(&self) -> ContextProcessingOptions {
		ContextProcessingOptions {
			processing_mode: self.processing_mode,
			remote_context_limit: self.remote_context_limit,
			..Default::default()
		}
	}

	/// Builds options for the expansion algorithm from these options.
	pub fn expansion_options(&self) -> ExpansionOptions {
		ExpansionOptions {
			processing_mode: self.processing_mode,
			ordered: self.ordered,
			policy: self.expansion_policy,
			frame_expansion: false,
			safe_mode: self.safe_mode,
			remote_context_limit: self.remote_context_limit,
		}
	}

	/// Builds options for the compaction algorithm from these options.
	pub fn compaction_options(&self) -> CompactionOptions {
		CompactionOptions {
			processing_mode: self.processing_mode,
			compact_to_relative: self.compact_to_relative,
			compact_arrays: self.compact_arrays,
			ordered: self.ordered,
			remote_context_limit: self.remote_context_limit,
		}
	}

	/// Builds options for the framing algorithm from these options.
	pub fn framing_options(&self) -> FramingOptions {
		FramingOptions {
			processing_mode: self.processing_mode,
			embed: self.embed,
			explicit: self.explicit,
			require_all: self.require_all,
			omit_default: self.omit_default,
			omit_graph: self.omit_graph,
			ordered: self.ordered,
			compact_to_relative: self.compact_to_relative,
			compact_arrays: self.compact_arrays,
			remote_context_limit: self.remote_context_limit,
		}
	}
}

impl Default for Options {
	fn default() -> Self {
		Self {
			base: None,
			compact_arrays: true,
			compact_to_relative: true,
			expand_context: None,
			ordered: false,
			processing_mode: ProcessingMode::JsonLd1_1,
			safe_mode: false,
			expansion_policy: ExpansionPolicy::default(),
			remote_context_limit: DEFAULT_REMOTE_CONTEXT_LIMIT,
			embed: Embed::default(),
			explicit: false,
			require_all: false,
			omit_default: false,
			omit_graph: None,
		}
	}
}
