use std::{fmt, str::FromStr};

use json_syntax::Value;

use crate::{
	algorithms::{
		context_processing::DEFAULT_REMOTE_CONTEXT_LIMIT, CompactionOptions,
		ContextProcessingOptions, ExpansionOptions,
	},
	util::ObjectExt,
	Error, ErrorCode, ProcessingMode,
};

/// Embed policy.
///
/// Decides whether a node matched more than once is embedded or referenced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Embed {
	/// Always embed the node, except when it would create a cycle.
	#[cfg_attr(feature = "serde", serde(rename = "@always"))]
	Always,

	/// Embed the node the first time it is matched, and use references
	/// afterwards.
	///
	/// `@first` is read as an alias of this policy.
	#[default]
	#[cfg_attr(feature = "serde", serde(rename = "@once"))]
	Once,

	/// Embed the node where it is matched last, turning previous
	/// embeddings into references.
	#[cfg_attr(feature = "serde", serde(rename = "@last"))]
	Last,

	/// Never embed, always use references.
	#[cfg_attr(feature = "serde", serde(rename = "@never"))]
	Never,

	/// Embed the same node object everywhere the node is matched.
	#[cfg_attr(feature = "serde", serde(rename = "@link"))]
	Link,
}

impl Embed {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Always => "@always",
			Self::Once => "@once",
			Self::Last => "@last",
			Self::Never => "@never",
			Self::Link => "@link",
		}
	}

	/// Reads an `@embed` value found in a frame.
	///
	/// Booleans are accepted: `true` is `@once` and `false` is `@never`.
	pub fn from_value(value: &Value) -> Result<Self, Error> {
		match value {
			Value::Boolean(true) => Ok(Self::Once),
			Value::Boolean(false) => Ok(Self::Never),
			Value::String(s) => s.parse(),
			Value::Object(o) => match o.value("@value") {
				Some(value) => Self::from_value(value),
				None => Err(ErrorCode::InvalidEmbedValue.into()),
			},
			_ => Err(ErrorCode::InvalidEmbedValue.into()),
		}
	}
}

impl FromStr for Embed {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		match s {
			"@always" => Ok(Self::Always),
			"@once" | "@first" => Ok(Self::Once),
			"@last" => Ok(Self::Last),
			"@never" => Ok(Self::Never),
			"@link" => Ok(Self::Link),
			other => Err(Error::new(
				ErrorCode::InvalidEmbedValue,
				format!("unknown embed policy `{other}`"),
			)),
		}
	}
}

impl fmt::Display for Embed {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

/// Framing options.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramingOptions {
	/// Sets the processing mode.
	pub processing_mode: ProcessingMode,

	/// Default embed policy, overridden by `@embed` in frames.
	pub embed: Embed,

	/// Only keep the properties listed in the frame.
	pub explicit: bool,

	/// Every property of the frame must match.
	pub require_all: bool,

	/// Do not add default values for missing properties.
	pub omit_default: bool,

	/// Return a single node object without top-level `@graph` when possible.
	///
	/// Defaults to `true` in JSON-LD 1.1 and `false` in JSON-LD 1.0.
	pub omit_graph: Option<bool>,

	/// Process entries in lexicographical order.
	pub ordered: bool,

	/// Compact IRIs relative to the document base.
	pub compact_to_relative: bool,

	/// Collapse single-item arrays in the output.
	pub compact_arrays: bool,

	/// Maximum number of remote contexts dereferenced.
	pub remote_context_limit: usize,
}

impl FramingOptions {
	/// Whether the top-level `@graph` is omitted when the result holds a
	/// single node.
	pub fn omit_graph(&self) -> bool {
		self
			.omit_graph
			.unwrap_or(self.processing_mode != ProcessingMode::JsonLd1_0)
	}

	/// Whether blank node identifiers used only once are removed from the
	/// output.
	pub fn prune_blank_node_identifiers(&self) -> bool {
		self.processing_mode != ProcessingMode::JsonLd1_0
	}

	pub fn with_embed(self, embed: Embed) -> Self {
		Self { embed, ..self }
	}

	pub fn with_explicit(self, explicit: bool) -> Self {
		Self { explicit, ..self }
	}

	pub fn with_require_all(self, require_all: bool) -> Self {
		Self {
			require_all,
			..self
		}
	}

	pub fn with_omit_default(self, omit_default: bool) -> Self {
		Self {
			omit_default,
			..self
		}
	}

	pub fn with_omit_graph(self, omit_graph: bool) -> Self {
		Self {
			omit_graph: Some(omit_graph),
			..self
		}
	}
}

impl Default for FramingOptions {
	fn default() -> Self {
		Self {
			processing_mode: ProcessingMode::default(),
			embed: Embed::default(),
			explicit: false,
			require_all: false,
			omit_default: false,
			omit_graph: None,
			ordered: false,
			compact_to_relative: true,
			compact_arrays: true,
			remote_context_limit: DEFAULT_REMOTE_CONTEXT_LIMIT,
		}
	}
}

impl From<FramingOptions> for ExpansionOptions {
	fn from(options: FramingOptions) -> ExpansionOptions {
		ExpansionOptions {
			processing_mode: options.processing_mode,
			ordered: options.ordered,
			remote_context_limit: options.remote_context_limit,
			..Default::default()
		}
	}
}

impl From<FramingOptions> for CompactionOptions {
	fn from(options: FramingOptions) -> CompactionOptions {
		CompactionOptions {
			processing_mode: options.processing_mode,
			compact_to_relative: options.compact_to_relative,
			compact_arrays: options.compact_arrays,
			ordered: options.ordered,
			remote_context_limit: options.remote_context_limit,
		}
	}
}

impl From<FramingOptions> for ContextProcessingOptions {
	fn from(options: FramingOptions) -> ContextProcessingOptions {
		ContextProcessingOptions {
			processing_mode: options.processing_mode,
			remote_context_limit: options.remote_context_limit,
			..Default::default()
		}
	}
}
