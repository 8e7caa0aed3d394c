//! JSON-LD processor.
//!
//! Entry points chaining the algorithms the way the [JSON-LD 1.1 API][1]
//! does.
//!
//! [1]: <https://www.w3.org/TR/json-ld11-api/#the-jsonldprocessor-interface>
use iref::Iri;
use json_syntax::Value;

use crate::{
	algorithms::{
		compaction::{self, embed_context},
		expand_iri, expansion, flattening,
		framing::{compact_framed, Framer},
		process_context, Compactor, Environment, ProcessingEnvironment,
	},
	blank::Generator,
	util::{object1, ObjectExt},
	ActiveContext, Error, Loader, RemoteDocument, RemoteDocumentReference, Warning,
};

mod options;

pub use options::*;

/// Result of a processing function, with the warnings emitted while
/// processing.
#[derive(Debug)]
pub struct Processed<T> {
	pub value: T,
	pub warnings: Vec<Warning>,
}

impl<T> Processed<T> {
	pub fn new(value: T, warnings: Vec<Warning>) -> Self {
		Self { value, warnings }
	}

	pub fn into_value(self) -> T {
		self.value
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Processed<U> {
		Processed {
			value: f(self.value),
			warnings: self.warnings,
		}
	}
}

/// Returns the `@context` entry of a context document, or the document
/// itself.
fn context_of(document: &Value) -> &Value {
	match document {
		Value::Object(object) => object.value("@context").unwrap_or(document),
		document => document,
	}
}

/// Application Programming Interface.
///
/// The `JsonLdProcessor` interface is the high-level programming structure
/// that developers use to access the JSON-LD transformation methods.
///
/// It is implemented for [`RemoteDocument`] and for bare JSON values (without
/// URL).
pub trait JsonLdProcessor {
	/// URL of the document, if known.
	fn url(&self) -> Option<&Iri>;

	/// JSON content of the document.
	fn json(&self) -> &Value;

	/// Expands the document.
	///
	/// The result is an array of node objects in expanded form.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#dom-jsonldprocessor-expand>.
	fn expand(&self, loader: &impl Loader, options: Options) -> Result<Processed<Value>, Error> {
		let mut env = Environment::new(loader);
		let expanded = expand_in(&mut env, self.url(), self.json(), &options)?;
		Ok(Processed::new(expanded, env.into_warnings()))
	}

	/// Compacts the document with the given context.
	///
	/// `context` is either a context, or a document with a `@context` entry,
	/// possibly behind an IRI. Its URL, if any, is used to resolve relative
	/// context references.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#dom-jsonldprocessor-compact>.
	fn compact(
		&self,
		context: &RemoteDocumentReference,
		loader: &impl Loader,
		options: Options,
	) -> Result<Processed<Value>, Error> {
		let context = context.loaded_with(loader).map_err(Error::ContextLoading)?;
		let mut env = Environment::new(loader);
		let expanded = expand_in(&mut env, self.url(), self.json(), &options.clone().unordered())?;

		let context_value = context_of(context.document());
		let active_context = compaction_context(
			&mut env,
			self.url(),
			context_value,
			context.url().or(options.base.as_deref()),
			&options,
		)?;

		let compacted = compaction::compact(
			&mut env,
			&active_context,
			&expanded,
			options.compaction_options(),
		)?;

		Ok(Processed::new(
			embed_context(compacted, context_value),
			env.into_warnings(),
		))
	}

	/// Flattens the document, and compacts it with `context` if any.
	///
	/// Without context, the result is an array of node objects. With a
	/// context, the result always has a top-level `@graph` entry.
	///
	/// See <https://www.w3.org/TR/json-ld11-api/#dom-jsonldprocessor-flatten>.
	fn flatten(
		&self,
		context: Option<&RemoteDocumentReference>,
		generator: &mut impl Generator,
		loader: &impl Loader,
		options: Options,
	) -> Result<Processed<Value>, Error> {
		let mut env = Environment::new(loader);
		let expanded = expand_in(&mut env, self.url(), self.json(), &options.clone().unordered())?;
		let flattened = flattening::flatten(&expanded, generator, options.ordered)?;

		let Some(context) = context else {
			return Ok(Processed::new(flattened, env.into_warnings()));
		};

		let context = context.loaded_with(loader).map_err(Error::ContextLoading)?;
		let context_value = context_of(context.document());
		let active_context = compaction_context(
			&mut env,
			self.url(),
			context_value,
			context.url().or(options.base.as_deref()),
			&options,
		)?;

		let compactor = Compactor::new(&active_context, options.compaction_options());
		let graph = compactor.alias("@graph")?;
		let compacted = match compactor.compact_element(&mut env, &flattened)? {
			Value::Array(items) => Value::Object(object1(&graph, Value::Array(items))),
			Value::Object(node) if node.has(&graph) => Value::Object(node),
			Value::Null => Value::Object(object1(&graph, Value::Array(Vec::new()))),
			node => Value::Object(object1(&graph, Value::Array(vec![node]))),
		};

		Ok(Processed::new(
			embed_context(compacted, context_value),
			env.into_warnings(),
		))
	}

	/// Frames the document with the given frame.
	///
	/// The result is compacted with the context of the frame.
	///
	/// See <https://www.w3.org/TR/json-ld11-framing/#dom-jsonldprocessor-frame>.
	fn frame(
		&self,
		frame: &RemoteDocumentReference,
		generator: &mut impl Generator,
		loader: &impl Loader,
		options: Options,
	) -> Result<Processed<Value>, Error> {
		let frame = frame.loaded_with(loader).map_err(Error::DocumentLoading)?;
		let mut env = Environment::new(loader);
		let expansion_options = options.clone().unordered();
		let expanded = expand_in(&mut env, self.url(), self.json(), &expansion_options)?;

		let frame_base = frame.url().or(options.base.as_deref());
		let frame_context = match frame.document() {
			Value::Object(object) => object.value("@context").cloned().unwrap_or(Value::Null),
			_ => Value::Null,
		};

		let frame_options = expansion_options.expansion_options().for_frame();
		let base_context = base_context(&mut env, frame_base, &options)?;
		let expanded_frame = expansion::expand(
			&mut env,
			&base_context,
			frame.document(),
			frame_base,
			frame_options,
		)?;

		let active_context = compaction_context(
			&mut env,
			self.url(),
			&frame_context,
			frame_base,
			&options,
		)?;

		// Frames with a top-level `@graph` entry match the default graph
		// only.
		let default_graph = match frame.document() {
			Value::Object(object) => object.key_strs().any(|key| {
				expand_iri(&mut env, &active_context, key, false, true).as_deref() == Some("@graph")
			}),
			_ => false,
		};

		let framing_options = options.framing_options();
		let framed = Framer::new(framing_options)
			.with_default_graph(default_graph)
			.frame(&expanded, &expanded_frame, generator)?;

		log::debug!("compacting framed document");
		let compacted = compact_framed(&mut env, &active_context, framed, framing_options)?;

		Ok(Processed::new(
			embed_context(compacted, &frame_context),
			env.into_warnings(),
		))
	}
}

impl JsonLdProcessor for RemoteDocument {
	fn url(&self) -> Option<&Iri> {
		RemoteDocument::url(self)
	}

	fn json(&self) -> &Value {
		self.document()
	}
}

impl JsonLdProcessor for Value {
	fn url(&self) -> Option<&Iri> {
		None
	}

	fn json(&self) -> &Value {
		self
	}
}

/// Initial active context, with the `expand_context` option applied.
fn base_context(
	env: &mut impl ProcessingEnvironment,
	url: Option<&Iri>,
	options: &Options,
) -> Result<ActiveContext, Error> {
	let base_iri = options.base.clone().or_else(|| url.map(ToOwned::to_owned));
	let active_context = ActiveContext::new(base_iri);

	match &options.expand_context {
		Some(expand_context) => process_context(
			env,
			&active_context,
			context_of(expand_context),
			active_context.original_base_url(),
			options.context_processing_options(),
		),
		None => Ok(active_context),
	}
}

/// Expands a document with the processor options.
fn expand_in(
	env: &mut impl ProcessingEnvironment,
	url: Option<&Iri>,
	document: &Value,
	options: &Options,
) -> Result<Value, Error> {
	log::debug!("expanding document {:?}", url.map(Iri::as_str));
	let active_context = base_context(env, url, options)?;
	expansion::expand(
		env,
		&active_context,
		document,
		url.or(options.base.as_deref()),
		options.expansion_options(),
	)
}

/// Active context used to compact a document.
///
/// Its base IRI is the `base` option, or the document URL when compacting to
/// relative IRIs.
fn compaction_context(
	env: &mut impl ProcessingEnvironment,
	url: Option<&Iri>,
	context: &Value,
	context_base: Option<&Iri>,
	options: &Options,
) -> Result<ActiveContext, Error> {
	let base_iri = match &options.base {
		Some(base) => Some(base.clone()),
		None if options.compact_to_relative => url.map(ToOwned::to_owned),
		None => None,
	};

	process_context(
		env,
		&ActiveContext::new(base_iri),
		context,
		context_base,
		options.context_processing_options(),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{blank::Blank, util::deep_equals, NoLoader};
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn document(s: &str) -> RemoteDocument {
		RemoteDocument::new(
			Some(Iri::new("http://example.org/doc").unwrap().to_owned()),
			parse(s),
		)
	}

	#[test]
	fn expand_with_expand_context() {
		let options = Options::default()
			.with_expand_context(parse(r#"{"@context": {"@vocab": "http://example.org/"}}"#));
		let expanded = document(r#"{"name": "x"}"#)
			.expand(&NoLoader, options)
			.unwrap();

		assert!(deep_equals(
			&expanded.value,
			&parse(r#"[{"http://example.org/name": [{"@value": "x"}]}]"#)
		));
		assert!(expanded.warnings.is_empty())
	}

	#[test]
	fn flatten_with_context_uses_graph() {
		let flattened = document(
			r#"{"@context": {"@vocab": "http://example.org/"}, "@id": "http://example.org/a", "p": "x"}"#,
		)
		.flatten(
			Some(&parse(r#"{"@vocab": "http://example.org/"}"#).into()),
			&mut Blank::new(),
			&NoLoader,
			Options::default(),
		)
		.unwrap();

		assert!(deep_equals(
			&flattened.value,
			&parse(
				r#"{
					"@context": {"@vocab": "http://example.org/"},
					"@graph": [{"@id": "a", "p": "x"}]
				}"#
			)
		))
	}

	#[test]
	fn frame_top_level_graph_selects_default_graph() {
		let input = document(
			r#"{
				"@context": {"@vocab": "http://example.org/"},
				"@id": "http://example.org/g",
				"@graph": {"@id": "http://example.org/inner", "p": "x"}
			}"#,
		);

		let merged = input
			.frame(
				&document(r#"{"@context": {"@vocab": "http://example.org/"}, "p": {}}"#).into(),
				&mut Blank::new(),
				&NoLoader,
				Options::default(),
			)
			.unwrap();
		assert!(deep_equals(
			&merged.value,
			&parse(
				r#"{
					"@context": {"@vocab": "http://example.org/"},
					"@id": "inner",
					"p": "x"
				}"#
			)
		));

		let default = input
			.frame(
				&document(r#"{"@context": {"@vocab": "http://example.org/"}, "@graph": {"p": {}}}"#)
					.into(),
				&mut Blank::new(),
				&NoLoader,
				Options::default(),
			)
			.unwrap();
		assert!(deep_equals(
			&default.value,
			&parse(r#"{"@context": {"@vocab": "http://example.org/"}}"#)
		))
	}
}
