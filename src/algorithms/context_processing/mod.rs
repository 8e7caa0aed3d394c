//! JSON-LD context processing algorithm.
//!
//! See <https://www.w3.org/TR/json-ld11-api/#context-processing-algorithm>.
use iref::{Iri, IriBuf};
use json_syntax::{Object, Value};

mod define;
mod iri;
mod merged;
mod options;
mod stack;

use define::DefinedTerms;
pub use iri::expand_iri;
use merged::Merged;
pub use options::{ContextProcessingOptions, DEFAULT_REMOTE_CONTEXT_LIMIT};
pub use stack::ProcessingStack;

use crate::{
	algorithms::ProcessingEnvironment,
	util::{as_array, is_absolute_iri, resolve_iri, ObjectExt},
	ActiveContext, Direction, Error, ErrorCode, Loader, ProcessingMode,
};

/// Context entries that are not term definitions.
const CONTEXT_KEYWORDS: [&str; 8] = [
	"@base",
	"@direction",
	"@import",
	"@language",
	"@propagate",
	"@protected",
	"@version",
	"@vocab",
];

/// Processes the `local_context` on top of `active_context`.
///
/// Returns the new active context. The input context is left untouched.
///
/// See <https://www.w3.org/TR/json-ld11-api/#context-processing-algorithm>.
pub fn process_context(
	env: &mut impl ProcessingEnvironment,
	active_context: &ActiveContext,
	local_context: &Value,
	base_url: Option<&Iri>,
	options: ContextProcessingOptions,
) -> Result<ActiveContext, Error> {
	ContextProcessor {
		remote_contexts: ProcessingStack::new(),
		active_context,
		base_url,
		options,
	}
	.process(env, local_context)
}

impl ActiveContext {
	/// Processes the given local context on top of this one, with the
	/// default options.
	pub fn process(
		&self,
		env: &mut impl ProcessingEnvironment,
		local_context: &Value,
		base_url: Option<&Iri>,
	) -> Result<ActiveContext, Error> {
		process_context(
			env,
			self,
			local_context,
			base_url,
			ContextProcessingOptions::default(),
		)
	}
}

struct ContextProcessor<'a> {
	remote_contexts: ProcessingStack,
	active_context: &'a ActiveContext,
	base_url: Option<&'a Iri>,
	options: ContextProcessingOptions,
}

impl<'a> ContextProcessor<'a> {
	fn for_sub_context<'b>(
		&self,
		active_context: &'b ActiveContext,
		base_url: Option<&'b Iri>,
		options: ContextProcessingOptions,
	) -> ContextProcessor<'b> {
		ContextProcessor {
			remote_contexts: self.remote_contexts.clone(),
			active_context,
			base_url,
			options,
		}
	}

	fn is_1_0(&self) -> bool {
		self.options.processing_mode == ProcessingMode::JsonLd1_0
	}

	fn process(
		mut self,
		env: &mut impl ProcessingEnvironment,
		local_context: &Value,
	) -> Result<ActiveContext, Error> {
		// 1) Initialize result to the result of cloning active context.
		let mut result = self.active_context.clone();

		// 2) If `local_context` is an object containing the member @propagate,
		// its value MUST be boolean true or false, set `propagate` to that value.
		if let Value::Object(def) = local_context {
			if let Some(propagate) = def.value("@propagate") {
				if self.is_1_0() {
					return Err(Error::new(ErrorCode::InvalidContextEntry, "@propagate"));
				}

				match propagate {
					Value::Boolean(b) => self.options.propagate = *b,
					_ => return Err(ErrorCode::InvalidPropagateValue.into()),
				}
			}
		}

		// 3) If propagate is false, and result does not have a previous context,
		// set previous context in result to active context.
		if !self.options.propagate && result.previous_context().is_none() {
			result.set_previous_context(self.active_context.clone());
		}

		// 4) If local context is not an array, set it to an array containing only local context.
		// 5) For each item context in local context:
		for context in as_array(local_context) {
			match context {
				// 5.1) If context is null:
				Value::Null => {
					// If `override_protected` is false and `active_context` contains any protected term
					// definitions, an invalid context nullification has been detected and processing
					// is aborted.
					if !self.options.override_protected && result.has_protected_items() {
						return Err(ErrorCode::InvalidContextNullification.into());
					}

					// Otherwise, initialize result as a newly-initialized active context, setting
					// both `base_iri` and `original_base_url` to the value of `original_base_url`
					// in active context, and, if `propagate` is `false`, `previous_context` in
					// `result` to the previous value of `result`.
					let previous_result = result;
					result = ActiveContext::new(
						self.active_context
							.original_base_url()
							.map(ToOwned::to_owned),
					);

					if !self.options.propagate {
						result.set_previous_context(previous_result);
					}
				}

				// 5.2) If context is a string,
				Value::String(reference) => {
					result = self.process_remote(env, result, reference)?;
				}

				// 5.3) Context definition.
				Value::Object(definition) => {
					self.process_definition(env, &mut result, definition)?;
				}

				// 5.4) Anything else is an invalid local context.
				_ => return Err(ErrorCode::InvalidLocalContext.into()),
			}
		}

		Ok(result)
	}

	fn process_remote(
		&mut self,
		env: &mut impl ProcessingEnvironment,
		result: ActiveContext,
		reference: &str,
	) -> Result<ActiveContext, Error> {
		// 5.2.1) Initialize `context` to the result of resolving context against
		// the base URL.
		let url = resolve_iri(reference, self.base_url).ok_or_else(|| {
			Error::new(
				ErrorCode::LoadingRemoteContextFailed,
				format!("invalid context reference `{reference}`"),
			)
		})?;

		// 5.2.2) If `validate_scoped_context` is false, and `remote_contexts`
		// already includes `context` do not process context further and continue
		// to any next context in `local_context`.
		if self.remote_contexts.contains(&url) {
			if self.is_1_0() {
				return Err(Error::new(ErrorCode::RecursiveContextInclusion, url));
			}

			if !self.options.validate_scoped {
				return Ok(result);
			}
		}

		// 5.2.3) If the number of entries in the `remote_contexts` array exceeds
		// a processor defined limit, a context overflow error has been detected.
		if self.remote_contexts.len() >= self.options.remote_context_limit {
			return Err(Error::new(ErrorCode::ContextOverflow, url));
		}

		self.remote_contexts.push(url.clone());

		// 5.2.4) Dereference the remote context.
		log::debug!("loading remote context `{url}`");
		let remote = env.loader().load(&url).map_err(Error::ContextLoading)?;

		// 5.2.5) The loaded document must be an object with an `@context` entry.
		let loaded_context = match remote.document() {
			Value::Object(document) => document.value("@context"),
			_ => None,
		}
		.ok_or_else(|| Error::new(ErrorCode::InvalidRemoteContext, &url))?;

		let base_url: IriBuf = remote.url().map(ToOwned::to_owned).unwrap_or(url);

		// 5.2.6) Set result to the result of recursively calling this algorithm,
		// passing result for active context, loaded context for local context,
		// the documentUrl of context document for base URL, and a copy of
		// remote contexts.
		let options = self.options.for_remote();
		self.for_sub_context(&result, Some(&base_url), options)
			.process(env, loaded_context)
	}

	fn import(
		&self,
		env: &mut impl ProcessingEnvironment,
		value: &Value,
	) -> Result<Object, Error> {
		// 5.6.1) If processing mode is json-ld-1.0, an invalid context entry
		// error has been detected.
		if self.is_1_0() {
			return Err(Error::new(ErrorCode::InvalidContextEntry, "@import"));
		}

		// 5.6.2) If value is not a string, an invalid @import value error has
		// been detected.
		let Value::String(reference) = value else {
			return Err(ErrorCode::InvalidImportValue.into());
		};

		// 5.6.3) Initialize import to the result of resolving the value of
		// @import against base URL.
		let url = resolve_iri(reference, self.base_url)
			.ok_or_else(|| Error::new(ErrorCode::InvalidImportValue, reference.as_str()))?;

		// 5.6.4) Dereference import.
		log::debug!("importing context `{url}`");
		let remote = env.loader().load(&url).map_err(Error::ContextLoading)?;

		// 5.6.6) If the dereferenced document has no top-level map with an
		// @context entry, or if the value of @context is not a context
		// definition, an invalid remote context has been detected.
		let Value::Object(mut document) = remote.into_document() else {
			return Err(Error::new(ErrorCode::InvalidRemoteContext, &url));
		};

		let Some(Value::Object(import_context)) = document.take("@context") else {
			return Err(Error::new(ErrorCode::InvalidRemoteContext, &url));
		};

		// 5.6.7) If import context has a @import entry, an invalid context entry
		// error has been detected.
		if import_context.has("@import") {
			return Err(Error::new(ErrorCode::InvalidContextEntry, "nested @import"));
		}

		Ok(import_context)
	}

	fn process_definition(
		&self,
		env: &mut impl ProcessingEnvironment,
		result: &mut ActiveContext,
		context: &Object,
	) -> Result<(), Error> {
		// 5.5) If context has an @version entry:
		if let Some(version) = context.value("@version") {
			// 5.5.1) If the associated value is not 1.1, an invalid @version
			// value has been detected.
			match version {
				Value::Number(n) if n.as_str() == "1.1" => (),
				_ => return Err(ErrorCode::InvalidVersionValue.into()),
			}

			// 5.5.2) If processing mode is set to json-ld-1.0, a processing mode
			// conflict error has been detected.
			if self.is_1_0() {
				return Err(ErrorCode::ProcessingModeConflict.into());
			}
		}

		// 5.6) If context has an @import entry:
		let imported = match context.value("@import") {
			Some(value) => Some(self.import(env, value)?),
			None => None,
		};

		let context = Merged::new(context, imported);

		// 5.7) If context has a @base entry and remote contexts is empty.
		if let Some(value) = context.get("@base") {
			if self.remote_contexts.is_empty() {
				match value {
					// 5.7.2) If value is null, remove the base IRI of result.
					Value::Null => result.set_base_iri(None),
					Value::String(value) => {
						let base = if is_absolute_iri(value) {
							// 5.7.3) Otherwise, if value is an IRI, the base
							// IRI of result is set to value.
							resolve_iri(value, None)
						} else {
							// 5.7.4) Otherwise, if value is a relative IRI
							// reference and the base IRI of result is not
							// null, set the base IRI of result to the result
							// of resolving value against the current base IRI.
							match result.base_iri() {
								Some(current) => resolve_iri(value, Some(current)),
								None => None,
							}
						};

						match base {
							Some(base) => result.set_base_iri(Some(base)),
							// 5.7.5) Otherwise, an invalid base IRI error has
							// been detected.
							None => {
								return Err(Error::new(ErrorCode::InvalidBaseIri, value.as_str()))
							}
						}
					}
					_ => return Err(ErrorCode::InvalidBaseIri.into()),
				}
			}
		}

		// 5.8) If context has a @vocab entry:
		if let Some(value) = context.get("@vocab") {
			match value {
				// 5.8.2) If value is null, remove any vocabulary mapping from result.
				Value::Null => result.set_vocabulary(None),
				// 5.8.3) Otherwise, if value is an IRI or blank node identifier,
				// the vocabulary mapping of result is set to the result of IRI
				// expanding value using true for document relative.
				Value::String(value) => {
					if crate::keyword::is_keyword_like(value) {
						return Err(Error::new(ErrorCode::InvalidVocabMapping, value.as_str()));
					}

					match expand_iri(env, result, value, true, true) {
						Some(vocab)
							if !self.is_1_0()
								|| is_absolute_iri(&vocab)
								|| crate::blank::is_blank_id(&vocab) =>
						{
							result.set_vocabulary(Some(vocab))
						}
						_ => {
							return Err(Error::new(ErrorCode::InvalidVocabMapping, value.as_str()))
						}
					}
				}
				_ => return Err(ErrorCode::InvalidVocabMapping.into()),
			}
		}

		// 5.9) If context has a @language entry:
		if let Some(value) = context.get("@language") {
			match value {
				// 5.9.2) If value is null, remove any default language from result.
				Value::Null => result.set_default_language(None),
				// 5.9.3) Otherwise, if value is a string, the default language of
				// result is set to value.
				Value::String(tag) => {
					if let Some(w) = crate::warning::check_language_tag(tag) {
						env.warn(w)
					}

					result.set_default_language(Some(tag.to_string()))
				}
				_ => return Err(ErrorCode::InvalidDefaultLanguage.into()),
			}
		}

		// 5.10) If context has a @direction entry:
		if let Some(value) = context.get("@direction") {
			// 5.10.1) If processing mode is json-ld-1.0, an invalid context entry
			// error has been detected.
			if self.is_1_0() {
				return Err(Error::new(ErrorCode::InvalidContextEntry, "@direction"));
			}

			match value {
				Value::Null => result.set_default_base_direction(None),
				Value::String(dir) => match Direction::try_from(dir.as_str()) {
					Ok(dir) => result.set_default_base_direction(Some(dir)),
					Err(_) => {
						return Err(Error::new(ErrorCode::InvalidBaseDirection, dir.as_str()))
					}
				},
				_ => return Err(ErrorCode::InvalidBaseDirection.into()),
			}
		}

		// 5.11) If context has a @propagate entry, it was validated in step 2.
		if context.contains("@propagate") && self.is_1_0() {
			return Err(Error::new(ErrorCode::InvalidContextEntry, "@propagate"));
		}

		// The @protected entry, if any, must be a boolean. Term definitions
		// read it while being created.
		if matches!(context.get("@protected"), Some(v) if !matches!(v, Value::Boolean(_))) {
			return Err(ErrorCode::InvalidProtectedValue.into());
		}

		// 5.12) Create a map `defined` to keep track of whether or not a term
		// has already been defined or is currently being defined during
		// recursion.
		let mut defined = DefinedTerms::new();

		// 5.13) For each key-value pair in context where key is not @base,
		// @direction, @import, @language, @propagate, @protected, @version, or
		// @vocab, invoke the Create Term Definition algorithm.
		for key in context.keys() {
			if !CONTEXT_KEYWORDS.contains(&key) {
				self.define(env, result, &context, key, &mut defined)?;
			}
		}

		Ok(())
	}
}
