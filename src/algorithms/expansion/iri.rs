use super::Expander;
use crate::{
	algorithms::{context_processing::expand_iri, ProcessingEnvironment},
	blank::is_blank_id,
	keyword::is_keyword,
	util::is_absolute_iri,
	ActiveContext, Error, ErrorCode, ExpansionPolicy, Keyword, Warning,
};

impl<'a> Expander<'a> {
	/// Expands an entry key according to the expansion policy.
	///
	/// Returns `None` if the entry must be dropped.
	pub(super) fn expand_key(
		&self,
		env: &mut impl ProcessingEnvironment,
		key: &str,
	) -> Result<Option<String>, Error> {
		// Framing keywords are only meaningful in frames.
		if self.options.frame_expansion && Keyword::try_from(key).is_ok_and(|k| k.is_framing()) {
			return Ok(Some(key.to_owned()));
		}

		let Some(expanded) = expand_iri(env, self.active_context, key, false, true) else {
			return Ok(None);
		};

		if is_keyword(&expanded) {
			return Ok(Some(expanded));
		}

		if expanded.contains(':') {
			let is_blank = is_blank_id(&expanded);
			if self.options.policy == ExpansionPolicy::Strictest
				&& !is_blank && !is_absolute_iri(&expanded)
			{
				return Err(Error::new(ErrorCode::KeyExpansionFailed, key));
			}

			if is_blank {
				env.warn(Warning::BlankNodeIdProperty(expanded.clone()))
			}

			return Ok(Some(expanded));
		}

		match self.options.policy {
			ExpansionPolicy::Relaxed => Ok(Some(expanded)),
			ExpansionPolicy::Standard => {
				if self.options.safe_mode {
					env.warn(Warning::DroppedProperty(key.to_owned()))
				}

				Ok(None)
			}
			ExpansionPolicy::Strict | ExpansionPolicy::Strictest => {
				Err(Error::new(ErrorCode::KeyExpansionFailed, key))
			}
		}
	}

	/// Expands the value of an `@id` entry.
	pub(super) fn expand_id(&self, env: &mut impl ProcessingEnvironment, value: &str) -> Option<String> {
		let id = expand_iri(env, self.active_context, value, true, false)?;
		self.check_value(env, id)
	}

	/// Expands a value of an `@type` entry, using the type-scoped context.
	pub(super) fn expand_type(
		&self,
		env: &mut impl ProcessingEnvironment,
		type_scoped_context: &ActiveContext,
		value: &str,
	) -> Option<String> {
		let typ = expand_iri(env, type_scoped_context, value, true, true)?;
		self.check_value(env, typ)
	}

	/// In safe mode, drops the values that are not absolute IRIs or blank
	/// node identifiers.
	fn check_value(&self, env: &mut impl ProcessingEnvironment, value: String) -> Option<String> {
		if self.options.safe_mode
			&& !is_keyword(&value)
			&& !is_blank_id(&value)
			&& !is_absolute_iri(&value)
		{
			env.warn(Warning::DroppedValue(value));
			None
		} else {
			Some(value)
		}
	}
}
