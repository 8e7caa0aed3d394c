use langtag::{InvalidLangTag, LangTag};

/// Non-fatal processing warning.
///
/// Warnings are raised for malformed but tolerable input. Processing then
/// continues with a fallback (the offending term or value is ignored or kept
/// verbatim).
#[derive(Debug, thiserror::Error)]
pub enum Warning {
	#[error("keyword-like term `{0}`")]
	KeywordLikeTerm(String),

	#[error("keyword-like value `{0}`")]
	KeywordLikeValue(String),

	#[error("malformed IRI `{0}`")]
	MalformedIri(String),

	#[error("empty term")]
	EmptyTerm,

	#[error("blank node identifier `{0}` used as property")]
	BlankNodeIdProperty(String),

	#[error("invalid language tag `{0}`: {1}")]
	MalformedLanguageTag(String, InvalidLangTag<String>),

	#[error("property `{0}` dropped: it does not expand to an absolute IRI")]
	DroppedProperty(String),

	#[error("value `{0}` dropped: it does not expand to an absolute IRI")]
	DroppedValue(String),
}

impl Warning {
	/// Short code identifying the kind of warning.
	pub fn code(&self) -> &'static str {
		match self {
			Self::KeywordLikeTerm(_) => "keyword-like term",
			Self::KeywordLikeValue(_) => "keyword-like value",
			Self::MalformedIri(_) => "malformed IRI",
			Self::EmptyTerm => "empty term",
			Self::BlankNodeIdProperty(_) => "blank node identifier property",
			Self::MalformedLanguageTag(_, _) => "malformed language tag",
			Self::DroppedProperty(_) => "dropped property",
			Self::DroppedValue(_) => "dropped value",
		}
	}
}

/// Returns a warning if the given language tag is not a well-formed BCP47
/// tag.
pub fn check_language_tag(tag: &str) -> Option<Warning> {
	LangTag::new(tag).err().map(|InvalidLangTag(s)| {
		Warning::MalformedLanguageTag(tag.to_owned(), InvalidLangTag(s.to_owned()))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn language_tags() {
		assert!(check_language_tag("en-US").is_none());
		assert!(matches!(
			check_language_tag("not a tag"),
			Some(Warning::MalformedLanguageTag(_, _))
		))
	}
}
