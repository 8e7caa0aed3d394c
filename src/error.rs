//! Processing errors.
use std::fmt;

use crate::LoadError;

/// JSON-LD error code.
///
/// See <https://www.w3.org/TR/json-ld11-api/#jsonlderrorcode>.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
	/// Two keys expanding to the same keyword (typically a keyword and one of
	/// its aliases) appear in the same object.
	CollidingKeywords,

	/// The same node is given different `@index` values.
	ConflictingIndexes,

	/// Too many remote contexts were dereferenced.
	ContextOverflow,

	/// Term definitions refer to each other in a loop.
	CyclicIriMapping,

	/// The value of an `@id` entry is not a string.
	InvalidIdValue,

	/// The value of `@import` is not a string resolving to a context.
	InvalidImportValue,

	/// An `@included` block is not made of node objects.
	InvalidIncludedValue,

	/// The value of an `@index` entry is not a string.
	InvalidIndexValue,

	/// The value of `@nest` is invalid.
	InvalidNestValue,

	/// The value of `@prefix` is invalid.
	InvalidPrefixValue,

	/// The value of `@propagate` is not a boolean.
	InvalidPropagateValue,

	/// The value of `@protected` is not a boolean.
	InvalidProtectedValue,

	/// The value of an `@reverse` entry is not an object.
	InvalidReverseValue,

	/// The value of `@version` is not `1.1`.
	InvalidVersionValue,

	/// The value of `@direction` is neither `"ltr"`, `"rtl"` nor null.
	InvalidBaseDirection,

	/// The value of `@base` is neither an IRI nor null.
	InvalidBaseIri,

	/// The value of `@container` is not a legal combination of container
	/// keywords.
	InvalidContainerMapping,

	/// A context entry is not allowed in the current processing mode.
	InvalidContextEntry,

	/// A context holding protected terms was nullified.
	InvalidContextNullification,

	/// The default language is neither a string nor null.
	InvalidDefaultLanguage,

	/// A term has an invalid or missing IRI mapping.
	InvalidIriMapping,

	/// A JSON literal is invalid.
	InvalidJsonLiteral,

	/// A keyword alias definition is invalid.
	InvalidKeywordAlias,

	/// A language map value is neither a string, null nor an array of those.
	InvalidLanguageMapValue,

	/// The `@language` entry of a term definition is neither a string nor
	/// null.
	InvalidLanguageMapping,

	/// A language-tagged string has an invalid language.
	InvalidLanguageTaggedString,

	/// A number or boolean was tagged with a language.
	InvalidLanguageTaggedValue,

	/// A local context is neither null, a string, an object nor an array.
	InvalidLocalContext,

	/// A remote document does not hold a valid context.
	InvalidRemoteContext,

	/// A reverse property definition is invalid.
	InvalidReverseProperty,

	/// A reverse property map contains keywords other than `@context`.
	InvalidReversePropertyMap,

	/// A reverse property value is not a node object.
	InvalidReversePropertyValue,

	/// A scoped context is invalid.
	InvalidScopedContext,

	/// A set or list object has disallowed entries.
	InvalidSetOrListObject,

	/// A term definition is invalid.
	InvalidTermDefinition,

	/// The `@type` entry of a term definition does not expand to an IRI.
	InvalidTypeMapping,

	/// The value of `@type` is neither a string nor an array of strings.
	InvalidTypeValue,

	/// A typed value has an invalid type.
	InvalidTypedValue,

	/// A value object has disallowed entries.
	InvalidValueObject,

	/// The `@value` entry of a value object is not a scalar.
	InvalidValueObjectValue,

	/// The vocabulary mapping is neither an IRI nor null.
	InvalidVocabMapping,

	/// An IRI would be compacted into something that reads as a compact IRI.
	IriConfusedWithPrefix,

	/// A key could not be expanded into an IRI, blank node identifier or
	/// keyword under the current key expansion policy.
	///
	/// Not part of the JSON-LD error codes.
	KeyExpansionFailed,

	/// A keyword was redefined.
	KeywordRedefinition,

	/// A document could not be loaded.
	LoadingDocumentFailed,

	/// A remote context could not be loaded.
	LoadingRemoteContextFailed,

	/// The processing mode was changed in an incompatible way.
	ProcessingModeConflict,

	/// A protected term was redefined.
	ProtectedTermRedefinition,

	/// A context includes itself (JSON-LD 1.0 only).
	RecursiveContextInclusion,

	/// A frame is invalid.
	InvalidFrame,

	/// The value of `@embed` is invalid.
	InvalidEmbedValue,
}

impl ErrorCode {
	/// Returns the code as it appears in the JSON-LD specifications.
	pub fn as_str(&self) -> &'static str {
		use ErrorCode::*;
		match self {
			CollidingKeywords => "colliding keywords",
			ConflictingIndexes => "conflicting indexes",
			ContextOverflow => "context overflow",
			CyclicIriMapping => "cyclic IRI mapping",
			InvalidIdValue => "invalid @id value",
			InvalidImportValue => "invalid @import value",
			InvalidIncludedValue => "invalid @included value",
			InvalidIndexValue => "invalid @index value",
			InvalidNestValue => "invalid @nest value",
			InvalidPrefixValue => "invalid @prefix value",
			InvalidPropagateValue => "invalid @propagate value",
			InvalidProtectedValue => "invalid @protected value",
			InvalidReverseValue => "invalid @reverse value",
			InvalidVersionValue => "invalid @version value",
			InvalidBaseDirection => "invalid base direction",
			InvalidBaseIri => "invalid base IRI",
			InvalidContainerMapping => "invalid container mapping",
			InvalidContextEntry => "invalid context entry",
			InvalidContextNullification => "invalid context nullification",
			InvalidDefaultLanguage => "invalid default language",
			InvalidIriMapping => "invalid IRI mapping",
			InvalidJsonLiteral => "invalid JSON literal",
			InvalidKeywordAlias => "invalid keyword alias",
			InvalidLanguageMapValue => "invalid language map value",
			InvalidLanguageMapping => "invalid language mapping",
			InvalidLanguageTaggedString => "invalid language-tagged string",
			InvalidLanguageTaggedValue => "invalid language-tagged value",
			InvalidLocalContext => "invalid local context",
			InvalidRemoteContext => "invalid remote context",
			InvalidReverseProperty => "invalid reverse property",
			InvalidReversePropertyMap => "invalid reverse property map",
			InvalidReversePropertyValue => "invalid reverse property value",
			InvalidScopedContext => "invalid scoped context",
			InvalidSetOrListObject => "invalid set or list object",
			InvalidTermDefinition => "invalid term definition",
			InvalidTypeMapping => "invalid type mapping",
			InvalidTypeValue => "invalid type value",
			InvalidTypedValue => "invalid typed value",
			InvalidValueObject => "invalid value object",
			InvalidValueObjectValue => "invalid value object value",
			InvalidVocabMapping => "invalid vocab mapping",
			IriConfusedWithPrefix => "IRI confused with prefix",
			KeyExpansionFailed => "key expansion failed",
			KeywordRedefinition => "keyword redefinition",
			LoadingDocumentFailed => "loading document failed",
			LoadingRemoteContextFailed => "loading remote context failed",
			ProcessingModeConflict => "processing mode conflict",
			ProtectedTermRedefinition => "protected term redefinition",
			RecursiveContextInclusion => "recursive context inclusion",
			InvalidFrame => "invalid frame",
			InvalidEmbedValue => "invalid @embed value",
		}
	}
}

impl<'a> TryFrom<&'a str> for ErrorCode {
	type Error = &'a str;

	fn try_from(name: &'a str) -> Result<ErrorCode, &'a str> {
		use ErrorCode::*;
		const ALL: [ErrorCode; 51] = [
			CollidingKeywords,
			ConflictingIndexes,
			ContextOverflow,
			CyclicIriMapping,
			InvalidIdValue,
			InvalidImportValue,
			InvalidIncludedValue,
			InvalidIndexValue,
			InvalidNestValue,
			InvalidPrefixValue,
			InvalidPropagateValue,
			InvalidProtectedValue,
			InvalidReverseValue,
			InvalidVersionValue,
			InvalidBaseDirection,
			InvalidBaseIri,
			InvalidContainerMapping,
			InvalidContextEntry,
			InvalidContextNullification,
			InvalidDefaultLanguage,
			InvalidIriMapping,
			InvalidJsonLiteral,
			InvalidKeywordAlias,
			InvalidLanguageMapValue,
			InvalidLanguageMapping,
			InvalidLanguageTaggedString,
			InvalidLanguageTaggedValue,
			InvalidLocalContext,
			InvalidRemoteContext,
			InvalidReverseProperty,
			InvalidReversePropertyMap,
			InvalidReversePropertyValue,
			InvalidScopedContext,
			InvalidSetOrListObject,
			InvalidTermDefinition,
			InvalidTypeMapping,
			InvalidTypeValue,
			InvalidTypedValue,
			InvalidValueObject,
			InvalidValueObjectValue,
			InvalidVocabMapping,
			IriConfusedWithPrefix,
			KeyExpansionFailed,
			KeywordRedefinition,
			LoadingDocumentFailed,
			LoadingRemoteContextFailed,
			ProcessingModeConflict,
			ProtectedTermRedefinition,
			RecursiveContextInclusion,
			InvalidFrame,
			InvalidEmbedValue,
		];

		ALL.into_iter()
			.find(|code| code.as_str() == name)
			.ok_or(name)
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Processing error.
///
/// Every error is fatal: the operation that raised it is aborted and no
/// partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Structural error identified by its code.
	#[error("{0}")]
	Code(ErrorCode),

	/// Structural error with some details about where it happened.
	#[error("{code}: {details}")]
	Detailed { code: ErrorCode, details: String },

	/// A remote context could not be dereferenced.
	#[error("loading remote context failed: {0}")]
	ContextLoading(#[source] LoadError),

	/// The input document could not be dereferenced.
	#[error("loading document failed: {0}")]
	DocumentLoading(#[source] LoadError),
}

impl Error {
	/// Creates an error with the given code and details.
	pub fn new(code: ErrorCode, details: impl fmt::Display) -> Self {
		Self::Detailed {
			code,
			details: details.to_string(),
		}
	}

	/// Returns the code of this error.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Code(code) => *code,
			Self::Detailed { code, .. } => *code,
			Self::ContextLoading(_) => ErrorCode::LoadingRemoteContextFailed,
			Self::DocumentLoading(_) => ErrorCode::LoadingDocumentFailed,
		}
	}
}

impl From<ErrorCode> for Error {
	fn from(code: ErrorCode) -> Self {
		Self::Code(code)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn code_names_round_trip() {
		for name in ["cyclic IRI mapping", "invalid @embed value", "conflicting indexes"] {
			let code = ErrorCode::try_from(name).unwrap();
			assert_eq!(code.as_str(), name)
		}

		assert!(ErrorCode::try_from("not an error").is_err())
	}

	#[test]
	fn detailed_error_keeps_its_code() {
		let e = Error::new(ErrorCode::InvalidTermDefinition, "term `foo`");
		assert_eq!(e.code(), ErrorCode::InvalidTermDefinition);
		assert_eq!(e.to_string(), "invalid term definition: term `foo`")
	}
}
