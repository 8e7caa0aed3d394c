use std::fmt;

/// Error returned when a string is not a keyword.
#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("`{0}` is not a keyword")]
pub struct NotAKeyword<T = String>(pub T);

macro_rules! keyword {
	{
		$(
			$(#[$meta:meta])*
			$ident:ident : $lit:literal
		),*
	} => {
		/// JSON-LD keywords, including the framing keywords.
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
		#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
		pub enum Keyword {
			$(
				$(#[$meta])*
				#[cfg_attr(feature = "serde", serde(rename = $lit))]
				$ident
			),*
		}

		impl Keyword {
			pub fn into_str(self) -> &'static str {
				match self {
					$(
						Self::$ident => $lit
					),*
				}
			}
		}

		impl<'a> TryFrom<&'a str> for Keyword {
			type Error = NotAKeyword<&'a str>;

			fn try_from(input: &'a str) -> Result<Keyword, NotAKeyword<&'a str>> {
				match input {
					$(
						$lit => Ok(Self::$ident),
					)*
					_ => Err(NotAKeyword(input))
				}
			}
		}
	};
}

keyword! {
	/// `@base`.
	Base : "@base",

	/// `@container`.
	Container : "@container",

	/// `@context`.
	Context : "@context",

	/// `@direction`.
	Direction : "@direction",

	/// `@graph`.
	Graph : "@graph",

	/// `@id`.
	Id : "@id",

	/// `@import`.
	Import : "@import",

	/// `@included`.
	Included : "@included",

	/// `@index`.
	Index : "@index",

	/// `@json`.
	Json : "@json",

	/// `@language`.
	Language : "@language",

	/// `@list`.
	List : "@list",

	/// `@nest`.
	Nest : "@nest",

	/// `@none`.
	None : "@none",

	/// `@prefix`.
	Prefix : "@prefix",

	/// `@propagate`.
	Propagate : "@propagate",

	/// `@protected`.
	Protected : "@protected",

	/// `@reverse`.
	Reverse : "@reverse",

	/// `@set`.
	Set : "@set",

	/// `@type`.
	Type : "@type",

	/// `@value`.
	Value : "@value",

	/// `@version`.
	Version : "@version",

	/// `@vocab`.
	Vocab : "@vocab",

	/// `@default`.
	///
	/// Framing only: default value of a property missing from a matched node.
	Default : "@default",

	/// `@embed`.
	///
	/// Framing only.
	Embed : "@embed",

	/// `@explicit`.
	///
	/// Framing only.
	Explicit : "@explicit",

	/// `@omitDefault`.
	///
	/// Framing only.
	OmitDefault : "@omitDefault",

	/// `@requireAll`.
	///
	/// Framing only.
	RequireAll : "@requireAll",

	/// `@preserve`.
	///
	/// Wraps framing default values until the final cleanup pass.
	Preserve : "@preserve"
}

impl Keyword {
	pub fn as_str(&self) -> &'static str {
		self.into_str()
	}

	/// Checks if this keyword only has a meaning inside frames.
	pub fn is_framing(&self) -> bool {
		matches!(
			self,
			Self::Default
				| Self::Embed | Self::Explicit
				| Self::OmitDefault
				| Self::RequireAll
				| Self::Preserve
		)
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.into_str())
	}
}

impl PartialEq<str> for Keyword {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for Keyword {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

/// Checks if the given string is a JSON-LD keyword.
///
/// Framing keywords are not considered here: outside of frames they are
/// just keyword-like strings.
pub fn is_keyword(s: &str) -> bool {
	Keyword::try_from(s).is_ok_and(|k| !k.is_framing())
}

fn is_alpha(c: char) -> bool {
	c.is_ascii_alphabetic()
}

/// Checks if the given string has the form of a keyword (`@` followed by
/// ASCII letters).
pub fn is_keyword_like(s: &str) -> bool {
	s.len() > 1 && s.starts_with('@') && s[1..].chars().all(is_alpha)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyword_like() {
		assert!(is_keyword_like("@foo"));
		assert!(is_keyword_like("@id"));
		assert!(!is_keyword_like("@"));
		assert!(!is_keyword_like("@foo.bar"));
		assert!(!is_keyword_like("foo"))
	}

	#[test]
	fn framing_keywords_are_not_keywords() {
		assert!(is_keyword("@type"));
		assert!(!is_keyword("@embed"));
		assert_eq!(Keyword::try_from("@embed").unwrap(), Keyword::Embed)
	}
}
