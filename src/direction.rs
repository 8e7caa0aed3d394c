use std::fmt;

/// Base direction of a string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
	/// Left-to-right direction.
	#[cfg_attr(feature = "serde", serde(rename = "ltr"))]
	Ltr,

	/// Right-to-left direction.
	#[cfg_attr(feature = "serde", serde(rename = "rtl"))]
	Rtl,
}

impl Direction {
	pub fn as_str(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

impl<'a> TryFrom<&'a str> for Direction {
	type Error = &'a str;

	fn try_from(name: &'a str) -> Result<Direction, &'a str> {
		match name {
			"ltr" => Ok(Direction::Ltr),
			"rtl" => Ok(Direction::Rtl),
			_ => Err(name),
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
