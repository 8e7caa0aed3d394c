use std::fmt;

/// Processing mode.
///
/// New features defined in JSON-LD 1.1 are available unless the processing
/// mode is set to [`ProcessingMode::JsonLd1_0`].
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessingMode {
	/// JSON-LD 1.0.
	#[cfg_attr(feature = "serde", serde(rename = "json-ld-1.0"))]
	JsonLd1_0,

	/// JSON-LD 1.1.
	#[default]
	#[cfg_attr(feature = "serde", serde(rename = "json-ld-1.1"))]
	JsonLd1_1,
}

impl ProcessingMode {
	/// Returns the name of the processing mode.
	pub fn as_str(&self) -> &'static str {
		match self {
			ProcessingMode::JsonLd1_0 => "json-ld-1.0",
			ProcessingMode::JsonLd1_1 => "json-ld-1.1",
		}
	}
}

impl<'a> TryFrom<&'a str> for ProcessingMode {
	type Error = &'a str;

	fn try_from(name: &'a str) -> Result<ProcessingMode, &'a str> {
		match name {
			"json-ld-1.0" => Ok(ProcessingMode::JsonLd1_0),
			"json-ld-1.1" => Ok(ProcessingMode::JsonLd1_1),
			_ => Err(name),
		}
	}
}

impl fmt::Display for ProcessingMode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
