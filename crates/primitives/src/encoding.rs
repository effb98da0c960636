use std::fmt;
use std::str::FromStr;

/// Unit in which a [`Position::column`](crate::Position::column) is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetEncoding {
	/// UTF-8 byte offsets.
	#[cfg_attr(feature = "serde", serde(rename = "utf-8"))]
	Utf8,
	/// UTF-16 code unit offsets (LSP default).
	#[cfg_attr(feature = "serde", serde(rename = "utf-16"))]
	Utf16,
	/// UTF-32 / Unicode codepoint offsets, i.e. characters.
	#[default]
	#[cfg_attr(feature = "serde", serde(rename = "utf-32"))]
	Utf32,
}

impl OffsetEncoding {
	/// Returns the label used by the protocol for this encoding.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Utf8 => "utf-8",
			Self::Utf16 => "utf-16",
			Self::Utf32 => "utf-32",
		}
	}

	/// Returns how many units of this encoding `ch` occupies.
	#[inline]
	pub fn units_of(self, ch: char) -> usize {
		match self {
			Self::Utf8 => ch.len_utf8(),
			Self::Utf16 => ch.len_utf16(),
			Self::Utf32 => 1,
		}
	}
}

impl fmt::Display for OffsetEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown encoding label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl fmt::Display for UnknownEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown offset encoding '{}' (expected utf-8, utf-16 or utf-32)", self.0)
	}
}

impl std::error::Error for UnknownEncoding {}

impl FromStr for OffsetEncoding {
	type Err = UnknownEncoding;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"utf-8" | "utf8" => Ok(Self::Utf8),
			"utf-16" | "utf16" => Ok(Self::Utf16),
			"utf-32" | "utf32" => Ok(Self::Utf32),
			_ => Err(UnknownEncoding(s.to_string())),
		}
	}
}
