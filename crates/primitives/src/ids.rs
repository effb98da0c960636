use std::fmt;

/// Opaque identity of a host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "buffer#{}", self.0)
	}
}

/// Monotonic mutation counter of a buffer.
///
/// Every committed mutation (including undo and redo) produces a new version.
/// Two snapshots with equal versions of the same buffer have equal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version(pub u64);

impl Version {
	/// Returns the version following this one.
	#[must_use]
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "v{}", self.0)
	}
}
