use std::borrow::Cow;
use std::path::Path;
use anyhow::Result;
use crate::OpenedJar;

/// Represents a `.jar` in some form.
///
/// This can be in memory, like [`NamedMemJar`][crate::NamedMemJar]. It can also be from a
/// file, like [`FileJar`][crate::FileJar].
///
/// You can [`open`][Jar::open] a jar to get to it's content. See [`OpenedJar`] for more.
///
/// A [`Jar`] also provides a method to store it to a suggested path. Note that the suggested path may
/// also not be used (like [`FileJar`][crate::FileJar] does).
pub trait Jar {
	type Opened<'a>: OpenedJar where Self: 'a;

	/// Opens the jar for reading.
	fn open(&self) -> Result<Self::Opened<'_>>;

	/// The raw bytes of the whole jar, as stored on disk.
	fn bytes(&self) -> Result<Cow<'_, [u8]>>;

	/// Asks the jar implementation for storing the jar to the suggested path.
	///
	/// Returns the path the jar was actually stored to.
	///
	/// The reason for a suggested path only is that some implementors (like [`FileJar`][crate::FileJar]) are already
	/// stored on disk, and this would require copying the file.
	fn put_to_file<'a>(&'a self, suggested: &'a Path) -> Result<&'a Path>;
}
