use std::fmt::{Debug, Formatter};
use std::io::{Cursor, Write};
use anyhow::{anyhow, Context, Result};
use zip::ZipWriter;
use crate::{BasicFileAttributes, NamedMemJar};

/// Builds a jar in memory.
///
/// Nothing is written to disk, use [`Jar::put_to_file`][crate::Jar::put_to_file] on the result of
/// [`JarWriter::finish`] for that.
pub struct JarWriter {
	pub(crate) zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl JarWriter {
	pub fn new() -> JarWriter {
		JarWriter {
			zip: ZipWriter::new(Cursor::new(Vec::new())),
		}
	}

	/// Adds a file entry with the given content.
	pub fn write_entry(&mut self, name: &str, attrs: BasicFileAttributes, data: &[u8]) -> Result<()> {
		self.zip.start_file(name, attrs.to_file_options())
			.with_context(|| anyhow!("failed to start zip entry {name:?}"))?;
		self.zip.write_all(data)
			.with_context(|| anyhow!("failed to write zip entry {name:?}"))
	}

	/// Finishes writing, giving back the jar under the given name.
	pub fn finish(self, name: impl Into<String>) -> Result<NamedMemJar> {
		let data = self.zip.finish()
			.context("failed to finish writing zip archive")?
			.into_inner();
		Ok(NamedMemJar { name: name.into(), data })
	}
}

impl Default for JarWriter {
	fn default() -> Self {
		JarWriter::new()
	}
}

impl Debug for JarWriter {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JarWriter").finish_non_exhaustive()
	}
}
