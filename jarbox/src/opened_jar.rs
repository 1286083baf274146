use anyhow::Result;
use crate::{JarEntry, JarEntryEnum, JarWriter};

/// Represents an opened jar.
///
/// An opened jar can be read.
///
/// Each opened jar has an [`EntryKey`][OpenedJar::EntryKey] type (most implementations use `usize`)
/// that's used for uniquely identifying each entry. You can retrieve an iterator over these entry
/// keys with [`entry_keys`][OpenedJar::entry_keys], and use the entry key to get a [`JarEntry`] with
/// the [`by_entry_key`][OpenedJar::by_entry_key] method.
///
/// With the [`names`][OpenedJar::names] and [`by_name`][OpenedJar::by_name] methods, an opened jar
/// supports lookup by file name. Note that [`names`][OpenedJar::names] also returns the corresponding
/// [`EntryKey`][OpenedJar::EntryKey]s, which avoids slow string lookup.
pub trait OpenedJar {
	type EntryKey: Copy;

	fn entry_keys(&self) -> impl Iterator<Item=Self::EntryKey> + 'static;

	fn by_entry_key(&mut self, key: Self::EntryKey) -> Result<JarEntry>;

	fn names(&self) -> impl Iterator<Item=(Self::EntryKey, &'_ str)>;

	fn by_name(&mut self, name: &str) -> Result<Option<JarEntry>> {
		let key = self.names()
			.find(|&(_, entry_name)| entry_name == name)
			.map(|(key, _)| key);
		key.map(|key| self.by_entry_key(key)).transpose()
	}

	/// Copies the entry to the writer, without decompressing and compressing it again.
	fn copy_raw_into(&mut self, key: Self::EntryKey, writer: &mut JarWriter) -> Result<()>;

	/// Calls `f` for every class in the jar, in the order they're stored in.
	///
	/// The first argument is the entry name, the second argument is the class file.
	fn read_classes_into(&mut self, mut f: impl FnMut(&str, Vec<u8>) -> Result<()>) -> Result<()> {
		let keys = self.entry_keys();
		for key in keys {
			let entry = self.by_entry_key(key)?;

			if let JarEntryEnum::Class(class) = entry.data {
				f(&entry.name, class)?;
			}
		}

		Ok(())
	}
}
