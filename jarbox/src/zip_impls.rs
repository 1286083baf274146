use anyhow::{anyhow, Context, Result};
use std::io::{Read, Seek};
use log::info;
use zip::ZipArchive;
use crate::{BasicFileAttributes, JarEntry, JarEntryEnum, JarWriter, OpenedJar};

impl<R: Read + Seek> OpenedJar for ZipArchive<R> {
	type EntryKey = usize;

	fn entry_keys(&self) -> impl Iterator<Item=Self::EntryKey> + 'static {
		0..self.len()
	}

	fn by_entry_key(&mut self, key: Self::EntryKey) -> Result<JarEntry> {
		let mut file = self.by_index(key)
			.with_context(|| anyhow!("could not get entry {key} from zip"))?;

		let name = file.name().to_owned();
		let attrs = BasicFileAttributes {
			last_modified: file.last_modified(),
		};

		let data = if file.is_dir() {
			JarEntryEnum::Dir
		} else {
			let data = {
				let capacity = file.size()
					.try_into()
					.unwrap_or_else(|x| {
						info!("size of zip file {name:?} doesn't fit in usize: {x:?}");
						0
					});
				let mut data = Vec::with_capacity(capacity);
				file.read_to_end(&mut data)
					.with_context(|| anyhow!("failed to read zip entry {name:?}"))?;
				data
			};

			if name.ends_with(".class") {
				JarEntryEnum::Class(data)
			} else {
				JarEntryEnum::Other(data)
			}
		};

		Ok(JarEntry { name, attrs, data })
	}

	fn names(&self) -> impl Iterator<Item=(Self::EntryKey, &'_ str)> {
		(0..self.len()).filter_map(|x| self.name_for_index(x).map(|name| (x, name)))
	}

	fn copy_raw_into(&mut self, key: Self::EntryKey, writer: &mut JarWriter) -> Result<()> {
		let file = self.by_index_raw(key)
			.with_context(|| anyhow!("could not get entry {key} from zip"))?;
		let name = file.name().to_owned();
		writer.zip.raw_copy_file(file)
			.with_context(|| anyhow!("failed to copy zip entry {name:?}"))
	}
}
