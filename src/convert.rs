use std::io::Cursor;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use jarbox::{Jar, JarEntryEnum, JarWriter, NamedMemJar, OpenedJar, MANIFEST_PATH};
use raw_class_file::ClassFile;
use crate::hash::jar_hash;
use crate::mapping::Mappings;
use crate::mapping_file;
use crate::patch::Patcher;

/// Reads the mappings from `mapfile` and writes the remapped `source` jar to `target`.
///
/// The mapping file must have been made for this jar, see [`mapping_file::read`]. Nothing is written if anything fails.
pub fn convert(source: &(impl Jar + std::fmt::Debug), target: &Path, mapfile: &Path) -> Result<()> {
	let hash = jar_hash(&source.bytes()?);
	let mappings = mapping_file::read_file(mapfile, Some(&hash))?;

	let jar = remap_jar(source, &mappings, target.to_string_lossy())
		.with_context(|| anyhow!("failed to remap {source:?}"))?;

	jar.put_to_file(target)?;
	Ok(())
}

/// Remaps all classes of the jar, building a new jar in memory.
///
/// The manifest is the first entry of the new jar. Mapped classes are stored under their new name, all other entries
/// are copied without decompressing them.
pub fn remap_jar(source: &impl Jar, mappings: &Mappings, name: impl Into<String>) -> Result<NamedMemJar> {
	let patcher = Patcher::new(mappings);

	let mut opened = source.open()?;
	let mut writer = JarWriter::new();

	let entries: Vec<_> = opened.names()
		.map(|(key, name)| (key, name.to_owned()))
		.collect();

	if let Some(&(key, _)) = entries.iter().find(|(_, name)| name == MANIFEST_PATH) {
		opened.copy_raw_into(key, &mut writer)?;
	}

	let mut remapped = 0;
	for (key, name) in entries {
		if name == MANIFEST_PATH {
			continue;
		}

		if name.ends_with(".class") {
			let entry = opened.by_entry_key(key)?;
			if let JarEntryEnum::Class(data) = entry.data {
				let mut class = ClassFile::read(&mut Cursor::new(data))
					.with_context(|| anyhow!("failed to read class file {name:?}"))?;

				let target = patcher.patch_class(&mut class)
					.with_context(|| anyhow!("failed to remap class file {name:?}"))?;

				if let Some(target) = target {
					let new_name = format!("{target}.class");
					debug!("writing {name:?} as {new_name:?}");

					let data = class.to_bytes()
						.with_context(|| anyhow!("failed to write class file {new_name:?}"))?;
					writer.write_entry(&new_name, entry.attrs, &data)?;

					remapped += 1;
					continue;
				}
			}
		}

		opened.copy_raw_into(key, &mut writer)?;
	}

	info!("remapped {remapped} classes");

	writer.finish(name)
}
