use std::fs::File;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::info;
use jarbox::Jar;
use crate::generate::auto_map;
use crate::hash::jar_hash;
use crate::mapping::Mappings;
use crate::mapping_file;
use crate::names::UniqueIds;

/// Generates the mappings for a jar: generated names for everything, with inheritance resolved and all mapped
/// descriptors computed.
pub fn generate_mappings(jar: &impl Jar, ids: &UniqueIds) -> Result<Mappings> {
	let mut mappings = auto_map(jar, ids)?;
	mappings.resolve_inheritance()?;
	mappings.compute_mapped_signatures();
	Ok(mappings)
}

/// Generates the mappings for a jar and writes them to `out`, together with the hash of the jar.
///
/// The file is only created once the mappings are generated.
pub fn dump(jar: &(impl Jar + std::fmt::Debug), out: &Path) -> Result<Mappings> {
	let hash = jar_hash(&jar.bytes()?);

	let mappings = generate_mappings(jar, &UniqueIds::new())
		.with_context(|| anyhow!("failed to generate mappings for {jar:?}"))?;

	let mut file = File::create(out)
		.with_context(|| anyhow!("failed to create mapping file {out:?}"))?;
	mapping_file::write(&mappings, Some(&hash), &mut file)
		.with_context(|| anyhow!("failed to write mapping file {out:?}"))?;

	info!("mapped {} classes from {jar:?} into {out:?}", mappings.len());

	Ok(mappings)
}
