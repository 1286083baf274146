use std::collections::hash_map::Entry;
use std::collections::HashMap;
use anyhow::{anyhow, Context, Result};
use log::trace;
use raw_class_file::{mutf8, ConstantPool, CpInfo};

/// Gives out indices of `Utf8` and `NameAndType` entries of a constant pool, adding them only if
/// there's no such entry yet.
///
/// The interner starts out with all entries of the pool at the time it's created. If a value is in
/// the pool multiple times, the entry with the highest index is used.
///
/// Entries are only ever appended, so indices stay valid. Changing `Utf8` or `NameAndType` entries
/// through [`Interner::pool_mut`] is not seen by the interner.
#[derive(Debug)]
pub struct Interner<'a> {
	pool: &'a mut ConstantPool,
	utf8s: HashMap<Vec<u8>, u16>,
	name_and_types: HashMap<(u16, u16), u16>,
}

impl<'a> Interner<'a> {
	pub fn new(pool: &'a mut ConstantPool) -> Interner<'a> {
		let mut utf8s = HashMap::new();
		let mut name_and_types = HashMap::new();

		for (index, entry) in pool.iter() {
			match entry {
				CpInfo::Utf8 { bytes } => {
					utf8s.insert(bytes.clone(), index);
				},
				&CpInfo::NameAndType { name_index, descriptor_index } => {
					name_and_types.insert((name_index, descriptor_index), index);
				},
				_ => {},
			}
		}

		Interner { pool, utf8s, name_and_types }
	}

	pub fn pool(&self) -> &ConstantPool {
		&*self.pool
	}

	pub fn pool_mut(&mut self) -> &mut ConstantPool {
		&mut *self.pool
	}

	/// Gets the index of a `Utf8` entry with the given content.
	pub fn intern_text(&mut self, s: &str) -> Result<u16> {
		match self.utf8s.entry(mutf8::encode(s).into_owned()) {
			Entry::Occupied(entry) => Ok(*entry.get()),
			Entry::Vacant(entry) => {
				let index = self.pool.push(CpInfo::Utf8 { bytes: entry.key().clone() })
					.with_context(|| anyhow!("failed to add utf8 {s:?} to the constant pool"))?;
				trace!("added utf8 {s:?} at {index}");
				entry.insert(index);
				Ok(index)
			},
		}
	}

	/// Gets the index of a `NameAndType` entry with the given name and descriptor.
	pub fn intern_name_and_type(&mut self, name: &str, descriptor: &str) -> Result<u16> {
		let name_index = self.intern_text(name)?;
		let descriptor_index = self.intern_text(descriptor)?;

		match self.name_and_types.entry((name_index, descriptor_index)) {
			Entry::Occupied(entry) => Ok(*entry.get()),
			Entry::Vacant(entry) => {
				let index = self.pool.push(CpInfo::NameAndType { name_index, descriptor_index })
					.with_context(|| anyhow!("failed to add name and type {name:?} {descriptor:?} to the constant pool"))?;
				trace!("added name and type {name:?} {descriptor:?} at {index}");
				entry.insert(index);
				Ok(index)
			},
		}
	}
}
