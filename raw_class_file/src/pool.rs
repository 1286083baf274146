use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use anyhow::{anyhow, bail, Context, Result};
use crate::{mutf8, CpInfo};

/// The constant pool of a class file.
///
/// Indices start at `1`. Entries of type [`CpInfo::Long`] and [`CpInfo::Double`] take up two
/// indices, the second one of them is unusable.
///
/// Entries are never removed or moved. New entries can only be appended with [`ConstantPool::push`], so
/// any index that was valid stays valid and refers to the same slot.
#[derive(Clone, PartialEq)]
pub struct ConstantPool {
	// slot 0 and the upper halves of wide entries are `None`
	entries: Vec<Option<CpInfo>>,
}

impl ConstantPool {
	pub fn new() -> ConstantPool {
		ConstantPool { entries: vec![None] }
	}

	/// The value of the `constant_pool_count` item, one more than the highest usable index.
	pub fn count(&self) -> usize {
		self.entries.len()
	}

	pub fn get(&self, index: u16) -> Option<&CpInfo> {
		self.entries.get(index as usize).and_then(Option::as_ref)
	}

	pub fn get_mut(&mut self, index: u16) -> Option<&mut CpInfo> {
		self.entries.get_mut(index as usize).and_then(Option::as_mut)
	}

	/// Iterates over all usable entries, together with their index.
	pub fn iter(&self) -> impl Iterator<Item=(u16, &CpInfo)> {
		self.entries.iter()
			.enumerate()
			.filter_map(|(index, entry)| entry.as_ref().map(|entry| (index as u16, entry)))
	}

	/// Gets the raw bytes of the `Utf8` entry at `index`.
	pub fn get_utf8_bytes(&self, index: u16) -> Result<&[u8]> {
		match self.get(index) {
			Some(CpInfo::Utf8 { bytes }) => Ok(bytes),
			Some(entry) => bail!("expected constant pool entry Utf8 at {index}, got {entry:?}"),
			None => bail!("no constant pool entry at {index}"),
		}
	}

	/// Gets the `Utf8` entry at `index` as a string, decoding the modified UTF-8.
	///
	/// This only allocates if the string contains the null character or characters outside the basic
	/// multilingual plane.
	pub fn get_utf8(&self, index: u16) -> Result<Cow<'_, str>> {
		let bytes = self.get_utf8_bytes(index)?;
		mutf8::decode(bytes)
			.with_context(|| anyhow!("constant pool entry Utf8 at {index} is not valid modified utf8"))
	}

	/// Gets the name of the `Class` entry at `index`.
	pub fn get_class_name(&self, index: u16) -> Result<Cow<'_, str>> {
		match self.get(index) {
			Some(&CpInfo::Class { name_index }) => self.get_utf8(name_index),
			Some(entry) => bail!("expected constant pool entry Class at {index}, got {entry:?}"),
			None => bail!("no constant pool entry at {index}"),
		}
	}

	/// Gets the name and the descriptor of the `NameAndType` entry at `index`.
	pub fn get_name_and_type(&self, index: u16) -> Result<(Cow<'_, str>, Cow<'_, str>)> {
		match self.get(index) {
			Some(&CpInfo::NameAndType { name_index, descriptor_index }) => {
				Ok((self.get_utf8(name_index)?, self.get_utf8(descriptor_index)?))
			},
			Some(entry) => bail!("expected constant pool entry NameAndType at {index}, got {entry:?}"),
			None => bail!("no constant pool entry at {index}"),
		}
	}

	/// Replaces the entry at `index` with `entry`.
	///
	/// Only entries taking up one index can be replaced, and only by such entries. A `Utf8` entry must
	/// not be longer than `u16::MAX` bytes.
	pub fn set(&mut self, index: u16, entry: CpInfo) -> Result<()> {
		check_utf8_length(&entry)?;
		let Some(slot) = self.entries.get_mut(index as usize).and_then(Option::as_mut) else {
			bail!("no constant pool entry at {index} to replace");
		};
		if slot.is_wide() || entry.is_wide() {
			bail!("cannot replace constant pool entry {slot:?} at {index} with {entry:?}, as they don't have the same size");
		}
		*slot = entry;
		Ok(())
	}

	/// Replaces the entry at `index` with a `Utf8` entry of `value`, encoded as modified UTF-8.
	pub fn set_utf8(&mut self, index: u16, value: &str) -> Result<()> {
		self.set(index, CpInfo::Utf8 { bytes: mutf8::encode(value).into_owned() })
	}

	/// Appends an entry at the end of the pool, returning its index.
	///
	/// Fails if the pool would grow beyond the `u16` index space, or if a `Utf8` entry is longer than
	/// `u16::MAX` bytes.
	pub fn push(&mut self, entry: CpInfo) -> Result<u16> {
		check_utf8_length(&entry)?;
		let index = self.entries.len();
		let wide = entry.is_wide();
		let new_count = index + if wide { 2 } else { 1 };
		if new_count > u16::MAX as usize {
			bail!("constant pool is full, cannot add {entry:?}");
		}
		self.entries.push(Some(entry));
		if wide {
			self.entries.push(None);
		}
		Ok(index as u16)
	}

	pub(crate) fn jvms_write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
		let count = u16::try_from(self.entries.len())
			.map_err(|_| std::io::Error::other(format!("constant pool too large: {} entries", self.entries.len())))?;
		writer.write_all(&count.to_be_bytes())?;
		for entry in self.entries.iter().flatten() {
			entry.jvms_write(writer)?;
		}
		Ok(())
	}

	pub(crate) fn jvms_read(reader: &mut impl std::io::Read) -> std::io::Result<ConstantPool> {
		let mut buf = [0u8; 2];
		reader.read_exact(&mut buf)?;
		let count = u16::from_be_bytes(buf) as usize;

		let mut entries = Vec::with_capacity(count);
		entries.push(None);
		while entries.len() < count {
			let entry = CpInfo::jvms_read(reader)?;
			let wide = entry.is_wide();
			entries.push(Some(entry));
			if wide {
				if entries.len() >= count {
					return Err(std::io::Error::other(format!("wide constant pool entry at {} exceeds constant pool count {count}", entries.len() - 1)));
				}
				entries.push(None);
			}
		}

		Ok(ConstantPool { entries })
	}

	pub(crate) fn jvms_len(&self) -> u32 {
		2 + self.entries.iter().flatten().map(CpInfo::jvms_len).sum::<u32>()
	}
}

/// The length of a `Utf8` entry is stored as a `u16`.
fn check_utf8_length(entry: &CpInfo) -> Result<()> {
	if let CpInfo::Utf8 { bytes } = entry {
		if bytes.len() > u16::MAX as usize {
			bail!("utf8 of {} bytes is too long for the constant pool, at most {} bytes fit", bytes.len(), u16::MAX);
		}
	}
	Ok(())
}

impl Default for ConstantPool {
	fn default() -> Self {
		ConstantPool::new()
	}
}

/// Builds a constant pool from the entries, in order. Wide entries take up two indices.
impl From<Vec<CpInfo>> for ConstantPool {
	fn from(value: Vec<CpInfo>) -> Self {
		let mut entries = Vec::with_capacity(value.len() + 1);
		entries.push(None);
		for entry in value {
			let wide = entry.is_wide();
			entries.push(Some(entry));
			if wide {
				entries.push(None);
			}
		}
		ConstantPool { entries }
	}
}

/// [`Debug`] prints the entries with their index.
impl Debug for ConstantPool {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.iter())
			.finish()
	}
}
