use std::fmt::{Debug, Formatter};
use crate::BasicFileAttributes;

/// An entry of a jar, read fully into memory.
#[derive(Debug)]
pub struct JarEntry {
	pub name: String,
	pub attrs: BasicFileAttributes,
	pub data: JarEntryEnum,
}

/// The data of an entry of a jar.
///
/// Entries with a name ending in `.class` are [`JarEntryEnum::Class`].
pub enum JarEntryEnum {
	Dir,
	Class(Vec<u8>),
	Other(Vec<u8>),
}

/// [`Debug`] only prints the type and size, not the contents.
impl Debug for JarEntryEnum {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		use JarEntryEnum::*;
		match self {
			Dir => write!(f, "Dir"),
			Class(data) => write!(f, "Class({} bytes)", data.len()),
			Other(data) => write!(f, "Other({} bytes)", data.len()),
		}
	}
}
