//! Functions to read and write mapping files.
//!
//! A mapping file is line based:
//! ```text
//! HASH: MD5 <hex>;SHA-256 <hex>;SHA-512 <hex>
//! CL: <original class> <target class>
//! FD: <original class>.<original field> <descriptor> <target class>.<target field> <mapped descriptor>
//! MD: <original class>.<original method> <descriptor> <target class>.<target method> <mapped descriptor>
//! ```
//! Class names are dotted, descriptors use internal names. Lines starting with `;` are comments.
//!
//! # Reading
//! You can read a mapping file using the [`read_file`] method, by passing a path.
//! If you already have a [`Read`]er, you can use the [`read`] method.
//!
//! # Writing
//! For writing mapping files, there are the [`write`][fn@write] as well as the [`write_vec`] and [`write_string`] methods.
//!
//! Note that all writing sorts the classes.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::warn;
use crate::error::MappingError;
use crate::mapping::{ClassEntity, Mappings, MemberKind};

const HASH_PREFIX: &str = "HASH: ";

/// Reads a mapping file, by opening the file given by the path.
///
/// See [`read`] for the meaning of `expected_hash`.
pub fn read_file(path: impl AsRef<Path>, expected_hash: Option<&str>) -> Result<Mappings> {
	let file = File::open(&path)
		.with_context(|| anyhow!("failed to open mapping file {:?}", path.as_ref()))?;
	read(file, expected_hash)
		.with_context(|| anyhow!("failed to read mapping file {:?}", path.as_ref()))
}

/// Reads a mapping file, from the given reader.
///
/// If `expected_hash` is given, a `HASH:` line must match it, or a [`MappingError::HashMismatch`]
/// is returned. A mapping file without a `HASH:` line is only warned about.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// let string = "\
/// CL: com.a.Foo com.a.Class_000001
/// ; the constructor
/// MD: com.a.Foo.<init> ()V com.a.Class_000001.<init> ()V
/// ";
///
/// let mappings = mappify::mapping_file::read(string.as_bytes(), None).unwrap();
///
/// assert_eq!(mappings.target_name_of("com.a.Foo"), Some("com.a.Class_000001"));
/// ```
pub fn read(reader: impl Read, expected_hash: Option<&str>) -> Result<Mappings> {
	let mut mappings = Mappings::new();
	let mut found_hash = false;

	for (line_number, line) in BufReader::new(reader).lines().enumerate() {
		let line_number = line_number + 1;
		let line = line.with_context(|| anyhow!("failed to read line {line_number}"))?;

		if line.starts_with(';') {
			continue;
		}

		if let Some(found) = line.strip_prefix(HASH_PREFIX) {
			if let Some(expected) = expected_hash {
				if found != expected {
					return Err(MappingError::HashMismatch { expected: expected.to_owned(), found: found.to_owned() }.into());
				}
			}
			found_hash = true;
			continue;
		}

		let invalid_line = || MappingError::InvalidLine { line_number, line: line.clone() };

		let parts: Vec<&str> = line.split(' ').collect();
		match parts.as_slice() {
			&["CL:", original, target] => {
				mappings.add_class(ClassEntity::new(original.to_owned(), target.to_owned(), None, Vec::new()))
					.with_context(|| anyhow!("on line {line_number}"))?;
			},
			&[prefix @ ("FD:" | "MD:"), original, signature, target, mapped_signature] => {
				let kind = if prefix == "FD:" { MemberKind::Field } else { MemberKind::Method };

				let (class, original_name) = original.rsplit_once('.').ok_or_else(invalid_line)?;
				let (_, target_name) = target.rsplit_once('.').ok_or_else(invalid_line)?;

				let class = mappings.by_original_name(class)
					.ok_or_else(|| MappingError::MissingClass { class: class.to_owned() })?;

				let member = mappings.add_member(class, kind, original_name.to_owned(), target_name.to_owned(), signature.to_owned());
				member.mapped_signature = Some(mapped_signature.to_owned());
			},
			_ => return Err(invalid_line().into()),
		}
	}

	if expected_hash.is_some() && !found_hash {
		warn!("mapping file has no hash line, it might not be made for this jar");
	}

	Ok(mappings)
}

/// Writes the given mappings into a `String`.
///
/// This method is of most use in test cases, where you also use the `pretty_assertions` crate for viewing string diffs.
pub fn write_string(mappings: &Mappings, hash: Option<&str>) -> Result<String> {
	let vec = write_vec(mappings, hash)?;
	String::from_utf8(vec).context("failed to convert written mappings to utf8")
}

/// Writes the given mappings into a `Vec<u8>`.
pub fn write_vec(mappings: &Mappings, hash: Option<&str>) -> Result<Vec<u8>> {
	let mut vec = Vec::new();
	write(mappings, hash, &mut vec)?;
	Ok(vec)
}

/// Writes the given mappings to the given writer.
///
/// The `hash` line is written first, if given. Then come all the `CL:` lines, then all `FD:` lines and
/// last all `MD:` lines. Everything is ordered by the original class name. Members are written in the order
/// they're stored in.
///
/// Mapped descriptors that aren't known yet are computed from the class mappings.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use mappify::mapping::{ClassEntity, Mappings, MemberKind};
/// let mut mappings = Mappings::new();
/// let b = mappings.add_class(ClassEntity::new("B".to_owned(), "Class_2".to_owned(), None, vec![])).unwrap();
/// let a = mappings.add_class(ClassEntity::new("a.A".to_owned(), "a.Class_1".to_owned(), None, vec![])).unwrap();
/// mappings.add_member(b, MemberKind::Method, "m".to_owned(), "method_3".to_owned(), "(La/A;)V".to_owned());
/// mappings.add_member(a, MemberKind::Field, "f".to_owned(), "field_4_l".to_owned(), "LB;".to_owned());
///
/// let written = mappify::mapping_file::write_string(&mappings, Some("MD5 0")).unwrap();
///
/// let expected = "\
/// HASH: MD5 0
/// CL: B Class_2
/// CL: a.A a.Class_1
/// FD: a.A.f LB; a.Class_1.field_4_l LClass_2;
/// MD: B.m (La/A;)V Class_2.method_3 (La/Class_1;)V
/// ";
///
/// assert_eq!(written, expected);
/// ```
pub fn write(mappings: &Mappings, hash: Option<&str>, w: &mut impl Write) -> Result<()> {
	// the buffering makes it much faster
	let mut w = BufWriter::new(w);
	let w = &mut w;

	if let Some(hash) = hash {
		writeln!(w, "{HASH_PREFIX}{hash}")?;
	}

	let ids = mappings.sorted_ids();

	for &id in &ids {
		let class = mappings.get(id);
		writeln!(w, "CL: {} {}", class.original_name, class.target_name)?;
	}

	for kind in [MemberKind::Field, MemberKind::Method] {
		for &id in &ids {
			let class = mappings.get(id);
			let members = match kind {
				MemberKind::Field => &class.fields,
				MemberKind::Method => &class.methods,
			};
			for member in members {
				let mapped_signature = match &member.mapped_signature {
					Some(mapped_signature) => mapped_signature.clone(),
					None => mappings.map_signature(&member.signature),
				};
				writeln!(w, "{} {}.{} {} {}.{} {}",
					kind.line_prefix(),
					class.original_name, member.original_name, member.signature,
					class.target_name, member.target_name, mapped_signature,
				)?;
			}
		}
	}

	w.flush()?;
	Ok(())
}
