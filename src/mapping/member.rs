use anyhow::{bail, Result};
use crate::mapping::ClassId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	Field,
	Method,
}

impl MemberKind {
	/// The line prefix used in mapping files.
	pub fn line_prefix(self) -> &'static str {
		match self {
			MemberKind::Field => "FD:",
			MemberKind::Method => "MD:",
		}
	}
}

/// The mapping of a field or a method.
///
/// Members are identified by their original name, their (unmapped) descriptor and their kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntity {
	/// The class declaring this member.
	pub owner: ClassId,
	pub kind: MemberKind,
	pub original_name: String,
	pub target_name: String,
	/// The descriptor, using the original class names.
	pub signature: String,
	/// The descriptor, using the target class names.
	///
	/// This is [`None`] until it's computed, or read from a mapping file.
	pub mapped_signature: Option<String>,
	/// Whether the target name was already taken from a member of a super class.
	pub(crate) inherited: bool,
}

impl MemberEntity {
	pub fn new(owner: ClassId, kind: MemberKind, original_name: String, target_name: String, signature: String) -> MemberEntity {
		MemberEntity {
			owner,
			kind,
			original_name,
			target_name,
			signature,
			mapped_signature: None,
			inherited: false,
		}
	}

	pub fn is_equivalent(&self, other: &MemberEntity) -> bool {
		self.kind == other.kind && self.original_name == other.original_name && self.signature == other.signature
	}

	/// The mapped descriptor, or the unmapped one if it wasn't computed yet.
	pub fn mapped_signature(&self) -> &str {
		self.mapped_signature.as_deref().unwrap_or(&self.signature)
	}

	/// Takes over the target name of the same member, declared in a super class.
	pub fn inherit(&mut self, other: &MemberEntity) -> Result<()> {
		if !self.is_equivalent(other) {
			bail!("cannot inherit the name of {other:?} into {self:?}, as they're not the same member");
		}
		self.target_name.clone_from(&other.target_name);
		self.inherited = true;
		Ok(())
	}

	/// Checks if a reference to `owner.name descriptor` points to this member, using either the original or
	/// the target names. The `owner_original` and `owner_target` are the names of the class declaring this member.
	pub fn matches_reference(&self, owner_original: &str, owner_target: &str, owner: &str, name: &str, descriptor: &str) -> bool {
		(owner == owner_original || owner == owner_target) &&
			(descriptor == self.signature || descriptor == self.mapped_signature()) &&
			(name == self.original_name || name == self.target_name)
	}
}
