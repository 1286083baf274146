//! The mapping model: classes with their fields and methods.
//!
//! All [`ClassEntity`]s are owned by [`Mappings`], and are referred to by a [`ClassId`]. Members know the
//! class declaring them by such an id.

use anyhow::Result;
use indexmap::IndexMap;
use indexmap::map::Entry;
use crate::descriptor;
use crate::error::MappingError;

mod class;
pub use class::ClassEntity;

mod inheritance;

mod member;
pub use member::{MemberEntity, MemberKind};

/// An index into the classes of [`Mappings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

/// A set of class mappings, keeping the order they were added in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mappings {
	classes: Vec<ClassEntity>,
	by_name: IndexMap<String, ClassId>,
}

impl Mappings {
	pub fn new() -> Mappings {
		Mappings::default()
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	/// Adds a class, failing with [`MappingError::DuplicateClass`] if there's already a class with the same
	/// original name.
	pub fn add_class(&mut self, class: ClassEntity) -> Result<ClassId> {
		let id = ClassId(self.classes.len());
		match self.by_name.entry(class.original_name.clone()) {
			Entry::Occupied(e) => Err(MappingError::DuplicateClass { class: e.key().clone() }.into()),
			Entry::Vacant(e) => {
				e.insert(id);
				self.classes.push(class);
				Ok(id)
			},
		}
	}

	pub fn add_member(&mut self, class: ClassId, kind: MemberKind, original_name: String, target_name: String, signature: String) -> &mut MemberEntity {
		let member = MemberEntity::new(class, kind, original_name, target_name, signature);
		let class = self.get_mut(class);
		let members = match kind {
			MemberKind::Field => &mut class.fields,
			MemberKind::Method => &mut class.methods,
		};
		members.push(member);
		// just pushed
		let last = members.len() - 1;
		&mut members[last]
	}

	pub fn get(&self, id: ClassId) -> &ClassEntity {
		&self.classes[id.0]
	}

	pub fn get_mut(&mut self, id: ClassId) -> &mut ClassEntity {
		&mut self.classes[id.0]
	}

	/// Looks up a class by its dotted original name.
	pub fn by_original_name(&self, name: &str) -> Option<ClassId> {
		self.by_name.get(name).copied()
	}

	/// Gets the dotted target name of the class with the given dotted original name.
	pub fn target_name_of(&self, original_name: &str) -> Option<&str> {
		self.by_original_name(original_name)
			.map(|id| self.get(id).target_name.as_str())
	}

	/// Iterates over the ids of all classes, in the order they were added in.
	pub fn ids(&self) -> impl Iterator<Item=ClassId> + 'static {
		(0..self.classes.len()).map(ClassId)
	}

	/// Iterates over all classes, in the order they were added in.
	pub fn classes(&self) -> impl Iterator<Item=&ClassEntity> {
		self.classes.iter()
	}

	/// The ids of all classes, ordered by the original class name.
	pub fn sorted_ids(&self) -> Vec<ClassId> {
		let mut ids: Vec<_> = self.ids().collect();
		ids.sort_by(|&a, &b| self.get(a).original_name.cmp(&self.get(b).original_name));
		ids
	}

	/// Iterates over the fields and methods of all classes.
	pub fn members(&self) -> impl Iterator<Item=&MemberEntity> {
		self.classes.iter().flat_map(ClassEntity::members)
	}

	pub fn sort_members(&mut self) {
		for class in &mut self.classes {
			class.sort_members();
		}
	}

	/// Remaps the classes referenced in the descriptor to their target names.
	pub fn map_signature(&self, signature: &str) -> String {
		descriptor::map_signature(signature, |name| self.target_name_of(name))
	}

	/// Sets the [mapped signature][MemberEntity::mapped_signature] of every member.
	pub fn compute_mapped_signatures(&mut self) {
		let mapped: Vec<(Vec<String>, Vec<String>)> = self.classes.iter()
			.map(|class| (
				class.fields.iter().map(|field| self.map_signature(&field.signature)).collect(),
				class.methods.iter().map(|method| self.map_signature(&method.signature)).collect(),
			))
			.collect();

		for (class, (fields, methods)) in self.classes.iter_mut().zip(mapped) {
			for (field, mapped) in class.fields.iter_mut().zip(fields) {
				field.mapped_signature = Some(mapped);
			}
			for (method, mapped) in class.methods.iter_mut().zip(methods) {
				method.mapped_signature = Some(mapped);
			}
		}
	}
}
