use std::io::Cursor;
use anyhow::{anyhow, Context, Result};
use log::warn;
use jarbox::{Jar, OpenedJar};
use raw_class_file::{ClassFile, MemberInfo};
use crate::descriptor::to_dotted;
use crate::error::MappingError;
use crate::mapping::{ClassEntity, ClassId, Mappings, MemberKind};
use crate::names::{class_target_name, field_target_name, method_target_name, UniqueIds};

/// Creates mappings for all classes in the jar, with generated names for everything.
///
/// Classes are added in the order they're stored in the jar. Fields and methods are sorted by their
/// original name afterward. Inheritance is not resolved yet.
///
/// If a class is in the jar more than once, only the first one is used.
pub fn auto_map(jar: &impl Jar, ids: &UniqueIds) -> Result<Mappings> {
	let mut opened = jar.open()?;

	let mut mappings = Mappings::new();

	opened.read_classes_into(|entry_name, data| {
		let class = ClassFile::read(&mut Cursor::new(data))
			.with_context(|| anyhow!("failed to read class file {entry_name:?}"))?;

		match auto_map_class(&mut mappings, &class, ids) {
			Err(e) if matches!(e.downcast_ref::<MappingError>(), Some(MappingError::DuplicateClass { .. })) => {
				warn!("skipping {entry_name:?}: {e}");
				Ok(())
			},
			result => result
				.map(|_| ())
				.with_context(|| anyhow!("failed to map class file {entry_name:?}")),
		}
	})?;

	mappings.sort_members();

	Ok(mappings)
}

/// Adds a mapping for the class, with generated names for the class and all fields and methods.
///
/// The static initializer is left out.
pub fn auto_map_class(mappings: &mut Mappings, class: &ClassFile, ids: &UniqueIds) -> Result<ClassId> {
	let name = to_dotted(&class.name()?);
	if mappings.by_original_name(&name).is_some() {
		return Err(MappingError::DuplicateClass { class: name }.into());
	}

	let superclass = class.super_class_name()?.map(|name| to_dotted(&name));
	let interfaces = class.interface_names()?.iter().map(|name| to_dotted(name)).collect();

	let target = class_target_name(&name, ids)?;
	let id = mappings.add_class(ClassEntity::new(name, target, superclass, interfaces))?;

	let pool = &class.constant_pool;

	for field in &class.fields {
		let name = field.name(pool)?;
		let descriptor = field.descriptor(pool)?;
		let target = field_target_name(&name, &descriptor, ids)?;
		mappings.add_member(id, MemberKind::Field, name.into_owned(), target, descriptor.into_owned());
	}

	for method in &class.methods {
		let name = method.name(pool)?;
		if name == "<clinit>" {
			continue;
		}
		let descriptor = method.descriptor(pool)?;
		let target = method_target_name(&name, ids)?;
		mappings.add_member(id, MemberKind::Method, name.into_owned(), target, descriptor.into_owned());
	}

	Ok(id)
}
