//! Applying mappings to class files.
//!
//! The [`Patcher`] rewrites the constant pool of a class in place: existing entries are overwritten or
//! new ones appended, so that attributes (like the bytecode) referencing the constant pool stay valid.

use std::collections::HashMap;
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use raw_class_file::{flags, mutf8, ClassFile, ConstantPool, CpInfo, MemberInfo};
use crate::descriptor::{to_dotted, to_internal};
use crate::interner::Interner;
use crate::mapping::{ClassId, MemberEntity, Mappings};

#[derive(Debug)]
struct ClassRename {
	original_dotted: String,
	target_dotted: String,
	original_internal: String,
	target_internal: String,
}

/// Applies a set of mappings to class files.
///
/// Creating a patcher builds lookup tables for the whole set of mappings, so create one and use it for
/// all classes of a jar.
#[derive(Debug)]
pub struct Patcher<'a> {
	mappings: &'a Mappings,
	by_target_name: HashMap<&'a str, ClassId>,
	/// In the order of the mappings.
	renames: Vec<ClassRename>,
	renames_by_dotted: HashMap<String, usize>,
	renames_by_internal: HashMap<String, usize>,
	/// Keyed by the dotted owner, the name and the descriptor, with every combination of original and target
	/// names. The members are in the order of the mappings.
	members: HashMap<(&'a str, &'a str, &'a str), Vec<&'a MemberEntity>>,
}

impl<'a> Patcher<'a> {
	pub fn new(mappings: &'a Mappings) -> Patcher<'a> {
		let by_target_name = mappings.ids()
			.map(|id| (mappings.get(id).target_name.as_str(), id))
			.collect();

		let renames: Vec<_> = mappings.classes()
			.map(|class| ClassRename {
				original_dotted: class.original_name.clone(),
				target_dotted: class.target_name.clone(),
				original_internal: to_internal(&class.original_name),
				target_internal: to_internal(&class.target_name),
			})
			.collect();

		let mut renames_by_dotted = HashMap::new();
		let mut renames_by_internal = HashMap::new();
		for (index, rename) in renames.iter().enumerate() {
			renames_by_dotted.entry(rename.original_dotted.clone()).or_insert(index);
			renames_by_internal.entry(rename.original_internal.clone()).or_insert(index);
		}

		let mut members: HashMap<_, Vec<_>> = HashMap::new();
		for member in mappings.members() {
			let owner = mappings.get(member.owner);

			let mut keys = Vec::with_capacity(8);
			for owner_name in [owner.original_name.as_str(), owner.target_name.as_str()] {
				for name in [member.original_name.as_str(), member.target_name.as_str()] {
					for descriptor in [member.signature.as_str(), member.mapped_signature()] {
						keys.push((owner_name, name, descriptor));
					}
				}
			}
			keys.sort_unstable();
			keys.dedup();

			for key in keys {
				members.entry(key).or_default().push(member);
			}
		}

		Patcher { mappings, by_target_name, renames, renames_by_dotted, renames_by_internal, members }
	}

	/// Renames the class, its fields and methods, and all references to mapped classes and members.
	///
	/// Returns the new internal name of the class, or [`None`] if there's no mapping for the class. Such
	/// classes are not changed.
	///
	/// The class is found by the original name, or by the target name if it was already patched. Patching
	/// a class a second time doesn't change it. An unmapped class named like the target of some mapping is
	/// taken as already patched.
	pub fn patch_class(&self, class: &mut ClassFile) -> Result<Option<String>> {
		let name = to_dotted(&class.name()?);
		let Some(id) = self.mappings.by_original_name(&name)
			.or_else(|| self.by_target_name.get(name.as_str()).copied()) else {
			return Ok(None);
		};
		let mapping = self.mappings.get(id);
		let target = to_internal(&mapping.target_name);

		debug!("patching {name} as {}", mapping.target_name);

		let this_name_index = match class.constant_pool.get(class.this_class) {
			Some(&CpInfo::Class { name_index }) => name_index,
			entry => bail!("expected constant pool entry Class at {}, got {entry:?}", class.this_class),
		};
		class.constant_pool.set_utf8(this_name_index, &target)?;

		self.rename_texts(&mut class.constant_pool)?;

		let mut interner = Interner::new(&mut class.constant_pool);
		self.remap_references(&mut interner)
			.with_context(|| anyhow!("failed to remap references in {name}"))?;
		remap_declarations(&mut interner, &mut class.fields, &mapping.fields)
			.with_context(|| anyhow!("failed to remap fields of {name}"))?;
		remap_declarations(&mut interner, &mut class.methods, &mapping.methods)
			.with_context(|| anyhow!("failed to remap methods of {name}"))?;

		if class.is_enum() {
			debug!("fixing up enum {}", mapping.target_name);
			fix_enum(class, &target)?;
		}

		Ok(Some(target))
	}

	/// Overwrites every `Utf8` entry that mentions a mapped class.
	fn rename_texts(&self, pool: &mut ConstantPool) -> Result<()> {
		let renamed: Vec<(u16, String)> = pool.iter()
			.filter_map(|(index, entry)| match entry {
				CpInfo::Utf8 { bytes } => {
					let text = mutf8::decode(bytes).ok()?;
					self.rename_text(&text).map(|renamed| (index, renamed))
				},
				_ => None,
			})
			.collect();

		for (index, text) in renamed {
			pool.set_utf8(index, &text)?;
		}
		Ok(())
	}

	/// Applies the class renames to a text, one after another, in the order of the mappings.
	///
	/// A text that is exactly the original class name (dotted or internal) becomes the target name, otherwise
	/// every `L<original>;` in it is replaced. Returns [`None`] if nothing changed.
	fn rename_text(&self, text: &str) -> Option<String> {
		let mut text = text.to_owned();
		let mut changed = false;
		let mut start = 0;

		// renames not matching the text don't change it, so only look at the ones matching
		while let Some(index) = self.next_matching_rename(&text, start) {
			let rename = &self.renames[index];
			let renamed = if text == rename.original_dotted {
				rename.target_dotted.clone()
			} else if text == rename.original_internal {
				rename.target_internal.clone()
			} else {
				text.replace(
					&format!("L{};", rename.original_internal),
					&format!("L{};", rename.target_internal),
				)
			};

			changed |= renamed != text;
			text = renamed;
			start = index + 1;
		}

		changed.then_some(text)
	}

	/// The lowest index, at least `start`, of a rename matching the text.
	fn next_matching_rename(&self, text: &str, start: usize) -> Option<usize> {
		let exact = [self.renames_by_dotted.get(text), self.renames_by_internal.get(text)]
			.into_iter()
			.flatten()
			.copied();

		// class names never contain a ';', so a `L<name>;` always ends at the first ';' after the 'L'
		let references = text.match_indices('L')
			.filter_map(|(position, _)| {
				let rest = &text[position + 1..];
				let end = rest.find(';')?;
				self.renames_by_internal.get(&rest[..end]).copied()
			});

		exact.chain(references)
			.filter(|&index| index >= start)
			.min()
	}

	/// Points every field and method reference to a mapped member to the target class and the target name.
	fn remap_references(&self, interner: &mut Interner) -> Result<()> {
		let references: Vec<(u16, u16, u16)> = interner.pool().iter()
			.filter_map(|(index, entry)| match *entry {
				CpInfo::Fieldref { class_index, name_and_type_index } |
				CpInfo::Methodref { class_index, name_and_type_index } |
				CpInfo::InterfaceMethodref { class_index, name_and_type_index } => {
					Some((index, class_index, name_and_type_index))
				},
				_ => None,
			})
			.collect();

		for (index, class_index, name_and_type_index) in references {
			let pool = interner.pool();
			let owner = to_dotted(&pool.get_class_name(class_index)?);
			let (name, descriptor) = pool.get_name_and_type(name_and_type_index)?;
			let (name, descriptor) = (name.into_owned(), descriptor.into_owned());

			let Some(members) = self.members.get(&(owner.as_str(), name.as_str(), descriptor.as_str())) else {
				continue;
			};

			for member in members {
				let owner_target = to_internal(&self.mappings.get(member.owner).target_name);
				let owner_name_index = interner.intern_text(&owner_target)?;
				let name_and_type = interner.intern_name_and_type(&member.target_name, member.mapped_signature())?;

				match interner.pool_mut().get_mut(class_index) {
					Some(CpInfo::Class { name_index }) => *name_index = owner_name_index,
					entry => bail!("expected constant pool entry Class at {class_index}, got {entry:?}"),
				}
				match interner.pool_mut().get_mut(index) {
					Some(
						CpInfo::Fieldref { name_and_type_index, .. } |
						CpInfo::Methodref { name_and_type_index, .. } |
						CpInfo::InterfaceMethodref { name_and_type_index, .. }
					) => *name_and_type_index = name_and_type,
					entry => bail!("expected constant pool member reference at {index}, got {entry:?}"),
				}
			}
		}

		Ok(())
	}
}

/// Renames the declared fields or methods that have a mapping, and makes them not synthetic.
fn remap_declarations(interner: &mut Interner, declared: &mut [impl MemberInfo], mappings: &[MemberEntity]) -> Result<()> {
	for member in declared {
		let mut name = member.name(interner.pool())?.into_owned();
		let mut descriptor = member.descriptor(interner.pool())?.into_owned();

		for mapping in mappings {
			if name == mapping.original_name && (descriptor == mapping.signature || descriptor == mapping.mapped_signature()) {
				member.set_name_index(interner.intern_text(&mapping.target_name)?);
				member.set_descriptor_index(interner.intern_text(mapping.mapped_signature())?);
				member.set_synthetic(false);

				name.clone_from(&mapping.target_name);
				mapping.mapped_signature().clone_into(&mut descriptor);
			}
		}
	}
	Ok(())
}

/// Marks the members the compiler generates for an enum as synthetic, and moves the array of the enum
/// constants to the end of the fields.
fn fix_enum(class: &mut ClassFile, target: &str) -> Result<()> {
	let pool = &class.constant_pool;

	let array = format!("[L{target};");
	let position = class.fields.iter()
		.position(|field| {
			field.has_flag(flags::ACC_PRIVATE) && field.has_flag(flags::ACC_STATIC) &&
				field.descriptor(pool).is_ok_and(|descriptor| descriptor == array)
		});
	if let Some(position) = position {
		let mut field = class.fields.remove(position);
		field.set_synthetic(true);
		class.fields.push(field);
	}

	let values = format!("()[L{target};");
	let value_of = format!("(Ljava/lang/String;)L{target};");
	for method in &mut class.methods {
		let name = method.name(pool)?;
		let descriptor = method.descriptor(pool)?;
		if name == "<init>" || (name == "values" && descriptor == values) || (name == "valueOf" && descriptor == value_of) {
			method.set_synthetic(true);
		}
	}

	Ok(())
}
