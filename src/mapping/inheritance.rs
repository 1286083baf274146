use anyhow::{anyhow, Context, Result};
use indexmap::IndexSet;
use log::{debug, warn};
use crate::mapping::{ClassId, Mappings, MemberEntity};

impl Mappings {
	/// Makes methods overriding (or implementing) a method of a mapped super class or interface use the
	/// same target name as that method. Also sets the [mapped super class][crate::mapping::ClassEntity::mapped_superclass]
	/// of every class.
	///
	/// Super classes get resolved before the classes extending them. The super class is handled before the
	/// interfaces, so if a method gets a name from both, the one from the last interface is used.
	///
	/// Constructors, static initializers and fields are never renamed by this.
	pub fn resolve_inheritance(&mut self) -> Result<()> {
		for id in self.ids() {
			self.resolve_class(id)?;
		}
		Ok(())
	}

	fn resolve_class(&mut self, id: ClassId) -> Result<()> {
		let class = self.get_mut(id);
		if class.inheritance_resolved {
			return Ok(());
		}
		// set before recursing, so that cycles in the hierarchy terminate
		class.inheritance_resolved = true;

		let superclass = class.original_superclass.clone();
		let interfaces: IndexSet<String> = class.original_interfaces.iter().cloned().collect();

		match superclass.as_deref().and_then(|name| self.by_original_name(name)) {
			Some(super_id) => {
				self.resolve_class(super_id)?;
				let target = self.get(super_id).target_name.clone();
				self.get_mut(id).mapped_superclass = Some(target);
				self.inherit_methods(id, super_id)?;
			},
			None => {
				self.get_mut(id).mapped_superclass = superclass;
			},
		}

		for interface in interfaces {
			if let Some(interface_id) = self.by_original_name(&interface) {
				self.resolve_class(interface_id)?;
				self.inherit_methods(id, interface_id)?;
			}
		}

		Ok(())
	}

	fn inherit_methods(&mut self, id: ClassId, from: ClassId) -> Result<()> {
		if id == from {
			return Ok(());
		}

		let ancestor = self.get(from);
		let ancestor_name = ancestor.original_name.clone();
		let ancestor_methods: Vec<MemberEntity> = ancestor.methods.clone();

		let class = self.get_mut(id);
		for method in &mut class.methods {
			if method.original_name == "<init>" || method.original_name == "<clinit>" {
				continue;
			}

			if let Some(ancestor_method) = ancestor_methods.iter().find(|m| m.is_equivalent(method)) {
				if method.inherited && method.target_name != ancestor_method.target_name {
					warn!("method {}.{}{} inherits different names, {:?} is replaced by {:?} from {ancestor_name}",
						class.original_name, method.original_name, method.signature, method.target_name, ancestor_method.target_name);
				}

				method.inherit(ancestor_method)
					.with_context(|| anyhow!("failed to inherit method name from {ancestor_name} into {}", class.original_name))?;

				debug!("inherited method {}.{}{} as {:?} from {ancestor_name}",
					class.original_name, method.original_name, method.signature, method.target_name);
			}
		}

		Ok(())
	}
}
