use crate::mapping::MemberEntity;

/// The mapping of a class, together with the mappings of the fields and methods it declares.
///
/// Class names are dotted, like `com.example.Main`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntity {
	pub original_name: String,
	pub target_name: String,
	pub original_superclass: Option<String>,
	pub original_interfaces: Vec<String>,
	/// The target name of the super class, only set once inheritance got resolved.
	///
	/// If the super class isn't mapped, this is the original name of it.
	pub mapped_superclass: Option<String>,
	pub fields: Vec<MemberEntity>,
	pub methods: Vec<MemberEntity>,
	pub(crate) inheritance_resolved: bool,
}

impl ClassEntity {
	pub fn new(original_name: String, target_name: String, original_superclass: Option<String>, original_interfaces: Vec<String>) -> ClassEntity {
		ClassEntity {
			original_name,
			target_name,
			original_superclass,
			original_interfaces,
			mapped_superclass: None,
			fields: Vec::new(),
			methods: Vec::new(),
			inheritance_resolved: false,
		}
	}

	pub fn members(&self) -> impl Iterator<Item=&MemberEntity> {
		self.fields.iter().chain(self.methods.iter())
	}

	/// Sorts the fields and methods by their original name, keeping the order of members with the same name.
	pub fn sort_members(&mut self) {
		self.fields.sort_by(|a, b| a.original_name.cmp(&b.original_name));
		self.methods.sort_by(|a, b| a.original_name.cmp(&b.original_name));
	}
}
