//! This crate contains a direct binary representation of a java class file.
//!
//! Use the [Java Virtual Machine Specification, Chapter 4](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html)
//! to build a class file. No format checking is done when creating a `Vec<u8>`.
//!
//! The representation keeps everything that's needed for renaming things in a class file: the
//! constant pool is fully decoded, while attributes are kept as their raw bytes, so that writing a
//! class file produces the exact bytes that were read, unless something got changed.
//!
//! This code creates the same class as `javac` would, if ran on the class
//! ```java,ignore
//! package org.example;
//!
//! class Main {}
//! ```
//! (with the `<init>` method left out).
//! ```
//! # use pretty_assertions::assert_eq;
//! use raw_class_file::{ClassFile, ConstantPool, CpInfo, flags};
//! let class = ClassFile {
//!     minor_version: 0,
//!     major_version: 52,
//!     constant_pool: ConstantPool::from(vec![
//!         // the constant pool indices start at 1, not at 0
//!         CpInfo::Class { name_index: 3 },
//!         CpInfo::Class { name_index: 4 },
//!         CpInfo::Utf8 { bytes: b"org/example/Main".to_vec() },
//!         CpInfo::Utf8 { bytes: b"java/lang/Object".to_vec() },
//!     ]),
//!     access_flags: flags::ACC_SUPER,
//!     this_class: 1,
//!     super_class: 2,
//!     interfaces: vec![],
//!     fields: vec![],
//!     methods: vec![],
//!     attributes: vec![],
//! };
//!
//! let bytes = class.to_bytes().unwrap();
//!
//! let class_2 = ClassFile::read(&mut std::io::Cursor::new(&bytes)).unwrap();
//!
//! assert_eq!(bytes.len(), class_2.length());
//! assert_eq!(class_2.name().unwrap(), "org/example/Main");
//! assert_eq!(class_2.super_class_name().unwrap().as_deref(), Some("java/lang/Object"));
//! ```
//!
//! As you can see, [ClassFile] also has [ClassFile::read] and [ClassFile::write] to interface with things implementing [std::io::Read] and
//! [std::io::Write].
//!
//! The [ClassFile::length] function gives the computed length of a class file, useful for allocating sufficient memory for buffers.
use std::borrow::Cow;
use anyhow::{anyhow, Context, Result};
use macros::notation;

mod macros;
pub mod mutf8;

mod pool;
pub use pool::ConstantPool;

impl ClassFile {
	/// Converts the class file to binary representation.
	pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
		let mut vec = Vec::with_capacity(self.length());
		self.jvms_write(&mut vec)?;
		Ok(vec)
	}

	pub fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
		self.jvms_write(writer)
	}

	pub fn read(reader: &mut impl std::io::Read) -> std::io::Result<ClassFile> {
		ClassFile::jvms_read(reader)
	}

	/// The length of the class file produced by [`Self::to_bytes`], in bytes.
	pub fn length(&self) -> usize {
		self.jvms_len() as usize
	}

	/// The internal name of this class, like `org/example/Main`.
	pub fn name(&self) -> Result<Cow<'_, str>> {
		self.constant_pool.get_class_name(self.this_class)
			.context("failed to get the name of the class")
	}

	/// The internal name of the super class, or [`None`] if there's no super class (like for
	/// `java/lang/Object`).
	pub fn super_class_name(&self) -> Result<Option<Cow<'_, str>>> {
		if self.super_class == 0 {
			return Ok(None);
		}
		self.constant_pool.get_class_name(self.super_class)
			.map(Some)
			.context("failed to get the name of the super class")
	}

	/// The internal names of all directly implemented interfaces, in declaration order.
	pub fn interface_names(&self) -> Result<Vec<Cow<'_, str>>> {
		self.interfaces.iter()
			.map(|&index| {
				self.constant_pool.get_class_name(index)
					.with_context(|| anyhow!("failed to get the name of the interface at {index}"))
			})
			.collect()
	}

	pub fn is_enum(&self) -> bool {
		self.access_flags & flags::ACC_ENUM != 0
	}
}

pub mod flags {
	pub const ACC_PUBLIC: u16       = 0x0001; // class, field, method
	pub const ACC_PRIVATE: u16      = 0x0002; // field, method
	pub const ACC_PROTECTED: u16    = 0x0004; // field, method
	pub const ACC_STATIC: u16       = 0x0008; // field, method
	pub const ACC_FINAL: u16        = 0x0010; // class, field, method
	pub const ACC_SUPER: u16        = 0x0020; // class
	pub const ACC_INTERFACE: u16    = 0x0200; // class
	pub const ACC_ABSTRACT: u16     = 0x0400; // class, method
	pub const ACC_SYNTHETIC: u16    = 0x1000; // class, field, method
	pub const ACC_ANNOTATION: u16   = 0x2000; // class
	pub const ACC_ENUM: u16         = 0x4000; // class, field
}

notation!(
	struct ClassFile {
		const magic: u32 = 0xCAFEBABEu32,
		mut minor_version: u16,
		mut major_version: u16,
		mut constant_pool: ConstantPool,
		mut access_flags: u16,
		mut this_class: u16,
		mut super_class: u16,
		mut interfaces: Vec<u16> [u16],
		mut fields: Vec<FieldInfo> [u16],
		mut methods: Vec<MethodInfo> [u16],
		mut attributes: Vec<AttributeInfo> [u16],
	}
);

notation!(
	enum CpInfo {
		tag: u8,
		Class {
			= 7 => 7,
			mut name_index: u16,
		},
		Fieldref {
			= 9 => 9,
			mut class_index: u16,
			mut name_and_type_index: u16,
		},
		Methodref {
			= 10 => 10,
			mut class_index: u16,
			mut name_and_type_index: u16,
		},
		InterfaceMethodref {
			= 11 => 11,
			mut class_index: u16,
			mut name_and_type_index: u16,
		},
		String {
			= 8 => 8,
			mut string_index: u16,
		},
		Integer {
			= 3 => 3,
			mut bytes: u32,
		},
		Float {
			= 4 => 4,
			mut bytes: u32,
		},
		Long {
			= 5 => 5,
			mut high_bytes: u32,
			mut low_bytes: u32,
		},
		Double {
			= 6 => 6,
			mut high_bytes: u32,
			mut low_bytes: u32,
		},
		NameAndType {
			= 12 => 12,
			mut name_index: u16,
			mut descriptor_index: u16,
		},
		Utf8 {
			= 1 => 1,
			mut bytes: Vec<u8> [u16],
		},
		MethodHandle {
			= 15 => 15,
			mut reference_kind: u8,
			mut reference_index: u16,
		},
		MethodType {
			= 16 => 16,
			mut descriptor_index: u16,
		},
		Dynamic {
			= 17 => 17,
			mut bootstrap_method_attr_index: u16,
			mut name_and_type_index: u16,
		},
		InvokeDynamic {
			= 18 => 18,
			mut bootstrap_method_attr_index: u16,
			mut name_and_type_index: u16,
		},
		Module {
			= 19 => 19,
			mut name_index: u16,
		},
		Package {
			= 20 => 20,
			mut name_index: u16,
		},
		_ {
			tag => Err(std::io::Error::other(format!("unexpected constant pool tag {tag}"))),
		},
	}
);

impl CpInfo {
	/// Whether this entry takes up two indices in the constant pool.
	///
	/// This is the case for [`CpInfo::Long`] and [`CpInfo::Double`].
	pub fn is_wide(&self) -> bool {
		matches!(self, CpInfo::Long { .. } | CpInfo::Double { .. })
	}
}

notation!(
	struct FieldInfo {
		mut access_flags: u16,
		mut name_index: u16,
		mut descriptor_index: u16,
		mut attributes: Vec<AttributeInfo> [u16],
	}
);

notation!(
	struct MethodInfo {
		mut access_flags: u16,
		mut name_index: u16,
		mut descriptor_index: u16,
		mut attributes: Vec<AttributeInfo> [u16],
	}
);

// An attribute, with its content kept as raw bytes.
// Attributes referencing the constant pool stay valid, as entries are only changed in place or appended.
notation!(
	struct AttributeInfo {
		mut attribute_name_index: u16,
		mut info: Vec<u8> [u32],
	}
);

/// The common part of [`FieldInfo`] and [`MethodInfo`].
pub trait MemberInfo {
	fn access_flags(&self) -> u16;
	fn access_flags_mut(&mut self) -> &mut u16;
	fn name_index(&self) -> u16;
	fn set_name_index(&mut self, index: u16);
	fn descriptor_index(&self) -> u16;
	fn set_descriptor_index(&mut self, index: u16);

	fn name<'a>(&self, pool: &'a ConstantPool) -> Result<Cow<'a, str>> {
		pool.get_utf8(self.name_index())
			.context("failed to get member name")
	}

	fn descriptor<'a>(&self, pool: &'a ConstantPool) -> Result<Cow<'a, str>> {
		pool.get_utf8(self.descriptor_index())
			.context("failed to get member descriptor")
	}

	fn has_flag(&self, flag: u16) -> bool {
		self.access_flags() & flag != 0
	}

	fn is_synthetic(&self) -> bool {
		self.has_flag(flags::ACC_SYNTHETIC)
	}

	fn set_synthetic(&mut self, synthetic: bool) {
		if synthetic {
			*self.access_flags_mut() |= flags::ACC_SYNTHETIC;
		} else {
			*self.access_flags_mut() &= !flags::ACC_SYNTHETIC;
		}
	}
}

macro_rules! member_info {
	($($t:ty),*) => {
		$(
			impl MemberInfo for $t {
				fn access_flags(&self) -> u16 {
					self.access_flags
				}
				fn access_flags_mut(&mut self) -> &mut u16 {
					&mut self.access_flags
				}
				fn name_index(&self) -> u16 {
					self.name_index
				}
				fn set_name_index(&mut self, index: u16) {
					self.name_index = index;
				}
				fn descriptor_index(&self) -> u16 {
					self.descriptor_index
				}
				fn set_descriptor_index(&mut self, index: u16) {
					self.descriptor_index = index;
				}
			}
		)*
	}
}

member_info!(FieldInfo, MethodInfo);
