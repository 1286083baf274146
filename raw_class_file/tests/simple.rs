use anyhow::Result;
use pretty_assertions::assert_eq;
use raw_class_file::{AttributeInfo, ClassFile, ConstantPool, CpInfo, FieldInfo, flags, MemberInfo, MethodInfo};

fn class() -> ClassFile {
	ClassFile {
		minor_version: 0,
		major_version: 52,
		constant_pool: ConstantPool::from(vec![
			CpInfo::Utf8 { bytes: b"ThisClass".to_vec() },
			CpInfo::Class { name_index: 1 },
			CpInfo::Utf8 { bytes: b"ThatClass".to_vec() },
			CpInfo::Class { name_index: 3 },
			CpInfo::Utf8 { bytes: b"ThisInterface".to_vec() },
			CpInfo::Class { name_index: 5 },
			CpInfo::Utf8 { bytes: b"ThatInterface".to_vec() },
			CpInfo::Class { name_index: 7 },
			CpInfo::Utf8 { bytes: b"thisField".to_vec() },
			CpInfo::Utf8 { bytes: b"J".to_vec() },
			CpInfo::Utf8 { bytes: b"ConstantValue".to_vec() },
			CpInfo::Long { high_bytes: 0, low_bytes: 42 },
			CpInfo::Utf8 { bytes: b"thatField".to_vec() },
			CpInfo::Utf8 { bytes: b"F".to_vec() },
			CpInfo::Float { bytes: 42.3456f32.to_bits() },
			CpInfo::Utf8 { bytes: b"thisMethod".to_vec() },
			CpInfo::Utf8 { bytes: b"()I".to_vec() },
			CpInfo::Utf8 { bytes: b"thatMethod".to_vec() },
			CpInfo::Utf8 { bytes: b"()F".to_vec() },
		]),
		access_flags: flags::ACC_ABSTRACT,
		this_class: 2,
		super_class: 4,
		interfaces: vec![6, 8],
		fields: vec![
			FieldInfo {
				access_flags: 0,
				name_index: 9,
				descriptor_index: 10,
				attributes: vec![
					AttributeInfo {
						attribute_name_index: 11,
						info: vec![0, 12],
					}
				],
			},
			FieldInfo {
				access_flags: flags::ACC_SYNTHETIC,
				name_index: 14,
				descriptor_index: 15,
				attributes: vec![
					AttributeInfo {
						attribute_name_index: 11,
						info: vec![0, 16],
					}
				],
			},
		],
		methods: vec![
			MethodInfo {
				access_flags: flags::ACC_ABSTRACT,
				name_index: 17,
				descriptor_index: 18,
				attributes: vec![],
			},
			MethodInfo {
				access_flags: flags::ACC_ABSTRACT,
				name_index: 19,
				descriptor_index: 20,
				attributes: vec![],
			},
		],
		attributes: vec![],
	}
}

#[test]
fn round_trip() -> Result<()> {
	let class = class();

	let bytes = class.to_bytes()?;
	assert_eq!(bytes.len(), class.length());

	let mut cursor = std::io::Cursor::new(&bytes);
	let read = ClassFile::read(&mut cursor)?;

	assert_eq!(class, read);

	let mut bytes_2 = Vec::new();
	read.write(&mut bytes_2)?;
	assert_eq!(bytes, bytes_2);
	Ok(())
}

#[test]
fn structure() -> Result<()> {
	let class = class();

	assert_eq!(class.name()?, "ThisClass");
	assert_eq!(class.super_class_name()?.as_deref(), Some("ThatClass"));
	assert_eq!(class.interface_names()?, vec!["ThisInterface", "ThatInterface"]);
	assert!(!class.is_enum());

	let pool = &class.constant_pool;
	assert_eq!(class.fields[0].name(pool)?, "thisField");
	assert_eq!(class.fields[0].descriptor(pool)?, "J");
	assert!(!class.fields[0].is_synthetic());
	assert_eq!(class.fields[1].name(pool)?, "thatField");
	assert!(class.fields[1].is_synthetic());
	assert_eq!(class.methods[1].name(pool)?, "thatMethod");
	assert_eq!(class.methods[1].descriptor(pool)?, "()F");
	Ok(())
}

#[test]
fn set_synthetic() {
	let mut class = class();

	class.fields[0].set_synthetic(true);
	class.fields[1].set_synthetic(false);
	class.methods[0].set_synthetic(true);

	assert_eq!(class.fields[0].access_flags, flags::ACC_SYNTHETIC);
	assert_eq!(class.fields[1].access_flags, 0);
	assert_eq!(class.methods[0].access_flags, flags::ACC_ABSTRACT | flags::ACC_SYNTHETIC);
}

#[test]
fn exact_bytes() -> Result<()> {
	let class = ClassFile {
		minor_version: 0,
		major_version: 52,
		constant_pool: ConstantPool::from(vec![
			CpInfo::Class { name_index: 3 },
			CpInfo::Class { name_index: 4 },
			CpInfo::Utf8 { bytes: b"A".to_vec() },
			CpInfo::Utf8 { bytes: b"B".to_vec() },
		]),
		access_flags: flags::ACC_PUBLIC | flags::ACC_SUPER,
		this_class: 1,
		super_class: 2,
		interfaces: vec![],
		fields: vec![],
		methods: vec![],
		attributes: vec![
			AttributeInfo {
				attribute_name_index: 3,
				info: vec![0xab, 0xcd],
			},
		],
	};

	let expected: &[u8] = &[
		0xca, 0xfe, 0xba, 0xbe,
		0x00, 0x00, 0x00, 0x34,
		0x00, 0x05,
		0x07, 0x00, 0x03,
		0x07, 0x00, 0x04,
		0x01, 0x00, 0x01, b'A',
		0x01, 0x00, 0x01, b'B',
		0x00, 0x21,
		0x00, 0x01,
		0x00, 0x02,
		0x00, 0x00,
		0x00, 0x00,
		0x00, 0x00,
		0x00, 0x01,
		0x00, 0x03, 0x00, 0x00, 0x00, 0x02, 0xab, 0xcd,
	];

	assert_eq!(class.to_bytes()?.as_slice(), expected);
	assert_eq!(ClassFile::read(&mut std::io::Cursor::new(expected))?, class);
	Ok(())
}

#[test]
fn bad_magic() {
	let bytes: &[u8] = &[0xca, 0xfe, 0xba, 0xbf, 0, 0, 0, 0x34];
	assert!(ClassFile::read(&mut std::io::Cursor::new(bytes)).is_err());
}

#[test]
fn no_super_class() -> Result<()> {
	let mut class = class();
	class.super_class = 0;
	assert_eq!(class.super_class_name()?, None);
	Ok(())
}
