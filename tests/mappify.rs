use std::io::Cursor;
use std::path::PathBuf;
use anyhow::Result;
use pretty_assertions::assert_eq;
use jarbox::{BasicFileAttributes, FileJar, Jar, JarEntryEnum, JarWriter, NamedMemJar, OpenedJar, MANIFEST_PATH};
use mappify::descriptor::to_internal;
use mappify::dump::generate_mappings;
use mappify::error::MappingError;
use mappify::interner::Interner;
use mappify::mapping::Mappings;
use mappify::names::UniqueIds;
use raw_class_file::{flags, ClassFile, ConstantPool, CpInfo, FieldInfo, MemberInfo, MethodInfo};

type Members<'a> = &'a [(u16, &'a str, &'a str)];

/// Builds a class file with the given members, and with member references to the given `(owner, name, descriptor)`s.
fn class(name: &str, super_class: &str, access_flags: u16, fields: Members, methods: Members, references: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
	let mut pool = ConstantPool::new();
	let mut interner = Interner::new(&mut pool);

	let name_index = interner.intern_text(name)?;
	let this_class = interner.pool_mut().push(CpInfo::Class { name_index })?;
	let name_index = interner.intern_text(super_class)?;
	let super_class = interner.pool_mut().push(CpInfo::Class { name_index })?;

	let mut members = |list: Members| -> Result<Vec<(u16, u16, u16)>> {
		list.iter()
			.map(|&(access_flags, name, descriptor)| Ok((access_flags, interner.intern_text(name)?, interner.intern_text(descriptor)?)))
			.collect()
	};
	let fields = members(fields)?;
	let methods = members(methods)?;

	for &(owner, name, descriptor) in references {
		let name_index = interner.intern_text(owner)?;
		let class_index = interner.pool_mut().push(CpInfo::Class { name_index })?;
		let name_and_type_index = interner.intern_name_and_type(name, descriptor)?;
		let entry = if descriptor.starts_with('(') {
			CpInfo::Methodref { class_index, name_and_type_index }
		} else {
			CpInfo::Fieldref { class_index, name_and_type_index }
		};
		interner.pool_mut().push(entry)?;
	}

	let class = ClassFile {
		minor_version: 0,
		major_version: 52,
		constant_pool: pool,
		access_flags,
		this_class,
		super_class,
		interfaces: vec![],
		fields: fields.into_iter()
			.map(|(access_flags, name_index, descriptor_index)| FieldInfo { access_flags, name_index, descriptor_index, attributes: vec![] })
			.collect(),
		methods: methods.into_iter()
			.map(|(access_flags, name_index, descriptor_index)| MethodInfo { access_flags, name_index, descriptor_index, attributes: vec![] })
			.collect(),
		attributes: vec![],
	};
	Ok(class.to_bytes()?)
}

const MANIFEST: &[u8] = b"Manifest-Version: 1.0\r\nMain-Class: com.a.B\r\n\r\n";
const TEXT: &[u8] = b"not a class";

fn input_jar() -> Result<NamedMemJar> {
	let a = class(
		"com/a/A", "java/lang/Object", flags::ACC_PUBLIC,
		&[(flags::ACC_PRIVATE, "x", "I")],
		&[(flags::ACC_PUBLIC, "<init>", "()V"), (flags::ACC_PUBLIC, "f", "()V"), (flags::ACC_STATIC, "<clinit>", "()V")],
		&[("java/lang/Object", "<init>", "()V")],
	)?;
	let b = class(
		"com/a/B", "com/a/A", flags::ACC_PUBLIC,
		&[(0, "other", "Lcom/a/A;")],
		&[(flags::ACC_PUBLIC, "f", "()V"), (flags::ACC_PUBLIC, "g", "(Lcom/a/A;)Lcom/a/B;")],
		&[("com/a/A", "f", "()V"), ("com/a/A", "x", "I")],
	)?;
	let e = class(
		"com/a/E", "java/lang/Enum", flags::ACC_PUBLIC | flags::ACC_FINAL | flags::ACC_ENUM,
		&[
			(flags::ACC_PRIVATE | flags::ACC_STATIC | flags::ACC_FINAL | flags::ACC_SYNTHETIC, "$VALUES", "[Lcom/a/E;"),
			(flags::ACC_PUBLIC | flags::ACC_STATIC | flags::ACC_FINAL | flags::ACC_ENUM, "A", "Lcom/a/E;"),
		],
		&[
			(flags::ACC_PUBLIC | flags::ACC_STATIC, "values", "()[Lcom/a/E;"),
			(flags::ACC_PRIVATE, "<init>", "(Ljava/lang/String;I)V"),
		],
		&[],
	)?;

	let mut writer = JarWriter::new();
	writer.write_entry("com/a/A.class", BasicFileAttributes::default(), &a)?;
	writer.write_entry(MANIFEST_PATH, BasicFileAttributes::default(), MANIFEST)?;
	writer.write_entry("com/a/B.class", BasicFileAttributes::default(), &b)?;
	writer.write_entry("com/a/E.class", BasicFileAttributes::default(), &e)?;
	writer.write_entry("data/text.txt", BasicFileAttributes::default(), TEXT)?;
	writer.finish("input.jar")
}

fn entries(jar: &impl Jar) -> Result<Vec<(String, Vec<u8>)>> {
	let mut opened = jar.open()?;
	opened.entry_keys()
		.map(|key| {
			let entry = opened.by_entry_key(key)?;
			let data = match entry.data {
				JarEntryEnum::Class(data) | JarEntryEnum::Other(data) => data,
				JarEntryEnum::Dir => Vec::new(),
			};
			Ok((entry.name, data))
		})
		.collect()
}

fn class_path(mappings: &Mappings, original: &str) -> Option<String> {
	mappings.target_name_of(original)
		.map(|target| format!("{}.class", to_internal(target)))
}

fn temp_path(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("mappify-test-{}-{name}", std::process::id()))
}

#[test]
fn generated_names() -> Result<()> {
	let mappings = generate_mappings(&input_jar()?, &UniqueIds::new())?;

	assert_eq!(mappings.len(), 3);

	let a = mappings.by_original_name("com.a.A").map(|id| mappings.get(id));
	let b = mappings.by_original_name("com.a.B").map(|id| mappings.get(id));
	let (Some(a), Some(b)) = (a, b) else {
		panic!("classes are missing in {mappings:?}");
	};

	assert!(a.target_name.starts_with("com.a.Class_"), "{a:?}");
	assert_ne!(a.target_name, b.target_name);

	assert_eq!(a.fields.len(), 1);
	assert!(a.fields[0].target_name.starts_with("field_") && a.fields[0].target_name.ends_with("_i"), "{a:?}");

	// no static initializer, sorted by original name
	let names: Vec<_> = a.methods.iter().map(|method| method.original_name.as_str()).collect();
	assert_eq!(names, vec!["<init>", "f"]);
	assert_eq!(a.methods[0].target_name, "<init>");
	assert!(a.methods[1].target_name.starts_with("method_"), "{a:?}");

	// overriding methods get the name of the overridden one
	let b_f = b.methods.iter().find(|method| method.original_name == "f");
	assert_eq!(b_f.map(|method| method.target_name.as_str()), Some(a.methods[1].target_name.as_str()));

	// long enough names are kept
	let b_other = b.fields.iter().find(|field| field.original_name == "other");
	assert_eq!(b_other.map(|field| field.target_name.as_str()), Some("other"));
	assert_eq!(
		b_other.map(|field| field.mapped_signature()),
		Some(format!("L{};", to_internal(&a.target_name)).as_str()),
	);
	Ok(())
}

#[test]
fn generating_is_deterministic() -> Result<()> {
	let jar = input_jar()?;
	let first = mappify::mapping_file::write_string(&generate_mappings(&jar, &UniqueIds::new())?, None)?;
	let second = mappify::mapping_file::write_string(&generate_mappings(&jar, &UniqueIds::new())?, None)?;
	assert_eq!(first, second);
	Ok(())
}

#[test]
fn mapping_file_round_trip() -> Result<()> {
	let mappings = generate_mappings(&input_jar()?, &UniqueIds::new())?;

	let written = mappify::mapping_file::write_string(&mappings, Some("MD5 0"))?;
	let read = mappify::mapping_file::read(written.as_bytes(), Some("MD5 0"))?;

	let pairs = |mappings: &Mappings| -> Vec<(String, String)> {
		let mut pairs: Vec<_> = mappings.classes()
			.map(|class| (class.original_name.clone(), class.target_name.clone()))
			.chain(mappings.members().map(|member| {
				let owner = mappings.get(member.owner);
				(
					format!("{}.{} {}", owner.original_name, member.original_name, member.signature),
					format!("{}.{} {}", owner.target_name, member.target_name, member.mapped_signature()),
				)
			}))
			.collect();
		pairs.sort();
		pairs
	};
	assert_eq!(pairs(&read), pairs(&mappings));
	Ok(())
}

#[test]
fn remap_jar() -> Result<()> {
	let jar = input_jar()?;
	let mappings = generate_mappings(&jar, &UniqueIds::new())?;

	let remapped = mappify::convert::remap_jar(&jar, &mappings, "output.jar")?;
	let entries = entries(&remapped)?;

	let a_path = class_path(&mappings, "com.a.A");
	let b_path = class_path(&mappings, "com.a.B");
	let e_path = class_path(&mappings, "com.a.E");
	let names: Vec<_> = entries.iter().map(|(name, _)| Some(name.clone())).collect();
	assert_eq!(names, vec![
		Some(MANIFEST_PATH.to_owned()),
		a_path.clone(),
		b_path.clone(),
		e_path.clone(),
		Some("data/text.txt".to_owned()),
	]);
	assert_eq!(entries[0].1, MANIFEST);
	assert_eq!(entries[4].1, TEXT);

	let a_target = mappings.target_name_of("com.a.A").map(to_internal);
	let a = mappings.by_original_name("com.a.A").map(|id| mappings.get(id));
	let f_target = a.and_then(|a| a.methods.iter().find(|method| method.original_name == "f")).map(|method| method.target_name.clone());
	let x_target = a.map(|a| a.fields[0].target_name.clone());

	let b = ClassFile::read(&mut Cursor::new(&entries[2].1))?;
	let pool = &b.constant_pool;
	assert_eq!(Some(b.name()?.into_owned()), mappings.target_name_of("com.a.B").map(to_internal));
	assert_eq!(b.super_class_name()?.map(|name| name.into_owned()), a_target);

	let references: Vec<_> = pool.iter()
		.filter_map(|(_, entry)| match *entry {
			CpInfo::Fieldref { class_index, name_and_type_index } |
			CpInfo::Methodref { class_index, name_and_type_index } => Some((class_index, name_and_type_index)),
			_ => None,
		})
		.map(|(class_index, name_and_type_index)| -> Result<_> {
			let (name, descriptor) = pool.get_name_and_type(name_and_type_index)?;
			Ok((Some(pool.get_class_name(class_index)?.into_owned()), name.into_owned(), descriptor.into_owned()))
		})
		.collect::<Result<_>>()?;
	assert_eq!(references, vec![
		(a_target.clone(), f_target.clone().unwrap_or_default(), "()V".to_owned()),
		(a_target.clone(), x_target.unwrap_or_default(), "I".to_owned()),
	]);

	// the overriding method has the same name
	assert_eq!(b.methods[0].name(pool)?.into_owned(), f_target.unwrap_or_default());

	let e = ClassFile::read(&mut Cursor::new(&entries[3].1))?;
	let pool = &e.constant_pool;
	assert_eq!(e.fields.len(), 2);
	assert_eq!(e.fields[1].name(pool)?, "$VALUES");
	assert!(e.fields[1].is_synthetic());
	assert!(!e.fields[0].is_synthetic());
	assert!(e.methods.iter().all(|method| method.is_synthetic()));
	Ok(())
}

#[test]
fn remapping_twice_changes_nothing() -> Result<()> {
	let jar = input_jar()?;
	let mappings = generate_mappings(&jar, &UniqueIds::new())?;

	let once = mappify::convert::remap_jar(&jar, &mappings, "once.jar")?;
	let twice = mappify::convert::remap_jar(&once, &mappings, "twice.jar")?;

	assert_eq!(entries(&twice)?, entries(&once)?);
	Ok(())
}

#[test]
fn dump_and_convert() -> Result<()> {
	let source = temp_path("dump_and_convert-source.jar");
	let mapfile = temp_path("dump_and_convert.map");
	let target = temp_path("dump_and_convert-target.jar");

	input_jar()?.put_to_file(&source)?;
	let source_jar = FileJar { path: source.clone() };

	let mappings = mappify::dump::dump(&source_jar, &mapfile)?;
	let written = std::fs::read_to_string(&mapfile)?;
	assert!(written.starts_with("HASH: MD5 "), "{written}");
	assert_eq!(written.lines().filter(|line| line.starts_with("CL: ")).count(), mappings.len());

	mappify::convert::convert(&source_jar, &target, &mapfile)?;

	let names: Vec<_> = entries(&FileJar { path: target.clone() })?.into_iter().map(|(name, _)| name).collect();
	assert_eq!(names.first().map(String::as_str), Some(MANIFEST_PATH));
	assert_eq!(names.get(1).cloned(), class_path(&mappings, "com.a.A"));

	for path in [source, mapfile, target] {
		std::fs::remove_file(path)?;
	}
	Ok(())
}

#[test]
fn convert_with_mapping_for_other_jar() -> Result<()> {
	let source = temp_path("other_jar-source.jar");
	let other = temp_path("other_jar-other.jar");
	let mapfile = temp_path("other_jar.map");
	let target = temp_path("other_jar-target.jar");

	input_jar()?.put_to_file(&source)?;
	let mut writer = JarWriter::new();
	writer.write_entry("data/text.txt", BasicFileAttributes::default(), TEXT)?;
	writer.finish("other.jar")?.put_to_file(&other)?;

	mappify::dump::dump(&FileJar { path: other.clone() }, &mapfile)?;

	let result = mappify::convert::convert(&FileJar { path: source.clone() }, &target, &mapfile);
	let error = result.err().and_then(|e| e.downcast_ref::<MappingError>().cloned());
	assert!(matches!(error, Some(MappingError::HashMismatch { .. })), "{error:?}");
	assert!(!target.exists());

	for path in [source, other, mapfile] {
		std::fs::remove_file(path)?;
	}
	Ok(())
}
