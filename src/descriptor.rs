//! Conversions between the two spellings of class names, and remapping of descriptors.
//!
//! Class names are either dotted (`java.lang.Object`), which is what mapping files use, or in the
//! internal form (`java/lang/Object`), which is what class files use.

pub fn to_dotted(name: &str) -> String {
	name.replace('/', ".")
}

pub fn to_internal(name: &str) -> String {
	name.replace('.', "/")
}

/// Remaps every class reference `L...;` in a field or method descriptor.
///
/// The `lookup` gets the dotted original name and gives back the dotted target name. Class
/// references with no target are left alone. Everything outside of class references is copied.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use mappify::descriptor::map_signature;
/// let lookup = |name: &str| (name == "com.a.Foo").then_some("com.a.Class_000001");
///
/// assert_eq!(map_signature("(Lcom/a/Foo;I)Lcom/a/Foo;", lookup), "(Lcom/a/Class_000001;I)Lcom/a/Class_000001;");
/// assert_eq!(map_signature("[Ljava/lang/String;", lookup), "[Ljava/lang/String;");
/// ```
pub fn map_signature<'a>(signature: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
	let mut s = String::with_capacity(signature.len());

	let mut iter = signature.chars();

	while let Some(ch) = iter.next() {
		s.push(ch);

		if ch == 'L' {
			let mut class_name = String::new();
			let mut terminated = false;
			for ch in iter.by_ref() {
				if ch == ';' {
					terminated = true;
					break;
				}
				class_name.push(ch);
			}

			if !terminated {
				s.push_str(&class_name);
				break;
			}

			match lookup(&to_dotted(&class_name)) {
				Some(target) => s.push_str(&to_internal(target)),
				None => s.push_str(&class_name),
			}
			s.push(';');
		}
	}

	s
}
