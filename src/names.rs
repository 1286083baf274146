//! The placeholder names given out by the auto-mapping.
//!
//! Names that are too short get replaced by a placeholder containing a [unique id][UniqueIds].
//! Names that already look like such a placeholder get an `X` inserted, so that they can't collide
//! with a newly given out one.

use std::collections::HashSet;
use std::sync::Mutex;
use anyhow::{anyhow, bail, Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The seed used for generating unique ids, so that auto-mapping the same jar twice gives the same names.
pub const SEED: u64 = 1001;

const ID_COUNT: u32 = 1_000_000;

/// A pool of six digit ids, handing out each id at most once.
///
/// The ids are random, but the sequence only depends on the seed. The generator is a fixed algorithm, so
/// the same seed gives the same ids on every platform and version.
#[derive(Debug)]
pub struct UniqueIds {
	state: Mutex<UniqueIdsState>,
}

#[derive(Debug)]
struct UniqueIdsState {
	rng: ChaCha8Rng,
	used: HashSet<u32>,
}

impl UniqueIds {
	pub fn new() -> UniqueIds {
		UniqueIds::with_seed(SEED)
	}

	pub fn with_seed(seed: u64) -> UniqueIds {
		UniqueIds {
			state: Mutex::new(UniqueIdsState {
				rng: ChaCha8Rng::seed_from_u64(seed),
				used: HashSet::new(),
			}),
		}
	}

	/// Gets the next unused id, zero padded to six digits.
	///
	/// ```
	/// # use pretty_assertions::assert_eq;
	/// use mappify::names::UniqueIds;
	/// let ids = UniqueIds::new();
	/// let id = ids.next_unique_id().unwrap();
	///
	/// assert_eq!(id.len(), 6);
	/// assert_ne!(ids.next_unique_id().unwrap(), id);
	/// ```
	pub fn next_unique_id(&self) -> Result<String> {
		let mut state = self.state.lock()
			.map_err(|_| anyhow!("unique id pool was poisoned"))?;

		if state.used.len() >= ID_COUNT as usize {
			bail!("all {ID_COUNT} unique ids are used up");
		}

		loop {
			let id = state.rng.gen_range(0..ID_COUNT);
			if state.used.insert(id) {
				return Ok(format!("{id:06}"));
			}
		}
	}
}

impl Default for UniqueIds {
	fn default() -> Self {
		UniqueIds::new()
	}
}

/// Checks if `s` is made up of at least one ascii digit, and nothing else.
fn is_number(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_word_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_class_placeholder(simple_name: &str) -> bool {
	simple_name.strip_prefix("Class_").is_some_and(is_number)
}

fn is_field_placeholder(name: &str) -> bool {
	name.strip_prefix("field_")
		.and_then(|rest| rest.split_once('_'))
		.is_some_and(|(number, type_char)| {
			let mut chars = type_char.chars();
			is_number(number) && chars.next().is_some_and(is_word_char) && chars.next().is_none()
		})
}

fn is_method_placeholder(name: &str) -> bool {
	name.strip_prefix("method_").is_some_and(is_number)
}

/// Gives the target name for a class, given the dotted name.
///
/// The package is kept, only the simple name gets replaced.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use mappify::names::{class_target_name, UniqueIds};
/// let ids = UniqueIds::new();
///
/// assert_eq!(class_target_name("com.a.Class_12", &ids).unwrap(), "com.a.Class_X12");
/// assert!(class_target_name("com.a.Foo", &ids).unwrap().starts_with("com.a.Class_"));
/// ```
pub fn class_target_name(name: &str, ids: &UniqueIds) -> Result<String> {
	let (package, simple_name) = match name.rsplit_once('.') {
		Some((package, simple_name)) => (&name[..=package.len()], simple_name),
		None => ("", name),
	};

	if is_class_placeholder(simple_name) {
		Ok(format!("{package}Class_X{}", &simple_name["Class_".len()..]))
	} else {
		Ok(format!("{package}Class_{}", ids.next_unique_id()?))
	}
}

/// Gives the target name for a field.
///
/// Names shorter than three characters get replaced by `field_<id>_<type>`, with `<type>` being the
/// lowercase first character of the descriptor (`a` for arrays).
pub fn field_target_name(name: &str, descriptor: &str, ids: &UniqueIds) -> Result<String> {
	if name.chars().count() < 3 {
		let type_char = match descriptor.chars().next() {
			Some('[') => 'a',
			Some(ch) => ch.to_ascii_lowercase(),
			None => bail!("field {name:?} has an empty descriptor"),
		};
		let id = ids.next_unique_id()
			.with_context(|| anyhow!("failed to get unique id for field {name:?}"))?;
		Ok(format!("field_{id}_{type_char}"))
	} else if is_field_placeholder(name) {
		Ok(format!("field_X{}", &name["field_".len()..]))
	} else {
		Ok(name.to_owned())
	}
}

/// Gives the target name for a method.
///
/// Names shorter than three characters get replaced by `method_<id>`.
pub fn method_target_name(name: &str, ids: &UniqueIds) -> Result<String> {
	if name.chars().count() < 3 {
		let id = ids.next_unique_id()
			.with_context(|| anyhow!("failed to get unique id for method {name:?}"))?;
		Ok(format!("method_{id}"))
	} else if is_method_placeholder(name) {
		Ok(format!("method_X{}", &name["method_".len()..]))
	} else {
		Ok(name.to_owned())
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use rand::{Rng, SeedableRng};
	use rand_chacha::ChaCha8Rng;
	use crate::names::{class_target_name, field_target_name, is_field_placeholder, method_target_name, UniqueIds, ID_COUNT, SEED};

	#[test]
	fn ids_are_deterministic() -> Result<()> {
		let a = UniqueIds::new();
		let b = UniqueIds::new();
		for _ in 0..100 {
			assert_eq!(a.next_unique_id()?, b.next_unique_id()?);
		}
		Ok(())
	}

	#[test]
	fn ids_follow_the_chacha8_stream() -> Result<()> {
		let mut rng = ChaCha8Rng::seed_from_u64(SEED);
		let ids = UniqueIds::new();
		for _ in 0..20 {
			let expected = format!("{:06}", rng.gen_range(0..ID_COUNT));
			assert_eq!(ids.next_unique_id()?, expected);
		}
		Ok(())
	}

	#[test]
	fn ids_are_unique() -> Result<()> {
		let ids = UniqueIds::with_seed(7);
		let mut seen = std::collections::HashSet::new();
		for _ in 0..10_000 {
			let id = ids.next_unique_id()?;
			assert_eq!(id.len(), 6);
			assert!(id.bytes().all(|b| b.is_ascii_digit()));
			assert!(seen.insert(id));
		}
		Ok(())
	}

	#[test]
	fn class_names() -> Result<()> {
		let ids = UniqueIds::new();
		let first = ids.next_unique_id()?;

		let ids = UniqueIds::new();
		assert_eq!(class_target_name("com.a.Foo", &ids)?, format!("com.a.Class_{first}"));
		assert_eq!(class_target_name("Class_5", &ids)?, "Class_X5");
		assert_eq!(class_target_name("a.b.Class_", &ids)?.len(), "a.b.Class_000000".len());
		assert_eq!(class_target_name("a.b.Class_1a", &ids)?.len(), "a.b.Class_000000".len());
		Ok(())
	}

	#[test]
	fn field_names() -> Result<()> {
		let ids = UniqueIds::new();
		let first = ids.next_unique_id()?;
		let second = ids.next_unique_id()?;

		let ids = UniqueIds::new();
		assert_eq!(field_target_name("a", "I", &ids)?, format!("field_{first}_i"));
		assert_eq!(field_target_name("ab", "[Ljava/lang/String;", &ids)?, format!("field_{second}_a"));
		assert_eq!(field_target_name("field_12_i", "I", &ids)?, "field_X12_i");
		assert_eq!(field_target_name("counter", "I", &ids)?, "counter");
		assert!(field_target_name("a", "", &ids).is_err());
		Ok(())
	}

	#[test]
	fn field_placeholders() {
		assert!(is_field_placeholder("field_1_a"));
		assert!(is_field_placeholder("field_000123__"));
		assert!(!is_field_placeholder("field_1_ab"));
		assert!(!is_field_placeholder("field__a"));
		assert!(!is_field_placeholder("field_1a_a"));
		assert!(!is_field_placeholder("field_1"));
	}

	#[test]
	fn method_names() -> Result<()> {
		let ids = UniqueIds::new();
		let first = ids.next_unique_id()?;

		let ids = UniqueIds::new();
		assert_eq!(method_target_name("a", &ids)?, format!("method_{first}"));
		assert_eq!(method_target_name("method_77", &ids)?, "method_X77");
		assert_eq!(method_target_name("method_77a", &ids)?, "method_77a");
		assert_eq!(method_target_name("<init>", &ids)?, "<init>");
		assert_eq!(method_target_name("run", &ids)?, "run");
		Ok(())
	}
}
