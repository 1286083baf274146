//! Reading and writing of `.jar` files.
//!
//! A [`Jar`] can be [opened][Jar::open] for reading its entries, see [`OpenedJar`]. New jars are
//! built in memory with a [`JarWriter`], and only touch the disk once they're [put to a file][Jar::put_to_file].

mod file_attrs;
pub use file_attrs::BasicFileAttributes;

mod jar;
pub use jar::Jar;

mod jar_entry;
pub use jar_entry::{JarEntry, JarEntryEnum};

mod opened_jar;
pub use opened_jar::OpenedJar;

mod writer;
pub use writer::JarWriter;

mod zip_file;
pub use zip_file::FileJar;

mod zip_impls;

mod zip_mem_named;
pub use zip_mem_named::NamedMemJar;

/// The path of the manifest inside a jar.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
