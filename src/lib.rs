//! Renaming of the classes, fields and methods in java jars.
//!
//! There are two steps:
//! - [`dump`][dump::dump] reads a jar and generates a mapping for every class, field and method in it. Names too short
//!   to mean anything are replaced by generated ones, and methods overriding another method get the name of the
//!   overridden one. The mappings are written to a [mapping file][mapping_file], together with a hash of the jar.
//! - [`convert`][convert::convert] reads a mapping file, checks that it was made for the jar, and writes a copy of the jar
//!   with all the classes renamed. Everything that isn't a class is copied as is.
//!
//! The [mappings][mapping::Mappings] can also be edited between the two steps, as long as the names of the classes
//! stay unique.

pub mod convert;
pub mod descriptor;
pub mod dump;
pub mod error;
pub mod generate;
pub mod hash;
pub mod interner;
pub mod mapping;
pub mod mapping_file;
pub mod names;
pub mod patch;
