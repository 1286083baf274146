use md5::Md5;
use sha2::{Digest, Sha256, Sha512};

/// Computes the provenance hash of a jar, from the raw bytes of the jar file.
///
/// This is what is written in the `HASH:` line of a mapping file, without the `HASH: ` prefix. The
/// digests are lowercase hex.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// let hash = mappify::hash::jar_hash(b"");
/// assert!(hash.starts_with("MD5 d41d8cd98f00b204e9800998ecf8427e;SHA-256 e3b0c442"));
/// ```
pub fn jar_hash(data: &[u8]) -> String {
	format!(
		"MD5 {};SHA-256 {};SHA-512 {}",
		hex::encode(Md5::digest(data)),
		hex::encode(Sha256::digest(data)),
		hex::encode(Sha512::digest(data)),
	)
}
