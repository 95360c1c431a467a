//! Identity hashing for params using BLAKE3
//!
//! Declared params and parsed values are built independently, so they are
//! matched up by a digest of `(path, name)` rather than by object identity.

use blake3::Hasher;
use std::fmt;

/// Identity of a `(path, name)` pair
///
/// The readable `path/name` is kept in front of the hex digest to make
/// debugging easier; equality still depends on the digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamHash(String);

impl ParamHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the identity hash of a param
///
/// Hash = BLAKE3(`pathEl:"<seg>"\n`* || `name:"<name>"\n`)
///
/// Segments are quoted so that `["a-b"]` and `["a", "b"]` never collide.
pub fn param_hash<S: AsRef<str>>(path: &[S], name: &str) -> ParamHash {
    let mut hasher = Hasher::new();
    for segment in path {
        hasher.update(format!("pathEl:{:?}\n", segment.as_ref()).as_bytes());
    }
    hasher.update(format!("name:{:?}\n", name).as_bytes());
    let digest = hex::encode(hasher.finalize().as_bytes());
    ParamHash(format!("{}/{}", full_name(path, name), digest))
}

/// `path/name` joined with `/`; empty segments (default sub-commands) are skipped
pub fn full_name<S: AsRef<str>>(path: &[S], name: &str) -> String {
    let mut parts: Vec<&str> = path
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect();
    parts.push(name);
    parts.join("/")
}
