//! Parameter Model
//!
//! A [`Param`] is a configuration slot declared on a scope. Declaring one
//! returns a [`Value`] handle that already holds the default and receives the
//! coerced value when population runs. A [`ParamValue`] is the raw, still
//! uncoerced value a source produced for some `(path, name)`.

pub mod coerce;
mod declare;
pub mod hasher;

use crate::error::ConfigError;
use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

pub use hasher::{full_name, param_hash, ParamHash};

/// Shared handle to a param's target value
pub struct Value<T> {
    cell: Arc<RwLock<T>>,
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        Value {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Value<T> {
    pub fn new(value: T) -> Self {
        Value {
            cell: Arc::new(RwLock::new(value)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.cell.read()
    }

    pub fn set(&self, value: T) {
        *self.cell.write() = value;
    }
}

impl<T: Clone> Value<T> {
    /// Clone of the current value
    pub fn get(&self) -> T {
        self.cell.read().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&*self.cell.read()).finish()
    }
}

/// Coercion applied to a param's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    String,
    Duration,
    Json,
}

impl ParamKind {
    pub fn is_bool(self) -> bool {
        self == ParamKind::Bool
    }

    /// Kinds whose raw values are JSON strings; sources may pass them unquoted
    pub fn is_string(self) -> bool {
        matches!(self, ParamKind::String | ParamKind::Duration)
    }
}

/// Write destination of a param, decoding raw text into the target type
pub(crate) trait Assign: Send + Sync {
    fn assign(&self, raw: &str) -> Result<(), String>;
}

struct Slot<T> {
    value: Value<T>,
    decode: fn(&str) -> Result<T, String>,
}

impl<T: Send + Sync> Assign for Slot<T> {
    fn assign(&self, raw: &str) -> Result<(), String> {
        let decoded = (self.decode)(raw)?;
        self.value.set(decoded);
        Ok(())
    }
}

/// A declared configuration parameter
#[derive(Clone)]
pub struct Param {
    path: Vec<String>,
    cli_path: Vec<String>,
    name: String,
    usage: String,
    required: bool,
    kind: ParamKind,
    default: Option<String>,
    into: Arc<dyn Assign>,
}

impl Param {
    /// Path of the scope this param was declared on
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_bool(&self) -> bool {
        self.kind.is_bool()
    }

    pub fn is_string(&self) -> bool {
        self.kind.is_string()
    }

    /// Rendering of the default for help output; `None` for zero values
    pub fn default_display(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `path/name`, for diagnostics
    pub fn full_name(&self) -> String {
        full_name(&self.path, &self.name)
    }

    pub fn hash(&self) -> ParamHash {
        param_hash(&self.path, &self.name)
    }

    pub(crate) fn cli_path(&self) -> &[String] {
        &self.cli_path
    }

    /// Coerce `raw` and write it into this param's target
    pub fn assign(&self, raw: &str) -> Result<(), ConfigError> {
        self.into
            .assign(raw)
            .map_err(|reason| ConfigError::InvalidValue {
                param: self.full_name(),
                reason,
            })
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish()
    }
}

/// A raw value parsed from a source, targeting the param at `(path, name)`
///
/// `value` is JSON text. When several values target the same param the last
/// one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue {
    pub path: Vec<String>,
    pub name: String,
    pub is_bool: bool,
    pub value: String,
}

impl ParamValue {
    pub fn new(path: &[&str], name: &str, value: &str) -> Self {
        ParamValue {
            path: path.iter().map(|s| s.to_string()).collect(),
            name: name.to_string(),
            is_bool: false,
            value: value.to_string(),
        }
    }

    /// Value targeting `param`, carrying its boolean hint
    pub fn for_param(param: &Param, value: String) -> Self {
        ParamValue {
            path: param.path.clone(),
            name: param.name.clone(),
            is_bool: param.is_bool(),
            value,
        }
    }

    pub fn hash(&self) -> ParamHash {
        param_hash(&self.path, &self.name)
    }
}
