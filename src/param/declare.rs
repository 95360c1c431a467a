//! Declaration helpers attaching params to a scope

use crate::param::coerce::{
    decode_duration, decode_json, decode_scalar, decode_string, display_default,
    display_duration,
};
use crate::param::{Param, ParamKind, Slot, Value};
use crate::scope::Scope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

struct Decl<'a> {
    name: &'a str,
    usage: &'a str,
    required: bool,
    kind: ParamKind,
    default: Option<String>,
}

impl Scope {
    fn declare<T>(&self, decl: Decl<'_>, initial: T, decode: fn(&str) -> Result<T, String>) -> Value<T>
    where
        T: Send + Sync + 'static,
    {
        let value = Value::new(initial);
        self.push_param(Param {
            path: self.path().to_vec(),
            cli_path: self.cli_path().to_vec(),
            name: decl.name.to_string(),
            usage: decl.usage.to_string(),
            required: decl.required,
            kind: decl.kind,
            default: decl.default,
            into: Arc::new(Slot {
                value: value.clone(),
                decode,
            }),
        });
        value
    }

    /// Declare an integer param
    pub fn with_int(&self, name: &str, default: i64, usage: &str) -> Value<i64> {
        let decl = Decl {
            name,
            usage,
            required: false,
            kind: ParamKind::Int,
            default: display_default(&default),
        };
        self.declare(decl, default, decode_scalar::<i64>)
    }

    /// Declare an integer param which must be given a value
    pub fn with_required_int(&self, name: &str, usage: &str) -> Value<i64> {
        let decl = Decl {
            name,
            usage,
            required: true,
            kind: ParamKind::Int,
            default: None,
        };
        self.declare(decl, 0, decode_scalar::<i64>)
    }

    /// Declare a boolean flag, false unless set
    pub fn with_bool(&self, name: &str, usage: &str) -> Value<bool> {
        let decl = Decl {
            name,
            usage,
            required: false,
            kind: ParamKind::Bool,
            default: None,
        };
        self.declare(decl, false, decode_scalar::<bool>)
    }

    pub fn with_string(&self, name: &str, default: &str, usage: &str) -> Value<String> {
        let decl = Decl {
            name,
            usage,
            required: false,
            kind: ParamKind::String,
            default: display_default(&default),
        };
        self.declare(decl, default.to_string(), decode_string)
    }

    pub fn with_required_string(&self, name: &str, usage: &str) -> Value<String> {
        let decl = Decl {
            name,
            usage,
            required: true,
            kind: ParamKind::String,
            default: None,
        };
        self.declare(decl, String::new(), decode_string)
    }

    /// Declare a duration param, given in humantime syntax such as `1h30m`
    pub fn with_duration(&self, name: &str, default: Duration, usage: &str) -> Value<Duration> {
        let decl = Decl {
            name,
            usage,
            required: false,
            kind: ParamKind::Duration,
            default: display_duration(&default),
        };
        self.declare(decl, default, decode_duration)
    }

    pub fn with_required_duration(&self, name: &str, usage: &str) -> Value<Duration> {
        let decl = Decl {
            name,
            usage,
            required: true,
            kind: ParamKind::Duration,
            default: None,
        };
        self.declare(decl, Duration::ZERO, decode_duration)
    }

    /// Declare a param holding an arbitrary JSON-decoded value
    pub fn with_json<T>(&self, name: &str, default: T, usage: &str) -> Value<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let decl = Decl {
            name,
            usage,
            required: false,
            kind: ParamKind::Json,
            default: display_default(&default),
        };
        self.declare(decl, default, decode_json::<T>)
    }

    pub fn with_required_json<T>(&self, name: &str, usage: &str) -> Value<T>
    where
        T: Default + DeserializeOwned + Send + Sync + 'static,
    {
        let decl = Decl {
            name,
            usage,
            required: true,
            kind: ParamKind::Json,
            default: None,
        };
        self.declare(decl, T::default(), decode_json::<T>)
    }

    /// Capture unrecognized trailing CLI arguments for this scope
    ///
    /// Once the CLI source meets an argument it can't match to a flag, that
    /// argument and everything after it are stored here verbatim instead of
    /// producing an error. Only tails on the root and on selected
    /// sub-commands are consulted; the innermost one wins. Registering again
    /// on the same scope replaces the previous handle.
    ///
    /// # Panics
    ///
    /// If this scope is neither the root nor a sub-command, since such a tail
    /// would never be read.
    pub fn with_cli_tail(&self) -> Value<Vec<String>> {
        if !self.path().is_empty() && !self.is_subcommand() {
            panic!(
                "CLI tail on {:?} would never be read; register it on the root or a sub-command",
                self.display_path()
            );
        }
        let tail = Value::new(Vec::new());
        *self.inner.tail.write() = Some(tail.clone());
        tail
    }

    pub(crate) fn cli_tail(&self) -> Option<Value<Vec<String>>> {
        self.inner.tail.read().clone()
    }
}
