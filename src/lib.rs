//! Scopecfg: Hierarchical Scoped Configuration
//!
//! A tree of named scopes, each declaring typed parameters that are populated
//! from pluggable sources (command-line arguments being the reference one),
//! plus a concurrency-safe mutable value per scope for runtime state.
//!
//! ```no_run
//! use scopecfg::populate::populate;
//! use scopecfg::scope::Scope;
//! use scopecfg::source::CliSource;
//!
//! let root = Scope::new();
//! let addr = root.child_of("http").with_string("addr", ":8080", "Listen address");
//! populate(&root, Some(&CliSource::from_env())).expect("invalid configuration");
//! println!("listening on {}", addr.get());
//! ```

pub mod error;
pub mod logging;
pub mod param;
pub mod populate;
pub mod scope;
pub mod source;

pub use error::ConfigError;
pub use param::{Param, ParamValue, Value};
pub use populate::{populate, Populated};
pub use scope::{Scope, SubCommand};
pub use source::{CliSource, ParamValues, Source};
