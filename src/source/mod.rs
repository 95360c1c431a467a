//! Sources of parameter values
//!
//! A source turns some external input into a flat list of [`ParamValue`]s.
//! The engine only needs [`Source::parse`]; sources with a notion of
//! sub-commands also override [`Source::select`].

pub mod cli;
pub mod help;

use crate::error::ConfigError;
use crate::param::{Param, ParamValue};
use crate::populate::Selection;
use crate::scope::Scope;

pub use cli::CliSource;

/// Pluggable parser producing raw values for declared params
pub trait Source {
    /// Decide which sub-command branches under `root` are active
    ///
    /// Defaults to the default branch at each level.
    fn select(&self, root: &Scope) -> Selection {
        Selection::defaults(root)
    }

    /// Produce values for the given active params
    ///
    /// Values for params not in `params` are dropped by the engine.
    fn parse(&self, params: &[Param], selection: &Selection)
        -> Result<Vec<ParamValue>, ConfigError>;
}

/// A fixed list of values
#[derive(Debug, Clone, Default)]
pub struct ParamValues(pub Vec<ParamValue>);

impl Source for ParamValues {
    fn parse(&self, _: &[Param], _: &Selection) -> Result<Vec<ParamValue>, ConfigError> {
        Ok(self.0.clone())
    }
}
