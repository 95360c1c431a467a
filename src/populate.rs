//! Collection and Population Engine
//!
//! Gathers every param declared on the active part of the tree, asks a
//! [`Source`] for raw values, reconciles the two by identity hash, enforces
//! required params and writes coerced values into each param's target.

use crate::error::ConfigError;
use crate::param::{Param, ParamHash, ParamValue};
use crate::scope::{Scope, SubCommand};
use crate::source::{ParamValues, Source};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

static NO_VALUES: ParamValues = ParamValues(Vec::new());

/// The root scope plus the chain of selected sub-command branches
#[derive(Debug, Clone)]
pub struct Selection {
    root: Scope,
    branches: Vec<SubCommand>,
}

impl Selection {
    /// Selection with no sub-command branch chosen
    pub fn root(root: &Scope) -> Self {
        Selection {
            root: root.clone(),
            branches: Vec::new(),
        }
    }

    /// Selection of the default branch at each level, as far down as one exists
    pub fn defaults(root: &Scope) -> Self {
        let mut selection = Self::root(root);
        selection.descend_defaults();
        selection
    }

    /// Keep selecting the default branch below [`Self::innermost`] until a
    /// level has none
    pub fn descend_defaults(&mut self) {
        while self.select_default() {}
    }

    /// Select the default branch of [`Self::innermost`], if it has one
    pub fn select_default(&mut self) -> bool {
        let default = self
            .innermost()
            .subcommands()
            .into_iter()
            .find(SubCommand::is_default);
        match default {
            Some(default) => {
                self.branches.push(default);
                true
            }
            None => false,
        }
    }

    /// Select `branch`, which should be a sub-command of [`Self::innermost`]
    pub fn push(&mut self, branch: SubCommand) {
        self.branches.push(branch);
    }

    pub fn branches(&self) -> &[SubCommand] {
        &self.branches
    }

    /// Root followed by the scope of each selected branch
    pub fn levels(&self) -> Vec<Scope> {
        std::iter::once(self.root.clone())
            .chain(self.branches.iter().map(|b| b.scope().clone()))
            .collect()
    }

    /// Scope whose sub-commands are resolved next
    pub fn innermost(&self) -> &Scope {
        self.branches
            .last()
            .map(SubCommand::scope)
            .unwrap_or(&self.root)
    }

    /// Names of the branches chosen explicitly, in order
    pub fn named(&self) -> Vec<String> {
        self.branches
            .iter()
            .filter(|b| !b.is_default())
            .map(|b| b.name().to_string())
            .collect()
    }

    /// Number of leading arguments spent naming branches
    pub fn consumed_args(&self) -> usize {
        self.branches.iter().filter(|b| !b.is_default()).count()
    }

    pub fn contains(&self, branch: &SubCommand) -> bool {
        self.branches.contains(branch)
    }

    fn is_active(&self, scope: &Scope) -> bool {
        !scope.is_subcommand() || self.branches.iter().any(|b| b.scope() == scope)
    }
}

/// Outcome of a successful [`populate`]
#[derive(Debug, Clone)]
pub struct Populated {
    selection: Selection,
}

impl Populated {
    /// Whether `branch` was the sub-command selected among its siblings
    pub fn is_selected(&self, branch: &SubCommand) -> bool {
        self.selection.contains(branch)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

fn sort_params(params: &mut [Param]) {
    // parents before children, siblings by name, then param name
    params.sort_by(|a, b| a.path().cmp(b.path()).then_with(|| a.name().cmp(b.name())));
}

/// Params declared under `root` outside of any sub-command branch, sorted
pub fn collect_params(root: &Scope) -> Vec<Param> {
    collect_active_params(root, &Selection::root(root))
}

/// Params declared under `root` on scopes that `selection` makes active, sorted
///
/// Branches that are not selected are skipped along with all of their
/// descendants.
pub fn collect_active_params(root: &Scope, selection: &Selection) -> Vec<Param> {
    let mut params = Vec::new();
    root.breadth_first_visit(|scope| {
        if !selection.is_active(scope) {
            return false;
        }
        params.extend(scope.local_params());
        true
    });
    sort_params(&mut params);
    params
}

/// Map params by identity hash
///
/// # Panics
///
/// If two params share a path and name.
fn index_params(params: &[Param]) -> HashMap<ParamHash, &Param> {
    let mut declared = HashMap::with_capacity(params.len());
    for param in params {
        if declared.insert(param.hash(), param).is_some() {
            panic!("duplicate Param: {}", param.full_name());
        }
    }
    declared
}

/// Reconcile parsed values with declared params and write them
fn apply(
    params: &[Param],
    declared: &HashMap<ParamHash, &Param>,
    values: Vec<ParamValue>,
) -> Result<usize, ConfigError> {
    let mut parsed: HashMap<ParamHash, ParamValue> = HashMap::with_capacity(values.len());
    for value in values {
        let hash = value.hash();
        if !declared.contains_key(&hash) {
            warn!(param = %hash, "Dropping value for undeclared param");
            continue;
        }
        parsed.insert(hash, value);
    }

    for param in params {
        if param.is_required() && !parsed.contains_key(&param.hash()) {
            return Err(ConfigError::RequiredNotSet(param.full_name()));
        }
    }

    for param in params {
        if let Some(value) = parsed.get(&param.hash()) {
            param.assign(&value.value)?;
        }
    }
    Ok(parsed.len())
}

/// Populate every active param under `root` from `source`
///
/// With no source only defaults apply, so any required param fails. Default
/// sub-command branches are active unless the source selects otherwise.
/// Population may be repeated with other sources; each run only touches the
/// params its source supplies. A failed run may leave some targets written,
/// so callers should treat the configuration as untrustworthy and stop.
///
/// # Panics
///
/// If two active params share a path and name.
#[instrument(skip_all, fields(root = %root.display_path()))]
pub fn populate(root: &Scope, source: Option<&dyn Source>) -> Result<Populated, ConfigError> {
    let source = source.unwrap_or(&NO_VALUES);

    let selection = source.select(root);
    let params = collect_active_params(root, &selection);
    let declared = index_params(&params);
    debug!(
        param_count = params.len(),
        selected = ?selection.named(),
        "Collected params"
    );

    let values = source.parse(&params, &selection)?;
    let applied = apply(&params, &declared, values)?;
    info!(applied, "Configuration populated");

    Ok(Populated { selection })
}
