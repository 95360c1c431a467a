//! Sub-command branches
//!
//! A sub-command is a child scope that only takes part in population when it
//! is selected. Its params are inert otherwise: never required, never
//! populated, and never mapped to a CLI flag. Branch names are part of a
//! param's identity path but not of its CLI flag.

use crate::scope::{Scope, ScopeKind};

/// Handle to a registered sub-command branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCommand {
    scope: Scope,
}

impl SubCommand {
    /// Name of the sub-command; empty for the default branch
    pub fn name(&self) -> &str {
        self.scope.name()
    }

    pub fn description(&self) -> &str {
        match self.scope.kind() {
            ScopeKind::Command { description } => description,
            ScopeKind::Plain => "",
        }
    }

    /// Whether this is the default branch, selected when no sibling matches
    pub fn is_default(&self) -> bool {
        self.scope.name().is_empty()
    }

    /// Scope holding the branch's params
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Scope {
    /// Register a sub-command branch under this scope
    ///
    /// An empty `name` registers the default branch. `build` is called once,
    /// right away, with the branch scope so it can declare the branch's params
    /// and nested sub-commands. Whether the branch was selected is reported by
    /// [`Populated::is_selected`](crate::populate::Populated::is_selected).
    ///
    /// # Panics
    ///
    /// If a child or sub-command with the same name already exists.
    pub fn with_subcommand<F>(&self, name: &str, description: &str, build: F) -> SubCommand
    where
        F: FnOnce(&Scope),
    {
        if self.inner.children.read().contains_key(name) {
            panic!(
                "sub-command {:?} under {:?} clashes with an existing scope",
                name,
                self.display_path()
            );
        }
        let scope = self.new_child(
            name,
            ScopeKind::Command {
                description: description.to_string(),
            },
        );
        build(&scope);
        SubCommand { scope }
    }

    /// Sub-commands registered directly under this scope, sorted by name
    pub fn subcommands(&self) -> Vec<SubCommand> {
        let mut subs: Vec<SubCommand> = self
            .children()
            .into_values()
            .filter(Scope::is_subcommand)
            .map(|scope| SubCommand { scope })
            .collect();
        subs.sort_by(|a, b| a.name().cmp(b.name()));
        subs
    }
}
