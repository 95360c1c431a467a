//! Scope Tree
//!
//! An append-only tree of named scopes. Each scope knows its parent, its path
//! of names from the root, and its named children. Params, the CLI tail and
//! the mutable value store all hang off a scope.
//!
//! The tree is grown synchronously at startup. Handles are cheap to clone and
//! can be shared across threads once construction is finished; growing the
//! tree from two threads at once is a programmer error and panics.

pub mod store;
pub mod subcommand;
pub mod walker;

use crate::param::{Param, Value};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

pub use subcommand::SubCommand;

/// What a scope represents in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// Root or ordinary named child
    Plain,
    /// Sub-command branch, only active when selected
    Command { description: String },
}

pub(crate) struct ScopeInner {
    name: String,
    path: Vec<String>,
    /// Path segments used for CLI flags; sub-command segments are skipped
    cli_path: Vec<String>,
    kind: ScopeKind,
    parent: Weak<ScopeInner>,
    children: RwLock<HashMap<String, Scope>>,
    pub(crate) params: RwLock<Vec<Param>>,
    pub(crate) tail: RwLock<Option<Value<Vec<String>>>>,
    pub(crate) mutable: Mutex<Option<Box<dyn Any + Send + Sync>>>,
}

/// Handle to a node of the scope tree
///
/// Equality is identity: two handles are equal only if they point at the same
/// node, regardless of name or path.
#[derive(Clone)]
pub struct Scope {
    pub(crate) inner: Arc<ScopeInner>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Create a new root scope with an empty path
    pub fn new() -> Self {
        Scope {
            inner: Arc::new(ScopeInner {
                name: String::new(),
                path: Vec::new(),
                cli_path: Vec::new(),
                kind: ScopeKind::Plain,
                parent: Weak::new(),
                children: RwLock::new(HashMap::new()),
                params: RwLock::new(Vec::new()),
                tail: RwLock::new(None),
                mutable: Mutex::new(None),
            }),
        }
    }

    /// Get or create the child scope with the given name
    ///
    /// Calling this twice with the same name returns the same child.
    ///
    /// # Panics
    ///
    /// If `name` is empty (reserved for the default sub-command), if `name` is
    /// already taken by a sub-command of this scope, or if the tree is being
    /// modified from another thread.
    pub fn child_of(&self, name: &str) -> Scope {
        if name.is_empty() {
            panic!(
                "empty scope name under {:?} is reserved for the default sub-command",
                self.display_path()
            );
        }
        if let Some(existing) = self.inner.children.read().get(name) {
            if existing.is_subcommand() {
                panic!(
                    "scope name {:?} under {:?} is already used by a sub-command",
                    name,
                    self.display_path()
                );
            }
            return existing.clone();
        }
        self.new_child(name, ScopeKind::Plain)
    }

    pub(crate) fn new_child(&self, name: &str, kind: ScopeKind) -> Scope {
        let mut path = self.inner.path.clone();
        path.push(name.to_string());
        let mut cli_path = self.inner.cli_path.clone();
        if kind == ScopeKind::Plain {
            cli_path.push(name.to_string());
        }

        let child = Scope {
            inner: Arc::new(ScopeInner {
                name: name.to_string(),
                path,
                cli_path,
                kind,
                parent: Arc::downgrade(&self.inner),
                children: RwLock::new(HashMap::new()),
                params: RwLock::new(Vec::new()),
                tail: RwLock::new(None),
                mutable: Mutex::new(None),
            }),
        };

        let mut children = self.inner.children.try_write().unwrap_or_else(|| {
            panic!(
                "scope tree modified concurrently while adding {:?} under {:?}",
                name,
                self.display_path()
            )
        });
        children.insert(name.to_string(), child.clone());
        child
    }

    /// Name of this scope; empty for the root and the default sub-command
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Names from the root down to this scope; empty for the root
    pub fn path(&self) -> &[String] {
        &self.inner.path
    }

    pub(crate) fn cli_path(&self) -> &[String] {
        &self.inner.cli_path
    }

    /// Path joined with `/`, used in diagnostics
    pub fn display_path(&self) -> String {
        self.inner.path.join("/")
    }

    /// Parent scope, or `None` for the root
    pub fn parent(&self) -> Option<Scope> {
        self.inner.parent.upgrade().map(|inner| Scope { inner })
    }

    /// Snapshot of the direct children, keyed by name
    pub fn children(&self) -> HashMap<String, Scope> {
        self.inner.children.read().clone()
    }

    /// Walk parent links up to the root of this tree
    pub fn root(&self) -> Scope {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.upgrade().is_none()
    }

    /// Whether this scope is a sub-command branch
    pub fn is_subcommand(&self) -> bool {
        matches!(self.inner.kind, ScopeKind::Command { .. })
    }

    pub(crate) fn kind(&self) -> &ScopeKind {
        &self.inner.kind
    }

    /// Params declared directly on this scope
    pub fn local_params(&self) -> Vec<Param> {
        self.inner.params.read().clone()
    }

    pub(crate) fn push_param(&self, param: Param) {
        let mut params = self.inner.params.try_write().unwrap_or_else(|| {
            panic!(
                "scope tree modified concurrently while declaring {:?} under {:?}",
                param.name(),
                self.display_path()
            )
        });
        params.push(param);
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Scope {}

impl Hash for Scope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.inner) as usize).hash(state);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("path", &self.inner.path)
            .field("kind", &self.inner.kind)
            .finish()
    }
}
