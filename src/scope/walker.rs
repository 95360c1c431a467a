//! Breadth-first traversal of the scope tree

use crate::scope::Scope;
use std::collections::VecDeque;

impl Scope {
    /// Visit this scope and its descendants breadth-first
    ///
    /// Returning `false` from `visit` prunes that scope's descendants; its
    /// siblings are still visited. Parents are always visited before their
    /// children, but the order among siblings is unspecified.
    pub fn breadth_first_visit<F>(&self, mut visit: F)
    where
        F: FnMut(&Scope) -> bool,
    {
        let mut queue = VecDeque::new();
        queue.push_back(self.clone());

        while let Some(scope) = queue.pop_front() {
            if !visit(&scope) {
                continue;
            }
            queue.extend(scope.children().into_values());
        }
    }
}
