//! Stack of open markup kinds.

use crate::model::TextKind;

const INITIAL_CAPACITY: usize = 20;

/// LIFO record of markup scopes that are still open.
///
/// Capacity grows geometrically as kinds are pushed and is never released.
#[derive(Debug)]
pub(crate) struct KindStack {
    kinds: Vec<TextKind>,
}

impl KindStack {
    pub(crate) fn new() -> Self {
        Self {
            kinds: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub(crate) fn push(&mut self, kind: TextKind) {
        self.kinds.push(kind);
    }

    /// Drop the innermost kind. Returns `false` if the stack was empty.
    pub(crate) fn pop(&mut self) -> bool {
        self.kinds.pop().is_some()
    }

    /// Open kinds from outermost to innermost.
    pub(crate) fn as_slice(&self) -> &[TextKind] {
        &self.kinds
    }
}
