//! Synchronous confirmation for destructive transitions.

/// Asks the user to approve a destructive action.
///
/// Returning `false` must leave the manager state unchanged.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
