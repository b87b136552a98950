//! Confirmation prompt for destructive actions.

/// Prompt shown before an integration is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this integration?";

/// Asks the member to confirm an action.
pub trait Confirm {
    /// Returns true only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_confirm() {
        let yes = |_: &str| true;
        let only_delete = |prompt: &str| prompt == DELETE_PROMPT;
        assert!(yes.confirm("anything"));
        assert!(only_delete.confirm(DELETE_PROMPT));
        assert!(!only_delete.confirm("Discard changes?"));
    }
}
