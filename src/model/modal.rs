//! Modal overlays
//!
//! Overlays stack on top of the active screen; only the top one receives
//! key events.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation
    QuitConfirm,
    /// Breed filter and sort selector
    BreedFilter,
    /// Keyboard shortcuts
    Help,
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal unless it is already on top
    pub fn push(&mut self, modal: Modal) {
        if self.top() != Some(&modal) {
            self.stack.push(modal);
        }
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Drop every overlay, e.g. when the screen changes underneath
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::BreedFilter);
        stack.push(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::BreedFilter));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_same_modal_twice_keeps_one() {
        let mut stack = ModalStack::new();
        stack.push(Modal::QuitConfirm);
        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut stack = ModalStack::new();
        stack.push(Modal::BreedFilter);
        stack.push(Modal::QuitConfirm);
        stack.clear();
        assert!(stack.top().is_none());
    }
}
