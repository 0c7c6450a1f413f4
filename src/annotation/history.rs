use std::mem;

/// Undo/redo over full snapshots.
///
/// `record` takes the state *before* a mutation. `undo` and `redo` swap the
/// caller's current state with the top of the matching stack.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<T> History<T> {
    pub fn record(&mut self, before: T) {
        self.undo_stack.push(before);
        self.redo_stack.clear();
    }

    /// Returns `false` (and leaves `current` alone) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut T) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, current: &mut T) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[cfg(test)]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo_restores_both_states() {
        let mut history = History::default();
        let mut state = vec![1];

        history.record(state.clone());
        state.push(2);

        assert!(history.undo(&mut state));
        assert_eq!(state, vec![1]);
        assert!(history.redo(&mut state));
        assert_eq!(state, vec![1, 2]);
    }

    #[test]
    fn recording_clears_the_redo_stack() {
        let mut history = History::default();
        let mut state = 0;

        history.record(state);
        state = 1;
        history.undo(&mut state);
        assert!(history.can_redo());

        history.record(state);
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut history: History<u8> = History::default();
        let mut state = 7;
        assert!(!history.undo(&mut state));
        assert!(!history.redo(&mut state));
        assert_eq!(state, 7);
    }
}
