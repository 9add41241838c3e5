/// Two-phase pick state: nothing picked, or one tile waiting for a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Armed(usize),
}

/// What a pick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(usize),
    Deselected(usize),
    /// Second pick on a different tile: the two tiles must be swapped.
    Swap(usize, usize),
}

impl SelectionState {
    pub fn selected(&self) -> Option<usize> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Armed(index) => Some(*index),
        }
    }

    pub fn select(&mut self, index: usize) -> SelectionOutcome {
        let (next, outcome) = match *self {
            SelectionState::Idle => (SelectionState::Armed(index), SelectionOutcome::Selected(index)),
            SelectionState::Armed(armed) if armed == index => {
                (SelectionState::Idle, SelectionOutcome::Deselected(index))
            }
            SelectionState::Armed(armed) => (SelectionState::Idle, SelectionOutcome::Swap(armed, index)),
        };
        *self = next;
        outcome
    }

    pub fn clear(&mut self) {
        *self = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_deselect() {
        let mut state = SelectionState::default();
        assert_eq!(state.select(4), SelectionOutcome::Selected(4));
        assert_eq!(state.selected(), Some(4));
        assert_eq!(state.select(4), SelectionOutcome::Deselected(4));
        assert_eq!(state, SelectionState::Idle);
    }

    #[test]
    fn test_select_two_swaps() {
        let mut state = SelectionState::default();
        state.select(2);
        assert_eq!(state.select(9), SelectionOutcome::Swap(2, 9));
        assert_eq!(state.selected(), None);
        assert_eq!(state.select(9), SelectionOutcome::Selected(9));
    }

    #[test]
    fn test_clear() {
        let mut state = SelectionState::Armed(3);
        state.clear();
        assert_eq!(state, SelectionState::Idle);
    }
}
