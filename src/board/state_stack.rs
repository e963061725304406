/// A stack of snapshots that always has a current value. Applying a move
/// pushes the state after the move, undoing it pops back to the one before.
#[derive(Clone, Debug)]
pub struct StateStack<T> {
    current: T,
    previous: Vec<T>,
}

impl<T> StateStack<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            previous: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        let replaced = std::mem::replace(&mut self.current, value);
        self.previous.push(replaced);
    }

    pub fn peek(&self) -> &T {
        &self.current
    }

    /// Restores the previous snapshot and returns the one it replaced, or
    /// `None` if only the initial snapshot is left.
    pub fn pop(&mut self) -> Option<T> {
        let restored = self.previous.pop()?;
        Some(std::mem::replace(&mut self.current, restored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_restores_previous_snapshot() {
        let mut stack = StateStack::new(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(*stack.peek(), 3);

        assert_eq!(stack.pop(), Some(3));
        assert_eq!(*stack.peek(), 2);
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(*stack.peek(), 1);
        assert_eq!(stack.pop(), None);
        assert_eq!(*stack.peek(), 1);
    }
}
