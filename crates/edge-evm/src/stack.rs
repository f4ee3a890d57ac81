//! EVM stack implementation

use crate::error::{EvmError, EvmResult};
use crate::gas::cost::MAX_STACK_SIZE;
use primitive_types::U256;

/// EVM stack (max 1024 items, 256-bit each)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    data: Vec<U256>,
}

impl Stack {
    /// Create a new empty stack
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MAX_STACK_SIZE),
        }
    }

    /// Push a value onto the stack
    pub fn push(&mut self, value: U256) -> EvmResult<()> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(EvmError::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop a value from the stack
    pub fn pop(&mut self) -> EvmResult<U256> {
        self.data.pop().ok_or(EvmError::StackUnderflow)
    }

    /// Peek at the top of the stack
    pub fn peek(&self) -> EvmResult<&U256> {
        self.data.last().ok_or(EvmError::StackUnderflow)
    }

    /// Peek at a specific depth (0 = top)
    pub fn peek_at(&self, depth: usize) -> EvmResult<&U256> {
        if depth >= self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        Ok(&self.data[self.data.len() - 1 - depth])
    }

    /// Swap top with item at depth (1 = swap with second item)
    pub fn swap(&mut self, depth: usize) -> EvmResult<()> {
        let len = self.data.len();
        if depth == 0 || depth >= len {
            return Err(EvmError::StackUnderflow);
        }
        self.data.swap(len - 1, len - 1 - depth);
        Ok(())
    }

    /// Duplicate item at depth to top (1 = dup top)
    pub fn dup(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth > self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(EvmError::StackOverflow);
        }
        let value = self.data[self.data.len() - depth];
        self.data.push(value);
        Ok(())
    }

    /// Check that an instruction popping `pops` items and pushing `pushes`
    /// items fits within the stack bounds
    pub fn require(&self, pops: usize, pushes: usize) -> EvmResult<()> {
        let len = self.data.len();
        if len < pops {
            return Err(EvmError::StackUnderflow);
        }
        if pushes > pops && len - pops + pushes > MAX_STACK_SIZE {
            return Err(EvmError::StackOverflow);
        }
        Ok(())
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Items from bottom to top
    pub fn as_slice(&self) -> &[U256] {
        &self.data
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<U256>> for Stack {
    /// Build a stack from items listed bottom first
    fn from(data: Vec<U256>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = Stack::new();

        stack.push(word(42)).unwrap();
        stack.push(word(100)).unwrap();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().unwrap(), word(100));
        assert_eq!(stack.pop().unwrap(), word(42));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_underflow() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop(), Err(EvmError::StackUnderflow)));
        assert!(matches!(stack.peek(), Err(EvmError::StackUnderflow)));
    }

    #[test]
    fn test_stack_overflow() {
        let mut stack = Stack::new();
        for i in 0..MAX_STACK_SIZE {
            stack.push(word(i as u64)).unwrap();
        }
        assert!(matches!(stack.push(word(0)), Err(EvmError::StackOverflow)));
        assert_eq!(stack.len(), MAX_STACK_SIZE);
    }

    #[test]
    fn test_stack_dup() {
        let mut stack = Stack::new();
        stack.push(word(1)).unwrap();
        stack.push(word(2)).unwrap();

        stack.dup(2).unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(*stack.peek().unwrap(), word(1));
    }

    #[test]
    fn test_stack_swap() {
        let mut stack = Stack::new();
        stack.push(word(1)).unwrap();
        stack.push(word(2)).unwrap();

        stack.swap(1).unwrap();
        assert_eq!(stack.pop().unwrap(), word(1));
        assert_eq!(stack.pop().unwrap(), word(2));
    }

    #[test]
    fn test_stack_peek_at() {
        let stack = Stack::from(vec![word(1), word(2), word(3)]);
        assert_eq!(*stack.peek_at(0).unwrap(), word(3));
        assert_eq!(*stack.peek_at(2).unwrap(), word(1));
        assert!(stack.peek_at(3).is_err());
    }

    // ==================== Extended Stack Tests ====================

    #[test]
    fn test_stack_swap_on_empty_is_underflow() {
        let mut stack = Stack::new();
        assert!(matches!(stack.swap(1), Err(EvmError::StackUnderflow)));
    }

    #[test]
    fn test_stack_swap_zero_invalid() {
        let mut stack = Stack::from(vec![word(1), word(2)]);
        assert!(stack.swap(0).is_err());
    }

    #[test]
    fn test_stack_dup_underflow() {
        let mut stack = Stack::from(vec![word(1)]);
        assert!(matches!(stack.dup(2), Err(EvmError::StackUnderflow)));
        assert!(stack.dup(0).is_err());
    }

    #[test]
    fn test_stack_dup_overflow() {
        let mut stack = Stack::from(vec![word(7); MAX_STACK_SIZE]);
        assert!(matches!(stack.dup(1), Err(EvmError::StackOverflow)));
    }

    #[test]
    fn test_stack_all_swap_operations() {
        for depth in 1..=16usize {
            let items: Vec<U256> = (0..=depth as u64).map(word).collect();
            let mut stack = Stack::from(items);
            stack.swap(depth).unwrap();
            assert_eq!(*stack.peek().unwrap(), word(0));
            assert_eq!(*stack.peek_at(depth).unwrap(), word(depth as u64));
        }
    }

    #[test]
    fn test_stack_require() {
        let stack = Stack::from(vec![word(1), word(2)]);
        assert!(stack.require(2, 1).is_ok());
        assert_eq!(stack.require(3, 1), Err(EvmError::StackUnderflow));

        let full = Stack::from(vec![word(0); MAX_STACK_SIZE]);
        assert!(full.require(2, 1).is_ok());
        assert!(full.require(1, 1).is_ok());
        assert_eq!(full.require(0, 1), Err(EvmError::StackOverflow));
    }
}
