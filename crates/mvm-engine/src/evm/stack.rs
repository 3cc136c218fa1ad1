//! # Stack
//!
//! Per-frame operand stack.

use crate::domain::value_objects::Word;
use crate::errors::VmError;

/// Default maximum stack size.
pub const MAX_STACK_SIZE: usize = 1024;

/// LIFO stack of words with a fixed capacity.
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<Word>,
    limit: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Creates a new empty stack with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(MAX_STACK_SIZE)
    }

    /// Creates a new empty stack holding at most `limit` entries.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Returns the number of elements on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push a value onto the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push(&mut self, value: Word) -> Result<(), VmError> {
        if self.data.len() >= self.limit {
            return Err(VmError::StackOverflow { max: self.limit });
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop a value from the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<Word, VmError> {
        self.data.pop().ok_or(VmError::StackUnderflow)
    }

    /// Pops the two operands of a binary instruction as `(left, right)`.
    ///
    /// `right` is the top of the stack, `left` the entry below it. The stack
    /// is left untouched when it holds fewer than two entries.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if fewer than two entries are present.
    pub fn pop_pair(&mut self) -> Result<(Word, Word), VmError> {
        if self.data.len() < 2 {
            return Err(VmError::StackUnderflow);
        }
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    /// Removes the top `n` entries, returned bottom-first (push order).
    ///
    /// # Errors
    ///
    /// Returns `ArgumentCountMismatch` if fewer than `n` entries are present.
    pub fn take_top(&mut self, n: usize) -> Result<Vec<Word>, VmError> {
        if n > self.data.len() {
            return Err(VmError::ArgumentCountMismatch {
                expected: n,
                available: self.data.len(),
            });
        }
        let at = self.data.len() - n;
        Ok(self.data.split_off(at))
    }

    /// Get a reference to the underlying data for debugging.
    #[must_use]
    pub fn as_slice(&self) -> &[Word] {
        &self.data
    }
}

// =============================================================================
// TESTS
// =============================================================================
