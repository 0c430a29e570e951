//! A growable last-in-first-out container.
//!
//! It serves as the operand stack of the calculator and as the explicit frame
//! stack of the literal parser and the composition engine, which must not
//! recurse natively on user-controlled nesting depth.
//!
//! Reading or removing elements that are not there is a contract violation
//! and panics.

/// A last-in-first-out stack of owned values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    elements: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Stack<T> {
        Stack {
            elements: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Remove and return the top element.
    #[inline]
    pub fn pop(&mut self) -> T {
        match self.elements.pop() {
            Some(v) => v,
            None => panic!("Cannot pop from an empty stack"),
        }
    }

    /// Get the top element.
    #[inline]
    pub fn top(&self) -> &T {
        match self.elements.last() {
            Some(v) => v,
            None => panic!("Cannot read the top of an empty stack"),
        }
    }

    #[inline]
    pub fn top_mut(&mut self) -> &mut T {
        match self.elements.last_mut() {
            Some(v) => v,
            None => panic!("Cannot read the top of an empty stack"),
        }
    }

    /// Get the element directly below the top.
    #[inline]
    pub fn peek_second(&self) -> &T {
        let len = self.elements.len();
        if len < 2 {
            panic!("Cannot read the second element of a stack of size {}", len);
        }
        &self.elements[len - 2]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tear down the stack, handing every element to `cleanup` from the top down.
    pub fn destroy<F: FnMut(T)>(mut self, mut cleanup: F) {
        while let Some(v) = self.elements.pop() {
            cleanup(v);
        }
    }
}
