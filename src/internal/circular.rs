//! Cyclic dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

/// In-flight recipes of one top-level resolution.
///
/// Every activation pushes a frame and pops it when done. Entering a recipe
/// that is already on the stack means it transitively depends on itself.
pub(crate) struct ResolutionStack {
    frames: RefCell<Vec<(u64, &'static str)>>,
    max_depth: usize,
}

impl ResolutionStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
            max_depth,
        }
    }

    pub(crate) fn enter(&self, recipe: u64, name: &'static str) -> DiResult<StackGuard<'_>> {
        let mut frames = self.frames.borrow_mut();

        // Cycle detection BEFORE pushing the new frame
        if frames.iter().any(|&(id, _)| id == recipe) {
            let mut path: Vec<&'static str> = frames.iter().map(|&(_, n)| n).collect();
            path.push(name);
            return Err(DiError::CyclicDependency(path));
        }

        if frames.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(frames.len()));
        }

        frames.push((recipe, name));
        Ok(StackGuard { stack: self })
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.frames.borrow().len()
    }
}

/// Pops its frame on drop, including on early `?` returns.
pub(crate) struct StackGuard<'s> {
    stack: &'s ResolutionStack,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.stack.frames.borrow_mut().pop();
    }
}
