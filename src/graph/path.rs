//! Structurally shared paths.
//!
//! A breadth-first frontier can hold a combinatorial number of branches, so
//! a child path never copies its parent: it holds an `Rc` to the parent's
//! last step plus the one edge it adds. Extending is O(1); materializing
//! the edge list is O(length) and only happens for reported results.

use std::fmt;
use std::rc::Rc;

struct Step<V, E> {
    parent: Option<Rc<Step<V, E>>>,
    edge: E,
    end: V,
    length: usize,
}

/// An ordered sequence of edges leading away from a start vertex.
///
/// The zero-length path is the start vertex alone.
pub struct Path<V, E> {
    start: Rc<V>,
    tail: Option<Rc<Step<V, E>>>,
}

impl<V, E> Path<V, E> {
    /// The zero-length path at `start`.
    pub fn new(start: V) -> Self {
        Self {
            start: Rc::new(start),
            tail: None,
        }
    }

    /// A new path equal to `self` followed by `edge`, ending at `end`.
    pub fn extend(&self, edge: E, end: V) -> Self {
        let step = Step {
            parent: self.tail.clone(),
            edge,
            end,
            length: self.len() + 1,
        };
        Self {
            start: Rc::clone(&self.start),
            tail: Some(Rc::new(step)),
        }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |s| s.length)
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    pub fn start_vertex(&self) -> &V {
        &self.start
    }

    pub fn end_vertex(&self) -> &V {
        match &self.tail {
            Some(step) => &step.end,
            None => &self.start,
        }
    }

    pub fn last_edge(&self) -> Option<&E> {
        self.tail.as_ref().map(|s| &s.edge)
    }

    fn steps(&self) -> Vec<&Step<V, E>> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.tail.as_deref();
        while let Some(step) = cursor {
            out.push(step);
            cursor = step.parent.as_deref();
        }
        out.reverse();
        out
    }
}

impl<V: Clone, E: Clone> Path<V, E> {
    /// The edges from start to end, in traversal order.
    pub fn edges(&self) -> Vec<E> {
        self.steps().into_iter().map(|s| s.edge.clone()).collect()
    }

    /// Every vertex on the path, start first.
    pub fn vertices(&self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.push((*self.start).clone());
        out.extend(self.steps().into_iter().map(|s| s.end.clone()));
        out
    }
}

impl<V, E> Clone for Path<V, E> {
    fn clone(&self) -> Self {
        Self {
            start: Rc::clone(&self.start),
            tail: self.tail.clone(),
        }
    }
}

// Unlink the step chain iteratively; the default drop recurses once per edge.
impl<V, E> Drop for Path<V, E> {
    fn drop(&mut self) {
        let mut cursor = self.tail.take();
        while let Some(step) = cursor {
            match Rc::try_unwrap(step) {
                Ok(mut step) => cursor = step.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Path<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        list.entry(&*self.start);
        for step in self.steps() {
            list.entry(&step.edge).entry(&step.end);
        }
        list.finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
