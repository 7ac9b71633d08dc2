//! Sampled spanning trees and their structural validation.

pub(crate) mod union_find;

use std::fmt;

use thiserror::Error;

use crate::{SamplerError, error::define_error_codes, topology::Edge};

use self::union_find::DisjointSet;

/// Structural defects detected by [`SpanningTree::validate`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
    /// The tree did not hold exactly `vertex_count - 1` edges.
    #[error("expected {expected} edges but the tree holds {got}")]
    WrongEdgeCount {
        /// Required edge count.
        expected: usize,
        /// Edge count found.
        got: usize,
    },
    /// An edge or the root referenced a vertex outside the lattice.
    #[error("vertex {vertex} is out of range for {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the lattice.
        vertex_count: usize,
    },
    /// An edge closed a cycle.
    #[error("edge ({source_vertex}, {target_vertex}) closes a cycle")]
    Cycle {
        /// First endpoint of the offending edge.
        source_vertex: usize,
        /// Second endpoint of the offending edge.
        target_vertex: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TreeError`] variants.
    enum TreeErrorCode for TreeError {
        /// Wrong number of edges.
        WrongEdgeCount => WrongEdgeCount { .. } => "TREE_WRONG_EDGE_COUNT",
        /// Vertex id out of range.
        VertexOutOfRange => VertexOutOfRange { .. } => "TREE_VERTEX_OUT_OF_RANGE",
        /// An edge closed a cycle.
        Cycle => Cycle { .. } => "TREE_CYCLE",
    }
}

/// A spanning tree drawn by a sampler, together with its root.
///
/// Edges are stored as `(child, parent)` pairs in ascending child order; the
/// root is the only vertex without a parent. The tree is immutable once
/// produced.
///
/// # Examples
/// ```
/// use wilson_core::SpanningTree;
///
/// // A path 0 - 1 - 2 rooted at 1.
/// let tree = SpanningTree::from_parents(&[Some(1), None, Some(1)], 1)
///     .expect("parents describe a tree");
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.root(), 1);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanningTree {
    edges: Vec<Edge>,
    root: usize,
    vertex_count: usize,
}

impl SpanningTree {
    /// Builds a tree from a parent pointer per vertex.
    ///
    /// # Errors
    /// Returns [`SamplerError::InvariantViolation`] when a non-root vertex has
    /// no parent.
    pub fn from_parents(parents: &[Option<usize>], root: usize) -> Result<Self, SamplerError> {
        let edges = parents
            .iter()
            .enumerate()
            .filter(|&(vertex, _)| vertex != root)
            .map(|(vertex, parent)| {
                parent
                    .map(|parent| Edge::new(vertex, parent))
                    .ok_or(SamplerError::InvariantViolation {
                        invariant: "every non-root vertex has a parent",
                        vertex,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            edges,
            root,
            vertex_count: parents.len(),
        })
    }

    /// Returns the tree edges as `(child, parent)` pairs.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the root chosen by the sampler.
    #[must_use]
    #[rustfmt::skip]
    pub const fn root(&self) -> usize { self.root }

    /// Returns the number of vertices the tree spans.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the tree holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Checks that the edges form a spanning tree over all vertices.
    ///
    /// # Errors
    /// Returns a [`TreeError`] describing the first defect found.
    pub fn validate(&self) -> Result<(), TreeError> {
        let expected = self.vertex_count.saturating_sub(1);
        if self.edges.len() != expected {
            return Err(TreeError::WrongEdgeCount {
                expected,
                got: self.edges.len(),
            });
        }
        self.check_vertex(self.root)?;

        let mut components = DisjointSet::new(self.vertex_count);
        for edge in &self.edges {
            self.check_vertex(edge.source())?;
            self.check_vertex(edge.target())?;
            if !components.union(edge.source(), edge.target()) {
                return Err(TreeError::Cycle {
                    source_vertex: edge.source(),
                    target_vertex: edge.target(),
                });
            }
        }
        debug_assert!(self.vertex_count == 0 || components.components() == 1);
        Ok(())
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), TreeError> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(TreeError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count,
            })
        }
    }
}

impl fmt::Display for SpanningTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spanning tree with {} edges over {} vertices rooted at {}",
            self.edges.len(),
            self.vertex_count,
            self.root
        )
    }
}
