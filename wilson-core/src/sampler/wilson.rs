//! Wilson's algorithm: loop-erased random walks towards a growing tree.
//!
//! Starting from a uniformly drawn root, every vertex not yet in the tree
//! launches a walk that stops on hitting the tree. Overwriting the exit
//! pointer at each visit erases loops implicitly; the surviving pointers
//! along the path are then grafted onto the tree.

use tracing::{debug, instrument};

use crate::{SamplerError, normalize::TransitionTable, tree::SpanningTree};

use super::{SamplerBackend, SamplingConfig, SpanningTreeSampler, walk::LazyWalk};

/// Wilson's loop-erased random walk sampler.
///
/// # Examples
/// ```
/// use wilson_core::{
///     EdgeWeights, Lattice, RawAdjacency, SamplingConfig, SpanningTreeSampler,
///     TransitionTable, Wilson,
/// };
///
/// let lattice = Lattice::new(4).expect("side is valid");
/// let raw = RawAdjacency::build(lattice, &EdgeWeights::default());
/// let table = TransitionTable::from_adjacency(&raw).expect("rows normalise");
/// let config = SamplingConfig::new(1, 1.0).expect("config is valid");
///
/// let tree = Wilson.sample(&table, &config).expect("sampling succeeds");
/// assert_eq!(tree.len(), 15);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Wilson;

impl SpanningTreeSampler for Wilson {
    fn backend(&self) -> SamplerBackend {
        SamplerBackend::Wilson
    }

    #[instrument(name = "sampler.wilson", err, skip_all, fields(vertices = table.len()))]
    fn sample(
        &self,
        table: &TransitionTable,
        config: &SamplingConfig,
    ) -> Result<SpanningTree, SamplerError> {
        let mut walk = LazyWalk::new(table, config, SamplerBackend::Wilson)?;
        let vertex_count = walk.vertex_count();
        let root = walk.uniform_vertex();

        let mut in_tree = vec![false; vertex_count];
        let mut next: Vec<Option<usize>> = vec![None; vertex_count];
        in_tree[root] = true;

        let mut steps: u64 = 0;
        for start in 0..vertex_count {
            let mut current = start;
            while !in_tree[current] {
                let successor = walk.step(current)?;
                steps += 1;
                if successor != current {
                    next[current] = Some(successor);
                    current = successor;
                }
            }

            current = start;
            while !in_tree[current] {
                in_tree[current] = true;
                current = next[current].ok_or(SamplerError::InvariantViolation {
                    invariant: "loop-erased path reaches the tree",
                    vertex: current,
                })?;
            }
        }

        debug!(root, steps, "wilson walk finished");
        SpanningTree::from_parents(&next, root)
    }
}
