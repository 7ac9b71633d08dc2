//! Aldous-Broder: a single random walk that records first-entrance edges.
//!
//! The walk starts at a uniformly drawn root and runs until it has covered
//! every vertex. The edge through which each vertex is first entered becomes
//! that vertex's parent.

use tracing::{debug, instrument};

use crate::{SamplerError, normalize::TransitionTable, tree::SpanningTree};

use super::{SamplerBackend, SamplingConfig, SpanningTreeSampler, walk::LazyWalk};

/// Aldous-Broder cover-walk sampler.
///
/// Slower than [`super::Wilson`] on large lattices (it runs for a full cover
/// time) but draws from the same weighted distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct AldousBroder;

impl SpanningTreeSampler for AldousBroder {
    fn backend(&self) -> SamplerBackend {
        SamplerBackend::AldousBroder
    }

    #[instrument(name = "sampler.aldous_broder", err, skip_all, fields(vertices = table.len()))]
    fn sample(
        &self,
        table: &TransitionTable,
        config: &SamplingConfig,
    ) -> Result<SpanningTree, SamplerError> {
        let mut walk = LazyWalk::new(table, config, SamplerBackend::AldousBroder)?;
        let vertex_count = walk.vertex_count();
        let root = walk.uniform_vertex();

        let mut visited = vec![false; vertex_count];
        let mut parents: Vec<Option<usize>> = vec![None; vertex_count];
        visited[root] = true;

        let mut remaining = vertex_count - 1;
        let mut current = root;
        let mut steps: u64 = 0;
        while remaining > 0 {
            let successor = walk.step(current)?;
            steps += 1;
            if !visited[successor] {
                visited[successor] = true;
                parents[successor] = Some(current);
                remaining -= 1;
            }
            current = successor;
        }

        debug!(root, steps, "aldous-broder cover walk finished");
        SpanningTree::from_parents(&parents, root)
    }
}
