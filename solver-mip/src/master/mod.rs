//! Node relaxation (LP master) management.

mod backend;

pub use backend::{relax_node, MasterResult, MasterStatus, RelaxationBackend, SimplexBackend};
