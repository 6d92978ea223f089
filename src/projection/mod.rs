//! Projection engine: forward corpus projection and its inverse

pub mod growth;
mod engine;
mod result;
mod solver;
mod timeline;

pub use engine::{CorpusProjector, ProjectionConfig};
pub use result::{OptimizationResult, ProjectionResult};
pub use solver::ContributionSolver;
pub use timeline::{Timeline, TimelinePoint, TimelineStep};
