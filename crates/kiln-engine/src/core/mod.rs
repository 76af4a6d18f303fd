//! Scene contract between the harness and the programs it runs.

mod ctx;
mod scene;

pub use ctx::SetupCtx;
pub use scene::Scene;
