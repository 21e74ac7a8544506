//! Executor events artifact group
//!
//! The only group that reads an input besides the plan: the executor source
//! is loaded by the caller and handed over at construction.

use crate::events::add_tfhe_executor_events;
use crate::parser::EVENTS_ARTIFACT;
use overloads::GenerationPlan;
use shared::{ArtifactGroup, CodegenResult, GeneratedArtifact};

/// Event-augmented copy of an executor contract read by the caller
pub struct ExecutorEvents {
    source: String,
    import_path: String,
}

impl ExecutorEvents {
    /// `import_path` is how the generated file imports the executor, relative
    /// to `lib/`
    pub fn new(source: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            import_path: import_path.into(),
        }
    }
}

impl ArtifactGroup<GenerationPlan> for ExecutorEvents {
    fn name(&self) -> &'static str {
        "executor-events"
    }

    fn description(&self) -> &'static str {
        "TFHEExecutor.events.sol, the executor with one event per entry point"
    }

    fn generate(&self, _plan: &GenerationPlan) -> CodegenResult<Vec<GeneratedArtifact>> {
        let content = add_tfhe_executor_events(&self.source, &self.import_path)?;
        Ok(vec![GeneratedArtifact::new(EVENTS_ARTIFACT, content)])
    }
}
