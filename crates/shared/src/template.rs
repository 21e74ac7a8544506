//! Single-file source templates
//!
//! Most artifact groups are built from one or more `SourceTemplate`s: a pure
//! renderer from some input value to the text of exactly one file, plus the
//! path that file lands at.

use crate::artifact::GeneratedArtifact;
use crate::errors::CodegenResult;
use std::path::PathBuf;

/// Trait for rendering one generated source file
pub trait SourceTemplate<T: ?Sized> {
    /// Relative output path for the rendered file
    fn path(&self, input: &T) -> PathBuf;

    /// Render the complete file content
    fn render(&self, input: &T) -> CodegenResult<String>;

    /// Render and pair the content with its output path
    fn to_artifact(&self, input: &T) -> CodegenResult<GeneratedArtifact> {
        let content = self.render(input)?;
        Ok(GeneratedArtifact::new(self.path(input), content))
    }
}
