//! Generated artifacts and the buffered artifact set
//!
//! Emitters never touch the file system. They return `GeneratedArtifact`
//! values which the driver collects into an `ArtifactSet`; the set is written
//! in one pass once the whole pipeline has succeeded.

use crate::errors::{CodegenResult, EmitError};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single generated file: a relative path and its full text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Path relative to the output root
    pub path: PathBuf,
    /// Complete file content
    pub content: String,
}

impl GeneratedArtifact {
    /// Create an artifact from a relative path and its content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Ordered, duplicate-free collection of artifacts
///
/// Insertion order is preserved so that the write phase (and any listing of
/// the generated files) is reproducible.
#[derive(Debug, Default, Clone)]
pub struct ArtifactSet {
    artifacts: Vec<GeneratedArtifact>,
    paths: BTreeSet<PathBuf>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact, rejecting absolute paths and paths already present
    pub fn push(&mut self, artifact: GeneratedArtifact) -> CodegenResult<()> {
        if artifact.path.is_absolute() {
            return Err(EmitError::AbsolutePath {
                path: artifact.path.display().to_string(),
            }
            .into());
        }
        if !self.paths.insert(artifact.path.clone()) {
            return Err(EmitError::DuplicatePath {
                path: artifact.path.display().to_string(),
            }
            .into());
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Add every artifact of an emitter, in order
    pub fn extend(
        &mut self,
        artifacts: impl IntoIterator<Item = GeneratedArtifact>,
    ) -> CodegenResult<()> {
        for artifact in artifacts {
            self.push(artifact)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter()
    }

    /// Look up an artifact by its relative path
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GeneratedArtifact> {
        let path = path.as_ref();
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Write every artifact under `output_root`, creating directories as needed
    ///
    /// Existing files are overwritten, so re-running the generator over the
    /// same root is idempotent. Returns the written paths in insertion order.
    pub fn write_all(&self, output_root: &Path) -> CodegenResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let output_path = output_root.join(&artifact.path);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| EmitError::FileCreation {
                    path: parent.display().to_string(),
                    reason: e.to_string(),
                })?;
            }

            let mut file = File::create(&output_path).map_err(|e| EmitError::FileCreation {
                path: output_path.display().to_string(),
                reason: e.to_string(),
            })?;
            file.write_all(artifact.content.as_bytes())
                .map_err(|e| EmitError::FileWrite {
                    path: output_path.display().to_string(),
                    reason: e.to_string(),
                })?;

            tracing::debug!(path = %output_path.display(), bytes = artifact.content.len(), "wrote artifact");
            written.push(output_path);
        }
        Ok(written)
    }
}

impl IntoIterator for ArtifactSet {
    type Item = GeneratedArtifact;
    type IntoIter = std::vec::IntoIter<GeneratedArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodegenError;
    use tempfile::TempDir;

    #[test]
    fn test_duplicate_path_rejected() {
        let mut set = ArtifactSet::new();
        set.push(GeneratedArtifact::new("lib/TFHE.sol", "a")).unwrap();
        let err = set
            .push(GeneratedArtifact::new("lib/TFHE.sol", "b"))
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Emit(EmitError::DuplicatePath { .. })
        ));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("lib/TFHE.sol").unwrap().content, "a");
    }

    #[test]
    fn test_absolute_path_rejected() {
        let mut set = ArtifactSet::new();
        let err = set
            .push(GeneratedArtifact::new("/tmp/TFHE.sol", "a"))
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Emit(EmitError::AbsolutePath { .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_write_all_creates_directories_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut set = ArtifactSet::new();
        set.extend([
            GeneratedArtifact::new("lib/Impl.sol", "impl"),
            GeneratedArtifact::new("test/tfheOperations/tfheOperations1.ts", "ts"),
        ])
        .unwrap();

        let written = set.write_all(temp_dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("lib/Impl.sol")).unwrap(),
            "impl"
        );

        // Second run over the same root replaces the content
        let mut again = ArtifactSet::new();
        again
            .push(GeneratedArtifact::new("lib/Impl.sol", "impl v2"))
            .unwrap();
        again.write_all(temp_dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("lib/Impl.sol")).unwrap(),
            "impl v2"
        );
    }
}
