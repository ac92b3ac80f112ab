use std::path::{Path, PathBuf};

use tracing::instrument;

use preset_core::{
    application::{ApplicationError, ports::Resolver},
    domain::{PresetDescriptor, SourceKind},
    error::PresetResult,
};

use super::unsupported;

/// Resolves a directory on the local filesystem.
///
/// Relative inputs are looked up from `base`. Only existing directories are
/// supported, so a local path always beats a remote shorthand that happens
/// to look the same.
#[derive(Debug, Clone)]
pub struct LocalResolver {
    base: PathBuf,
}

impl LocalResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn locate(&self, input: &str) -> PathBuf {
        let path = Path::new(input);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

impl Resolver for LocalResolver {
    fn name(&self) -> &'static str {
        "local"
    }

    fn supports(&self, input: &str) -> bool {
        !input.is_empty() && self.locate(input).is_dir()
    }

    #[instrument(skip(self))]
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        if !self.supports(input) {
            return Err(unsupported(input));
        }
        let path = self.locate(input);
        let directory = path.canonicalize().map_err(|e| ApplicationError::FetchFailed {
            input: input.to_string(),
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Ok(PresetDescriptor::new(directory, input, SourceKind::Local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn supports_only_existing_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("owner")).unwrap();
        std::fs::create_dir(dir.path().join("owner/repo")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "").unwrap();

        let resolver = LocalResolver::new(dir.path());
        assert!(resolver.supports("owner/repo"));
        assert!(resolver.supports(dir.path().to_str().unwrap()));
        assert!(!resolver.supports("file.txt"));
        assert!(!resolver.supports("missing"));
        assert!(!resolver.supports(""));
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("preset")).unwrap();
        let resolver = LocalResolver::new(dir.path());

        let a = resolver.resolve("./preset").unwrap();
        let b = resolver.resolve("preset").unwrap();
        assert_eq!(a.directory(), b.directory());
        assert!(a.directory().is_absolute());
        assert_eq!(a.kind(), SourceKind::Local);
        assert_eq!(a.raw_input(), "./preset");
    }

    #[test]
    fn missing_directory_is_unresolvable() {
        let dir = TempDir::new().unwrap();
        assert!(LocalResolver::new(dir.path()).resolve("nope").is_err());
    }
}
