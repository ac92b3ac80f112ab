use std::sync::Arc;

use tracing::instrument;

use preset_core::{
    application::ports::Resolver,
    domain::{PresetDescriptor, RegistrySource, SourceKind},
    error::PresetResult,
};

use super::github::fetch_github;
use super::{DEFAULT_REGISTRY_OWNER, PresetCache, unsupported};
use crate::git::GitFetcher;

/// Resolves named presets hosted on GitHub.
///
/// `name` → `<owner>/name`, `scope:name` → `<scope>-presets/name`.
pub struct RegistryResolver {
    cache: PresetCache,
    git: Arc<dyn GitFetcher>,
    owner: String,
}

impl RegistryResolver {
    pub fn new(cache: PresetCache, git: Arc<dyn GitFetcher>) -> Self {
        Self {
            cache,
            git,
            owner: DEFAULT_REGISTRY_OWNER.to_string(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }
}

impl Resolver for RegistryResolver {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn supports(&self, input: &str) -> bool {
        RegistrySource::parse(input).is_some()
    }

    #[instrument(skip(self))]
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        let named = RegistrySource::parse(input).ok_or_else(|| unsupported(input))?;
        let repo = named.to_github(&self.owner);
        fetch_github(
            &self.cache,
            self.git.as_ref(),
            input,
            SourceKind::Registry,
            &repo,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testing::FakeGit;
    use tempfile::TempDir;

    #[test]
    fn maps_names_to_github() {
        let dir = TempDir::new().unwrap();
        let git = Arc::new(FakeGit::default());
        let resolver = RegistryResolver::new(PresetCache::new(dir.path()), git.clone()).with_owner("acme");

        resolver.resolve("tailwind").unwrap();
        let descriptor = resolver.resolve("laravel:inertia@v1").unwrap();

        assert_eq!(descriptor.kind(), SourceKind::Registry);
        let calls = git.calls.lock().unwrap();
        assert_eq!(calls[0].0, "https://github.com/acme/tailwind.git");
        assert_eq!(
            calls[1],
            ("https://github.com/laravel-presets/inertia.git".to_string(), Some("v1".to_string()))
        );
    }
}
