use std::sync::Arc;

use tracing::instrument;

use preset_core::{
    application::ports::Resolver,
    domain::{GitHubSource, PresetDescriptor, SourceKind},
    error::PresetResult,
};

use super::{PresetCache, RemoteSource, fetch_remote, unsupported};
use crate::git::GitFetcher;

/// Resolves `owner/repo[/sub/path][@ref]` shorthands.
pub struct GitHubResolver {
    cache: PresetCache,
    git: Arc<dyn GitFetcher>,
    ssh: bool,
}

impl GitHubResolver {
    pub fn new(cache: PresetCache, git: Arc<dyn GitFetcher>) -> Self {
        Self {
            cache,
            git,
            ssh: false,
        }
    }

    /// Clone with `git@github.com:` URLs.
    pub fn with_ssh(mut self, ssh: bool) -> Self {
        self.ssh = ssh;
        self
    }
}

/// Shared by the registry resolver, which maps names onto GitHub repos.
pub(super) fn fetch_github(
    cache: &PresetCache,
    git: &dyn GitFetcher,
    input: &str,
    kind: SourceKind,
    repo: &GitHubSource,
    ssh: bool,
) -> PresetResult<PresetDescriptor> {
    fetch_remote(
        cache,
        git,
        RemoteSource {
            input,
            kind,
            cache_key: repo.cache_key(),
            url: if ssh { repo.ssh_url() } else { repo.https_url() },
            git_ref: repo.git_ref.as_deref(),
            subpath: repo.subpath.as_deref(),
        },
    )
}

impl Resolver for GitHubResolver {
    fn name(&self) -> &'static str {
        "github"
    }

    fn supports(&self, input: &str) -> bool {
        GitHubSource::parse(input).is_some()
    }

    #[instrument(skip(self))]
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        let repo = GitHubSource::parse(input).ok_or_else(|| unsupported(input))?;
        fetch_github(
            &self.cache,
            self.git.as_ref(),
            input,
            SourceKind::GitHub,
            &repo,
            self.ssh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testing::FakeGit;
    use tempfile::TempDir;

    #[test]
    fn resolves_subpath_inside_checkout() {
        let dir = TempDir::new().unwrap();
        let git = Arc::new(FakeGit {
            extra_dirs: vec!["presets/react"],
            ..Default::default()
        });
        let resolver = GitHubResolver::new(PresetCache::new(dir.path()), git.clone());

        let descriptor = resolver.resolve("acme/tools/presets/react@v2").unwrap();

        assert_eq!(descriptor.kind(), SourceKind::GitHub);
        assert_eq!(descriptor.subpath(), Some("presets/react"));
        assert!(descriptor.directory().ends_with("acme_2Ftools@v2/presets/react"));
        assert_eq!(
            git.calls.lock().unwrap()[0],
            ("https://github.com/acme/tools.git".to_string(), Some("v2".to_string()))
        );
    }

    #[test]
    fn missing_subpath_is_fetch_error() {
        let dir = TempDir::new().unwrap();
        let resolver = GitHubResolver::new(PresetCache::new(dir.path()), Arc::new(FakeGit::default()));
        let err = resolver.resolve("acme/tools/nope").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn ssh_urls_when_configured() {
        let dir = TempDir::new().unwrap();
        let git = Arc::new(FakeGit::default());
        GitHubResolver::new(PresetCache::new(dir.path()), git.clone())
            .with_ssh(true)
            .resolve("acme/tools")
            .unwrap();
        assert_eq!(git.calls.lock().unwrap()[0].0, "git@github.com:acme/tools.git");
    }

    #[test]
    fn clone_failure_is_fetch_failed() {
        let dir = TempDir::new().unwrap();
        let git = Arc::new(FakeGit {
            fail: true,
            ..Default::default()
        });
        let resolver = GitHubResolver::new(PresetCache::new(dir.path()), git);
        let err = resolver.resolve("acme/missing").unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("repository not found"));
    }
}
