use std::sync::Arc;

use tracing::instrument;

use preset_core::{
    application::ports::Resolver,
    domain::{GitSource, PresetDescriptor, SourceKind},
    error::PresetResult,
};

use super::{PresetCache, RemoteSource, fetch_remote, unsupported};
use crate::git::GitFetcher;

/// Resolves arbitrary git remotes (`git+https://…`, `git@host:…`, `*.git`).
pub struct GitResolver {
    cache: PresetCache,
    git: Arc<dyn GitFetcher>,
}

impl GitResolver {
    pub fn new(cache: PresetCache, git: Arc<dyn GitFetcher>) -> Self {
        Self { cache, git }
    }
}

impl Resolver for GitResolver {
    fn name(&self) -> &'static str {
        "git"
    }

    fn supports(&self, input: &str) -> bool {
        GitSource::parse(input).is_some()
    }

    #[instrument(skip(self))]
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        let remote = GitSource::parse(input).ok_or_else(|| unsupported(input))?;
        fetch_remote(
            &self.cache,
            self.git.as_ref(),
            RemoteSource {
                input,
                kind: SourceKind::Git,
                cache_key: remote.cache_key(),
                url: remote.url.clone(),
                git_ref: remote.git_ref.as_deref(),
                subpath: None,
            },
        )
    }
}
