use std::sync::Arc;

use tracing::instrument;

use preset_core::{
    application::ports::Resolver,
    domain::{GistSource, PresetDescriptor, SourceKind},
    error::PresetResult,
};

use super::{PresetCache, RemoteSource, fetch_remote, unsupported};
use crate::git::GitFetcher;

/// Resolves GitHub gists by cloning them into the cache.
pub struct GistResolver {
    cache: PresetCache,
    git: Arc<dyn GitFetcher>,
}

impl GistResolver {
    pub fn new(cache: PresetCache, git: Arc<dyn GitFetcher>) -> Self {
        Self { cache, git }
    }
}

impl Resolver for GistResolver {
    fn name(&self) -> &'static str {
        "gist"
    }

    fn supports(&self, input: &str) -> bool {
        GistSource::parse(input).is_some()
    }

    #[instrument(skip(self))]
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        let gist = GistSource::parse(input).ok_or_else(|| unsupported(input))?;
        fetch_remote(
            &self.cache,
            self.git.as_ref(),
            RemoteSource {
                input,
                kind: SourceKind::Gist,
                cache_key: gist.cache_key(),
                url: gist.clone_url(),
                git_ref: gist.git_ref.as_deref(),
                subpath: None,
            },
        )
    }
}
