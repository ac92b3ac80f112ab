//! Resolver adapters.
//!
//! | Resolver           | Accepts                                   | Source           |
//! |--------------------|-------------------------------------------|------------------|
//! | [`LocalResolver`]  | an existing directory                     | filesystem       |
//! | [`GistResolver`]   | `gist:<id>`, gist URLs, bare hex ids      | gist.github.com  |
//! | [`GitHubResolver`] | `owner/repo[/sub][@ref]`                  | github.com       |
//! | [`GitResolver`]    | `git+<url>`, `ssh://`, `git@`, `*.git`    | any git remote   |
//! | [`RegistryResolver`] | `name`, `scope:name`                    | github.com       |
//!
//! [`default_chain`] wires them in that order.

mod cache;
mod gist;
mod git_url;
mod github;
mod local;
mod registry;

use std::path::PathBuf;
use std::sync::Arc;

use preset_core::{
    application::{ApplicationError, ResolverChain},
    domain::{PresetDescriptor, RelativePath, SourceKind},
    error::PresetResult,
};

use crate::git::{GitFetcher, SystemGit};

pub use cache::PresetCache;
pub use gist::GistResolver;
pub use git_url::GitResolver;
pub use github::GitHubResolver;
pub use local::LocalResolver;
pub use registry::RegistryResolver;

/// GitHub owner that hosts unscoped registry presets.
pub const DEFAULT_REGISTRY_OWNER: &str = "use-preset";

/// Knobs shared by the resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Relative local paths are looked up from here.
    pub working_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub registry_owner: String,
    /// Clone GitHub repositories over SSH instead of HTTPS.
    pub github_ssh: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            cache_dir: std::env::temp_dir().join("preset").join("cache"),
            registry_owner: DEFAULT_REGISTRY_OWNER.to_string(),
            github_ssh: false,
        }
    }
}

/// Local, gist, GitHub, git, registry; fetched with the system `git`.
pub fn default_chain(settings: &ResolverSettings) -> ResolverChain {
    chain_with_fetcher(settings, Arc::new(SystemGit::new()))
}

/// [`default_chain`] with a custom fetcher.
pub fn chain_with_fetcher(settings: &ResolverSettings, git: Arc<dyn GitFetcher>) -> ResolverChain {
    let cache = PresetCache::new(&settings.cache_dir);
    ResolverChain::new(vec![
        Box::new(LocalResolver::new(&settings.working_dir)),
        Box::new(GistResolver::new(cache.clone(), Arc::clone(&git))),
        Box::new(GitHubResolver::new(cache.clone(), Arc::clone(&git)).with_ssh(settings.github_ssh)),
        Box::new(GitResolver::new(cache.clone(), Arc::clone(&git))),
        Box::new(RegistryResolver::new(cache, git).with_owner(&settings.registry_owner)),
    ])
}

/// What a remote resolver wants materialized.
pub(crate) struct RemoteSource<'a> {
    pub input: &'a str,
    pub kind: SourceKind,
    pub cache_key: String,
    pub url: String,
    pub git_ref: Option<&'a str>,
    pub subpath: Option<&'a str>,
}

/// Clone into the cache and describe the (sub)directory.
pub(crate) fn fetch_remote(
    cache: &PresetCache,
    git: &dyn GitFetcher,
    source: RemoteSource<'_>,
) -> PresetResult<PresetDescriptor> {
    let entry = cache.entry(source.kind, &source.cache_key, source.git_ref);
    let checkout = cache.refresh(&entry, |staging| {
        git.fetch(&source.url, source.git_ref, staging)
            .map_err(|e| {
                ApplicationError::FetchFailed {
                    input: source.input.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    })?;

    let directory = match source.subpath {
        Some(sub) => {
            let dir = checkout.join(RelativePath::try_new(sub)?);
            if !dir.is_dir() {
                return Err(ApplicationError::FetchFailed {
                    input: source.input.to_string(),
                    reason: format!("'{}' does not exist in the fetched repository", sub),
                }
                .into());
            }
            dir
        }
        None => checkout,
    };

    Ok(PresetDescriptor::new(directory, source.input, source.kind)
        .with_subpath(source.subpath.map(str::to_string))
        .with_ref(source.git_ref.map(str::to_string)))
}

/// Error for a resolver asked to resolve something it does not support.
pub(crate) fn unsupported(input: &str) -> preset_core::error::PresetError {
    ApplicationError::Unresolvable {
        input: input.to_string(),
    }
    .into()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;
    use std::sync::Mutex;

    use crate::git::{GitError, GitFetcher};

    /// Records fetches and writes a `preset.toml` into the destination.
    #[derive(Default)]
    pub struct FakeGit {
        pub calls: Mutex<Vec<(String, Option<String>)>>,
        pub extra_dirs: Vec<&'static str>,
        pub fail: bool,
    }

    impl GitFetcher for FakeGit {
        fn fetch(&self, url: &str, git_ref: Option<&str>, dest: &Path) -> Result<(), GitError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), git_ref.map(str::to_string)));
            if self.fail {
                return Err(GitError::Failed {
                    step: "clone",
                    status: "exit status: 128".into(),
                    stderr: "repository not found".into(),
                });
            }
            std::fs::create_dir_all(dest).unwrap();
            std::fs::write(dest.join("preset.toml"), "").unwrap();
            for dir in &self.extra_dirs {
                std::fs::create_dir_all(dest.join(dir)).unwrap();
            }
            Ok(())
        }
    }
}
