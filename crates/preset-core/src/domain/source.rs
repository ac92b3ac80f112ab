//! Preset source identifiers.
//!
//! Pure parsing of the raw strings users pass to `preset apply`. Each parser
//! returns `None` when the input does not have its shape; the shapes are
//! mutually exclusive so at most one remote parser accepts any given input.
//!
//! | Shape                                   | Parser                 |
//! |-----------------------------------------|------------------------|
//! | `gist:<id>`, gist URL, bare hex id      | [`GistSource`]         |
//! | `git+<url>`, `ssh://`, `git@`, `*.git`  | [`GitSource`]          |
//! | `owner/repo[/sub/path][@ref]`           | [`GitHubSource`]       |
//! | `name[@ref]`, `scope:name[@ref]`        | [`RegistrySource`]     |

use std::fmt;

const GIST_HOST: &str = "gist.github.com";
const GIST_PREFIX: &str = "gist:";
const GIT_PREFIX: &str = "git+";

/// `true` for anything that carries a scheme or scp-style remote.
pub fn is_url_like(input: &str) -> bool {
    input.contains("://") || input.starts_with("git@") || input.starts_with(GIT_PREFIX)
}

/// A GitHub-style name segment: `[A-Za-z0-9_.-]+`, not starting with `.`.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn is_gist_id(s: &str) -> bool {
    (20..=40).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Split `value@ref` on the first `@`. An empty ref counts as none.
fn split_ref(input: &str) -> (&str, Option<String>) {
    match input.split_once('@') {
        Some((head, r)) if !r.is_empty() => (head, Some(r.to_string())),
        Some((head, _)) => (head, None),
        None => (input, None),
    }
}

/// Turn an identifier into a single safe directory name.
///
/// ASCII alphanumerics, `-` and `.` are kept; every other byte becomes
/// `_XX` (uppercase hex), including `_` itself and a leading `.`. The
/// mapping is injective, so distinct identifiers never share a directory.
pub fn encode_cache_key(input: &str) -> String {
    if input.is_empty() {
        return "_".to_string();
    }
    let mut key = String::with_capacity(input.len());
    for (i, byte) in input.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric() || byte == b'-' || (byte == b'.' && i > 0);
        if keep {
            key.push(char::from(byte));
        } else {
            key.push_str(&format!("_{byte:02X}"));
        }
    }
    key
}

// ── Gist ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistSource {
    pub id: String,
    pub git_ref: Option<String>,
}

impl GistSource {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix(GIST_PREFIX) {
            let (id, git_ref) = split_ref(rest);
            return is_valid_segment(id).then(|| Self {
                id: id.to_string(),
                git_ref,
            });
        }

        if input.contains("://") {
            let (_, after_scheme) = input.split_once("://")?;
            let (host, path) = after_scheme.split_once('/')?;
            if !host.eq_ignore_ascii_case(GIST_HOST) {
                return None;
            }
            let (path, git_ref) = match path.split_once('#') {
                Some((p, r)) if !r.is_empty() => (p, Some(r.to_string())),
                Some((p, _)) => (p, None),
                None => (path, None),
            };
            let id = path.trim_end_matches('/').rsplit('/').next()?;
            let id = id.strip_suffix(".git").unwrap_or(id);
            return is_valid_segment(id).then(|| Self {
                id: id.to_string(),
                git_ref,
            });
        }

        if is_url_like(input) {
            return None;
        }

        let (id, git_ref) = split_ref(input);
        is_gist_id(id).then(|| Self {
            id: id.to_string(),
            git_ref,
        })
    }

    pub fn clone_url(&self) -> String {
        format!("https://{GIST_HOST}/{}.git", self.id)
    }

    /// Raw identifier; [`encode_cache_key`] makes it a directory name.
    pub fn cache_key(&self) -> String {
        self.id.clone()
    }
}

// ── Git ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    pub url: String,
    pub git_ref: Option<String>,
}

impl GitSource {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if GistSource::parse(input).is_some() {
            return None;
        }

        let (url, git_ref) = match input.split_once('#') {
            Some((u, r)) if !r.is_empty() => (u, Some(r.to_string())),
            Some((u, _)) => (u, None),
            None => (input, None),
        };

        let url = if let Some(stripped) = url.strip_prefix(GIT_PREFIX) {
            stripped
        } else if url.starts_with("ssh://") || url.starts_with("git://") || url.starts_with("git@") {
            url
        } else if (url.starts_with("https://") || url.starts_with("http://") || url.starts_with("file://"))
            && url.trim_end_matches('/').ends_with(".git")
        {
            url
        } else {
            return None;
        };

        (!url.is_empty()).then(|| Self {
            url: url.to_string(),
            git_ref,
        })
    }

    pub fn cache_key(&self) -> String {
        let without_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        without_scheme.trim_end_matches(".git").to_string()
    }
}

// ── GitHub ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSource {
    pub owner: String,
    pub repo: String,
    pub subpath: Option<String>,
    pub git_ref: Option<String>,
}

impl GitHubSource {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            subpath: None,
            git_ref: None,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if is_url_like(input) || input.starts_with(GIST_PREFIX) || input.contains('\\') {
            return None;
        }

        let (path, git_ref) = split_ref(input);
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        if segments.len() < 2 || !segments.iter().all(|s| is_valid_segment(s)) {
            return None;
        }

        let subpath = (segments.len() > 2).then(|| segments[2..].join("/"));
        Some(Self {
            owner: segments[0].to_string(),
            repo: segments[1].trim_end_matches(".git").to_string(),
            subpath,
            git_ref,
        })
    }

    pub fn https_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.repo)
    }

    pub fn ssh_url(&self) -> String {
        format!("git@github.com:{}/{}.git", self.owner, self.repo)
    }

    pub fn cache_key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for GitHubSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        if let Some(sub) = &self.subpath {
            write!(f, "/{sub}")?;
        }
        if let Some(r) = &self.git_ref {
            write!(f, "@{r}")?;
        }
        Ok(())
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// A named preset hosted under a well-known GitHub owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    pub scope: Option<String>,
    pub name: String,
    pub git_ref: Option<String>,
}

impl RegistrySource {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if is_url_like(input)
            || input.contains('/')
            || input.contains('\\')
            || GistSource::parse(input).is_some()
        {
            return None;
        }

        let (name_part, git_ref) = split_ref(input);
        let (scope, name) = match name_part.split_once(':') {
            Some((scope, name)) => (Some(scope), name),
            None => (None, name_part),
        };

        if !is_valid_segment(name) || scope.is_some_and(|s| !is_valid_segment(s)) {
            return None;
        }

        Some(Self {
            scope: scope.map(str::to_string),
            name: name.to_string(),
            git_ref,
        })
    }

    /// Map onto a GitHub repository.
    ///
    /// `name` lives under `default_owner`; `scope:name` lives under
    /// `<scope>-presets`.
    pub fn to_github(&self, default_owner: &str) -> GitHubSource {
        let owner = match &self.scope {
            Some(scope) => format!("{scope}-presets"),
            None => default_owner.to_string(),
        };
        GitHubSource {
            owner,
            repo: self.name.clone(),
            subpath: None,
            git_ref: self.git_ref.clone(),
        }
    }
}
