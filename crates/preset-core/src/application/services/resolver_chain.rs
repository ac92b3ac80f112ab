//! Ordered resolver selection.

use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::Resolver;
use crate::domain::{DomainError, PresetDescriptor};
use crate::error::PresetResult;

/// Tries resolvers in a fixed order; the first whose `supports` accepts the
/// input resolves it.
///
/// Adapters provide the conventional order (local, gist, github, git,
/// registry) through `preset_adapters::default_chain`.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver with the lowest precedence so far.
    pub fn with(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Resolver names in precedence order.
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// The resolver that would handle `input`, without resolving.
    pub fn find(&self, input: &str) -> Option<&dyn Resolver> {
        self.resolvers
            .iter()
            .find(|r| r.supports(input))
            .map(|r| r.as_ref())
    }

    #[instrument(skip(self), fields(resolvers = self.resolvers.len()))]
    pub fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::EmptySource.into());
        }

        let resolver = self.find(input).ok_or_else(|| ApplicationError::Unresolvable {
            input: input.to_string(),
        })?;
        debug!(resolver = resolver.name(), "Resolver selected");

        let descriptor = resolver.resolve(input)?;
        info!(
            kind = %descriptor.kind(),
            directory = %descriptor.directory().display(),
            "Preset resolved"
        );
        Ok(descriptor)
    }
}
