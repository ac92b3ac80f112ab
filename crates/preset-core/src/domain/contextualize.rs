//! Contextualized values.
//!
//! A preset field may be a literal or a deferred computation over the
//! preset's context (e.g. a target directory named after a prompt answer).
//! [`Contextualized`] models that as a tagged union and [`contextualize`] is
//! the single evaluation point.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::preset::Preset;

/// Key/value context a preset exposes to its deferred values.
///
/// `BTreeMap` keeps iteration deterministic for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetContext {
    values: BTreeMap<String, Value>,
}

impl PresetContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String view of a value: strings unquoted, everything else as JSON.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(value_to_string)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl FromIterator<(String, Value)> for PresetContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Render a context value for interpolation.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

type Deferred<T> = Arc<dyn Fn(&PresetContext) -> T + Send + Sync>;

/// Either a literal value or a function of the preset context.
pub enum Contextualized<T> {
    Literal(T),
    Deferred(Deferred<T>),
}

impl<T> Contextualized<T> {
    pub fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&PresetContext) -> T + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(f))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T: Clone> Contextualized<T> {
    /// Evaluate against a bare context.
    pub fn evaluate(&self, context: &PresetContext) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Deferred(f) => f(context),
        }
    }
}

impl<T: Clone> Clone for Contextualized<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Deferred(f) => Self::Deferred(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Contextualized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl<T> From<T> for Contextualized<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Contextualized<String> {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

/// Resolve a contextualized value against a preset.
///
/// Pure: literals are returned as-is, deferred values are computed from the
/// preset's current context. No I/O.
pub fn contextualize<T: Clone>(preset: &Preset, value: &Contextualized<T>) -> T {
    value.evaluate(&preset.context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{descriptor::PresetDescriptor, preset::Preset};
    use crate::domain::value_objects::SourceKind;

    fn preset_with(context: PresetContext) -> Preset {
        let descriptor = PresetDescriptor::new("/tmp/preset", "./preset", SourceKind::Local);
        Preset::builder(descriptor).context(context).build()
    }

    #[test]
    fn literal_is_identity() {
        let preset = preset_with(PresetContext::new().with("name", "ignored"));
        for raw in ["", "src", "{{name}}", "a/b/c.txt"] {
            let value = Contextualized::literal(raw.to_string());
            assert_eq!(contextualize(&preset, &value), raw);
        }
        assert!(contextualize(&preset, &Contextualized::literal(true)));
    }

    #[test]
    fn deferred_reads_context() {
        let preset = preset_with(PresetContext::new().with("name", "demo"));
        let value = Contextualized::deferred(|ctx: &PresetContext| {
            format!("apps/{}", ctx.get_str("name").unwrap_or_default())
        });
        assert_eq!(contextualize(&preset, &value), "apps/demo");
        assert!(value.is_deferred());
    }

    #[test]
    fn deferred_sees_later_context_updates() {
        let mut preset = preset_with(PresetContext::new());
        let value =
            Contextualized::deferred(|ctx: &PresetContext| ctx.get_str("answer").unwrap_or_default());
        assert_eq!(contextualize(&preset, &value), "");

        preset.context.insert("answer", "42");
        assert_eq!(contextualize(&preset, &value), "42");
    }

    #[test]
    fn value_rendering() {
        assert_eq!(value_to_string(&Value::from("x")), "x");
        assert_eq!(value_to_string(&Value::from(true)), "true");
        assert_eq!(value_to_string(&Value::from(3)), "3");
        assert_eq!(value_to_string(&Value::Null), "");
    }
}
