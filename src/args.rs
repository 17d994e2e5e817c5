//! Command-line argument collection for one process invocation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ordered command-line tokens for one invocation, executable name excluded
/// (that lives in the task options).
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessArguments(Vec<String>);

impl ProcessArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single token.
    pub fn add(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    /// Append a token only when a value is present.
    pub fn add_optional(&mut self, token: Option<impl Into<String>>) {
        if let Some(token) = token {
            self.0.push(token.into());
        }
    }

    /// Append every token from an iterator, preserving order.
    pub fn add_many<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.0.extend(tokens.into_iter().map(Into::into));
    }

    /// Append a filesystem path as a token.
    ///
    /// Non-UTF-8 path components are replaced lossily; check tools take
    /// their targets as plain text arguments.
    pub fn add_path(&mut self, path: &Path) {
        self.0.push(path.to_string_lossy().into_owned());
    }

    /// Append every path from an iterator, preserving order.
    pub fn add_paths<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in paths {
            self.add_path(path);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ProcessArguments {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<T: Into<String>> FromIterator<T> for ProcessArguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for ProcessArguments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for ProcessArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
