//! API token set.
//!
//! Tokens live in a plain text file, one per line. Blank lines and lines
//! starting with `#` are ignored. The set is loaded once at startup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to read token file: {0}")]
    Io(#[from] std::io::Error),

    #[error("token file contains no tokens")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct ApiTokens {
    tokens: HashSet<String>,
}

impl ApiTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn load(path: &Path) -> Result<Self, TokenError> {
        let tokens = Self::parse(&fs::read_to_string(path)?);
        if tokens.is_empty() {
            return Err(TokenError::Empty);
        }
        tracing::info!(path = %path.display(), count = tokens.len(), "API tokens loaded");
        Ok(tokens)
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens with everything past the first four characters masked, sorted.
    pub fn redacted(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .tokens
            .iter()
            .map(|t| {
                let visible: String = t.chars().take(4).collect();
                format!("{visible}****")
            })
            .collect();
        out.sort();
        out
    }
}
