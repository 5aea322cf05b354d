use url::Url;

use crate::error::PlayerError;

/// Label the primary source gets when the host does not name it.
pub const PRIMARY_SOURCE_LABEL: &str = "Source 1";

/// One playable candidate: an address plus a label for source pickers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    address: Url,
    label: String,
}

impl Source {
    #[must_use]
    pub fn new(address: Url, label: impl Into<String>) -> Self {
        Self {
            address,
            label: label.into(),
        }
    }

    /// Parse `address` and build a source from it.
    pub fn parse(address: &str, label: impl Into<String>) -> Result<Self, PlayerError> {
        let parsed = Url::parse(address).map_err(|source| PlayerError::InvalidAddress {
            address: address.to_owned(),
            source,
        })?;
        Ok(Self::new(parsed, label))
    }

    #[must_use]
    pub fn address(&self) -> &Url {
        &self.address
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered fallback candidates for one session.
///
/// The primary address always sits at index 0 under
/// [`PRIMARY_SOURCE_LABEL`]; alternates follow in the order the host
/// provided them. The index never moves backwards: a failed candidate is
/// never retried within a session.
#[derive(Clone, Debug)]
pub struct SourceList {
    sources: Vec<Source>,
    index: usize,
}

impl SourceList {
    /// Build the candidate list for one session.
    #[must_use]
    pub fn new(primary: Url, alternates: Vec<Source>) -> Self {
        let mut sources = Vec::with_capacity(1 + alternates.len());
        sources.push(Source::new(primary, PRIMARY_SOURCE_LABEL));
        sources.extend(alternates);
        Self { sources, index: 0 }
    }

    /// The candidate currently being attached or played.
    #[must_use]
    pub fn current(&self) -> &Source {
        // Non-empty by construction; `advance` never moves past the end.
        &self.sources[self.index]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Move to the next candidate. Returns `false` at the end of the
    /// list, leaving the index unchanged.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.sources.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}
