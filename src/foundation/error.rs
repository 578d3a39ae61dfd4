/// Convenience result type used across lyrdeck.
pub type LyrResult<T> = Result<T, LyrError>;

/// Top-level error taxonomy used by the packer, generator and render pipeline.
#[derive(thiserror::Error, Debug)]
pub enum LyrError {
    /// Input document or batch list failed to parse or is missing required fields.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A single block cannot fit into any frame at the declared font size.
    #[error(
        "layout overflow: block '{block}' has {rows} rows but a frame holds {capacity}; define a smaller font"
    )]
    LayoutOverflow {
        /// Offending block name.
        block: String,
        /// Row count of the offending block.
        rows: usize,
        /// Rows per frame at the declared font size.
        capacity: usize,
    },

    /// An external collaborator (typesetter, converter, merger) exited unsuccessfully.
    #[error("{tool} failed for '{document}' with {status}")]
    ExternalProcess {
        /// Program name as invoked.
        tool: String,
        /// Document identifier the invocation belongs to.
        document: String,
        /// Exit status, rendered for humans.
        status: String,
    },

    /// Neither a single document nor a batch list was requested.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Any of the above, attributed to the document being processed.
    #[error("document '{document}': {error}")]
    InDocument {
        /// Document identifier.
        document: String,
        /// Underlying failure.
        error: Box<LyrError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyrError {
    /// Build a [`LyrError::MalformedInput`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Build a [`LyrError::ConfigurationMissing`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Build a [`LyrError::ExternalProcess`] value.
    pub fn external(
        tool: impl Into<String>,
        document: impl Into<String>,
        status: impl std::fmt::Display,
    ) -> Self {
        Self::ExternalProcess {
            tool: tool.into(),
            document: document.into(),
            status: status.to_string(),
        }
    }

    /// Attribute this error to `document`, unless it already names one.
    pub fn in_document(self, document: impl Into<String>) -> Self {
        match self {
            Self::ExternalProcess { .. } | Self::InDocument { .. } => self,
            other => Self::InDocument {
                document: document.into(),
                error: Box::new(other),
            },
        }
    }

    /// The underlying error, looking through document attribution.
    pub fn root(&self) -> &LyrError {
        match self {
            Self::InDocument { error, .. } => error.root(),
            other => other,
        }
    }

    /// True for errors caused by the document content rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.root(),
            Self::MalformedInput(_) | Self::LayoutOverflow { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
