use thiserror::Error;

/// Errors raised by the entry points that parse serialized input.
///
/// Transpiling an already-decoded block list never fails; only turning text
/// into blocks or options can.
#[derive(Debug, Error)]
pub enum FolioError {
    /// The block payload or options were not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The options document was not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Options contained a value outside its accepted range.
    #[error("Invalid option `{name}`: {message}")]
    InvalidOption {
        /// Option name as written in the config.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl FolioError {
    /// Create an invalid-option error.
    pub fn invalid_option(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            message: message.into(),
        }
    }
}

/// Severity of a recovered problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Content was dropped or replaced.
    Warning,
    /// Informational; output is as the author likely intended.
    Note,
}

/// A problem the transpiler recovered from while processing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based position of the block in the list being processed.
    pub block: usize,
    /// Human-readable description.
    pub message: String,
    /// How much the output was affected.
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a warning for the block at `block`.
    pub fn warning(block: usize, message: impl Into<String>) -> Self {
        Self {
            block,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Create a note for the block at `block`.
    pub fn note(block: usize, message: impl Into<String>) -> Self {
        Self {
            block,
            message: message.into(),
            severity: Severity::Note,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        write!(f, "{} at block {}: {}", severity, self.block, self.message)
    }
}

/// Problems recovered from during decoding or rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranspileDiagnostics {
    /// Entries in the order they were recorded.
    pub entries: Vec<Diagnostic>,
}

impl TranspileDiagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and mirror it to the `log` facade.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Record a warning for the block at `block`.
    pub fn warn_at(&mut self, block: usize, message: impl Into<String>) {
        self.push(Diagnostic::warning(block, message));
    }

    /// Record a note for the block at `block`.
    pub fn note_at(&mut self, block: usize, message: impl Into<String>) {
        self.push(Diagnostic::note(block, message));
    }

    /// Number of warnings recorded.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry of `other`.
    pub fn extend(&mut self, other: TranspileDiagnostics) {
        self.entries.extend(other.entries);
    }
}
