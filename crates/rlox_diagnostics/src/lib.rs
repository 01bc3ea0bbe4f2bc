//! rlox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics carry structured information about problems found while
//! scanning: a numeric code, a category, the source line and the resolved
//! message text. The [`reporter`] module holds the notification side: the
//! [`Reporter`] call contract and the [`ErrorBus`] that fans a report out to
//! any number of listeners.

pub mod reporter;

pub use reporter::{ErrorBus, Reporter};

use std::fmt;

/// A diagnostic message template with a code.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The file the scanned source came from, if any.
    pub file: Option<String>,
    /// The 1-based source line, if known.
    pub line: Option<usize>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            line: None,
            message_text: format_message(message.message, args),
            code: message.code,
        }
    }

    /// Create a new diagnostic attached to a source line.
    pub fn at_line(line: usize, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line: Some(line),
            ..Self::new(message, args)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}: ", file)?;
        }
        if let Some(line) = self.line {
            write!(f, "[line {}] ", line)?;
        }
        write!(f, "error LOX{}: {}", self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a scan.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Attach `file` to every diagnostic in the collection.
    pub fn set_file(&mut self, file: &str) {
        for diagnostic in &mut self.diagnostics {
            diagnostic.file = Some(file.to_string());
        }
    }

    /// Sort diagnostics by file and line. Reports on the same line keep
    /// their emission order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            a.line.unwrap_or(0).cmp(&b.line.unwrap_or(0))
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                message: $msg,
            }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================

    /// The message has no closing quote after the character.
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage =
        diag!(1001, "Unexpected character '{0}");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, "unterminated string.");
    pub const INVALID_NUMBER_FORMAT: DiagnosticMessage = diag!(1003, "invalid number format");
}
