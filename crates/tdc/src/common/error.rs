//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use super::Span;

/// Any error produced while compiling a record file
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("lexer error: {message}")]
    Lexer { message: String, span: Span },

    #[error("syntax error: {message}")]
    Parser { message: String, span: Span },

    #[error("semantic error: {message}")]
    Semantic { message: String, span: Span },

    #[error("type error: {message}")]
    Type { message: String, span: Span },

    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::Semantic {
            message: message.into(),
            span,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::Type {
            message: message.into(),
            span,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Headline used by the diagnostic reporter
    fn headline(&self) -> &'static str {
        match self {
            CompileError::Lexer { .. } => "Lexer error",
            CompileError::Parser { .. } => "Syntax error",
            CompileError::Semantic { .. } => "Semantic error",
            CompileError::Type { .. } => "Type error",
            CompileError::Backend { .. } => "Backend error",
            CompileError::Io(_) => "IO error",
        }
    }

    /// The source range this error points at, for span-carrying variants
    fn label(&self) -> Option<(Span, &str)> {
        match self {
            CompileError::Lexer { message, span }
            | CompileError::Parser { message, span }
            | CompileError::Semantic { message, span }
            | CompileError::Type { message, span } => Some((*span, message)),
            CompileError::Backend { .. } | CompileError::Io(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let diagnostic = match error.label() {
            Some((span, message)) => Diagnostic::error()
                .with_message(error.headline())
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message),
                ]),
            None => Diagnostic::error().with_message(error.to_string()),
        };

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
