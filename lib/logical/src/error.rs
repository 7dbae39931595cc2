use rdf_loom_parser::SourceSpan;
use thiserror::Error;

/// A parse tree that is syntactically valid but cannot be turned into an algebra expression.
///
/// Errors that have a location in the source text carry the [SourceSpan] of the offending
/// element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TranslationError {
    #[error("The prefix '{prefix}:' is not declared")]
    UndeclaredPrefix { prefix: String, span: SourceSpan },
    #[error("Invalid IRI <{iri}>: {message}")]
    InvalidIri {
        iri: String,
        span: Option<SourceSpan>,
        message: String,
    },
    #[error("Invalid language tag '{tag}': {message}")]
    InvalidLanguageTag { tag: String, message: String },
    #[error("The variable ?{variable} is already bound in this scope")]
    VariableAlreadyBound { variable: String, span: SourceSpan },
    #[error("The variable ?{variable} is neither grouped nor aggregated")]
    UngroupedVariable { variable: String, span: SourceSpan },
    #[error("SELECT * is not allowed together with GROUP BY or aggregates")]
    WildcardWithGroupBy { span: SourceSpan },
    #[error("Aggregates are only allowed in SELECT, HAVING, and ORDER BY")]
    MisplacedAggregate { span: SourceSpan },
    #[error("Blank nodes are not allowed in {0}")]
    BlankNodeNotAllowed(&'static str),
    #[error("Unknown function '{name}'")]
    UnknownFunction { name: String, span: SourceSpan },
    #[error("The variable ?{variable} is not allowed here")]
    UnexpectedVariable { variable: String, span: SourceSpan },
    #[error("Empty property path")]
    EmptyPropertyPath,
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

impl TranslationError {
    /// The location of the error in the source text, if known.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            TranslationError::UndeclaredPrefix { span, .. }
            | TranslationError::VariableAlreadyBound { span, .. }
            | TranslationError::UngroupedVariable { span, .. }
            | TranslationError::WildcardWithGroupBy { span }
            | TranslationError::MisplacedAggregate { span }
            | TranslationError::UnknownFunction { span, .. }
            | TranslationError::UnexpectedVariable { span, .. } => Some(*span),
            TranslationError::InvalidIri { span, .. } => *span,
            TranslationError::InvalidLanguageTag { .. }
            | TranslationError::BlankNodeNotAllowed(_)
            | TranslationError::EmptyPropertyPath
            | TranslationError::InvalidTemplate(_) => None,
        }
    }
}
