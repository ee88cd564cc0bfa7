//! Compiler Errors
//!
//! Every failure aborts the compilation of the template; no partial output is ever returned.

use crate::parse_util::SourceSpan;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unknown if modifier '{modifier}' at {span}; expected one of: true, false, strict-true")]
    UnknownIfModifier { modifier: String, span: SourceSpan },

    #[error("cannot pop the root scope")]
    PopRootScope,

    #[error("'{directive}' at {span} must immediately follow a sibling carrying 'if' or 'elseif'")]
    OrphanConditionalBranch {
        directive: &'static str,
        span: SourceSpan,
    },

    #[error("'{directive}' at {span} requires a test expression")]
    MissingConditionTest {
        directive: &'static str,
        span: SourceSpan,
    },

    #[error("'else' at {span} cannot carry a test expression")]
    UnexpectedConditionTest { span: SourceSpan },

    #[error("<{tag}> at {span} carries both for:each and iterator directives")]
    ConflictingIteration { tag: String, span: SourceSpan },

    #[error("<{tag}> at {span} is part of an if/elseif/else chain and cannot also iterate")]
    IterationOnConditionalBranch { tag: String, span: SourceSpan },

    #[error("invalid template root at {span}: {reason}")]
    InvalidRoot { reason: String, span: SourceSpan },

    #[error("<{tag}> at {span} uses a dynamic tag but is not a component")]
    DynamicTagOnNonComponent { tag: String, span: SourceSpan },

    #[error("invalid template IR: {0}")]
    InvalidIr(String),
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::InvalidIr(err.to_string())
    }
}
