use std::fmt;
use thiserror::Error as ThisError;

///
/// CriteriaError
///
/// Structured error with a stable classification.
/// Builder failures travel through decorators unchanged; the decorator layer
/// only ever raises `InvalidState` of its own.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct CriteriaError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl CriteriaError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a criteria-origin invalid argument error.
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidArgument,
            ErrorOrigin::Criteria,
            message.into(),
        )
    }

    /// Construct a decorator-origin invalid state error.
    pub(crate) fn decorator_state(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidState,
            ErrorOrigin::Decorator,
            message.into(),
        )
    }

    /// Construct a cursor-origin unsupported error.
    pub(crate) fn cursor_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Cursor, message.into())
    }

    /// Construct an executor-origin failure.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Execution, ErrorOrigin::Executor, message.into())
    }

    /// A unique-result query matched more than one distinct row.
    pub(crate) fn non_unique_result(count: usize) -> Self {
        Self::new(
            ErrorClass::NonUniqueResult,
            ErrorOrigin::Criteria,
            format!("query did not return a unique result: {count}"),
        )
    }

    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidState)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    Execution,
    InvalidArgument,
    InvalidState,
    NonUniqueResult,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Execution => "execution",
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::NonUniqueResult => "non_unique_result",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    Criteria,
    Cursor,
    Decorator,
    Executor,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Criteria => "criteria",
            Self::Cursor => "cursor",
            Self::Decorator => "decorator",
            Self::Executor => "executor",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
