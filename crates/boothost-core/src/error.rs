use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error shared by every bootstrap layer.
///
/// Phase methods return an error only for invariant violations, which the
/// caller hands to `lifecycle::fatal`. Anything else is logged where it
/// happens and bootstrap continues.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    class: ErrorClass,
    origin: ErrorOrigin,
    message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    pub fn config(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Config, origin, message)
    }

    pub fn infra(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Infra, origin, message)
    }

    pub fn invariant(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Invariant, origin, message)
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        self.class
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        self.origin
    }

    /// Invariant violations are the only errors that justify aborting.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.class, ErrorClass::Invariant)
    }

    #[must_use]
    pub const fn log_fields(&self) -> (ErrorClass, ErrorOrigin) {
        (self.class, self.origin)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    Config,
    Infra,
    Invariant,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    Config,
    Crash,
    Dispatch,
    Hooks,
    Lifecycle,
    Logging,
    Paths,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invariants_are_fatal() {
        let err = Error::invariant(ErrorOrigin::Lifecycle, "main bundle saw --type");
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "main bundle saw --type");

        let err = Error::infra(ErrorOrigin::Paths, "mkdir failed");
        assert!(!err.is_fatal());
        assert_eq!(err.log_fields(), (ErrorClass::Infra, ErrorOrigin::Paths));
    }
}
