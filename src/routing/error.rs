//! Routing error definitions.
//!
//! A path that simply does not route is not an error; `match_route`
//! reports it as `None`. Everything here is a caller mistake surfaced
//! while building routes or generating paths.

use thiserror::Error;

/// Errors raised while constructing routes or generating paths.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A parameter required by a segment on the generating branch was not supplied.
    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    /// The supplied value does not satisfy the segment it is bound to.
    #[error("parameter `{key}` value `{value}` is incompatible with its segment")]
    IncompatibleParameter { key: String, value: String },

    /// A supplied parameter is not bound by any segment on the generating branch.
    #[error("unexpected parameter `{0}`")]
    UnexpectedParameter(String),

    /// A parameter key that is empty or contains unsupported characters.
    #[error("invalid parameter key `{0}`")]
    InvalidKey(String),

    /// A regular expression failed to compile.
    #[error("invalid regular expression `{expr}`: {source}")]
    InvalidRegex {
        expr: String,
        #[source]
        source: regex::Error,
    },

    /// A bare regular expression has no inverse, so no path can be rendered for it.
    #[error("regular expression `{0}` cannot be rendered back into a path")]
    NotInvertible(String),

    /// No branch of the route tree produces the requested handler.
    #[error("no route produces handler {0}")]
    UnknownHandler(String),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::MissingParameter("id".into());
        assert_eq!(err.to_string(), "missing parameter `id`");

        let err = RouteError::IncompatibleParameter {
            key: "id".into(),
            value: "abc".into(),
        };
        assert!(err.to_string().contains("abc"));

        let err = RouteError::UnexpectedParameter("bogus".into());
        assert_eq!(err.to_string(), "unexpected parameter `bogus`");

        let err = RouteError::UnknownHandler("\"article\"".into());
        assert_eq!(err.to_string(), "no route produces handler \"article\"");
    }
}
