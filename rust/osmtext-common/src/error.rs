use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` when the error is the recoverable "query too generic" case.
    pub fn is_insufficient_query(&self) -> bool {
        matches!(self.kind(), ErrorKind::InsufficientQuery { .. })
    }

    /// Returns `true` when a fetch could not complete at all, including a failed
    /// metadata fetch surfaced through a shared initialization failure.
    pub fn is_transport(&self) -> bool {
        match self.kind() {
            ErrorKind::Transport { .. } => true,
            ErrorKind::Initialization { source } => source.is_transport(),
            _ => false,
        }
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn insufficient_query(query: impl Into<String>) -> Error {
        Error(
            ErrorKind::InsufficientQuery {
                query: query.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn json(element: impl Into<String>, source: serde_json::Error) -> Error {
        Error(
            ErrorKind::Json {
                element: element.into(),
                source,
            }
            .into(),
        )
    }

    pub fn transport<E>(url: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Transport {
                url: url.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    pub fn metadata_unavailable(url: impl Into<String>, status: impl Into<String>) -> Error {
        Error(
            ErrorKind::MetadataUnavailable {
                url: url.into(),
                status: status.into(),
            }
            .into(),
        )
    }

    pub fn initialization(source: Arc<Error>) -> Error {
        Error(ErrorKind::Initialization { source }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("query string insufficient for the search: '{query}'")]
    InsufficientQuery { query: String },

    #[error("invalid content for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("malformed JSON in '{element}': {source}")]
    Json {
        element: String,
        source: serde_json::Error,
    },

    #[error("failed to fetch '{url}': {source}")]
    Transport { url: String, source: StdErrorBoxed },

    #[error("index metadata at '{url}' is unavailable ({status})")]
    MetadataUnavailable { url: String, status: String },

    #[error("failed to resolve '{name}' against base '{base}', reason: {reason}")]
    ResolveLocation {
        base: String,
        name: String,
        reason: String,
    },

    #[error("index session failed to initialize: {source}")]
    Initialization { source: Arc<Error> },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
