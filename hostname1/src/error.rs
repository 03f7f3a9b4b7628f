//! Error types for the hostnamed client.

use thiserror::Error;
use zbus::DBusError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Connecting, authenticating or the `Hello` exchange failed.
    ///
    /// The connection has already been released when this is returned.
    #[error("failed to connect to {address}")]
    Connect {
        address: String,
        #[source]
        source: zbus::Error,
    },

    /// Error reply sent by the bus or by hostnamed.
    #[error("{name}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Remote {
        name: String,
        message: Option<String>,
    },

    /// Transport failure after the connection was established.
    #[error(transparent)]
    Bus(zbus::Error),

    #[error("property {property} has incorrect type: expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        match err {
            zbus::Error::MethodError(name, message, _) => Error::Remote {
                name: name.to_string(),
                message,
            },
            other => Error::Bus(other),
        }
    }
}

impl From<zbus::fdo::Error> for Error {
    fn from(err: zbus::fdo::Error) -> Self {
        match err {
            zbus::fdo::Error::ZBus(inner) => Error::from(inner),
            other => Error::Remote {
                name: other.name().to_string(),
                message: other.description().map(str::to_string),
            },
        }
    }
}
