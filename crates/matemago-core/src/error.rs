pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Input rejected before any request is made.
///
/// Messages are user-facing and therefore in Spanish, like the rest of the product copy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("¡Por favor completa {fields}! 🧙‍♂️")]
    Missing { fields: String },

    #[error("La edad debe ser un número entero: {value:?}")]
    InvalidAge { value: String },

    #[error("La edad debe estar entre {min} y {max} años (recibido: {age})")]
    AgeOutOfRange { age: i64, min: u8, max: u8 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid service base address {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported scheme in service base address {value:?} (expected http or https)")]
    UnsupportedScheme { value: String },
}

/// Failure of a single explanation request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Could not reach the explanation service: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx answer. `detail` is the service-provided message, or the generic fallback.
    #[error("{detail}")]
    Service { status: u16, detail: String },

    #[error("Invalid response from the explanation service: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// The single message shown next to the query form.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}
