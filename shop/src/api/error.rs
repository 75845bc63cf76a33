//! Error types for the product API client

use thiserror::Error;

/// Message used when an error response carries no `message` field
pub const DEFAULT_ERROR_MESSAGE: &str = "Error en la solicitud";

/// Errors that can occur when talking to the product API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` from the error body, or [`DEFAULT_ERROR_MESSAGE`]
        message: String,
    },

    /// The server could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, 0 when no response was received
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Connection(_) | Self::Decode(_) => 0,
        }
    }

    /// Text shown to the user in the error banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::Connection(_) => "Error de conexión con el servidor".to_string(),
            Self::Decode(_) => "Respuesta inválida del servidor".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_report_status_zero() {
        let error = ApiError::Connection("refused".into());
        assert_eq!(error.status(), 0);
        assert_eq!(error.user_message(), "Error de conexión con el servidor");
    }

    #[test]
    fn status_errors_show_server_message() {
        let error = ApiError::Status {
            status: 404,
            message: "Producto no encontrado".into(),
        };
        assert_eq!(error.status(), 404);
        assert_eq!(error.user_message(), "Producto no encontrado");
        assert_eq!(
            error.to_string(),
            "API error (status 404): Producto no encontrado"
        );
    }
}
