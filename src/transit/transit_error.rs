use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TransitError {
    Network(String),
    Status(u16, String),
    Format(String),
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitError::Network(msg) => write!(f, "Network error: {msg}"),
            TransitError::Status(code, body) => write!(f, "Transit API returned HTTP {code}: {body}"),
            TransitError::Format(msg) => write!(f, "Unexpected transit payload: {msg}"),
        }
    }
}

impl Error for TransitError {}
