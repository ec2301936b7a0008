// errors.rs
use astra::Response;
use std::fmt;

/// Errors originating from the server logic (routing, bad query strings)
/// or from the layers it drives (rendering, spreadsheet export).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Render(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Render(msg) => write!(f, "Render Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

/// Errors raised while loading the listing table or the boundary files.
#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Parse(String),
    Format(String),
    Projection(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "I/O error: {msg}"),
            LoadError::Parse(msg) => write!(f, "Parse error: {msg}"),
            LoadError::Format(msg) => write!(f, "Format error: {msg}"),
            LoadError::Projection(msg) => write!(f, "Projection error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e.to_string())
    }
}

/// Errors raised while composing or persisting a map artifact.
#[derive(Debug)]
pub enum RenderError {
    Io(String),
    Serialize(String),
    Projection(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(msg) => write!(f, "I/O error: {msg}"),
            RenderError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            RenderError::Projection(msg) => write!(f, "Projection error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<RenderError> for ServerError {
    fn from(e: RenderError) -> Self {
        ServerError::Render(e.to_string())
    }
}
