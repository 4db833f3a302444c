use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Font file missing or unreadable.
    ResourceNotFound(PathBuf),
    /// File exists but is not a usable TrueType/OpenType font.
    Format(String),
    /// A style references a font name that was never registered.
    UnknownFont(String),
    DuplicateFont(String),
    UnknownStyle(String),
    InvalidStyle(String),
    EmptyInput,
    /// The layout engine cannot place some content.
    Render(String),
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceNotFound(path) => {
                write!(f, "font file not found or unreadable: {}", path.display())
            }
            Error::Format(msg) => write!(f, "invalid font file: {msg}"),
            Error::UnknownFont(name) => write!(f, "font '{name}' is not registered"),
            Error::DuplicateFont(name) => write!(f, "font '{name}' is already registered"),
            Error::UnknownStyle(name) => write!(f, "unknown base style '{name}'"),
            Error::InvalidStyle(msg) => write!(f, "invalid style: {msg}"),
            Error::EmptyInput => write!(f, "no text blocks to compose"),
            Error::Render(msg) => write!(f, "render error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
