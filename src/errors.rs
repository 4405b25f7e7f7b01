use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Decode,
    Animation,
    Config,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Fetch,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn animation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Animation,
            message: message.into(),
        }
    }

    pub fn config(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ErrorKind::Fetch => "fetch failed",
            ErrorKind::Decode => "invalid snapshot",
            ErrorKind::Animation => "animation rejected",
            ErrorKind::Config => "config error",
        };
        write!(f, "{label}: {}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err)
    }
}
