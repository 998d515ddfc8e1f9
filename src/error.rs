use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no drawable surface is available")]
    SurfaceUnavailable,

    #[error("engine is already running")]
    AlreadyMounted,

    #[error("engine was stopped and cannot be mounted again")]
    Stopped,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("surface was lost")]
    SurfaceLost,

    #[error("failed to present frame: {0}")]
    Present(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid color `{0}`, expected `#rgb` or `#rrggbb`")]
    InvalidColor(String),

    #[error("`{name}` {reason}")]
    InvalidOption { name: &'static str, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, EngineError>;
