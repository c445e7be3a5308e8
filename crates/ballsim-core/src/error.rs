/// Failure loading a [`MutatorConfig`](crate::mutator::MutatorConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config read error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure writing or reading a serialized ball state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateCodecError {
    Encode(String),
    /// Input was truncated or malformed.
    Decode(String),
}

impl std::fmt::Display for StateCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "state encode error: {e}"),
            Self::Decode(e) => write!(f, "state decode error: {e}"),
        }
    }
}

impl std::error::Error for StateCodecError {}
