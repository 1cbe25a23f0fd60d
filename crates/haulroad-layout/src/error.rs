#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a layout needs at least two nodes (got {count})")]
    TooFewNodes { count: usize },

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("node ids must not be empty (index {index})")]
    EmptyNodeId { index: usize },

    #[error("invalid layout option `{name}`: {message}")]
    InvalidOption { name: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
