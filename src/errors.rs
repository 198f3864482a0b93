use thiserror::Error;

/// Validation rejections raised by the graph model before any mutation.
///
/// Everything here is a caller-input problem: no partial state is left
/// behind and no step is recorded when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node already exists: {0}")]
    DuplicateNode(String),

    #[error("self-loops are not allowed: {0}")]
    SelfLoop(String),

    #[error("node not found: {0}")]
    MissingEndpoint(String),

    #[error("edge already exists: {src} -> {target}")]
    DuplicateEdge { src: String, target: String },

    #[error("edge weight must be a positive integer: {src} -> {target}")]
    ZeroWeight { src: String, target: String },

    #[error("graph is empty")]
    EmptyGraph,
}

pub type GraphResult<T> = Result<T, GraphError>;
