//! Load-time failure taxonomy.
//!
//! All variants are fatal in the sense of the crate's loading contract: a
//! layered graph is either fully valid or rejected, with no partial-run
//! recovery.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed input at {context}: {message}")]
    MalformedInput { context: String, message: String },

    #[error("edge {from} -> {target} does not join adjacent layers ({source_layer} vs {target_layer})")]
    NonAdjacentLayers {
        from: String,
        target: String,
        source_layer: i64,
        target_layer: i64,
    },

    #[error("duplicate position {position} on layer {layer}")]
    DuplicatePosition { layer: usize, position: usize },

    #[error("edge references missing node id {id}")]
    MissingNode { id: i64 },

    #[error("numeric value out of range in {context}: {value}")]
    OutOfRange { context: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
