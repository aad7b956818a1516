pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported diagram type: {diagram_type}")]
    UnsupportedDiagram { diagram_type: String },

    #[error("Diagram type mismatch: plugin '{plugin}' cannot handle '{diagram_type}' data")]
    DiagramTypeMismatch {
        plugin: String,
        diagram_type: String,
    },

    #[error("Invalid diagram data: {message}")]
    InvalidData { message: String },
}
