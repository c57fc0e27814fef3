#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StandardsError {
    #[error("unknown vocabulary '{name}' (expected software, source, detector or space-group)")]
    UnknownVocabulary { name: String },
}

pub type Result<T> = std::result::Result<T, StandardsError>;
