//! Atlas parse and resolution errors

pub type AtlasResult<T> = Result<T, AtlasError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtlasError {
    #[error("Key '{key}' already exists in '{block}' (line {line})")]
    DuplicateKey {
        block: String,
        key: String,
        line: usize,
    },
    #[error("Page '{name}' already exists")]
    DuplicatePage { name: String },
    #[error("Key '{key}' on line {line} does not belong to any page or region")]
    KeyOutsideBlock { key: String, line: usize },
    #[error("Region '{name}': index inferred from name ({auto}) and explicit index ({explicit}) disagree")]
    IndexMismatch {
        name: String,
        auto: u64,
        explicit: u64,
    },
    #[error("Region '{name}' has more than one entry with index {index}")]
    DuplicateIndex { name: String, index: u32 },
    #[error("Region '{name}' has group but no index")]
    GroupWithoutIndex { name: String },
    #[error("Region '{name}': index {index} exceeds maximum {max}")]
    IndexTooLarge { name: String, index: u64, max: u32 },
    #[error("Unknown filter '{value}'")]
    UnknownFilter { value: String },
    #[error("'{block}' is missing required key '{key}'")]
    MissingKey { block: String, key: String },
    #[error("'{block}': key '{key}' has invalid number '{value}'")]
    InvalidNumber {
        block: String,
        key: String,
        value: String,
    },
}
