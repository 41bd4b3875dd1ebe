use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid integer width {0}: must be a positive multiple of 8 no wider than 256")]
    InvalidWidth(u32),

    #[error("parameter {name}: {source}")]
    Parameter {
        name: String,
        #[source]
        source: Box<AbiError>,
    },
}
