use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Contract template not found at {0}")]
    TemplateMissing(PathBuf),

    #[error("Failed to read contract template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse contract template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to serialize filled contract: {0}")]
    Serialize(#[source] lopdf::Error),
}
