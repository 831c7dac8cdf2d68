use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointCloudError {
    #[error("property '{property}' of element '{element}' has {actual} values, expected {expected}")]
    LengthMismatch {
        element: String,
        property: String,
        expected: usize,
        actual: usize,
    },
    #[error("property '{property}' appears more than once in element '{element}'")]
    DuplicateProperty { element: String, property: String },
    #[error("element '{0}' appears more than once")]
    DuplicateElement(String),
    #[error("unknown property type: {0}")]
    UnknownPropertyType(String),
}

/// Raised before any output is built, so a failed downsample never leaves a
/// partially rebuilt cloud behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownsampleError {
    #[error("point cloud has no per-point element")]
    MissingElement,
    #[error("required property '{name}' is missing")]
    MissingProperty { name: String },
}
