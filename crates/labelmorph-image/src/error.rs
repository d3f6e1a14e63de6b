/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the number of pixels.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when two images are expected to share the same size.
    #[error("Image size mismatch: {0} vs {1}")]
    InvalidImageSize(String, String),

    /// Error when the spacing along an axis is not strictly positive.
    #[error("Invalid spacing {1} along axis {0}, must be finite and > 0")]
    InvalidSpacing(usize, f64),

    /// Error when the origin along an axis is not finite.
    #[error("Invalid origin {1} along axis {0}, must be finite")]
    InvalidOrigin(usize, f64),

    /// Error when a pixel index lies outside the image.
    #[error("Pixel index {0} is out of bounds for image size {1}")]
    PixelIndexOutOfBounds(String, String),
}
