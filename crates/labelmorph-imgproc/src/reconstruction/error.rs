use labelmorph_image::ImageError;
use thiserror::Error;

use crate::binary::BinaryError;
use crate::label_map::LabelMapError;
use crate::parallel::ParallelError;

/// The two inputs of a reconstruction filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// The image the reconstruction is seeded from.
    Marker,
    /// The image whose components are reconstructed.
    Mask,
}

impl std::fmt::Display for InputRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputRole::Marker => write!(f, "marker"),
            InputRole::Mask => write!(f, "mask"),
        }
    }
}

/// Errors raised by the binary reconstruction filters.
///
/// All of them are detected before any processing stage runs.
#[derive(Error, Debug, PartialEq)]
pub enum ReconstructionError {
    /// A required input image was not set.
    #[error("the {0} image is not set")]
    MissingInput(InputRole),

    /// Marker and mask do not share size, spacing and origin.
    #[error("marker and mask geometries differ: marker {marker}, mask {mask}")]
    GeometryMismatch {
        /// Geometry of the marker image.
        marker: String,
        /// Geometry of the mask image.
        mask: String,
    },

    /// Image error.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Binary operation error.
    #[error(transparent)]
    Binary(#[from] BinaryError),

    /// Label map error.
    #[error(transparent)]
    LabelMap(#[from] LabelMapError),

    /// Parallel execution error.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
