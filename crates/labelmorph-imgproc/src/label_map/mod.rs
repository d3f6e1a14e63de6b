//! Label maps: connected components stored as run-length objects, and the
//! filters that build, annotate, prune and rasterize them.

use labelmorph_image::ImageError;
use thiserror::Error;

use crate::parallel::ParallelError;

/// Connectivity rules for grouping pixels.
pub mod connectivity;

/// Label objects and their runs.
pub mod object;

/// The label map container.
pub mod map;

/// Conversion of binary images into label maps.
pub mod labelize;

/// Reconstruction attribute of label objects.
pub mod reconstruction;

/// Attribute based removal of label objects.
pub mod opening;

/// Rasterization of label maps into binary images.
pub mod mask;

pub use connectivity::Connectivity;
pub use labelize::binary_image_to_label_map;
pub use map::{LabelMap, BACKGROUND_LABEL};
pub use mask::label_map_mask;
pub use object::{Label, LabelLine, LabelObject};
pub use opening::attribute_opening;
pub use reconstruction::binary_reconstruction_label_map;

/// Errors raised by label map filters.
#[derive(Error, Debug, PartialEq)]
pub enum LabelMapError {
    /// An image and a label map do not share the same grid.
    #[error("label map geometry {0} does not match image geometry {1}")]
    GeometryMismatch(String, String),

    /// No object carries the requested label.
    #[error("label {0} not found in label map")]
    LabelNotFound(Label),

    /// The background label was given to an object.
    #[error("label {0} is reserved for the background")]
    BackgroundLabel(Label),

    /// An object covers pixels outside the grid.
    #[error("object {0} extends past the {1} pixels of the grid")]
    ObjectOutOfBounds(Label, usize),

    /// A run of an object spans more than one row of the last axis.
    #[error("object {0} has a run starting at offset {1} that crosses a row")]
    LineCrossesRow(Label, usize),

    /// The number of components exceeds the label type.
    #[error("too many connected components for the label type")]
    LabelOverflow,

    /// Image error.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Parallel execution error.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// Length of the last axis, the direction label runs follow.
pub(crate) fn row_length<const D: usize>(geometry: &labelmorph_image::ImageGeometry<D>) -> usize {
    geometry.size.last().copied().unwrap_or(1)
}
