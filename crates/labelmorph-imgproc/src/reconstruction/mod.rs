//! Binary geodesic reconstruction built from label map filters.
//!
//! Both operators label the connected components of the mask, keep the
//! components that can be reconstructed from a seed image and draw them back
//! into a binary image. Reconstruction by dilation seeds from the marker,
//! reconstruction by erosion seeds from the inverted marker.

use labelmorph_image::{BinaryPixel, Image};

use crate::label_map::{
    attribute_opening, binary_image_to_label_map, binary_reconstruction_label_map,
    label_map_mask,
};

/// Configuration of the reconstruction filters.
pub mod config;

/// Reconstruction by dilation of a mask from a marker.
pub mod dilation;

/// Error types of the reconstruction filters.
pub mod error;

/// Reconstruction by erosion of a mask from a marker.
pub mod erosion;

pub use config::ReconstructionConfig;
pub use dilation::{binary_reconstruction_by_dilation, BinaryReconstructionByDilation};
pub use erosion::{binary_reconstruction_by_erosion, BinaryReconstructionByErosion};
pub use error::{InputRole, ReconstructionError};

/// Check that both inputs are present and share the same grid.
fn checked_inputs<'a, T, const D: usize>(
    marker: Option<&'a Image<T, D>>,
    mask: Option<&'a Image<T, D>>,
) -> Result<(&'a Image<T, D>, &'a Image<T, D>), ReconstructionError> {
    let marker = marker.ok_or(ReconstructionError::MissingInput(InputRole::Marker))?;
    let mask = mask.ok_or(ReconstructionError::MissingInput(InputRole::Mask))?;

    if !marker.same_geometry(mask) {
        return Err(ReconstructionError::GeometryMismatch {
            marker: marker.geometry().to_string(),
            mask: mask.geometry().to_string(),
        });
    }

    Ok((marker, mask))
}

/// Keep the mask components reconstructible from the seed foreground.
///
/// Label, annotate, open and rasterize, in that order.
fn reconstruct_mask_components<T, const D: usize>(
    seed: &Image<T, D>,
    mask: &Image<T, D>,
    config: &ReconstructionConfig<T>,
) -> Result<Image<T, D>, ReconstructionError>
where
    T: BinaryPixel,
{
    let connectivity = config.connectivity();

    let label_map = binary_image_to_label_map(mask, config.foreground_value, connectivity)?;
    let annotated = binary_reconstruction_label_map(
        label_map,
        seed,
        config.foreground_value,
        connectivity,
        config.strategy,
    )?;
    let opened = attribute_opening(annotated, &true, false);

    let output = label_map_mask(
        &opened,
        config.foreground_value,
        config.background_value,
        config.strategy,
    )?;

    log::debug!(
        "reconstruction kept {} objects covering {} of {} pixels",
        opened.len(),
        opened.number_of_pixels(),
        output.num_pixels()
    );

    Ok(output)
}
