use labelmorph_image::{BinaryPixel, Image};

use super::{checked_inputs, reconstruct_mask_components, ReconstructionConfig, ReconstructionError};

/// Binary reconstruction by dilation of a mask image from a marker image.
///
/// The dual of [`super::BinaryReconstructionByErosion`]: the marker is used
/// as seed directly, so a mask component is kept when it contains at least
/// one marker foreground pixel.
#[derive(Debug, Clone)]
pub struct BinaryReconstructionByDilation<'a, T, const D: usize> {
    marker: Option<&'a Image<T, D>>,
    mask: Option<&'a Image<T, D>>,
    config: ReconstructionConfig<T>,
}

impl<'a, T, const D: usize> BinaryReconstructionByDilation<'a, T, D>
where
    T: BinaryPixel,
{
    /// Create a filter with no inputs.
    pub fn new(config: ReconstructionConfig<T>) -> Self {
        Self {
            marker: None,
            mask: None,
            config,
        }
    }

    /// Set the marker image.
    pub fn set_marker_image(&mut self, marker: &'a Image<T, D>) {
        self.marker = Some(marker);
    }

    /// Get the marker image.
    pub fn marker_image(&self) -> Option<&'a Image<T, D>> {
        self.marker
    }

    /// Set the mask image.
    pub fn set_mask_image(&mut self, mask: &'a Image<T, D>) {
        self.mask = Some(mask);
    }

    /// Get the mask image.
    pub fn mask_image(&self) -> Option<&'a Image<T, D>> {
        self.mask
    }

    /// Get the configuration.
    pub fn config(&self) -> &ReconstructionConfig<T> {
        &self.config
    }

    /// Whether components use face+edge+vertex connectivity.
    pub fn fully_connected(&self) -> bool {
        self.config.fully_connected
    }

    /// Set the connectivity flag.
    pub fn set_fully_connected(&mut self, fully_connected: bool) {
        self.config.fully_connected = fully_connected;
    }

    /// The foreground value.
    pub fn foreground_value(&self) -> T {
        self.config.foreground_value
    }

    /// Set the foreground value.
    pub fn set_foreground_value(&mut self, foreground_value: T) {
        self.config.foreground_value = foreground_value;
    }

    /// The background value of the output.
    pub fn background_value(&self) -> T {
        self.config.background_value
    }

    /// Set the background value of the output.
    pub fn set_background_value(&mut self, background_value: T) {
        self.config.background_value = background_value;
    }

    /// Run the filter and return a new image on the mask grid.
    pub fn update(&self) -> Result<Image<T, D>, ReconstructionError> {
        let (marker, mask) = checked_inputs(self.marker, self.mask)?;
        self.config.strategy.validate()?;

        log::debug!(
            "reconstruction by dilation: {} marker pixels, {:?} connectivity",
            marker.count_value(&self.config.foreground_value),
            self.config.connectivity()
        );

        reconstruct_mask_components(marker, mask, &self.config)
    }
}

/// Binary reconstruction by dilation of `mask` from `marker`.
pub fn binary_reconstruction_by_dilation<T, const D: usize>(
    marker: &Image<T, D>,
    mask: &Image<T, D>,
    config: &ReconstructionConfig<T>,
) -> Result<Image<T, D>, ReconstructionError>
where
    T: BinaryPixel,
{
    let mut filter = BinaryReconstructionByDilation::new(*config);
    filter.set_marker_image(marker);
    filter.set_mask_image(mask);
    filter.update()
}
