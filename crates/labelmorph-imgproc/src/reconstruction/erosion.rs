use labelmorph_image::{BinaryPixel, Image};

use super::{checked_inputs, reconstruct_mask_components, ReconstructionConfig, ReconstructionError};
use crate::binary::binary_not;

/// Binary reconstruction by erosion of a mask image from a marker image.
///
/// Reconstruction by erosion operates on a marker and a mask and is defined
/// as the erosion of the marker with respect to the mask, iterated until
/// stability. It is computed on label maps:
///
/// 1. the marker is inverted into an anti-marker,
/// 2. the foreground components of the mask are labelled,
/// 3. each component is tagged as reconstructible when growing the
///    anti-marker pixels it contains inside the component leaves a
///    non-empty fixed point,
/// 4. components that are not reconstructible are removed,
/// 5. the remaining components are drawn with the foreground value over the
///    background value.
///
/// See Chapter 6.2 of P. Soille, "Morphological Image Analysis: Principles
/// and Applications", Second Edition, Springer, 2003.
///
/// # Examples
///
/// ```
/// use labelmorph_image::Image;
/// use labelmorph_imgproc::reconstruction::{BinaryReconstructionByErosion, ReconstructionConfig};
///
/// let marker = Image::<u8, 2>::from_size_val([5, 5], 0).unwrap();
/// let mask = Image::<u8, 2>::from_size_fn([5, 5], |[r, c]| {
///     if (1..4).contains(&r) && (1..4).contains(&c) { 255 } else { 0 }
/// })
/// .unwrap();
///
/// let mut filter = BinaryReconstructionByErosion::new(ReconstructionConfig::default());
/// filter.set_marker_image(&marker);
/// filter.set_mask_image(&mask);
///
/// let output = filter.update().unwrap();
/// assert_eq!(output, mask);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReconstructionByErosion<'a, T, const D: usize> {
    marker: Option<&'a Image<T, D>>,
    mask: Option<&'a Image<T, D>>,
    config: ReconstructionConfig<T>,
}

impl<'a, T, const D: usize> BinaryReconstructionByErosion<'a, T, D>
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

    /// Set the connectivity flag. Use `true` for objects one pixel wide.
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
    ///
    /// # Errors
    ///
    /// Fails when an input is missing, when marker and mask grids differ or
    /// when the execution strategy is invalid. Nothing is computed in that
    /// case.
    pub fn update(&self) -> Result<Image<T, D>, ReconstructionError> {
        let (marker, mask) = checked_inputs(self.marker, self.mask)?;
        let config = &self.config;
        config.strategy.validate()?;

        let mut anti_marker = Image::from_geometry_val(*marker.geometry(), config.background_value)?;
        binary_not(
            marker,
            &mut anti_marker,
            config.foreground_value,
            config.background_value,
            config.strategy,
        )?;

        log::debug!(
            "reconstruction by erosion: {} anti-marker pixels, {:?} connectivity",
            anti_marker.count_value(&config.foreground_value),
            config.connectivity()
        );

        reconstruct_mask_components(&anti_marker, mask, config)
    }
}

/// Binary reconstruction by erosion of `mask` from `marker`.
///
/// Convenience wrapper around [`BinaryReconstructionByErosion`].
pub fn binary_reconstruction_by_erosion<T, const D: usize>(
    marker: &Image<T, D>,
    mask: &Image<T, D>,
    config: &ReconstructionConfig<T>,
) -> Result<Image<T, D>, ReconstructionError>
where
    T: BinaryPixel,
{
    let mut filter = BinaryReconstructionByErosion::new(*config);
    filter.set_marker_image(marker);
    filter.set_mask_image(mask);
    filter.update()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::{ExecutionStrategy, ParallelError};
    use crate::reconstruction::InputRole;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config() -> ReconstructionConfig<u8> {
        ReconstructionConfig::default()
            .with_foreground_value(255)
            .with_background_value(0)
    }

    fn centered_square() -> Image<u8, 2> {
        Image::from_size_fn([5, 5], |[r, c]| {
            if (1..4).contains(&r) && (1..4).contains(&c) {
                255
            } else {
                0
            }
        })
        .unwrap()
    }

    #[test]
    fn background_marker_keeps_square() -> Result<(), ReconstructionError> {
        init_logger();
        let marker = Image::<u8, 2>::from_size_val([5, 5], 0)?;
        let mask = centered_square();

        let output = binary_reconstruction_by_erosion(&marker, &mask, &config())?;

        assert_eq!(output.as_slice(), mask.as_slice());
        assert_eq!(output.count_value(&255), 9);
        Ok(())
    }

    #[test]
    fn foreground_marker_removes_everything() -> Result<(), ReconstructionError> {
        let marker = Image::<u8, 2>::from_size_val([5, 5], 255)?;
        let mask = centered_square();

        let output = binary_reconstruction_by_erosion(&marker, &mask, &config())?;

        assert_eq!(output.count_value(&0), 25);
        Ok(())
    }

    #[test]
    fn only_overlapped_component_survives() -> Result<(), ReconstructionError> {
        #[rustfmt::skip]
        let mask = Image::<u8, 2>::new(
            [6, 6].into(),
            vec![
                255, 255, 0, 0, 0,   0,
                255, 255, 0, 0, 0,   0,
                0,   0,   0, 0, 0,   0,
                0,   0,   0, 0, 255, 255,
                0,   0,   0, 0, 255, 255,
                0,   0,   0, 0, 0,   0,
            ],
        )?;
        // marker is foreground everywhere except one pixel of the second square
        let marker = Image::<u8, 2>::from_size_fn([6, 6], |idx| {
            if idx == [4, 4] {
                0
            } else {
                255
            }
        })?;

        let output = binary_reconstruction_by_erosion(&marker, &mask, &config())?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0, 0,   0,
            0, 0, 0, 0, 0,   0,
            0, 0, 0, 0, 0,   0,
            0, 0, 0, 0, 255, 255,
            0, 0, 0, 0, 255, 255,
            0, 0, 0, 0, 0,   0,
        ];
        assert_eq!(output.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn empty_mask_gives_background() -> Result<(), ReconstructionError> {
        let marker = Image::<u8, 2>::from_size_fn([4, 4], |[r, _]| if r < 2 { 255 } else { 0 })?;
        let mask = Image::<u8, 2>::from_size_val([4, 4], 0)?;
        let cfg = config().with_background_value(3);

        let output = binary_reconstruction_by_erosion(&marker, &mask, &cfg)?;

        assert_eq!(output.count_value(&3), 16);
        Ok(())
    }

    #[test]
    fn output_keeps_mask_geometry() -> Result<(), ReconstructionError> {
        let marker = Image::<u8, 3>::from_size_val([3, 4, 5], 0)?
            .with_spacing([0.5, 1.0, 2.0])?
            .with_origin([1.0, 2.0, 3.0])?;
        let mask = Image::<u8, 3>::from_size_fn([3, 4, 5], |[z, y, x]| {
            if z == 1 && y > 0 && x > 1 {
                255
            } else {
                0
            }
        })?
        .with_spacing([0.5, 1.0, 2.0])?
        .with_origin([1.0, 2.0, 3.0])?;

        let output = binary_reconstruction_by_erosion(&marker, &mask, &config())?;

        assert_eq!(output.geometry(), mask.geometry());
        assert_eq!(output.as_slice(), mask.as_slice());
        Ok(())
    }

    #[test]
    fn full_connectivity_never_shrinks_output() -> Result<(), ReconstructionError> {
        // a diagonal chain: face connectivity splits it, full connectivity joins it
        let mask = Image::<u8, 2>::from_size_fn([5, 5], |[r, c]| if r == c { 255 } else { 0 })?;
        let marker = Image::<u8, 2>::from_size_fn([5, 5], |idx| {
            if idx == [0, 0] {
                0
            } else {
                255
            }
        })?;

        let face = binary_reconstruction_by_erosion(&marker, &mask, &config())?;
        let full = binary_reconstruction_by_erosion(
            &marker,
            &mask,
            &config().with_fully_connected(true),
        )?;

        assert_eq!(face.count_value(&255), 1);
        assert_eq!(full.count_value(&255), 5);
        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), ReconstructionError> {
        let mask = Image::<u8, 2>::from_size_fn([16, 16], |[r, c]| {
            if (r / 3 + c / 3) % 2 == 0 && r % 3 != 2 && c % 3 != 2 {
                255
            } else {
                0
            }
        })?;
        let marker = Image::<u8, 2>::from_size_fn([16, 16], |[r, c]| {
            if (r + 2 * c) % 7 == 0 {
                0
            } else {
                255
            }
        })?;

        let serial = binary_reconstruction_by_erosion(
            &marker,
            &mask,
            &config().with_strategy(ExecutionStrategy::Serial),
        )?;
        for strategy in [
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::AutoRows(16),
            ExecutionStrategy::Fixed(3),
        ] {
            let parallel =
                binary_reconstruction_by_erosion(&marker, &mask, &config().with_strategy(strategy))?;
            assert_eq!(parallel, serial);
        }
        Ok(())
    }

    #[test]
    fn missing_inputs() {
        let marker = Image::<u8, 2>::from_size_val([2, 2], 0).unwrap();

        let mut filter = BinaryReconstructionByErosion::new(config());
        assert_eq!(
            filter.update(),
            Err(ReconstructionError::MissingInput(InputRole::Marker))
        );

        filter.set_marker_image(&marker);
        assert_eq!(
            filter.update(),
            Err(ReconstructionError::MissingInput(InputRole::Mask))
        );
    }

    #[test]
    fn geometry_mismatch() -> Result<(), ReconstructionError> {
        let marker = Image::<u8, 2>::from_size_val([5, 5], 0)?;
        let mask = centered_square().with_spacing([1.0, 2.0])?;

        let res = binary_reconstruction_by_erosion(&marker, &mask, &config());
        assert!(matches!(
            res,
            Err(ReconstructionError::GeometryMismatch { .. })
        ));

        let shifted = centered_square().with_origin([0.0, 1.0])?;
        let res = binary_reconstruction_by_erosion(&marker, &shifted, &config());
        assert!(matches!(
            res,
            Err(ReconstructionError::GeometryMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn invalid_strategy_is_reported() -> Result<(), ReconstructionError> {
        let marker = Image::<u8, 2>::from_size_val([5, 5], 0)?;
        let mask = centered_square();
        let res = binary_reconstruction_by_erosion(
            &marker,
            &mask,
            &config().with_strategy(ExecutionStrategy::Fixed(0)),
        );
        assert_eq!(
            res,
            Err(ReconstructionError::Parallel(
                ParallelError::InvalidThreadCount(0)
            ))
        );
        Ok(())
    }

    #[test]
    fn accessors() {
        let mut filter = BinaryReconstructionByErosion::<u8, 2>::new(ReconstructionConfig::default());
        assert!(!filter.fully_connected());
        assert_eq!(filter.foreground_value(), 255);
        assert_eq!(filter.background_value(), 0);
        assert!(filter.marker_image().is_none());

        filter.set_fully_connected(true);
        filter.set_foreground_value(1);
        filter.set_background_value(2);
        assert!(filter.config().fully_connected);
        assert_eq!(filter.config().foreground_value, 1);
        assert_eq!(filter.config().background_value, 2);
    }
}
