use labelmorph_image::BinaryPixel;

use crate::label_map::Connectivity;
use crate::parallel::ExecutionStrategy;

/// Options shared by the binary reconstruction filters.
///
/// # Examples
///
/// ```
/// use labelmorph_imgproc::reconstruction::ReconstructionConfig;
///
/// let config = ReconstructionConfig::<u8>::default()
///     .with_fully_connected(true)
///     .with_background_value(10);
///
/// assert!(config.fully_connected);
/// assert_eq!(config.foreground_value, 255);
/// assert_eq!(config.background_value, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructionConfig<T> {
    /// Use face+edge+vertex connectivity instead of face connectivity.
    pub fully_connected: bool,
    /// Value of foreground pixels, in the inputs and in the output.
    pub foreground_value: T,
    /// Value written for background pixels in the output.
    pub background_value: T,
    /// How pixel-wise stages and per-object work are distributed.
    pub strategy: ExecutionStrategy,
}

impl<T: BinaryPixel> Default for ReconstructionConfig<T> {
    fn default() -> Self {
        Self {
            fully_connected: false,
            foreground_value: T::default_foreground(),
            background_value: T::default_background(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl<T> ReconstructionConfig<T> {
    /// Set the connectivity flag.
    pub fn with_fully_connected(mut self, fully_connected: bool) -> Self {
        self.fully_connected = fully_connected;
        self
    }

    /// Set the foreground value.
    pub fn with_foreground_value(mut self, foreground_value: T) -> Self {
        self.foreground_value = foreground_value;
        self
    }

    /// Set the background value.
    pub fn with_background_value(mut self, background_value: T) -> Self {
        self.background_value = background_value;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Connectivity rule selected by the `fully_connected` flag.
    pub fn connectivity(&self) -> Connectivity {
        Connectivity::from_fully_connected(self.fully_connected)
    }
}
