//! Binary geodesic reconstruction on N-dimensional label maps.
//!
//! ```
//! use labelmorph::image::Image;
//! use labelmorph::imgproc::reconstruction::{binary_reconstruction_by_erosion, ReconstructionConfig};
//!
//! let marker = Image::<u8, 2>::from_size_val([5, 5], 255).unwrap();
//! let mask = Image::<u8, 2>::from_size_fn([5, 5], |[r, c]| if r == c { 255 } else { 0 }).unwrap();
//!
//! let output = binary_reconstruction_by_erosion(&marker, &mask, &ReconstructionConfig::default()).unwrap();
//! assert_eq!(output.count_value(&0), 25);
//! ```

#[doc(inline)]
pub use labelmorph_image as image;

#[doc(inline)]
pub use labelmorph_imgproc as imgproc;
