use std::fmt::Debug;

use num_traits::Bounded;

use crate::error::ImageError;

/// Computes the strides for a row-major image layout.
///
/// The last axis has stride 1 and each other axis has the product of the
/// sizes of all axes to its right.
///
/// # Examples
///
/// ```
/// use labelmorph_image::image::get_strides_from_size;
///
/// assert_eq!(get_strides_from_size([2, 3]), [3, 1]);
/// assert_eq!(get_strides_from_size([2, 3, 4]), [12, 4, 1]);
/// ```
pub fn get_strides_from_size<const D: usize>(size: [usize; D]) -> [usize; D] {
    let mut strides = [0; D];
    let mut stride = 1;
    for i in (0..D).rev() {
        strides[i] = stride;
        stride *= size[i];
    }
    strides
}

/// Physical description of an image grid.
///
/// Two images share a grid only when size, spacing and origin are all equal.
///
/// # Examples
///
/// ```
/// use labelmorph_image::ImageGeometry;
///
/// let geometry = ImageGeometry::from_size([5, 5]);
///
/// assert_eq!(geometry.size, [5, 5]);
/// assert_eq!(geometry.spacing, [1.0, 1.0]);
/// assert_eq!(geometry.origin, [0.0, 0.0]);
/// assert_eq!(geometry.num_pixels(), 25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageGeometry<const D: usize> {
    /// Number of pixels along each axis.
    pub size: [usize; D],
    /// Physical distance between pixel centers along each axis.
    pub spacing: [f64; D],
    /// Physical coordinate of the first pixel.
    pub origin: [f64; D],
}

impl<const D: usize> ImageGeometry<D> {
    /// Create a geometry with unit spacing and a zero origin.
    pub fn from_size(size: [usize; D]) -> Self {
        Self {
            size,
            spacing: [1.0; D],
            origin: [0.0; D],
        }
    }

    /// Total number of pixels in the grid.
    pub fn num_pixels(&self) -> usize {
        self.size.iter().product()
    }

    /// Row-major strides of the grid.
    pub fn strides(&self) -> [usize; D] {
        get_strides_from_size(self.size)
    }

    /// Check that the spacing is finite and strictly positive and that the
    /// origin is finite.
    pub fn validate(&self) -> Result<(), ImageError> {
        for (axis, &s) in self.spacing.iter().enumerate() {
            if !s.is_finite() || s <= 0.0 {
                return Err(ImageError::InvalidSpacing(axis, s));
            }
        }
        for (axis, &o) in self.origin.iter().enumerate() {
            if !o.is_finite() {
                return Err(ImageError::InvalidOrigin(axis, o));
            }
        }
        Ok(())
    }

    /// Linear offset of a pixel index, or `None` if it lies outside the grid.
    pub fn offset(&self, index: [usize; D]) -> Option<usize> {
        let mut offset = 0;
        for axis in 0..D {
            if index[axis] >= self.size[axis] {
                return None;
            }
            offset = offset * self.size[axis] + index[axis];
        }
        Some(offset)
    }

    /// Pixel index of a linear offset.
    ///
    /// The offset is assumed to be smaller than [`ImageGeometry::num_pixels`].
    pub fn index_from_offset(&self, mut offset: usize) -> [usize; D] {
        let mut index = [0; D];
        for axis in (0..D).rev() {
            let len = self.size[axis].max(1);
            index[axis] = offset % len;
            offset /= len;
        }
        index
    }

    /// Physical coordinate of the center of a pixel.
    pub fn index_to_physical_point(&self, index: [usize; D]) -> [f64; D] {
        let mut point = [0.0; D];
        for axis in 0..D {
            point[axis] = self.origin[axis] + index[axis] as f64 * self.spacing[axis];
        }
        point
    }
}

impl<const D: usize> std::fmt::Display for ImageGeometry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageGeometry {{ size: {:?}, spacing: {:?}, origin: {:?} }}",
            self.size, self.spacing, self.origin
        )
    }
}

impl<const D: usize> From<[usize; D]> for ImageGeometry<D> {
    fn from(size: [usize; D]) -> Self {
        ImageGeometry::from_size(size)
    }
}

/// Trait for pixel types usable in binary images.
///
/// Equality selects foreground pixels and the numeric bounds provide the
/// default foreground and background values.
pub trait BinaryPixel: Copy + PartialEq + PartialOrd + Bounded + Debug + Send + Sync {
    /// Default foreground value, the largest representable value.
    fn default_foreground() -> Self {
        Self::max_value()
    }

    /// Default background value, the smallest representable value.
    ///
    /// For floating point types this is the most negative finite value.
    fn default_background() -> Self {
        Self::min_value()
    }
}

macro_rules! impl_binary_pixel {
    ($($t:ty),*) => {
        $(impl BinaryPixel for $t {})*
    };
}

impl_binary_pixel!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

/// An N-dimensional image of scalar pixels.
///
/// Pixels are stored contiguously in row-major order, the last axis varying
/// fastest. The geometry travels with the pixel data so that operators can
/// check that their inputs share the same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const D: usize> {
    data: Vec<T>,
    geometry: ImageGeometry<D>,
}

impl<T, const D: usize> Image<T, D> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `geometry` - The grid of the image.
    /// * `data` - The pixel data in row-major order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the number of pixels
    /// or the spacing is invalid, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelmorph_image::{Image, ImageGeometry};
    ///
    /// let image = Image::<u8, 2>::new(ImageGeometry::from_size([2, 3]), vec![0u8; 6]).unwrap();
    ///
    /// assert_eq!(image.size(), [2, 3]);
    /// assert_eq!(image.num_pixels(), 6);
    /// ```
    pub fn new(geometry: ImageGeometry<D>, data: Vec<T>) -> Result<Self, ImageError> {
        geometry.validate()?;

        if data.len() != geometry.num_pixels() {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                geometry.num_pixels(),
            ));
        }

        Ok(Self { data, geometry })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelmorph_image::Image;
    ///
    /// let image = Image::<u8, 3>::from_size_val([2, 3, 4], 7).unwrap();
    ///
    /// assert_eq!(image.num_pixels(), 24);
    /// assert_eq!(image.get([1, 2, 3]), Some(&7));
    /// ```
    pub fn from_size_val(size: [usize; D], val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::from_geometry_val(ImageGeometry::from_size(size), val)
    }

    /// Create a new image on the given grid with a constant pixel value.
    pub fn from_geometry_val(geometry: ImageGeometry<D>, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; geometry.num_pixels()];
        Self::new(geometry, data)
    }

    /// Create a new image by evaluating a function at every pixel index.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelmorph_image::Image;
    ///
    /// let image = Image::<u8, 2>::from_size_fn([3, 3], |[r, c]| if r == c { 1 } else { 0 }).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
    /// ```
    pub fn from_size_fn<F>(size: [usize; D], f: F) -> Result<Self, ImageError>
    where
        F: Fn([usize; D]) -> T,
    {
        let geometry = ImageGeometry::from_size(size);
        let data = (0..geometry.num_pixels())
            .map(|offset| f(geometry.index_from_offset(offset)))
            .collect();
        Self::new(geometry, data)
    }

    /// Replace the spacing of the image.
    pub fn with_spacing(mut self, spacing: [f64; D]) -> Result<Self, ImageError> {
        let geometry = ImageGeometry {
            spacing,
            ..self.geometry
        };
        geometry.validate()?;
        self.geometry = geometry;
        Ok(self)
    }

    /// Replace the origin of the image.
    pub fn with_origin(mut self, origin: [f64; D]) -> Result<Self, ImageError> {
        let geometry = ImageGeometry {
            origin,
            ..self.geometry
        };
        geometry.validate()?;
        self.geometry = geometry;
        Ok(self)
    }

    /// Get the geometry of the image.
    pub fn geometry(&self) -> &ImageGeometry<D> {
        &self.geometry
    }

    /// Get the size of the image in pixels along each axis.
    pub fn size(&self) -> [usize; D] {
        self.geometry.size
    }

    /// Get the spacing of the image.
    pub fn spacing(&self) -> [f64; D] {
        self.geometry.spacing
    }

    /// Get the origin of the image.
    pub fn origin(&self) -> [f64; D] {
        self.geometry.origin
    }

    /// Get the row-major strides of the image.
    pub fn strides(&self) -> [usize; D] {
        self.geometry.strides()
    }

    /// Get the number of pixels in the image.
    pub fn num_pixels(&self) -> usize {
        self.data.len()
    }

    /// Whether two images share the same size, spacing and origin.
    pub fn same_geometry<U>(&self, other: &Image<U, D>) -> bool {
        self.geometry == other.geometry
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Linear offset of a pixel index, or `None` if out of bounds.
    pub fn offset(&self, index: [usize; D]) -> Option<usize> {
        self.geometry.offset(index)
    }

    /// Pixel index of a linear offset.
    pub fn index_from_offset(&self, offset: usize) -> [usize; D] {
        self.geometry.index_from_offset(offset)
    }

    /// Get a reference to the pixel at the given index.
    pub fn get(&self, index: [usize; D]) -> Option<&T> {
        self.offset(index).map(|offset| &self.data[offset])
    }

    /// Get a mutable reference to the pixel at the given index.
    pub fn get_mut(&mut self, index: [usize; D]) -> Option<&mut T> {
        self.offset(index).map(move |offset| &mut self.data[offset])
    }

    /// Set the pixel at the given index.
    ///
    /// # Errors
    ///
    /// If the index lies outside the image, an error is returned.
    pub fn set(&mut self, index: [usize; D], val: T) -> Result<(), ImageError> {
        let size = self.size();
        match self.get_mut(index) {
            Some(pixel) => {
                *pixel = val;
                Ok(())
            }
            None => Err(ImageError::PixelIndexOutOfBounds(
                format!("{:?}", index),
                format!("{:?}", size),
            )),
        }
    }

    /// Count the pixels equal to a value.
    pub fn count_value(&self, val: &T) -> usize
    where
        T: PartialEq,
    {
        self.data.iter().filter(|&p| p == val).count()
    }

    /// Apply a function to every pixel, keeping the geometry.
    pub fn map<U, F>(&self, f: F) -> Image<U, D>
    where
        F: Fn(&T) -> U,
    {
        Image {
            data: self.data.iter().map(f).collect(),
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size() {
        let size = ImageGeometry::from_size([10, 20]);
        assert_eq!(size.size, [10, 20]);
        assert_eq!(size.num_pixels(), 200);
        assert_eq!(size.strides(), [20, 1]);
    }

    #[test]
    fn image_new_invalid_length() {
        let res = Image::<u8, 2>::new(ImageGeometry::from_size([2, 2]), vec![0; 3]);
        assert_eq!(res, Err(ImageError::InvalidDataLength(3, 4)));
    }

    #[test]
    fn image_offset_roundtrip() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 3, 4], 0)?;
        assert_eq!(image.offset([1, 2, 3]), Some(23));
        assert_eq!(image.strides(), [12, 4, 1]);
        let [z, y, x] = [1, 2, 3];
        let [sz, sy, sx] = image.strides();
        assert_eq!(image.offset([z, y, x]), Some(z * sz + y * sy + x * sx));
        assert_eq!(image.index_from_offset(23), [1, 2, 3]);
        assert_eq!(image.offset([0, 1, 0]), Some(4));
        assert_eq!(image.offset([2, 0, 0]), None);
        Ok(())
    }

    #[test]
    fn image_get_set() -> Result<(), ImageError> {
        let mut image = Image::<u8, 2>::from_size_val([3, 2], 0)?;
        image.set([2, 1], 9)?;
        assert_eq!(image.get([2, 1]), Some(&9));
        assert_eq!(image.as_slice()[5], 9);
        assert!(image.set([3, 0], 1).is_err());
        assert_eq!(image.count_value(&0), 5);
        Ok(())
    }

    #[test]
    fn image_spacing_validation() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::from_size_val([2, 2], 0)?;
        let res = image.clone().with_spacing([1.0, 0.0]);
        assert_eq!(res, Err(ImageError::InvalidSpacing(1, 0.0)));

        let res = image.clone().with_origin([f64::INFINITY, 0.0]);
        assert_eq!(res, Err(ImageError::InvalidOrigin(0, f64::INFINITY)));
        assert!(matches!(
            image.clone().with_origin([0.0, f64::NAN]),
            Err(ImageError::InvalidOrigin(1, _))
        ));

        let geometry = ImageGeometry {
            origin: [f64::NAN, 0.0],
            ..ImageGeometry::from_size([2, 2])
        };
        assert!(matches!(
            Image::<u8, 2>::new(geometry, vec![0; 4]),
            Err(ImageError::InvalidOrigin(0, _))
        ));

        let image = image.with_spacing([0.5, 2.0])?.with_origin([1.0, -1.0])?;
        assert_eq!(image.spacing(), [0.5, 2.0]);
        assert_eq!(image.origin(), [1.0, -1.0]);
        assert_eq!(
            image.geometry().index_to_physical_point([1, 1]),
            [1.5, 1.0]
        );
        Ok(())
    }

    #[test]
    fn image_same_geometry() -> Result<(), ImageError> {
        let a = Image::<u8, 2>::from_size_val([4, 4], 0)?;
        let b = Image::<u8, 2>::from_size_val([4, 4], 1)?;
        let c = b.clone().with_origin([0.0, 1.0])?;
        assert!(a.same_geometry(&b));
        assert!(!a.same_geometry(&c));
        Ok(())
    }

    #[test]
    fn binary_pixel_defaults() {
        assert_eq!(u8::default_foreground(), 255);
        assert_eq!(u8::default_background(), 0);
        assert_eq!(i16::default_background(), i16::MIN);
        assert_eq!(f32::default_background(), f32::MIN);
        assert_eq!(f32::default_foreground(), f32::MAX);
    }
}
