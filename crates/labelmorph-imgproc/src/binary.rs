use labelmorph_image::{Image, ImageError};
use thiserror::Error;

use crate::parallel::{ExecuteExt, ExecutionStrategy, ParallelError};

/// Errors raised by pixel-wise binary operations.
#[derive(Error, Debug, PartialEq)]
pub enum BinaryError {
    /// Image error.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Parallel execution error.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// Invert a binary image.
///
/// Pixels equal to `foreground` become `background`, every other pixel
/// becomes `foreground`.
///
/// # Arguments
///
/// * `src` - The input binary image.
/// * `dst` - The output image, same size as the input.
/// * `foreground` - The foreground value of both images.
/// * `background` - The background value of both images.
/// * `strategy` - How pixels are distributed over threads.
///
/// # Examples
///
/// ```
/// use labelmorph_image::Image;
/// use labelmorph_imgproc::binary::binary_not;
/// use labelmorph_imgproc::parallel::ExecutionStrategy;
///
/// let src = Image::<u8, 2>::new([2, 2].into(), vec![255, 0, 0, 255]).unwrap();
/// let mut dst = Image::<u8, 2>::from_size_val(src.size(), 0).unwrap();
///
/// binary_not(&src, &mut dst, 255, 0, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 255, 255, 0]);
/// ```
pub fn binary_not<T, const D: usize>(
    src: &Image<T, D>,
    dst: &mut Image<T, D>,
    foreground: T,
    background: T,
    strategy: ExecutionStrategy,
) -> Result<(), BinaryError>
where
    T: Copy + PartialEq + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            format!("{:?}", src.size()),
            format!("{:?}", dst.size()),
        )
        .into());
    }

    src.as_slice()
        .execute_with(strategy, dst.as_slice_mut(), |(s, d)| {
            *d = if *s == foreground {
                background
            } else {
                foreground
            };
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_not_3d() -> Result<(), BinaryError> {
        let src = Image::<u16, 3>::from_size_fn([2, 2, 3], |[z, _, x]| {
            if z == x {
                7
            } else {
                3
            }
        })?;
        let mut dst = Image::<u16, 3>::from_size_val(src.size(), 0)?;

        binary_not(&src, &mut dst, 7, 1, ExecutionStrategy::AutoRows(3))?;

        assert_eq!(dst.count_value(&1), src.count_value(&7));
        assert_eq!(dst.count_value(&7), src.num_pixels() - src.count_value(&7));
        Ok(())
    }

    #[test]
    fn binary_not_non_binary_values_become_foreground() -> Result<(), BinaryError> {
        let src = Image::<i8, 1>::new([4].into(), vec![5, 0, -3, 5])?;
        let mut dst = Image::<i8, 1>::from_size_val([4], 0)?;
        binary_not(&src, &mut dst, 5, -1, ExecutionStrategy::Serial)?;
        assert_eq!(dst.as_slice(), &[-1, 5, 5, -1]);
        Ok(())
    }

    #[test]
    fn binary_not_size_mismatch() -> Result<(), BinaryError> {
        let src = Image::<u8, 2>::from_size_val([2, 3], 0)?;
        let mut dst = Image::<u8, 2>::from_size_val([3, 2], 0)?;
        let res = binary_not(&src, &mut dst, 255, 0, ExecutionStrategy::Serial);
        assert!(matches!(
            res,
            Err(BinaryError::Image(ImageError::InvalidImageSize(_, _)))
        ));
        Ok(())
    }
}
