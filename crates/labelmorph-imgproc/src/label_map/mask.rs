use labelmorph_image::Image;

use super::{row_length, LabelLine, LabelMap, LabelMapError};
use crate::parallel::{execute_rows, ExecutionStrategy};

/// Rasterize a label map into a binary image.
///
/// Pixels covered by any object are set to `foreground`, all other pixels to
/// `background`. The output is a new image on the grid of the label map.
///
/// # Arguments
///
/// * `label_map` - The objects to draw.
/// * `foreground` - The value written for object pixels.
/// * `background` - The value written everywhere else.
/// * `strategy` - How image rows are distributed over threads.
pub fn label_map_mask<A, T, const D: usize>(
    label_map: &LabelMap<A, D>,
    foreground: T,
    background: T,
    strategy: ExecutionStrategy,
) -> Result<Image<T, D>, LabelMapError>
where
    T: Copy + Send + Sync,
{
    let geometry = *label_map.geometry();
    let mut dst = Image::from_geometry_val(geometry, background)?;

    let mut lines: Vec<LabelLine> = label_map
        .objects()
        .flat_map(|o| o.lines().iter().copied())
        .collect();
    lines.sort_unstable();

    let row_len = row_length(&geometry);
    execute_rows(strategy, dst.as_slice_mut(), row_len, |row, chunk| {
        let row_start = row * row_len;
        let row_end = row_start + chunk.len();
        let first = lines.partition_point(|l| l.start < row_start);
        for line in lines[first..].iter().take_while(|l| l.start < row_end) {
            let begin = line.start - row_start;
            let end = (line.end() - row_start).min(chunk.len());
            chunk[begin..end].fill(foreground);
        }
    })?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label_map::{binary_image_to_label_map, Connectivity};

    #[test]
    fn mask_roundtrip() -> Result<(), LabelMapError> {
        #[rustfmt::skip]
        let data = vec![
            0, 9, 9, 0,
            9, 0, 0, 0,
            9, 9, 0, 9,
        ];
        let image = Image::<u8, 2>::new([3, 4].into(), data.clone())?
            .with_origin([2.0, 3.0])?;
        let map = binary_image_to_label_map(&image, 9, Connectivity::Face)?;

        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::Fixed(3),
        ] {
            let mask = label_map_mask(&map, 9u8, 0u8, strategy)?;
            assert_eq!(mask.as_slice(), data.as_slice());
            assert!(mask.same_geometry(&image));
        }
        Ok(())
    }

    #[test]
    fn mask_matches_label_image() -> Result<(), LabelMapError> {
        let mut map = LabelMap::new([3, 3].into());
        let mut object = crate::label_map::LabelObject::new(1, ());
        object.add_line(1, 2);
        object.add_line(3, 3);
        map.insert(object)?;

        let mut crossing = crate::label_map::LabelObject::new(2, ());
        crossing.add_line(5, 2);
        assert!(map.insert(crossing).is_err());

        let labels = map.to_label_image()?;
        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::AutoRows(3)] {
            let mask = label_map_mask(&map, 1u8, 0u8, strategy)?;
            assert_eq!(mask.count_value(&1), 5);
            for (m, l) in mask.as_slice().iter().zip(labels.as_slice()) {
                assert_eq!(*m == 1, *l != 0);
            }
        }
        Ok(())
    }

    #[test]
    fn mask_empty_map() -> Result<(), LabelMapError> {
        let map = LabelMap::<(), 3>::new([2, 2, 2].into());
        let mask = label_map_mask(&map, 1i16, -1i16, ExecutionStrategy::default())?;
        assert_eq!(mask.count_value(&-1), 8);
        Ok(())
    }
}
