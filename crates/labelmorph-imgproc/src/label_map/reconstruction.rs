use std::collections::{HashSet, VecDeque};

use labelmorph_image::Image;

use super::connectivity::{shift_offset, Connectivity};
use super::{Label, LabelMap, LabelMapError, LabelObject};
use crate::parallel::{execute_map, ExecutionStrategy};

/// Compute, for every object, whether it can be reconstructed from a marker.
///
/// The reconstruction of an object `C` from the seed set `S` (the marker
/// pixels equal to `marker_foreground`) is the fixed point of
/// `R(k+1) = C ∩ dilate(R(k))` starting at `R(0) = C ∩ S`, where `dilate` is
/// one step of `connectivity`. The attribute of an object is `true` when the
/// fixed point is not empty.
///
/// The same connectivity must be used here and when the map was labelled.
///
/// # Arguments
///
/// * `label_map` - The components to annotate.
/// * `marker` - The seed image, on the same grid as the label map.
/// * `marker_foreground` - The marker value that marks seed pixels.
/// * `connectivity` - The adjacency rule used to grow the seeds.
/// * `strategy` - How the objects are distributed over threads.
///
/// # Errors
///
/// Fails when the marker grid differs from the label map grid.
pub fn binary_reconstruction_label_map<A, T, const D: usize>(
    label_map: LabelMap<A, D>,
    marker: &Image<T, D>,
    marker_foreground: T,
    connectivity: Connectivity,
    strategy: ExecutionStrategy,
) -> Result<LabelMap<bool, D>, LabelMapError>
where
    A: Sync,
    T: PartialEq + Sync,
{
    if marker.geometry() != label_map.geometry() {
        return Err(LabelMapError::GeometryMismatch(
            label_map.geometry().to_string(),
            marker.geometry().to_string(),
        ));
    }

    let label_image = label_map.to_label_image()?;
    let offsets = connectivity.offsets::<D>();
    let objects = label_map.objects().collect::<Vec<_>>();

    let attributes = execute_map(strategy, &objects, |object| {
        let reconstructed =
            reconstruct_object(object, &label_image, marker, &marker_foreground, &offsets);
        log::trace!(
            "object {} reconstructed {} of {} pixels",
            object.label(),
            reconstructed,
            object.number_of_pixels()
        );
        reconstructed > 0
    })?;

    let survivors = attributes.iter().filter(|&&a| a).count();
    log::debug!(
        "{} of {} objects reconstructible from the marker",
        survivors,
        attributes.len()
    );

    let mut attributes = attributes.into_iter();
    Ok(label_map.map_attributes(|_| attributes.next().unwrap_or(false)))
}

/// Grow the seeds of one object until stability, returning the number of
/// reconstructed pixels.
fn reconstruct_object<A, T, const D: usize>(
    object: &LabelObject<A>,
    label_image: &Image<Label, D>,
    marker: &Image<T, D>,
    marker_foreground: &T,
    offsets: &[[isize; D]],
) -> usize
where
    T: PartialEq,
{
    let geometry = label_image.geometry();
    let labels = label_image.as_slice();
    let seeds = marker.as_slice();

    let mut reconstructed = HashSet::new();
    let mut frontier = object
        .offsets()
        .filter(|&p| seeds[p] == *marker_foreground)
        .collect::<VecDeque<_>>();
    reconstructed.extend(frontier.iter().copied());

    while let Some(p) = frontier.pop_front() {
        let index = geometry.index_from_offset(p);
        for displacement in offsets {
            let Some(q) = shift_offset(geometry, index, displacement) else {
                continue;
            };
            if labels[q] == object.label() && reconstructed.insert(q) {
                frontier.push_back(q);
            }
        }
    }

    reconstructed.len()
}
