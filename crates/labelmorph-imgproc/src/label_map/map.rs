use std::collections::BTreeMap;

use labelmorph_image::{Image, ImageGeometry};

use super::object::{Label, LabelObject};
use super::{row_length, LabelMapError};

/// Label reserved for pixels that belong to no object.
pub const BACKGROUND_LABEL: Label = 0;

/// A sparse image made of labeled objects.
///
/// The map remembers the grid it was built from so it can be rasterized
/// back and checked against other images of the same grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap<A, const D: usize> {
    geometry: ImageGeometry<D>,
    objects: BTreeMap<Label, LabelObject<A>>,
}

impl<A, const D: usize> LabelMap<A, D> {
    /// Create an empty label map on the given grid.
    pub fn new(geometry: ImageGeometry<D>) -> Self {
        Self {
            geometry,
            objects: BTreeMap::new(),
        }
    }

    /// The grid the map lives on.
    pub fn geometry(&self) -> &ImageGeometry<D> {
        &self.geometry
    }

    /// The label used for pixels outside every object.
    pub fn background_value(&self) -> Label {
        BACKGROUND_LABEL
    }

    /// Number of objects in the map.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the map holds no object.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Labels of the objects in increasing order.
    pub fn labels(&self) -> Vec<Label> {
        self.objects.keys().copied().collect()
    }

    /// Get an object by label.
    pub fn get(&self, label: Label) -> Option<&LabelObject<A>> {
        self.objects.get(&label)
    }

    /// Iterate over the objects in increasing label order.
    pub fn objects(&self) -> impl Iterator<Item = &LabelObject<A>> {
        self.objects.values()
    }

    /// Insert an object, replacing any previous object with the same label.
    ///
    /// # Errors
    ///
    /// The background label cannot be used by an object. Every run of the
    /// object must lie inside the grid and within a single row of the last
    /// axis.
    pub fn insert(&mut self, object: LabelObject<A>) -> Result<Option<LabelObject<A>>, LabelMapError> {
        if object.label() == BACKGROUND_LABEL {
            return Err(LabelMapError::BackgroundLabel(object.label()));
        }
        let num_pixels = self.geometry.num_pixels();
        let row_len = row_length(&self.geometry);
        for line in object.lines() {
            let end = line
                .start
                .checked_add(line.length)
                .filter(|&end| end <= num_pixels)
                .ok_or(LabelMapError::ObjectOutOfBounds(object.label(), num_pixels))?;
            if line.start / row_len != (end - 1) / row_len {
                return Err(LabelMapError::LineCrossesRow(object.label(), line.start));
            }
        }
        Ok(self.objects.insert(object.label(), object))
    }

    /// Push an object under the next free label and return that label.
    pub fn push(&mut self, mut object: LabelObject<A>) -> Result<Label, LabelMapError> {
        let label = self
            .objects
            .keys()
            .next_back()
            .map_or(BACKGROUND_LABEL + 1, |l| l + 1);
        object.set_label(label);
        self.insert(object)?;
        Ok(label)
    }

    /// Remove an object by label.
    pub fn remove(&mut self, label: Label) -> Result<LabelObject<A>, LabelMapError> {
        self.objects
            .remove(&label)
            .ok_or(LabelMapError::LabelNotFound(label))
    }

    /// Keep only the objects for which the predicate holds.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&LabelObject<A>) -> bool,
    {
        self.objects.retain(|_, object| f(object));
    }

    /// Total number of pixels covered by all objects.
    pub fn number_of_pixels(&self) -> usize {
        self.objects.values().map(|o| o.number_of_pixels()).sum()
    }

    /// Build a new map by converting every object's attribute.
    pub fn map_attributes<B, F>(self, mut f: F) -> LabelMap<B, D>
    where
        F: FnMut(&LabelObject<A>) -> B,
    {
        let objects = self
            .objects
            .into_iter()
            .map(|(label, object)| {
                let attribute = f(&object);
                (label, object.with_attribute(attribute))
            })
            .collect();
        LabelMap {
            geometry: self.geometry,
            objects,
        }
    }

    /// Rasterize the map into a label image, background pixels set to `0`.
    pub fn to_label_image(&self) -> Result<Image<Label, D>, LabelMapError> {
        let mut image = Image::from_geometry_val(self.geometry, BACKGROUND_LABEL)?;
        let data = image.as_slice_mut();
        let num_pixels = data.len();
        for object in self.objects.values() {
            for line in object.lines() {
                data.get_mut(line.start..line.end())
                    .ok_or(LabelMapError::ObjectOutOfBounds(object.label(), num_pixels))?
                    .fill(object.label());
            }
        }
        Ok(image)
    }
}
