use super::LabelMap;

/// Remove the objects whose attribute fails a threshold.
///
/// An object is kept when its attribute is `>= lambda`, or `<= lambda` when
/// `reverse` is set. With a boolean attribute and `lambda = true` this keeps
/// exactly the objects whose attribute is `true`.
///
/// # Examples
///
/// ```
/// use labelmorph_image::ImageGeometry;
/// use labelmorph_imgproc::label_map::{attribute_opening, LabelMap, LabelObject};
///
/// let mut map = LabelMap::new(ImageGeometry::from_size([4]));
/// for (label, keep) in [(1, true), (2, false)] {
///     let mut object = LabelObject::new(label, keep);
///     object.add_line(label as usize, 1);
///     map.insert(object).unwrap();
/// }
///
/// let opened = attribute_opening(map, &true, false);
/// assert_eq!(opened.labels(), vec![1]);
/// ```
pub fn attribute_opening<A, const D: usize>(
    mut label_map: LabelMap<A, D>,
    lambda: &A,
    reverse: bool,
) -> LabelMap<A, D>
where
    A: PartialOrd,
{
    let before = label_map.len();
    label_map.retain(|object| {
        if reverse {
            object.attribute() <= lambda
        } else {
            object.attribute() >= lambda
        }
    });
    log::debug!(
        "attribute opening removed {} of {} objects",
        before - label_map.len(),
        before
    );
    label_map
}
