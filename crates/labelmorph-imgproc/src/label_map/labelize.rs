use labelmorph_image::Image;

use super::connectivity::{shift_offset, Connectivity};
use super::{row_length, Label, LabelMap, LabelMapError, LabelObject, BACKGROUND_LABEL};

/// Union-find over provisional labels, the root of a set is its smallest label.
struct DisjointSet {
    parent: Vec<Label>,
}

impl DisjointSet {
    fn new() -> Self {
        // slot 0 stands for the background and is never linked
        Self {
            parent: vec![BACKGROUND_LABEL],
        }
    }

    fn make_set(&mut self) -> Result<Label, LabelMapError> {
        let label = Label::try_from(self.parent.len()).map_err(|_| LabelMapError::LabelOverflow)?;
        self.parent.push(label);
        Ok(label)
    }

    fn find(&mut self, mut x: Label) -> Label {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: Label, b: Label) -> Label {
        let ra = self.find(a);
        let rb = self.find(b);
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[hi as usize] = lo;
        lo
    }
}

/// Label the connected components of the pixels equal to `foreground`.
///
/// Components are found with a single raster scan and a union-find over
/// provisional labels, then numbered `1, 2, ...` in the raster order of their
/// first pixel. Each object is stored as runs along the last axis.
///
/// # Arguments
///
/// * `image` - The binary input image.
/// * `foreground` - The pixel value that marks object pixels.
/// * `connectivity` - The adjacency rule between pixels.
///
/// # Returns
///
/// A label map on the grid of the input image.
///
/// # Examples
///
/// ```
/// use labelmorph_image::Image;
/// use labelmorph_imgproc::label_map::{binary_image_to_label_map, Connectivity};
///
/// let image = Image::<u8, 2>::new(
///     [3, 3].into(),
///     vec![
///         1, 0, 1,
///         0, 0, 1,
///         1, 0, 0,
///     ],
/// ).unwrap();
///
/// let map = binary_image_to_label_map(&image, 1, Connectivity::Face).unwrap();
/// assert_eq!(map.len(), 3);
/// ```
pub fn binary_image_to_label_map<T, const D: usize>(
    image: &Image<T, D>,
    foreground: T,
    connectivity: Connectivity,
) -> Result<LabelMap<(), D>, LabelMapError>
where
    T: PartialEq,
{
    let geometry = *image.geometry();
    let src = image.as_slice();
    let causal = connectivity.causal_offsets::<D>();

    // first pass: provisional labels
    let mut provisional = vec![BACKGROUND_LABEL; src.len()];
    let mut sets = DisjointSet::new();
    for (offset, pixel) in src.iter().enumerate() {
        if *pixel != foreground {
            continue;
        }
        let index = geometry.index_from_offset(offset);
        let mut current = BACKGROUND_LABEL;
        for displacement in causal.iter() {
            let Some(neighbor) = shift_offset(&geometry, index, displacement) else {
                continue;
            };
            let other = provisional[neighbor];
            if other == BACKGROUND_LABEL {
                continue;
            }
            current = if current == BACKGROUND_LABEL {
                sets.find(other)
            } else {
                sets.union(current, other)
            };
        }
        if current == BACKGROUND_LABEL {
            current = sets.make_set()?;
        }
        provisional[offset] = current;
    }

    // second pass: resolve roots into consecutive labels
    let mut final_label = vec![BACKGROUND_LABEL; sets.parent.len()];
    let mut next: Label = 1;
    for label in provisional.iter_mut() {
        if *label == BACKGROUND_LABEL {
            continue;
        }
        let root = sets.find(*label) as usize;
        if final_label[root] == BACKGROUND_LABEL {
            final_label[root] = next;
            next += 1;
        }
        *label = final_label[root];
    }

    // build the runs row by row
    let mut objects: Vec<LabelObject> = (1..next).map(|l| LabelObject::new(l, ())).collect();
    let row_len = row_length(&geometry);
    for (row, chunk) in provisional.chunks(row_len.max(1)).enumerate() {
        let row_start = row * row_len;
        let mut col = 0;
        while col < chunk.len() {
            let label = chunk[col];
            let run_start = col;
            while col < chunk.len() && chunk[col] == label {
                col += 1;
            }
            if label != BACKGROUND_LABEL {
                objects[(label - 1) as usize].add_line(row_start + run_start, col - run_start);
            }
        }
    }

    let mut map = LabelMap::new(geometry);
    for object in objects {
        map.insert(object)?;
    }

    log::debug!(
        "labelled {} components ({:?} connectivity) over {} pixels",
        map.len(),
        connectivity,
        src.len()
    );

    Ok(map)
}
