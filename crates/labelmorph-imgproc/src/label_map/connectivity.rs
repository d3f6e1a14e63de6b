use labelmorph_image::ImageGeometry;

/// Adjacency rule used to group pixels into connected components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Pixels are neighbours when they share a face (4-connectivity in 2D,
    /// 6-connectivity in 3D).
    #[default]
    Face,
    /// Pixels are neighbours when they share a face, an edge or a vertex
    /// (8-connectivity in 2D, 26-connectivity in 3D).
    Full,
}

impl Connectivity {
    /// Map the classic `fully_connected` flag to a connectivity rule.
    pub fn from_fully_connected(fully_connected: bool) -> Self {
        if fully_connected {
            Connectivity::Full
        } else {
            Connectivity::Face
        }
    }

    /// Whether this is the face+edge+vertex rule.
    pub fn is_fully_connected(&self) -> bool {
        matches!(self, Connectivity::Full)
    }

    /// All neighbour displacements of a pixel in `D` dimensions.
    ///
    /// Face connectivity yields `2 * D` offsets, full connectivity `3^D - 1`.
    /// Offsets are returned in lexicographic order.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelmorph_imgproc::label_map::Connectivity;
    ///
    /// assert_eq!(Connectivity::Face.offsets::<2>().len(), 4);
    /// assert_eq!(Connectivity::Full.offsets::<2>().len(), 8);
    /// assert_eq!(Connectivity::Full.offsets::<3>().len(), 26);
    /// ```
    pub fn offsets<const D: usize>(&self) -> Vec<[isize; D]> {
        let total = 3usize.pow(D as u32);
        let mut offsets = Vec::new();
        for code in 0..total {
            let mut offset = [0isize; D];
            let mut rem = code;
            for axis in (0..D).rev() {
                offset[axis] = (rem % 3) as isize - 1;
                rem /= 3;
            }
            let nonzero = offset.iter().filter(|&&o| o != 0).count();
            let keep = match self {
                Connectivity::Face => nonzero == 1,
                Connectivity::Full => nonzero > 0,
            };
            if keep {
                offsets.push(offset);
            }
        }
        offsets
    }

    /// Neighbour offsets that precede the pixel in raster order.
    ///
    /// These are the only neighbours already visited by a forward scan.
    pub fn causal_offsets<const D: usize>(&self) -> Vec<[isize; D]> {
        self.offsets::<D>()
            .into_iter()
            .filter(|o| o.iter().find(|&&v| v != 0).is_some_and(|&v| v < 0))
            .collect()
    }

    /// Linear offsets of the in-bounds neighbours of a pixel.
    pub fn neighbors<const D: usize>(
        &self,
        geometry: &ImageGeometry<D>,
        index: [usize; D],
    ) -> Vec<usize> {
        let offsets = self.offsets::<D>();
        let mut out = Vec::with_capacity(offsets.len());
        out.extend(
            offsets
                .iter()
                .filter_map(|o| shift_offset(geometry, index, o)),
        );
        out
    }
}

/// Linear offset of `index + displacement`, or `None` when it leaves the grid.
pub(crate) fn shift_offset<const D: usize>(
    geometry: &ImageGeometry<D>,
    index: [usize; D],
    displacement: &[isize; D],
) -> Option<usize> {
    let mut shifted = [0usize; D];
    for axis in 0..D {
        let v = index[axis] as isize + displacement[axis];
        if v < 0 || v as usize >= geometry.size[axis] {
            return None;
        }
        shifted[axis] = v as usize;
    }
    geometry.offset(shifted)
}
