/// Label value stored in a label map. `0` is reserved for the background.
pub type Label = u32;

/// A run of consecutive pixels along the last image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelLine {
    /// Linear offset of the first pixel of the run.
    pub start: usize,
    /// Number of pixels in the run.
    pub length: usize,
}

impl LabelLine {
    /// Linear offset one past the last pixel of the run.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether the run covers the given linear offset.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

/// One connected component of a label map, stored as sorted runs.
///
/// The attribute `A` carries whatever per-object value a filter computed,
/// `()` for a plain component.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelObject<A = ()> {
    label: Label,
    lines: Vec<LabelLine>,
    attribute: A,
}

impl<A> LabelObject<A> {
    /// Create an empty object.
    pub fn new(label: Label, attribute: A) -> Self {
        Self {
            label,
            lines: Vec::new(),
            attribute,
        }
    }

    /// The label of the object.
    pub fn label(&self) -> Label {
        self.label
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    /// The runs of the object, sorted by start offset.
    pub fn lines(&self) -> &[LabelLine] {
        &self.lines
    }

    /// Add a run of pixels. Empty runs are ignored.
    ///
    /// Runs are kept sorted by start offset and are never merged. A label
    /// map only accepts objects whose runs each stay within one image row.
    pub fn add_line(&mut self, start: usize, length: usize) {
        if length == 0 {
            return;
        }
        let line = LabelLine { start, length };
        match self.lines.last() {
            Some(last) if last.start > start => {
                let pos = self.lines.partition_point(|l| l.start < start);
                self.lines.insert(pos, line);
            }
            _ => self.lines.push(line),
        }
    }

    /// Number of pixels covered by the object.
    pub fn number_of_pixels(&self) -> usize {
        self.lines.iter().map(|l| l.length).sum()
    }

    /// Whether the object has no pixel.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the object covers the given linear offset.
    pub fn contains(&self, offset: usize) -> bool {
        let pos = self.lines.partition_point(|l| l.start <= offset);
        pos > 0 && self.lines[pos - 1].contains(offset)
    }

    /// Iterate over the linear offsets of the object in increasing order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().flat_map(|l| l.start..l.end())
    }

    /// The attribute of the object.
    pub fn attribute(&self) -> &A {
        &self.attribute
    }

    /// Replace the attribute of the object.
    pub fn set_attribute(&mut self, attribute: A) {
        self.attribute = attribute;
    }

    /// Convert the object to one carrying a different attribute type.
    pub fn with_attribute<B>(self, attribute: B) -> LabelObject<B> {
        LabelObject {
            label: self.label,
            lines: self.lines,
            attribute,
        }
    }
}
