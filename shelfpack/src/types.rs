use crate::geometry::Rect;

/// An input to the shelf packer: just a 2D size.
///
/// The packer refers back to inputs by their position in the input sequence,
/// so consumers keep their own objects in a parallel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputItem {
    pub(crate) size: (u32, u32),
}

impl InputItem {
    #[inline]
    pub fn new(size: (u32, u32)) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl From<(u32, u32)> for InputItem {
    fn from(size: (u32, u32)) -> Self {
        Self::new(size)
    }
}

/// Where an `InputItem` ended up on the sheet.
///
/// Placements correspond 1:1 with inputs and are reported in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub(crate) index: usize,
    pub(crate) rect: Rect,
}

impl Placement {
    /// The position of the matching item in the input sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }
}

/// The result of running the shelf packer over a sequence of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfLayout {
    pub(crate) raw_size: (u32, u32),
    pub(crate) size: (u32, u32),
    pub(crate) placements: Vec<Placement>,
}

impl ShelfLayout {
    /// The tight bound computed by the packing pass, before rounding.
    #[inline]
    pub fn raw_size(&self) -> (u32, u32) {
        self.raw_size
    }

    /// The sheet size with both axes rounded up to a power of two.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}
