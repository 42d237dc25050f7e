//! Shelfpack is a small library for packing rectangles onto a sprite sheet
//! using a shelf (row) heuristic. Items are laid left to right until a fixed
//! row width would be exceeded, then a new row is started below the tallest
//! item placed so far. The resulting sheet size is rounded up to a power of two
//! on each axis.
//!
//! Items are never rotated or reordered, and placement depends only on the
//! order and sizes of the inputs, so the same input always produces the same
//! layout.
//!
//! ## Example
//! ```
//! use shelfpack::{InputItem, ShelfPacker};
//!
//! let items = vec![InputItem::new((10, 10)), InputItem::new((10, 10))];
//!
//! let layout = ShelfPacker::new().row_width(1024).pack(items);
//!
//! assert_eq!(layout.placements()[1].position(), (11, 0));
//! assert_eq!(layout.raw_size(), (21, 10));
//! assert_eq!(layout.size(), (32, 16));
//! ```

mod geometry;
mod packer;
mod types;

pub use geometry::*;
pub use packer::*;
pub use types::*;

/// Rounds `value` up to the nearest power of two. Zero rounds up to one, so an
/// empty sheet is still a valid 1x1 image. Values above 2^31 clamp to 2^31.
pub fn next_power_of_two(value: u32) -> u32 {
    value
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or(1 << 31)
}
