use crate::{
    geometry::Rect,
    next_power_of_two,
    types::{InputItem, Placement, ShelfLayout},
};

/// Packs items into rows of a fixed maximum width.
///
/// Rows are not packed independently: every new row starts below the tallest
/// item placed so far on the whole sheet, plus the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfPacker {
    row_width: u32,
    gutter: u32,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfPacker {
    pub fn new() -> Self {
        Self {
            row_width: 1024,
            gutter: 1,
        }
    }

    /// Sets the width budget that triggers a row wrap. Items wider than this
    /// are still placed, alone on their row.
    pub fn row_width(self, row_width: u32) -> Self {
        Self { row_width, ..self }
    }

    /// Sets the spacing left between neighboring items and between rows.
    pub fn gutter(self, gutter: u32) -> Self {
        Self { gutter, ..self }
    }

    pub fn pack<I>(&self, items: I) -> ShelfLayout
    where
        I: IntoIterator,
        I::Item: Into<InputItem>,
    {
        let gutter = self.gutter;

        let mut cursor = (0u32, 0u32);
        let mut sheet_width = 0u32;
        let mut sheet_height = 0u32;
        let mut placements = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            let (width, height) = item.into().size;

            if cursor.0.saturating_add(width).saturating_add(gutter) > self.row_width {
                sheet_width = sheet_width.max(cursor.0.saturating_sub(gutter));
                cursor = (0, sheet_height.saturating_add(gutter));

                log::trace!("Starting new row at y = {}", cursor.1);
            }

            let rect = Rect {
                pos: cursor,
                size: (width, height),
            };

            log::trace!(
                "Placed item {} ({}x{}) at {:?}",
                index,
                width,
                height,
                rect.pos
            );

            placements.push(Placement { index, rect });

            cursor.0 = cursor.0.saturating_add(width).saturating_add(gutter);
            sheet_height = sheet_height.max(cursor.1.saturating_add(height));
        }

        sheet_width = sheet_width.max(cursor.0.saturating_sub(gutter));

        let raw_size = (sheet_width, sheet_height);
        let size = (next_power_of_two(sheet_width), next_power_of_two(sheet_height));

        log::trace!(
            "Packed {} items into {:?} (rounded to {:?})",
            placements.len(),
            raw_size,
            size
        );

        ShelfLayout {
            raw_size,
            size,
            placements,
        }
    }
}
