use shelfpack::{InputItem, ShelfPacker};

use crate::{
    image::Image,
    loader::SpriteSource,
    manifest::{Manifest, ManifestRecord},
};

/// A packed sprite sheet: the composited image and the manifest describing
/// where each sprite landed.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub image: Image,
    pub manifest: Manifest,
}

/// Lays out `sprites` with `packer`, then copies each one onto a transparent
/// canvas at its assigned position.
pub fn pack_sheet(sprites: &[SpriteSource], packer: &ShelfPacker) -> SpriteSheet {
    let layout = packer.pack(sprites.iter().map(|sprite| InputItem::new(sprite.size())));

    log::debug!(
        "Packed {} sprites into {}x{} (tight bound {}x{})",
        sprites.len(),
        layout.size().0,
        layout.size().1,
        layout.raw_size().0,
        layout.raw_size().1
    );

    let mut image = Image::new_empty_rgba8(layout.size());
    let mut records = Vec::with_capacity(sprites.len());

    for placement in layout.placements() {
        let sprite = &sprites[placement.index()];

        image.blit(&sprite.image, placement.position());

        records.push(ManifestRecord {
            identifier: sprite.identifier.clone(),
            position: placement.position(),
            size: placement.size(),
        });
    }

    SpriteSheet {
        image,
        manifest: Manifest { records },
    }
}
