use std::{
    ffi::OsStr,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use fs_err as fs;
use thiserror::Error;
use walkdir::WalkDir;

use crate::image::{DecodeError, Image};

/// A decoded image ready to be packed onto a sheet.
#[derive(Debug, Clone)]
pub struct SpriteSource {
    /// The file name of the sprite with its `.png` extension removed.
    pub identifier: String,
    pub image: Image,
}

impl SpriteSource {
    pub fn size(&self) -> (u32, u32) {
        self.image.size()
    }
}

/// Loads every `.png` file directly inside `folder`, sorted by file name.
///
/// The extension match is case-sensitive and subfolders are not searched.
/// Any failure aborts the whole load.
pub fn load_sprites(folder: &Path) -> Result<Vec<SpriteSource>, LoadError> {
    log::debug!("Loading sprites from {}", folder.display());

    let entries = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut sprites = Vec::new();

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        // A file named just `.png` has no extension as far as `Path` is
        // concerned, but still counts as a sprite with an empty identifier.
        let file_name = entry.file_name();
        let is_png =
            path.extension() == Some(OsStr::new("png")) || file_name == OsStr::new(".png");

        if !entry.file_type().is_file() || !is_png {
            log::trace!("Skipping {}", path.display());
            continue;
        }

        let identifier = match file_name.to_str().and_then(|name| name.strip_suffix(".png")) {
            Some(stem) => stem.to_owned(),
            None => {
                return Err(LoadError::NonUnicodeName {
                    path: path.to_owned(),
                })
            }
        };

        let file = BufReader::new(fs::File::open(path)?);
        let image = Image::decode_png(file).map_err(|source| LoadError::Decode {
            path: path.to_owned(),
            source,
        })?;

        log::trace!(
            "Loaded sprite {} ({}x{})",
            identifier,
            image.size().0,
            image.size().1
        );

        sprites.push(SpriteSource { identifier, image });
    }

    Ok(sprites)
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },

    #[error(transparent)]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("Could not decode {}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },

    #[error("File name of {} is not valid Unicode", .path.display())]
    NonUnicodeName { path: PathBuf },
}
