use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use fs_err as fs;
use shelfpack::ShelfPacker;
use walkdir::WalkDir;

use crate::{config::Config, loader::load_sprites, options::Options, sheet::pack_sheet};

/// Packs every sheet folder of a project.
///
/// Sheets are processed one at a time in name order, and the first failure
/// stops the run. Sheets written before the failure are left in place.
pub fn bundle(options: Options) -> anyhow::Result<()> {
    let config = Config::read_from_folder_or_default(&options.root)?;

    let row_width = options.row_width.unwrap_or(config.row_width);
    let gutter = options.gutter.unwrap_or(config.gutter);

    if gutter > row_width {
        bail!(
            "Gutter of {}px is wider than the {}px row width",
            gutter,
            row_width
        );
    }

    let packer = ShelfPacker::new().row_width(row_width).gutter(gutter);

    let sprites_path = options.root.join(&config.sprites_folder);
    let output_path = options.root.join(&config.output_folder);

    println!("sprites: {}", sprites_path.display());

    let entries = WalkDir::new(&sprites_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for entry in entries {
        let entry = entry.with_context(|| format!("Could not read {}", sprites_path.display()))?;

        if !entry.file_type().is_dir() {
            log::debug!("Skipping {}, it is not a folder", entry.path().display());
            continue;
        }

        let image_path = output_path.join(sheet_file_name(entry.file_name(), "png"));
        let manifest_path = output_path.join(sheet_file_name(entry.file_name(), "wad"));

        println!(
            "{} -> {}",
            entry.file_name().to_string_lossy(),
            image_path.display()
        );

        bundle_sheet(entry.path(), &image_path, &manifest_path, &packer).with_context(|| {
            format!("Could not pack sprite sheet {}", entry.path().display())
        })?;
    }

    Ok(())
}

/// Packs one folder of sprites, writing the sheet image and its manifest.
fn bundle_sheet(
    sheet_path: &Path,
    image_path: &Path,
    manifest_path: &Path,
    packer: &ShelfPacker,
) -> anyhow::Result<()> {
    let sprites = load_sprites(sheet_path)?;
    let sheet = pack_sheet(&sprites, packer);

    if sheet.manifest.is_empty() {
        log::debug!("{} has no sprites", sheet_path.display());
    }

    let mut encoded_image = Vec::new();
    sheet.image.encode_png(&mut encoded_image)?;

    let encoded_manifest = sheet.manifest.to_string();

    if let Some(output_folder) = image_path.parent() {
        fs::create_dir_all(output_folder)?;
    }

    write_all_or_nothing(&[
        (image_path.to_owned(), encoded_image.as_slice()),
        (manifest_path.to_owned(), encoded_manifest.as_bytes()),
    ])
}

fn sheet_file_name(name: &OsStr, extension: &str) -> OsString {
    let mut file_name = name.to_owned();
    file_name.push(".");
    file_name.push(extension);
    file_name
}

/// Writes every file to a temporary sibling first and only moves them into
/// place once all of them were written. On a write failure, the temporary
/// files are removed and no destination is touched. If a rename fails, the
/// files already moved stay in place and the remaining temporary files are
/// removed.
fn write_all_or_nothing(files: &[(PathBuf, &[u8])]) -> anyhow::Result<()> {
    let temp_paths: Vec<PathBuf> = files
        .iter()
        .map(|(path, _)| {
            let mut temp = path.clone().into_os_string();
            temp.push(".tmp");
            PathBuf::from(temp)
        })
        .collect();

    for ((_, contents), temp_path) in files.iter().zip(&temp_paths) {
        if let Err(err) = fs::write(temp_path, contents) {
            for temp_path in &temp_paths {
                let _ = fs::remove_file(temp_path);
            }

            return Err(err.into());
        }
    }

    for (index, ((path, _), temp_path)) in files.iter().zip(&temp_paths).enumerate() {
        if let Err(err) = fs::rename(temp_path, path) {
            for temp_path in &temp_paths[index..] {
                let _ = fs::remove_file(temp_path);
            }

            return Err(err.into());
        }

        log::trace!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use tempfile::tempdir;

    use crate::{image::Image, loader::test::write_png};

    fn options(root: &Path) -> Options {
        Options {
            root: root.to_owned(),
            row_width: None,
            gutter: None,
        }
    }

    fn read_sheet(root: &Path, name: &str) -> (Image, String) {
        let folder = root.join("public").join("sprites");
        let png = fs::read(folder.join(format!("{}.png", name))).unwrap();
        let wad = fs::read_to_string(folder.join(format!("{}.wad", name))).unwrap();

        (Image::decode_png(png.as_slice()).unwrap(), wad)
    }

    #[test]
    fn packs_each_sheet_folder() {
        let root = tempdir().unwrap();
        let player = root.path().join("sprites").join("player");
        fs::create_dir_all(&player).unwrap();
        write_png(&player.join("walk.png"), (10, 10), [0, 255, 0, 255]);
        write_png(&player.join("idle.png"), (10, 10), [255, 0, 0, 128]);

        bundle(options(root.path())).unwrap();

        let (image, wad) = read_sheet(root.path(), "player");
        assert_eq!(image.size(), (32, 16));
        assert_eq!(wad, "idle[0,0,10,10]\nwalk[11,0,10,10]\n");
        assert_eq!(image.get_pixel((0, 0)).a, 128);
        assert_eq!(image.get_pixel((11, 0)).g, 255);
        assert_eq!(image.get_pixel((10, 0)).a, 0);
    }

    #[test]
    fn empty_sheet_folder_makes_blank_sheet() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("sprites").join("empty")).unwrap();

        bundle(options(root.path())).unwrap();

        let (image, wad) = read_sheet(root.path(), "empty");
        assert_eq!(image.size(), (1, 1));
        assert_eq!(wad, "");
    }

    #[test]
    fn loose_files_in_sprites_folder_are_ignored() {
        let root = tempdir().unwrap();
        let sprites = root.path().join("sprites");
        fs::create_dir_all(sprites.join("ui")).unwrap();
        write_png(&sprites.join("stray.png"), (2, 2), [0; 4]);
        write_png(&sprites.join("ui").join("button.png"), (2, 2), [0; 4]);

        bundle(options(root.path())).unwrap();

        let output = root.path().join("public").join("sprites");
        assert!(output.join("ui.png").exists());
        assert!(!output.join("stray.png").exists());
    }

    #[test]
    fn config_and_flags_are_applied() {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join("spritepack.toml"),
            "row-width = 16\noutput-folder = \"out\"\n",
        )
        .unwrap();
        let sheet = root.path().join("sprites").join("tiles");
        fs::create_dir_all(&sheet).unwrap();
        write_png(&sheet.join("a.png"), (8, 8), [1, 1, 1, 255]);
        write_png(&sheet.join("b.png"), (8, 8), [2, 2, 2, 255]);

        let mut options = options(root.path());
        options.gutter = Some(0);
        bundle(options).unwrap();

        // 8 + 8 + 0 fits in a 16px row once the gutter is removed.
        let wad = fs::read_to_string(root.path().join("out").join("tiles.wad")).unwrap();
        assert_eq!(wad, "a[0,0,8,8]\nb[8,0,8,8]\n");
    }

    #[test]
    fn bundling_twice_is_byte_identical() {
        let root = tempdir().unwrap();
        let sheet = root.path().join("sprites").join("fx");
        fs::create_dir_all(&sheet).unwrap();
        for (i, size) in [(30, 20), (700, 40), (500, 90), (12, 12)].iter().enumerate() {
            write_png(&sheet.join(format!("fx{}.png", i)), *size, [i as u8, 9, 9, 200]);
        }

        let output = root.path().join("public").join("sprites");

        bundle(options(root.path())).unwrap();
        let first = (
            fs::read(output.join("fx.png")).unwrap(),
            fs::read(output.join("fx.wad")).unwrap(),
        );

        bundle(options(root.path())).unwrap();
        let second = (
            fs::read(output.join("fx.png")).unwrap(),
            fs::read(output.join("fx.wad")).unwrap(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_sprite_leaves_no_output() {
        let root = tempdir().unwrap();
        let sheet = root.path().join("sprites").join("broken");
        fs::create_dir_all(&sheet).unwrap();
        write_png(&sheet.join("ok.png"), (4, 4), [0, 0, 0, 255]);
        fs::write(sheet.join("zzz.png"), "garbage").unwrap();

        let err = bundle(options(root.path())).unwrap_err();
        assert!(format!("{:?}", err).contains("zzz.png"));

        let output = root.path().join("public").join("sprites");
        assert!(!output.join("broken.png").exists());
        assert!(!output.join("broken.wad").exists());
    }

    #[test]
    fn gutter_wider_than_row_is_rejected() {
        let root = tempdir().unwrap();
        let sheet = root.path().join("sprites").join("tiles");
        fs::create_dir_all(&sheet).unwrap();
        write_png(&sheet.join("a.png"), (8, 8), [1, 1, 1, 255]);

        let mut options = options(root.path());
        options.gutter = Some(u32::MAX);

        let err = bundle(options).unwrap_err();
        assert!(err.to_string().contains("Gutter"));
        assert!(!root.path().join("public").exists());
    }

    #[test]
    fn missing_sprites_folder_is_an_error() {
        let root = tempdir().unwrap();

        assert!(bundle(options(root.path())).is_err());
    }

    #[test]
    fn failed_write_cleans_up_temp_files() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("missing").join("bad.wad");

        let result = write_all_or_nothing(&[(good.clone(), &b"png"[..]), (bad, &b"wad"[..])]);

        assert!(result.is_err());
        assert!(!good.exists());
        assert!(!dir.path().join("good.png.tmp").exists());
    }

    #[test]
    fn failed_rename_cleans_up_temp_files() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("sheet.png");
        let manifest = dir.path().join("sheet.wad");

        // A non-empty folder can't be replaced by a file.
        fs::create_dir(&manifest).unwrap();
        fs::write(manifest.join("keep"), "").unwrap();

        let result = write_all_or_nothing(&[
            (image.clone(), &b"png"[..]),
            (manifest.clone(), &b"wad"[..]),
        ]);

        assert!(result.is_err());
        assert_eq!(fs::read(&image).unwrap(), b"png");
        assert!(manifest.join("keep").exists());
        assert!(!dir.path().join("sheet.png.tmp").exists());
        assert!(!dir.path().join("sheet.wad.tmp").exists());
    }
}
