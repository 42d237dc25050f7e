use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs folders of PNG sprites into power-of-two sprite sheets")]
pub struct Options {
    /// The project root. Every folder inside `<root>/sprites` becomes one
    /// sheet, written to `<root>/public/sprites/<name>.png` along with a
    /// `<name>.wad` manifest.
    pub root: PathBuf,

    /// Maximum width of a row of sprites before wrapping to a new row.
    /// Overrides `row-width` from spritepack.toml.
    #[structopt(long)]
    pub row_width: Option<u32>,

    /// Spacing between sprites, in pixels. Overrides `gutter` from
    /// spritepack.toml.
    #[structopt(long)]
    pub gutter: Option<u32>,
}
