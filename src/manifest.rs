//! The `.wad` text manifest that sits next to every sprite sheet.
//!
//! Each line maps a sprite identifier to its rectangle on the sheet:
//!
//! ```text
//! idle[0,0,10,10]
//! walk[11,0,10,10]
//! ```
//!
//! Identifiers are written verbatim. An identifier containing `[` or `]`
//! produces a line that can't be read back unambiguously.

use std::fmt;

/// One sprite's entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub identifier: String,
    pub position: (u32, u32),
    pub size: (u32, u32),
}

impl fmt::Display for ManifestRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "{}[{},{},{},{}]",
            self.identifier, self.position.0, self.position.1, self.size.0, self.size.1
        )
    }
}

/// Sprite placements for a single sheet, in the order the sprites were
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub records: Vec<ManifestRecord>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for record in &self.records {
            write!(formatter, "{}", record)?;
        }

        Ok(())
    }
}
