//! Simple containers to track images and perform operations on them.

use std::io::{Read, Write};

use thiserror::Error;

const STRIDE: usize = 4;

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[cfg(test)]
impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A straight-alpha RGBA8 image with its origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Png {
        #[from]
        source: png::DecodingError,
    },

    #[error("unsupported PNG pixel format {color_type:?} at {bit_depth:?}")]
    UnsupportedFormat {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
}

fn buffer_len(size: (u32, u32)) -> usize {
    size.0 as usize * size.1 as usize * STRIDE
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();

        assert!(data.len() == buffer_len(size));

        Self { size, data }
    }

    /// Creates a fully transparent image.
    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        Self::new_rgba8(size, vec![0; buffer_len(size)])
    }

    /// Decodes a PNG of any color type or bit depth, normalizing it to 8-bit
    /// RGBA without touching color values.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, DecodeError> {
        let mut decoder = png::Decoder::new(input);

        // Expand palettes, low bit depths and tRNS chunks, and drop 16-bit
        // channels down to 8 so that only four layouts remain below.
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let (info, mut reader) = decoder.read_info()?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(DecodeError::UnsupportedFormat {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            });
        }

        let mut raw = vec![0; info.buffer_size()];
        reader.next_frame(&mut raw)?;

        let size = (info.width, info.height);

        let data = match info.color_type {
            png::ColorType::RGBA => raw,
            png::ColorType::RGB => {
                let mut data = Vec::with_capacity(buffer_len(size));
                for px in raw.chunks_exact(3) {
                    data.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                data
            }
            png::ColorType::GrayscaleAlpha => {
                let mut data = Vec::with_capacity(buffer_len(size));
                for px in raw.chunks_exact(2) {
                    data.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
                data
            }
            png::ColorType::Grayscale => {
                let mut data = Vec::with_capacity(buffer_len(size));
                for &gray in &raw {
                    data.extend_from_slice(&[gray, gray, gray, 255]);
                }
                data
            }
            color_type => {
                return Err(DecodeError::UnsupportedFormat {
                    color_type,
                    bit_depth: info.bit_depth,
                })
            }
        };

        Ok(Self::new_rgba8(size, data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(png::ColorType::RGBA);
        encoder.set_depth(png::BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies `other` onto this image with its top-left corner at `pos`.
    /// Destination pixels are replaced, not blended.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(pos.0 + other.size.0 <= self.size.0);
        assert!(pos.1 + other.size.1 <= self.size.1);

        if other.size.0 == 0 {
            return;
        }

        let other_width_bytes = other.size.0 as usize * STRIDE;
        let other_rows = other.data.chunks_exact(other_width_bytes);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 as usize + other_y;

            let start_px = pos.0 as usize + self.size.0 as usize * self_y;

            let start_in_bytes = STRIDE * start_px;
            let end_in_bytes = start_in_bytes + other_row.len();

            let self_row = &mut self.data[start_in_bytes..end_in_bytes];
            self_row.copy_from_slice(other_row);
        }
    }

    #[cfg(test)]
    fn offset(&self, pos: (u32, u32)) -> usize {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }

    #[cfg(test)]
    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        let start = self.offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    #[cfg(test)]
    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        let start = self.offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }
}
