//! Paletted sprites parsed from ASCII art.

use super::error::AssetError;
use super::mask::{Mask, Silhouette};

/// Named colors used by the sprite art. The terminal layer decides what each
/// one looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Sky,
    SkyHaze,
    Cloud,
    CloudShade,
    City,
    Window,
    Bush,
    Grass,
    GrassLight,
    Dirt,
    DirtDark,
    PipeLight,
    PipeMid,
    PipeDark,
    Outline,
    BirdBody,
    BirdShade,
    Wing,
    Eye,
    Beak,
}

impl Paint {
    /// Character used for this paint in art files.
    pub fn key(self) -> char {
        match self {
            Self::Sky => 'S',
            Self::SkyHaze => 's',
            Self::Cloud => 'C',
            Self::CloudShade => 'c',
            Self::City => 'T',
            Self::Window => 'W',
            Self::Bush => 'H',
            Self::Grass => 'G',
            Self::GrassLight => 'g',
            Self::Dirt => 'D',
            Self::DirtDark => 'd',
            Self::PipeLight => 'P',
            Self::PipeMid => 'p',
            Self::PipeDark => 'q',
            Self::Outline => 'K',
            Self::BirdBody => 'Y',
            Self::BirdShade => 'y',
            Self::Wing => 'w',
            Self::Eye => 'E',
            Self::Beak => 'O',
        }
    }

    pub const ALL: [Paint; 20] = [
        Self::Sky,
        Self::SkyHaze,
        Self::Cloud,
        Self::CloudShade,
        Self::City,
        Self::Window,
        Self::Bush,
        Self::Grass,
        Self::GrassLight,
        Self::Dirt,
        Self::DirtDark,
        Self::PipeLight,
        Self::PipeMid,
        Self::PipeDark,
        Self::Outline,
        Self::BirdBody,
        Self::BirdShade,
        Self::Wing,
        Self::Eye,
        Self::Beak,
    ];

    pub fn from_key(key: char) -> Option<Paint> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }
}

/// Transparent pixel in art text.
pub const TRANSPARENT_KEY: char = '.';

/// A rectangular image; `None` pixels are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Option<Paint>>,
}

impl Sprite {
    /// Parse ASCII art, scaling each character to a `scale_x` by `scale_y` block.
    ///
    /// Blank lines before and after the art are ignored; every remaining row
    /// must have the same number of characters.
    pub fn from_art(
        name: &str,
        art: &str,
        scale_x: u32,
        scale_y: u32,
    ) -> Result<Self, AssetError> {
        let rows: Vec<&str> = art
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|l| !l.trim().is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => Vec::new(),
        };

        if rows.is_empty() {
            return Err(AssetError::EmptyArt {
                name: name.to_string(),
            });
        }

        let art_width = rows[0].chars().count();
        let mut cells = Vec::with_capacity(art_width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != art_width {
                return Err(AssetError::RaggedArt {
                    name: name.to_string(),
                    row,
                    expected: art_width,
                    found,
                });
            }
            for (col, key) in line.chars().enumerate() {
                if key == TRANSPARENT_KEY {
                    cells.push(None);
                    continue;
                }
                match Paint::from_key(key) {
                    Some(paint) => cells.push(Some(paint)),
                    None => {
                        return Err(AssetError::UnknownPaint {
                            name: name.to_string(),
                            key,
                            row,
                            col,
                        })
                    }
                }
            }
        }

        let scale_x = scale_x.max(1);
        let scale_y = scale_y.max(1);
        let width = art_width as u32 * scale_x;
        let height = rows.len() as u32 * scale_y;
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let art_row = (y / scale_y) as usize;
            for x in 0..width {
                let art_col = (x / scale_x) as usize;
                pixels.push(cells[art_row * art_width + art_col]);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A rectangle of a single paint.
    pub fn solid(width: u32, height: u32, paint: Paint) -> Self {
        Self {
            width,
            height,
            pixels: vec![Some(paint); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Paint at a pixel; out-of-range coordinates are transparent.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Paint> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Mirror top-to-bottom.
    pub fn flip_vertical(&self) -> Self {
        let w = self.width as usize;
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks(w.max(1)).rev() {
            pixels.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Bitset silhouette of the opaque pixels.
    pub fn mask(&self) -> Mask {
        Mask::from_silhouette(self)
    }
}

impl Silhouette for Sprite {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.pixel(x as i64, y as i64).is_some()
    }
}
