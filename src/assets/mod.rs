//! Sprites and their collision silhouettes.
//!
//! Everything the simulation and renderer draw from is owned by one
//! [`AssetBundle`], built once at startup and handed to the world. Art is
//! plain text: one character per pixel, scaled up by a fixed factor per
//! sprite kind. The same files ship embedded in the binary and can be
//! overridden from a directory with `--assets`.

pub mod error;
pub mod mask;
pub mod sprite;

pub use error::AssetError;
pub use mask::{Mask, Silhouette};
pub use sprite::{Paint, Sprite};

use crate::constants::{HEIGHT, WIDTH};
use std::path::Path;

/// File name and scale factors for one piece of art.
#[derive(Debug, Clone, Copy)]
pub struct ArtSpec {
    pub file: &'static str,
    pub scale_x: u32,
    pub scale_y: u32,
}

pub const BIRD_ART: [ArtSpec; 3] = [
    ArtSpec {
        file: "bird1.txt",
        scale_x: 4,
        scale_y: 4,
    },
    ArtSpec {
        file: "bird2.txt",
        scale_x: 4,
        scale_y: 4,
    },
    ArtSpec {
        file: "bird3.txt",
        scale_x: 4,
        scale_y: 4,
    },
];

pub const PIPE_ART: ArtSpec = ArtSpec {
    file: "pipe.txt",
    scale_x: 4,
    scale_y: 10,
};

pub const BASE_ART: ArtSpec = ArtSpec {
    file: "base.txt",
    scale_x: 16,
    scale_y: 8,
};

pub const BACKGROUND_ART: ArtSpec = ArtSpec {
    file: "bg.txt",
    scale_x: 10,
    scale_y: 20,
};

const EMBEDDED_BIRD: [&str; 3] = [
    include_str!("../../assets/bird1.txt"),
    include_str!("../../assets/bird2.txt"),
    include_str!("../../assets/bird3.txt"),
];
const EMBEDDED_PIPE: &str = include_str!("../../assets/pipe.txt");
const EMBEDDED_BASE: &str = include_str!("../../assets/base.txt");
const EMBEDDED_BACKGROUND: &str = include_str!("../../assets/bg.txt");

/// All images the game needs, plus precomputed silhouettes.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    bird_frames: [Sprite; 3],
    bird_masks: [Mask; 3],
    pipe_bottom: Sprite,
    pipe_top: Sprite,
    pipe_bottom_mask: Mask,
    pipe_top_mask: Mask,
    base: Sprite,
    background: Sprite,
}

impl AssetBundle {
    /// Art compiled into the binary.
    pub fn builtin() -> Result<Self, AssetError> {
        let parse = |text: &str, spec: ArtSpec| {
            Sprite::from_art(spec.file, text, spec.scale_x, spec.scale_y)
        };
        Self::from_sprites(
            [
                parse(EMBEDDED_BIRD[0], BIRD_ART[0])?,
                parse(EMBEDDED_BIRD[1], BIRD_ART[1])?,
                parse(EMBEDDED_BIRD[2], BIRD_ART[2])?,
            ],
            parse(EMBEDDED_PIPE, PIPE_ART)?,
            parse(EMBEDDED_BASE, BASE_ART)?,
            parse(EMBEDDED_BACKGROUND, BACKGROUND_ART)?,
        )
    }

    /// Art read from text files in `dir`, using the same names and scales as
    /// the embedded set.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let load = |spec: ArtSpec| -> Result<Sprite, AssetError> {
            let path = dir.join(spec.file);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| AssetError::Io { path, source })?;
            Sprite::from_art(spec.file, &text, spec.scale_x, spec.scale_y)
        };
        let bundle = Self::from_sprites(
            [load(BIRD_ART[0])?, load(BIRD_ART[1])?, load(BIRD_ART[2])?],
            load(PIPE_ART)?,
            load(BASE_ART)?,
            load(BACKGROUND_ART)?,
        )?;
        log::info!("loaded sprites from {}", dir.display());
        Ok(bundle)
    }

    /// Build a bundle from already-decoded sprites. The pipe sprite is the
    /// bottom obstacle; the top obstacle is its vertical mirror.
    pub fn from_sprites(
        bird_frames: [Sprite; 3],
        pipe: Sprite,
        base: Sprite,
        background: Sprite,
    ) -> Result<Self, AssetError> {
        let first = (bird_frames[0].width(), bird_frames[0].height());
        for frame in &bird_frames[1..] {
            let other = (frame.width(), frame.height());
            if other != first {
                return Err(AssetError::MismatchedFrames { first, other });
            }
        }
        if first.1 >= HEIGHT {
            return Err(AssetError::BirdTooTall {
                height: first.1,
                max: HEIGHT,
            });
        }
        if background.width() < WIDTH || background.height() < HEIGHT {
            return Err(AssetError::BackgroundTooSmall {
                width: background.width(),
                height: background.height(),
                min_width: WIDTH,
                min_height: HEIGHT,
            });
        }

        let bird_masks = [
            bird_frames[0].mask(),
            bird_frames[1].mask(),
            bird_frames[2].mask(),
        ];
        let pipe_top = pipe.flip_vertical();
        let pipe_bottom_mask = pipe.mask();
        let pipe_top_mask = pipe_bottom_mask.flip_vertical();

        Ok(Self {
            bird_frames,
            bird_masks,
            pipe_bottom: pipe,
            pipe_top,
            pipe_bottom_mask,
            pipe_top_mask,
            base,
            background,
        })
    }

    pub fn bird_frame(&self, index: usize) -> &Sprite {
        &self.bird_frames[index % self.bird_frames.len()]
    }

    pub fn bird_mask(&self, index: usize) -> &Mask {
        &self.bird_masks[index % self.bird_masks.len()]
    }

    /// Bird frames all share one size.
    pub fn bird_size(&self) -> (u32, u32) {
        (self.bird_frames[0].width(), self.bird_frames[0].height())
    }

    pub fn pipe_top(&self) -> &Sprite {
        &self.pipe_top
    }

    pub fn pipe_bottom(&self) -> &Sprite {
        &self.pipe_bottom
    }

    pub fn pipe_top_mask(&self) -> &Mask {
        &self.pipe_top_mask
    }

    pub fn pipe_bottom_mask(&self) -> &Mask {
        &self.pipe_bottom_mask
    }

    pub fn pipe_width(&self) -> u32 {
        self.pipe_bottom.width()
    }

    pub fn pipe_height(&self) -> u32 {
        self.pipe_bottom.height()
    }

    pub fn base(&self) -> &Sprite {
        &self.base
    }

    pub fn background(&self) -> &Sprite {
        &self.background
    }
}
