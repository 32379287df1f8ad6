use crate::error::{Error, Result};
use crate::pose::TextureSlot;
use glam::{Vec2, Vec3};
use std::path::Path;

const FALLBACK_SIZE: u32 = 64;

/// RGB texture sampled with nearest filtering and repeat wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec3>,
}

impl Texture {
    /// Builds a texture from a generator called with texel coordinates.
    pub fn from_fn(width: u32, height: u32, mut texel: impl FnMut(u32, u32) -> Vec3) -> Self {
        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(texel(x, y));
            }
        }
        Texture {
            width,
            height,
            texels,
        }
    }

    /// Decodes an image file. The first image row becomes `v = 1`.
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyTexture(path.to_path_buf()));
        }
        let flipped = image::imageops::flip_vertical(&image);
        Ok(Texture::from_fn(width, height, |x, y| {
            let [r, g, b] = flipped.get_pixel(x, y).0;
            Vec3::new(r as f32, g as f32, b as f32) / 255.0
        }))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-neighbour sample with repeat wrapping
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texels[(y * self.width + x) as usize]
    }
}

/// Texture file name for a slot
pub fn file_name(slot: TextureSlot) -> &'static str {
    match slot {
        TextureSlot::Head => "brick.bmp",
        TextureSlot::Body => "water.bmp",
        TextureSlot::Arm => "marble.bmp",
        TextureSlot::Leg => "tile.bmp",
    }
}

/// Generated stand-in for a slot's image
pub fn fallback(slot: TextureSlot) -> Texture {
    let size = FALLBACK_SIZE;
    match slot {
        TextureSlot::Head => Texture::from_fn(size, size, |x, y| {
            let row = y / 8;
            let shift = if row % 2 == 0 { 0 } else { 8 };
            let mortar = y % 8 == 0 || (x + shift) % 16 == 0;
            if mortar {
                Vec3::new(0.78, 0.76, 0.70)
            } else {
                Vec3::new(0.62, 0.20, 0.14)
            }
        }),
        TextureSlot::Body => Texture::from_fn(size, size, |x, y| {
            let t = (x as f32 * 0.3).sin() + (y as f32 * 0.2 + x as f32 * 0.1).cos();
            let ripple = 0.5 + 0.25 * t;
            Vec3::new(0.05, 0.35 + 0.2 * ripple, 0.6 + 0.3 * ripple)
        }),
        TextureSlot::Arm => Texture::from_fn(size, size, |x, y| {
            let vein = ((x as f32 + y as f32 * 0.5) * 0.25 + (y as f32 * 0.15).sin() * 3.0).sin();
            let shade = 0.82 + 0.15 * vein.abs();
            Vec3::new(shade, shade, shade * 0.97)
        }),
        TextureSlot::Leg => Texture::from_fn(size, size, |x, y| {
            let grout = x % 16 == 0 || y % 16 == 0;
            let checker = (x / 16 + y / 16) % 2 == 0;
            match (grout, checker) {
                (true, _) => Vec3::splat(0.25),
                (false, true) => Vec3::new(0.85, 0.85, 0.8),
                (false, false) => Vec3::new(0.35, 0.45, 0.7),
            }
        }),
    }
}

/// One texture per slot
#[derive(Debug, Clone)]
pub struct TextureSet {
    head: Texture,
    body: Texture,
    arm: Texture,
    leg: Texture,
}

impl TextureSet {
    /// Generated textures only
    pub fn fallback() -> Self {
        TextureSet {
            head: fallback(TextureSlot::Head),
            body: fallback(TextureSlot::Body),
            arm: fallback(TextureSlot::Arm),
            leg: fallback(TextureSlot::Leg),
        }
    }

    /// Loads every slot from `dir`, falling back per slot when a file is missing.
    ///
    /// Files that exist but fail to decode are reported as errors.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let load = |slot: TextureSlot| -> Result<Texture> {
            let path = dir.join(file_name(slot));
            if path.is_file() {
                let texture = Texture::load(&path)?;
                log::info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    texture.width(),
                    texture.height()
                );
                Ok(texture)
            } else {
                log::warn!("{} not found, using generated texture", path.display());
                Ok(fallback(slot))
            }
        };
        Ok(TextureSet {
            head: load(TextureSlot::Head)?,
            body: load(TextureSlot::Body)?,
            arm: load(TextureSlot::Arm)?,
            leg: load(TextureSlot::Leg)?,
        })
    }

    pub fn get(&self, slot: TextureSlot) -> &Texture {
        match slot {
            TextureSlot::Head => &self.head,
            TextureSlot::Body => &self.body,
            TextureSlot::Arm => &self.arm,
            TextureSlot::Leg => &self.leg,
        }
    }
}

impl Default for TextureSet {
    fn default() -> Self {
        Self::fallback()
    }
}
