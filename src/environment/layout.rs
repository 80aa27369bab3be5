//! Placement of cube faces in the packed atlas.
//!
//! Every face of every level becomes a tile of `(size + 2)` texels square:
//! the face plus a one-texel border copied from its neighbours. A level's
//! six tiles form a 3 x 2 block (`+X -X +Y` over `-Y +Z -Z`) and the blocks
//! stack downwards from level 0. The atlas extent depends only on the level
//! count:
//!
//! ```text
//! width  = 3 * (2^lods + 2)
//! height = 4 * lods + 2 * (2^(lods + 1) - 1)
//! ```

use crate::gpu::texture::CUBE_FACES;

/// Atlas width in texels for `lods` levels.
#[must_use]
pub fn atlas_width(lods: u32) -> u32 {
    3 * ((1 << lods) + 2)
}

/// Atlas height in texels for `lods` levels.
#[must_use]
pub fn atlas_height(lods: u32) -> u32 {
    4 * lods + 2 * ((1 << (lods + 1)) - 1)
}

/// Face size of `level` in a chain whose level 0 is `source_size`.
#[must_use]
pub fn level_size(source_size: u32, level: u32) -> u32 {
    source_size.checked_shr(level).unwrap_or(0).max(1)
}

/// One face of one level and where it lands in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Mip level, 0 is the source resolution.
    pub level: u32,
    /// Cube face in layer order.
    pub face: u32,
    /// Face edge length in texels, without the border.
    pub face_size: u32,
    /// Left edge of the padded tile in atlas texels.
    pub x: u32,
    /// Top edge of the padded tile in atlas texels.
    pub y: u32,
}

impl Tile {
    /// Edge length of the padded tile.
    #[must_use]
    pub fn padded_size(&self) -> u32 {
        self.face_size + 2
    }

    /// `[x, y, width, height]` of the padded tile in atlas texels.
    #[must_use]
    pub fn rect(&self) -> [f32; 4] {
        let p = self.padded_size() as f32;
        [self.x as f32, self.y as f32, p, p]
    }

    /// `[u0, v0, u1, v1]` of the padded tile in normalized atlas space.
    #[must_use]
    pub fn uv_rect(&self, atlas_width: u32, atlas_height: u32) -> [f32; 4] {
        let (w, h) = (atlas_width as f32, atlas_height as f32);
        let p = self.padded_size() as f32;
        [
            self.x as f32 / w,
            self.y as f32 / h,
            (self.x as f32 + p) / w,
            (self.y as f32 + p) / h,
        ]
    }
}

/// Tile placement for one source size and level count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Number of levels.
    pub lods: u32,
    /// Face size of level 0.
    pub source_size: u32,
    /// Atlas width in texels.
    pub width: u32,
    /// Atlas height in texels.
    pub height: u32,
    /// Tiles that fit, in level-major, face-minor order.
    pub tiles: Vec<Tile>,
}

impl AtlasLayout {
    /// Lay out `lods` levels of a `source_size` cube.
    ///
    /// The atlas extent is fixed by `lods`; tiles whose UVs would fall
    /// outside [0, 1] are reported and left out.
    #[must_use]
    pub fn new(source_size: u32, lods: u32) -> Self {
        let width = atlas_width(lods);
        let height = atlas_height(lods);
        if source_size != 1 << lods {
            log::warn!(
                "environment source is {source_size}px, atlas is sized for \
                 {}px faces",
                1u32 << lods
            );
        }

        let mut tiles = Vec::with_capacity((lods * CUBE_FACES) as usize);
        let mut level_y = 0;
        for level in 0..lods {
            let face_size = level_size(source_size, level);
            let padded = face_size + 2;
            for face in 0..CUBE_FACES {
                let tile = Tile {
                    level,
                    face,
                    face_size,
                    x: (face % 3) * padded,
                    y: level_y + (face / 3) * padded,
                };
                let uv = tile.uv_rect(width, height);
                if uv.iter().all(|c| (0.0..=1.0).contains(c)) {
                    tiles.push(tile);
                } else {
                    log::warn!(
                        "atlas tile level {level} face {face} has UVs outside \
                         [0, 1] ({uv:?}); skipped"
                    );
                }
            }
            level_y += 2 * padded;
        }

        Self {
            lods,
            source_size,
            width,
            height,
            tiles,
        }
    }

    /// Tile of `level`/`face`, if it fits.
    #[must_use]
    pub fn tile(&self, level: u32, face: u32) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|t| t.level == level && t.face == face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_LODS;

    #[test]
    fn atlas_extent_for_eight_levels() {
        assert_eq!(atlas_width(8), 774);
        assert_eq!(atlas_height(8), 1054);
    }

    #[test]
    fn level_sizes_halve_and_floor_at_one() {
        assert_eq!(level_size(256, 0), 256);
        assert_eq!(level_size(256, 7), 2);
        assert_eq!(level_size(64, 7), 1);
        assert_eq!(level_size(300, 3), 37);
        assert_eq!(level_size(4, 40), 1);
    }

    #[test]
    fn matching_source_fits_every_tile() {
        let layout = AtlasLayout::new(256, DEFAULT_LODS);
        assert_eq!(layout.tiles.len(), 48);

        let first = layout.tile(0, 0).unwrap();
        assert_eq!((first.x, first.y, first.padded_size()), (0, 0, 258));
        let neg_z = layout.tile(0, 5).unwrap();
        assert_eq!((neg_z.x, neg_z.y), (516, 258));
        let level1 = layout.tile(1, 0).unwrap();
        assert_eq!((level1.y, level1.face_size), (516, 128));

        let last = layout.tile(7, 5).unwrap();
        assert_eq!(last.y + last.padded_size(), 1052);
        assert_eq!(last.x + last.padded_size(), 12);
    }

    #[test]
    fn tiles_do_not_overlap() {
        let layout = AtlasLayout::new(256, DEFAULT_LODS);
        for (i, a) in layout.tiles.iter().enumerate() {
            for b in &layout.tiles[i + 1..] {
                let separate = a.x + a.padded_size() <= b.x
                    || b.x + b.padded_size() <= a.x
                    || a.y + a.padded_size() <= b.y
                    || b.y + b.padded_size() <= a.y;
                assert!(separate, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn oversized_source_skips_tiles() {
        let layout = AtlasLayout::new(512, DEFAULT_LODS);
        assert!(layout.tile(0, 0).is_some());
        assert!(layout.tile(0, 1).is_none());
        assert!(layout.tile(1, 0).is_none());
        assert_eq!(layout.tiles.len(), 2);
        for tile in &layout.tiles {
            let uv = tile.uv_rect(layout.width, layout.height);
            assert!(uv[2] <= 1.0 && uv[3] <= 1.0);
        }
    }

    #[test]
    fn smaller_source_still_packs() {
        let layout = AtlasLayout::new(64, DEFAULT_LODS);
        assert_eq!(layout.tiles.len(), 48);
        assert_eq!(layout.tile(7, 0).unwrap().face_size, 1);
    }
}
