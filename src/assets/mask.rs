//! Per-pixel opacity masks for exact collision tests.
//!
//! A sprite's silhouette is stored as a bitset, one `u64` word per 64 columns
//! per row. Overlap tests shift whole words instead of walking pixels, so a
//! bird-sized silhouette against a full pipe costs a few hundred word ANDs.

const WORD_BITS: u32 = 64;

/// Anything that can answer "is this pixel solid?".
pub trait Silhouette {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn is_opaque(&self, x: u32, y: u32) -> bool;
}

/// Bitset silhouette of a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Create a fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Create a fully opaque mask.
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Copy any silhouette into a bitset.
    pub fn from_silhouette<S: Silhouette + ?Sized>(source: &S) -> Self {
        let mut mask = Self::new(source.width(), source.height());
        for y in 0..source.height() {
            for x in 0..source.width() {
                if source.is_opaque(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.words_per_row + (x / WORD_BITS) as usize;
        let bit = 1u64 << (x % WORD_BITS);
        if opaque {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Mirror top-to-bottom.
    pub fn flip_vertical(&self) -> Self {
        let mut flipped = Self::new(self.width, self.height);
        for y in 0..self.height as usize {
            let src = (self.height as usize - 1 - y) * self.words_per_row;
            let dst = y * self.words_per_row;
            flipped.bits[dst..dst + self.words_per_row]
                .copy_from_slice(&self.bits[src..src + self.words_per_row]);
        }
        flipped
    }

    fn word(&self, row: u32, index: i64) -> u64 {
        if index < 0 || index >= self.words_per_row as i64 {
            return 0;
        }
        self.bits[row as usize * self.words_per_row + index as usize]
    }

    /// 64 bits of `row` starting at column `start`; bit `i` is column `start + i`.
    /// Columns outside the mask read as transparent.
    fn row_bits(&self, row: u32, start: i64) -> u64 {
        if start < 0 {
            let shift = -start;
            if shift >= WORD_BITS as i64 {
                return 0;
            }
            return self.word(row, 0) << shift;
        }
        let index = start / WORD_BITS as i64;
        let shift = (start % WORD_BITS as i64) as u32;
        let lo = self.word(row, index) >> shift;
        if shift == 0 {
            lo
        } else {
            lo | (self.word(row, index + 1) << (WORD_BITS - shift))
        }
    }

    /// First opaque point shared with `other` when `other`'s top-left corner
    /// sits at `offset` in this mask's coordinates. Scans rows top to bottom,
    /// columns left to right. `None` means the silhouettes do not touch.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = (offset.0 as i64, offset.1 as i64);

        let y_start = dy.max(0);
        let y_end = (dy + other.height as i64).min(self.height as i64);
        let x_start = dx.max(0);
        let x_end = (dx + other.width as i64).min(self.width as i64);
        if y_start >= y_end || x_start >= x_end {
            return None;
        }

        let first_word = x_start / WORD_BITS as i64;
        let last_word = (x_end - 1) / WORD_BITS as i64;

        for y in y_start..y_end {
            let other_row = (y - dy) as u32;
            for w in first_word..=last_word {
                let ours = self.word(y as u32, w);
                if ours == 0 {
                    continue;
                }
                let theirs = other.row_bits(other_row, w * WORD_BITS as i64 - dx);
                let hit = ours & theirs;
                if hit != 0 {
                    let x = w as u32 * WORD_BITS + hit.trailing_zeros();
                    return Some((x, y as u32));
                }
            }
        }
        None
    }

    /// True if the two silhouettes share any opaque pixel at `offset`.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}

impl Silhouette for Mask {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.words_per_row + (x / WORD_BITS) as usize;
        self.bits[idx] & (1u64 << (x % WORD_BITS)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference overlap: walk every pixel of the intersection.
    fn brute_overlap(a: &Mask, b: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        for y in 0..a.height() as i32 {
            for x in 0..a.width() as i32 {
                let (bx, by) = (x - offset.0, y - offset.1);
                if bx < 0 || by < 0 {
                    continue;
                }
                if a.is_opaque(x as u32, y as u32) && b.is_opaque(bx as u32, by as u32) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }

    fn ring(width: u32, height: u32) -> Mask {
        let mut m = Mask::new(width, height);
        for x in 0..width {
            m.set(x, 0, true);
            m.set(x, height - 1, true);
        }
        for y in 0..height {
            m.set(0, y, true);
            m.set(width - 1, y, true);
        }
        m
    }

    #[test]
    fn test_new_mask_is_transparent() {
        let m = Mask::new(70, 3);
        assert_eq!(m.count(), 0);
        assert!(!m.is_opaque(69, 2));
    }

    #[test]
    fn test_set_and_query_across_word_boundary() {
        let mut m = Mask::new(130, 2);
        m.set(63, 0, true);
        m.set(64, 1, true);
        m.set(129, 1, true);
        assert!(m.is_opaque(63, 0));
        assert!(m.is_opaque(64, 1));
        assert!(m.is_opaque(129, 1));
        assert!(!m.is_opaque(64, 0));
        assert_eq!(m.count(), 3);

        m.set(64, 1, false);
        assert!(!m.is_opaque(64, 1));
    }

    #[test]
    fn test_out_of_range_reads_transparent() {
        let m = Mask::filled(4, 4);
        assert!(!m.is_opaque(4, 0));
        assert!(!m.is_opaque(0, 4));
    }

    #[test]
    fn test_filled_overlap_at_origin() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(5, 5);
        assert_eq!(a.overlap(&b, (0, 0)), Some((0, 0)));
        assert_eq!(a.overlap(&b, (3, 4)), Some((3, 4)));
    }

    #[test]
    fn test_no_overlap_when_disjoint() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(5, 5);
        assert_eq!(a.overlap(&b, (10, 0)), None);
        assert_eq!(a.overlap(&b, (0, 10)), None);
        assert_eq!(a.overlap(&b, (-5, 0)), None);
        assert_eq!(a.overlap(&b, (0, -5)), None);
    }

    #[test]
    fn test_negative_offset_partial_overlap() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(5, 5);
        assert_eq!(a.overlap(&b, (-4, -4)), Some((0, 0)));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_pixels_do_not() {
        // A small solid block inside the hollow of a ring touches nothing.
        let outer = ring(100, 40);
        let inner = Mask::filled(20, 10);
        assert!(!outer.overlaps(&inner, (40, 15)));
        // Slide it onto the left wall.
        assert_eq!(outer.overlap(&inner, (-19, 15)), Some((0, 15)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = ring(90, 30);
        let b = Mask::filled(7, 7);
        for &(dx, dy) in &[(0, 0), (5, 5), (40, 12), (85, 25), (-3, 10), (88, -6)] {
            assert_eq!(
                a.overlaps(&b, (dx, dy)),
                b.overlaps(&a, (-dx, -dy)),
                "offset ({dx}, {dy})"
            );
        }
    }

    #[test]
    fn test_word_shift_matches_pixel_walk() {
        let mut a = Mask::new(150, 6);
        let mut b = Mask::new(70, 4);
        for x in (0..150).step_by(7) {
            a.set(x, (x % 6) as u32, true);
        }
        for x in (0..70).step_by(5) {
            b.set(x, (x % 4) as u32, true);
        }
        for dx in -75..155 {
            for dy in -4..7 {
                assert_eq!(
                    a.overlap(&b, (dx, dy)),
                    brute_overlap(&a, &b, (dx, dy)),
                    "offset ({dx}, {dy})"
                );
            }
        }
    }

    #[test]
    fn test_flip_vertical() {
        let mut m = Mask::new(3, 4);
        m.set(1, 0, true);
        let flipped = m.flip_vertical();
        assert!(flipped.is_opaque(1, 3));
        assert!(!flipped.is_opaque(1, 0));
        assert_eq!(flipped.flip_vertical(), m);
    }

    #[test]
    fn test_from_silhouette_copies_bits() {
        let m = ring(66, 5);
        let copy = Mask::from_silhouette(&m);
        assert_eq!(copy, m);
    }
}
