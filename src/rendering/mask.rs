use tiny_skia::Pixmap;

/// Bitmask over a pixmap's opaque pixels, used for overlap tests between
/// the car sprite and road surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Mask of every pixel with non-zero alpha.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let bits = pixmap.pixels().iter().map(|p| p.alpha() > 0).collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.bits[(y * self.width as i64 + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Mask covering exactly the pixels this one does not.
    pub fn invert(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Whether any set pixel of `other`, placed at `offset` within this
    /// mask's coordinates, lands on a set pixel of this mask.
    pub fn overlap(&self, other: &PixelMask, offset: (i64, i64)) -> bool {
        let (ox, oy) = offset;
        for y in 0..other.height as i64 {
            let sy = y + oy;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for x in 0..other.width as i64 {
                let sx = x + ox;
                if sx < 0 || sx >= self.width as i64 {
                    continue;
                }
                if other.bits[(y * other.width as i64 + x) as usize]
                    && self.bits[(sy * self.width as i64 + sx) as usize]
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(width: u32, height: u32) -> PixelMask {
        let mut mask = PixelMask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    #[test]
    fn overlap_respects_offset() {
        let mut field = PixelMask::new(20, 20);
        field.set(10, 10, true);
        let probe = block(2, 2);

        assert!(field.overlap(&probe, (9, 9)));
        assert!(field.overlap(&probe, (10, 10)));
        assert!(!field.overlap(&probe, (11, 11)));
        assert!(!field.overlap(&probe, (0, 0)));
    }

    #[test]
    fn overlap_handles_out_of_range_offsets() {
        let field = block(4, 4);
        let probe = block(2, 2);

        assert!(field.overlap(&probe, (-1, -1)));
        assert!(!field.overlap(&probe, (-2, -2)));
        assert!(!field.overlap(&probe, (100, 100)));
    }

    #[test]
    fn invert_flips_every_pixel() {
        let mut mask = PixelMask::new(3, 3);
        mask.set(1, 1, true);
        let inverted = mask.invert();

        assert_eq!(mask.count(), 1);
        assert_eq!(inverted.count(), 8);
        assert!(!inverted.get(1, 1));
        assert!(inverted.get(0, 0));
    }
}
