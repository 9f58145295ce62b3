//! Palette - 256-entry RGB color table.
//!
//! Backends interpret a frame's color indices through the palette of the
//! active animation. Out-of-range indices are resolved silently: reads
//! yield black, writes are dropped.

/// Number of color entries in a palette.
pub const PALETTE_SIZE: usize = 256;

/// An RGB triple. No alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Indexed color table, all-black until explicitly populated.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self {
            colors: [Rgb::default(); PALETTE_SIZE],
        }
    }

    /// Number of entries. Always [`PALETTE_SIZE`].
    #[inline]
    pub fn len(&self) -> usize {
        PALETTE_SIZE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Color at `idx`, or black when `idx` is out of range.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors.get(idx).copied().unwrap_or_default()
    }

    /// Set the color at `idx`. Out-of-range writes are dropped.
    pub fn set_color(&mut self, idx: usize, r: u8, g: u8, b: u8) {
        if let Some(slot) = self.colors.get_mut(idx) {
            *slot = Rgb::new(r, g, b);
        }
    }

    /// Reset every entry to black.
    pub fn clear(&mut self) {
        self.colors = [Rgb::default(); PALETTE_SIZE];
    }

    /// Overwrite every entry with the entries of `src`.
    pub fn copy_from(&mut self, src: &Palette) {
        self.colors = src.colors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black() {
        let pal = Palette::new();
        for i in 0..PALETTE_SIZE {
            assert_eq!(pal.color(i), Rgb::default());
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut pal = Palette::new();
        pal.set_color(10, 255, 128, 64);
        assert_eq!(pal.color(10), Rgb::new(255, 128, 64));
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut pal = Palette::new();
        pal.set_color(500, 1, 2, 3);
        assert_eq!(pal.color(500), Rgb::default());
    }

    #[test]
    fn test_clear_and_copy() {
        let mut a = Palette::new();
        a.set_color(0, 9, 9, 9);

        let mut b = Palette::new();
        b.copy_from(&a);
        assert_eq!(b.color(0), Rgb::new(9, 9, 9));

        b.clear();
        assert_eq!(b.color(0), Rgb::default());
    }
}
