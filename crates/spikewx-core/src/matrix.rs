//! Cosmetic 8x8 LED matrix animation
//!
//! The grid is split into four bands of two rows, owned in order by
//! temperature, wind, precipitation and pressure. Pixel activation is
//! random on every tick and does NOT encode any measurement: the animation
//! takes an RNG, never a snapshot.

use rand::Rng;

use crate::display::ColorZone;

/// Rows and columns of the matrix
pub const MATRIX_SIZE: usize = 8;

/// Chance that a pixel is lit on a given tick
pub const ACTIVATION_PROBABILITY: f64 = 0.3;

/// Band color for a matrix row
pub fn zone_for_row(row: usize) -> ColorZone {
    match row {
        0 | 1 => ColorZone::Blue,
        2 | 3 => ColorZone::Green,
        4 | 5 => ColorZone::Yellow,
        _ => ColorZone::Red,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub zone: ColorZone,
    pub lit: bool,
}

/// One rendered frame of the matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixFrame {
    rows: [[Pixel; MATRIX_SIZE]; MATRIX_SIZE],
}

impl MatrixFrame {
    /// Build a frame, deciding activation per (row, column)
    pub fn from_fn(mut lit: impl FnMut(usize, usize) -> bool) -> Self {
        let rows = std::array::from_fn(|row| {
            std::array::from_fn(|col| Pixel {
                zone: zone_for_row(row),
                lit: lit(row, col),
            })
        });
        Self { rows }
    }

    /// Frame with every pixel off
    pub fn dark() -> Self {
        Self::from_fn(|_, _| false)
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<Pixel> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel; MATRIX_SIZE]> {
        self.rows.iter()
    }

    pub fn lit_count(&self) -> usize {
        self.rows.iter().flatten().filter(|p| p.lit).count()
    }
}

impl Default for MatrixFrame {
    fn default() -> Self {
        Self::dark()
    }
}

/// Cosmetic animation: draw the next decorative frame.
///
/// Each pixel is lit independently with `ACTIVATION_PROBABILITY`.
pub fn animate<R: Rng + ?Sized>(rng: &mut R) -> MatrixFrame {
    MatrixFrame::from_fn(|_, _| rng.random_bool(ACTIVATION_PROBABILITY))
}
