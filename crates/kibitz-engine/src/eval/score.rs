//! Paired middlegame/endgame values for piece-square tables.

use std::fmt;

/// A middlegame and an endgame value packed into one `i32`.
///
/// The middlegame half lives in the upper 16 bits and the endgame half in
/// the lower 16 bits. Extracting `mg` adds `0x8000` first to undo the
/// borrow a negative `eg` leaves in the upper half.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Score(i32);

impl Score {
    #[inline]
    pub const fn new(mg: i16, eg: i16) -> Score {
        Score(((mg as i32) << 16).wrapping_add(eg as i32))
    }

    #[inline]
    pub fn mg(self) -> i16 {
        (self.0.wrapping_add(0x8000) >> 16) as i16
    }

    #[inline]
    pub fn eg(self) -> i16 {
        self.0 as i16
    }

    /// Blend the two halves: `phase` 1.0 is pure middlegame, 0.0 pure endgame.
    ///
    /// The blend is rounded to the nearest integer.
    #[inline]
    pub fn taper(self, phase: f32) -> i32 {
        let mg = f32::from(self.mg());
        let eg = f32::from(self.eg());
        (mg * phase + eg * (1.0 - phase)).round() as i32
    }
}

/// Shorthand for [`Score::new`], used to keep the tables readable.
#[allow(non_snake_case)]
#[inline]
pub const fn S(mg: i16, eg: i16) -> Score {
    Score::new(mg, eg)
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S({}, {})", self.mg(), self.eg())
    }
}
