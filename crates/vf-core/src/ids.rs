//! Strongly typed float identifier.
//!
//! The inner integer is `pub` to allow direct indexing into the fleet's SoA
//! `Vec`s via `id.0 as usize`, but callers should prefer [`FloatId::index`].

use std::fmt;

/// Index of a float in fleet storage.  Stable for the whole run: floats that
/// expire or leave the domain keep their index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatId(pub u32);

impl FloatId {
    /// Sentinel meaning "no valid float".
    pub const INVALID: FloatId = FloatId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for FloatId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for FloatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatId({})", self.0)
    }
}

impl From<FloatId> for usize {
    #[inline(always)]
    fn from(id: FloatId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for FloatId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<FloatId, Self::Error> {
        u32::try_from(n).map(FloatId)
    }
}
