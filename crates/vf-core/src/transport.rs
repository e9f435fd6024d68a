//! Transport status reported by the advection engine for every float step.

/// Outcome of one advection step for one float.
///
/// `ErrorThroughSurface` is recoverable: the boundary handlers clamp the float
/// to the surface and reset the status to `Success`.  `ErrorOutOfBounds` is
/// not: the float is removed from the run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportStatus {
    #[default]
    Success,
    /// The float left the horizontal (or vertical) domain.
    ErrorOutOfBounds,
    /// Vertical motion tried to carry the float above the surface.
    ErrorThroughSurface,
}

impl TransportStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, TransportStatus::Success)
    }

    /// Human-readable label, useful for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportStatus::Success             => "success",
            TransportStatus::ErrorOutOfBounds    => "out_of_bounds",
            TransportStatus::ErrorThroughSurface => "through_surface",
        }
    }
}

impl std::fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
