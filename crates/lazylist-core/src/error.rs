//! Error types for window computation.

/// Precondition violations raised by the window calculator.
///
/// Both variants signal caller misconfiguration rather than a runtime
/// condition. Dynamic edge cases (negative offsets, offsets past the end of a
/// shrunken list, empty lists) are clamped instead of reported here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// The viewport extent was zero, negative, or NaN.
    InvalidViewport { extent: f32 },
    /// An item extent was zero, negative, or non-finite.
    InvalidMetric { extent: f32 },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::InvalidViewport { extent } => {
                write!(f, "viewport extent {extent} is not a positive size")
            }
            LayoutError::InvalidMetric { extent } => {
                write!(f, "item extent {extent} is not a positive finite size")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
