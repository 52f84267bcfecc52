//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including details.
    Verbose,
    /// Show headers and status.
    #[default]
    Normal,
    /// Show results only, without headers.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows headers and decorations.
    pub fn shows_headers(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
