//! Display abstraction for the two-line status screen.
//!
//! This module defines the [`StatusDisplay`] trait for rendering the status
//! lines produced by [`crate::status`] to a display device (character LCD,
//! OLED, or the log).

use crate::status::StatusLines;

/// Display trait for rendering controller status.
///
/// Implementors provide hardware-specific rendering. Every call to
/// [`render`](Self::render) is a full refresh of both lines; no partial
/// update contract exists.
///
/// # Example
///
/// ```ignore
/// use smart_pot::traits::StatusDisplay;
/// use smart_pot::StatusLines;
///
/// struct MyLcd { /* ... */ }
///
/// impl StatusDisplay for MyLcd {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, lines: &StatusLines) -> Result<(), ()> {
///         // write lines.top and lines.bottom
///         Ok(())
///     }
///     fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait StatusDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display hardware.
    ///
    /// Called once at startup, before the first render.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Renders both status lines, replacing whatever was shown before.
    fn render(&mut self, lines: &StatusLines) -> Result<(), Self::Error>;

    /// Shows a simple message (e.g., the startup banner).
    ///
    /// # Arguments
    ///
    /// * `line1` - First line of text
    /// * `line2` - Optional second line of text
    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error>;
}
