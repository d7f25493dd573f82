//! Status "display" that writes to the log.
//!
//! Used on boards without an OLED fitted. Lines are logged only when they
//! change, so a steady state does not flood the console at the loop rate.

use core::convert::Infallible;

use crate::status::StatusLines;
use crate::traits::StatusDisplay;

/// [`StatusDisplay`] backed by the `log` crate.
///
/// # Example
///
/// ```rust
/// use smart_pot::hal::LogDisplay;
/// use smart_pot::status::StatusReporter;
/// use smart_pot::traits::StatusDisplay;
/// use smart_pot::Mode;
///
/// let mut display = LogDisplay::new();
/// let lines = StatusReporter::new(300, 800).report(800, Mode::Automatic, true).lines();
///
/// display.render(&lines).unwrap();
/// assert_eq!(display.last_lines().map(|l| l.top.as_str()), Some("Moist: 100%"));
/// ```
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<StatusLines>,
    changes: usize,
}

impl LogDisplay {
    /// Creates a display that has logged nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines most recently logged.
    pub fn last_lines(&self) -> Option<&StatusLines> {
        self.last.as_ref()
    }

    /// Number of renders that changed the shown lines.
    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl StatusDisplay for LogDisplay {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Infallible> {
        self.last = None;
        Ok(())
    }

    fn render(&mut self, lines: &StatusLines) -> Result<(), Infallible> {
        if self.last.as_ref() == Some(lines) {
            return Ok(());
        }
        log::info!("[{}] [{}]", lines.top, lines.bottom);
        self.last = Some(lines.clone());
        self.changes += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Infallible> {
        match line2 {
            Some(line2) => log::info!("{} {}", line1, line2),
            None => log::info!("{}", line1),
        }
        self.last = None;
        Ok(())
    }
}
