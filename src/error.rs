//! Error type for a controller tick.
//!
//! Policies never fail; only the hardware collaborators can. The error says
//! which collaborator failed and carries its own error value.

use core::fmt;

/// Failure of one hardware collaborator during a tick.
///
/// Type parameters are the associated error types of the
/// [`PlantIo`](crate::traits::PlantIo), [`RotaryActuator`](crate::traits::RotaryActuator)
/// and [`StatusDisplay`](crate::traits::StatusDisplay) implementations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerError<IoE, ActE, DispE> {
    /// Sensor line, output line, or conversion trigger failed.
    Io(IoE),
    /// The rotary actuator failed to move.
    Actuator(ActE),
    /// The status display failed to render.
    Display(DispE),
}

impl<IoE, ActE, DispE> ControllerError<IoE, ActE, DispE> {
    /// Short name of the failing collaborator.
    pub const fn source_name(&self) -> &'static str {
        match self {
            ControllerError::Io(_) => "io",
            ControllerError::Actuator(_) => "actuator",
            ControllerError::Display(_) => "display",
        }
    }
}

impl<IoE: fmt::Debug, ActE: fmt::Debug, DispE: fmt::Debug> fmt::Display
    for ControllerError<IoE, ActE, DispE>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Io(e) => write!(f, "io error: {:?}", e),
            ControllerError::Actuator(e) => write!(f, "actuator error: {:?}", e),
            ControllerError::Display(e) => write!(f, "display error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<IoE: fmt::Debug, ActE: fmt::Debug, DispE: fmt::Debug> std::error::Error
    for ControllerError<IoE, ActE, DispE>
{
}
