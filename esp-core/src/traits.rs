//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::Room;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::WriteFailed => defmt::write!(fmt, "LED write failed"),
        }
    }
}

/// Trait für den Zugriff auf die drei Raum-Lampen
///
/// # Implementierungen
/// - **Production:** GpioLampWriter (drei ESP32 GPIO-Ausgänge)
/// - **Testing:** MockLampWriter (in-memory Mock)
pub trait LampWriter {
    /// Setzt den Pegel einer Lampe
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_lamp(&mut self, room: Room, on: bool) -> Result<(), LedError>;
}
