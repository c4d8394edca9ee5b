// GPIO-Implementierung des LampWriter-Traits
//
// Jede Raum-Lampe ist eine einfache LED an einem Push-Pull-Ausgang.

use esp_core::{LampWriter, LedError, Room};
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};

/// Real Hardware Lamp Writer
///
/// Hält die drei GPIO-Ausgänge in [`Room::index`]-Reihenfolge.
/// Alle Ausgänge starten mit `Level::Low` (Lampen aus).
pub struct GpioLampWriter<'a> {
    outputs: [Output<'a>; 3],
}

impl<'a> GpioLampWriter<'a> {
    /// Erstellt einen neuen GpioLampWriter
    ///
    /// # Parameter
    /// - `bedroom`: GPIO für die Schlafzimmer-Lampe
    /// - `bathroom`: GPIO für die Bad-Lampe
    /// - `living_room`: GPIO für die Wohnzimmer-Lampe
    pub fn new(
        bedroom: impl OutputPin + 'a,
        bathroom: impl OutputPin + 'a,
        living_room: impl OutputPin + 'a,
    ) -> Self {
        Self {
            outputs: [
                Output::new(bedroom, Level::Low, OutputConfig::default()),
                Output::new(bathroom, Level::Low, OutputConfig::default()),
                Output::new(living_room, Level::Low, OutputConfig::default()),
            ],
        }
    }
}

impl LampWriter for GpioLampWriter<'_> {
    fn set_lamp(&mut self, room: Room, on: bool) -> Result<(), LedError> {
        // GPIO-Schreiben ist auf dem ESP32 infallible
        self.outputs[room.index()].set_level(Level::from(on));
        Ok(())
    }
}
