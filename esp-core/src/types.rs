//! Core Types für die Raum-Lichtsteuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Die drei Raum-Lampen (LED-Gruppen)
///
/// Jede Gruppe hängt an genau einem GPIO-Ausgang. Die Reihenfolge in
/// [`Room::ALL`] ist auch die Reihenfolge im Alternate-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Room {
    /// Schlafzimmer ("kamar")
    Bedroom,
    /// Badezimmer ("kamar mandi")
    Bathroom,
    /// Wohnzimmer ("ruang tamu")
    LivingRoom,
}

impl Room {
    /// Alle Räume in Round-Robin-Reihenfolge
    pub const ALL: [Room; 3] = [Room::Bedroom, Room::Bathroom, Room::LivingRoom];

    /// Index des Raums in [`LampLevels`] und im Alternate-Zyklus
    pub const fn index(self) -> usize {
        match self {
            Room::Bedroom => 0,
            Room::Bathroom => 1,
            Room::LivingRoom => 2,
        }
    }

    /// Raum für einen Index (`None` außerhalb 0..3)
    pub const fn from_index(index: usize) -> Option<Room> {
        match index {
            0 => Some(Room::Bedroom),
            1 => Some(Room::Bathroom),
            2 => Some(Room::LivingRoom),
            _ => None,
        }
    }

    /// Lesbarer Name für Logs
    pub const fn name(self) -> &'static str {
        match self {
            Room::Bedroom => "Schlafzimmer",
            Room::Bathroom => "Bad",
            Room::LivingRoom => "Wohnzimmer",
        }
    }
}

/// Ausgangspegel der drei Lampen, indiziert über [`Room::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LampLevels(pub [bool; 3]);

impl LampLevels {
    /// Alle Lampen aus
    pub const OFF: LampLevels = LampLevels([false; 3]);

    /// Nur eine Lampe an (oder gar keine bei `on == false`)
    pub fn only(room: Room, on: bool) -> Self {
        let mut levels = Self::OFF;
        levels.0[room.index()] = on;
        levels
    }

    pub fn get(&self, room: Room) -> bool {
        self.0[room.index()]
    }

    /// Anzahl der eingeschalteten Lampen
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|on| **on).count()
    }
}

/// Zeitkonstanten für das Blinken (Millisekunden)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTiming {
    /// Intervall im normalen Blink-Modus
    pub normal_ms: u64,
    /// Intervall bei schnellem Blinken (gilt auch für Alternate + schnell)
    pub fast_ms: u64,
    /// Schrittweite im Alternate-Modus
    pub alternate_ms: u64,
}

impl BlinkTiming {
    pub const DEFAULT: BlinkTiming = BlinkTiming {
        normal_ms: 1000,
        fast_ms: 200,
        alternate_ms: 500,
    };
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Gemeinsamer Steuerzustand (HTTP-Router schreibt, LED-Task liest)
///
/// Alle Flags starten mit `false`, es gibt keine Persistenz über Reboots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightState {
    /// Hauptschalter - ohne ihn leuchtet nichts
    pub enabled: bool,
    /// Schalter pro Raum, indiziert über [`Room::index`]
    pub rooms: [bool; 3],
    /// Schnelles Blinken
    pub fast_blink: bool,
    /// Lampen nacheinander statt gleichzeitig
    pub alternate: bool,
}

impl LightState {
    pub const fn new() -> Self {
        Self {
            enabled: false,
            rooms: [false; 3],
            fast_blink: false,
            alternate: false,
        }
    }

    pub fn room(&self, room: Room) -> bool {
        self.rooms[room.index()]
    }

    /// Hauptschalter umschalten
    ///
    /// Setzt Blink-Geschwindigkeit und Alternate-Modus immer zurück.
    pub fn toggle_master(&mut self) {
        self.enabled = !self.enabled;
        self.alternate = false;
        self.fast_blink = false;
    }

    pub fn toggle_room(&mut self, room: Room) {
        let switch = &mut self.rooms[room.index()];
        *switch = !*switch;
    }

    pub fn toggle_speed(&mut self) {
        self.fast_blink = !self.fast_blink;
    }

    pub fn toggle_alternate(&mut self) {
        self.alternate = !self.alternate;
    }

    /// Raum-Schalter direkt als Ausgangspegel
    pub fn steady_levels(&self) -> LampLevels {
        LampLevels(self.rooms)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Room {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampLevels {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "[{}, {}, {}]",
            self.0[0] as u8,
            self.0[1] as u8,
            self.0[2] as u8
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LightState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LightState {{ enabled: {}, rooms: ({}, {}, {}), fast: {}, alternate: {} }}",
            self.enabled,
            self.rooms[0],
            self.rooms[1],
            self.rooms[2],
            self.fast_blink,
            self.alternate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_master_resets_modes() {
        let mut state = LightState::new();
        state.fast_blink = true;
        state.alternate = true;

        state.toggle_master();
        assert!(state.enabled);
        assert!(!state.fast_blink);
        assert!(!state.alternate);

        state.fast_blink = true;
        state.toggle_master();
        assert!(!state.enabled);
        assert!(!state.fast_blink);
    }

    #[test]
    fn test_toggle_room_is_isolated() {
        let mut state = LightState::new();
        state.toggle_room(Room::Bathroom);
        assert_eq!(state.rooms, [false, true, false]);
        assert!(!state.enabled);
    }

    #[test]
    fn test_room_index_roundtrip() {
        for room in Room::ALL {
            assert_eq!(Room::from_index(room.index()), Some(room));
        }
        assert_eq!(Room::from_index(3), None);
    }
}
