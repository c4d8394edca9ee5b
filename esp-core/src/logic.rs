//! Pure Business Logic Functions
//!
//! Blink-Zustandsmaschine ohne Hardware-Dependencies (testbar!)

use crate::traits::{LampWriter, LedError};
use crate::types::{BlinkTiming, LampLevels, LightState, Room};

/// Zeitgesteuerte Blink-Zustandsmaschine
///
/// Wird vom LED-Task bei jedem Poll mit der aktuellen Zeit aufgerufen und
/// liefert die Pegel, die auf die Lampen geschrieben werden sollen.
///
/// # Beispiele
///
/// ```
/// # use esp_core::{BlinkEngine, LampLevels, LightState, Room};
/// let mut engine = BlinkEngine::new();
/// let mut state = LightState::new();
/// state.toggle_master();
/// state.toggle_room(Room::Bedroom);
///
/// // Ohne Blinken: Raum-Schalter direkt auf die Ausgänge
/// assert_eq!(engine.update(&state, 0), Some(LampLevels([true, false, false])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkEngine {
    timing: BlinkTiming,
    /// 0/1 im Blink-Modus, 0..3 im Alternate-Modus (gemeinsam genutzt)
    phase: u8,
    last_change_ms: u64,
}

impl BlinkEngine {
    pub const fn new() -> Self {
        Self::with_timing(BlinkTiming::DEFAULT)
    }

    pub const fn with_timing(timing: BlinkTiming) -> Self {
        Self {
            timing,
            phase: 0,
            last_change_ms: 0,
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn last_change_ms(&self) -> u64 {
        self.last_change_ms
    }

    /// Berechnet die Ausgangspegel für den aktuellen Zeitpunkt
    ///
    /// Gibt `None` zurück, wenn in diesem Poll nichts geschrieben werden muss
    /// (Intervall noch nicht abgelaufen). Im Dauerlicht- und Aus-Zustand wird
    /// bei jedem Poll geschrieben.
    pub fn update(&mut self, state: &LightState, now_ms: u64) -> Option<LampLevels> {
        let elapsed = now_ms.wrapping_sub(self.last_change_ms);

        if state.alternate && state.enabled {
            // Lampen nacheinander: pro Schritt höchstens eine an
            let step = if state.fast_blink {
                self.timing.fast_ms
            } else {
                self.timing.alternate_ms
            };
            if elapsed < step {
                return None;
            }
            self.last_change_ms = now_ms;

            let levels = match Room::from_index(self.phase as usize) {
                Some(room) => LampLevels::only(room, state.room(room)),
                None => LampLevels::OFF,
            };
            self.phase = (self.phase + 1) % 3;
            Some(levels)
        } else if state.enabled && (state.fast_blink || state.alternate) {
            let interval = if state.fast_blink {
                self.timing.fast_ms
            } else {
                self.timing.normal_ms
            };
            if elapsed < interval {
                return None;
            }
            self.phase = if self.phase == 0 { 1 } else { 0 };
            self.last_change_ms = now_ms;

            let lit = self.phase != 0;
            Some(LampLevels(state.rooms.map(|on| lit && on)))
        } else if state.enabled {
            Some(state.steady_levels())
        } else {
            Some(LampLevels::OFF)
        }
    }
}

impl Default for BlinkEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Schreibt alle drei Pegel auf die Lampen
///
/// Bricht beim ersten Schreibfehler ab.
pub fn drive<L: LampWriter>(led: &mut L, levels: LampLevels) -> Result<(), LedError> {
    for room in Room::ALL {
        led.set_lamp(room, levels.get(room))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_with_rooms(rooms: [bool; 3]) -> LightState {
        LightState {
            enabled: true,
            rooms,
            ..LightState::new()
        }
    }

    #[test]
    fn test_disabled_writes_all_off_every_poll() {
        let mut engine = BlinkEngine::new();
        let mut state = LightState::new();
        state.rooms = [true; 3];
        state.fast_blink = true;

        assert_eq!(engine.update(&state, 0), Some(LampLevels::OFF));
        assert_eq!(engine.update(&state, 1), Some(LampLevels::OFF));
    }

    #[test]
    fn test_steady_mirrors_room_switches() {
        let mut engine = BlinkEngine::new();
        let state = enabled_with_rooms([true, false, true]);
        assert_eq!(
            engine.update(&state, 5),
            Some(LampLevels([true, false, true]))
        );
        assert_eq!(engine.last_change_ms(), 0);
    }

    #[test]
    fn test_fast_blink_toggles_after_interval() {
        let mut engine = BlinkEngine::new();
        let mut state = enabled_with_rooms([true, true, false]);
        state.fast_blink = true;

        assert_eq!(engine.update(&state, 199), None);
        assert_eq!(
            engine.update(&state, 200),
            Some(LampLevels([true, true, false]))
        );
        assert_eq!(engine.update(&state, 399), None);
        assert_eq!(engine.update(&state, 400), Some(LampLevels::OFF));
    }

    #[test]
    fn test_alternate_cycles_rooms() {
        let mut engine = BlinkEngine::new();
        let mut state = enabled_with_rooms([true, true, true]);
        state.alternate = true;

        assert_eq!(
            engine.update(&state, 500),
            Some(LampLevels([true, false, false]))
        );
        assert_eq!(engine.update(&state, 999), None);
        assert_eq!(
            engine.update(&state, 1000),
            Some(LampLevels([false, true, false]))
        );
        assert_eq!(
            engine.update(&state, 1500),
            Some(LampLevels([false, false, true]))
        );
        assert_eq!(
            engine.update(&state, 2000),
            Some(LampLevels([true, false, false]))
        );
    }

    #[test]
    fn test_alternate_fast_uses_fast_interval() {
        let mut engine = BlinkEngine::new();
        let mut state = enabled_with_rooms([true, true, true]);
        state.alternate = true;
        state.fast_blink = true;

        assert!(engine.update(&state, 200).is_some());
        assert_eq!(engine.update(&state, 399), None);
        assert_eq!(
            engine.update(&state, 400),
            Some(LampLevels([false, true, false]))
        );
    }

    #[test]
    fn test_leftover_alternate_phase_reads_as_lit() {
        let mut engine = BlinkEngine::new();
        let mut state = enabled_with_rooms([true, true, true]);
        state.alternate = true;
        engine.update(&state, 500);
        engine.update(&state, 1000);
        assert_eq!(engine.phase(), 2);

        state.alternate = false;
        state.fast_blink = true;
        // Phase 2 zählt als "an" und wird daher zu 0
        assert_eq!(engine.update(&state, 1200), Some(LampLevels::OFF));
        assert_eq!(engine.phase(), 0);
    }

    #[test]
    fn test_elapsed_wraps() {
        let mut engine = BlinkEngine::new();
        let mut state = enabled_with_rooms([true, false, false]);
        state.fast_blink = true;
        engine.update(&state, u64::MAX - 50);
        assert_eq!(engine.update(&state, 100), None);
        assert!(engine.update(&state, 150).is_some());
    }
}
