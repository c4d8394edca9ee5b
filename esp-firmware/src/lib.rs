// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

use core::cell::RefCell;

// Re-exports von esp-core
pub use esp_core::{
    ApiResponse, BlinkEngine, HttpMethod, LampLevels, LampWriter, LedError, LightState, Room,
    drive, retry,
};

// Embassy Sync-Typen
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

// ============================================================================
// Type-Aliase für geteilten Zustand
// ============================================================================
//
// HTTP-Tasks und LED-Task teilen sich einen Zustandsblock.
// Der HTTP-Handler muss die neuen Werte sofort in der Antwort zurückgeben,
// daher ein Mutex statt eines Command-Channels.

/// Gemeinsamer Steuerzustand (HTTP schreibt, LED-Task liest)
pub type SharedLightState = Mutex<CriticalSectionRawMutex, RefCell<LightState>>;

/// Weckt den LED-Task nach einer Zustandsänderung sofort auf
pub type StateChangedSignal = Signal<CriticalSectionRawMutex, ()>;

/// Erstellt den Zustandsblock im Boot-Zustand (alles aus)
pub const fn new_shared_state() -> SharedLightState {
    Mutex::new(RefCell::new(LightState::new()))
}

/// Liest eine Kopie des aktuellen Zustands
pub fn snapshot(state: &SharedLightState) -> LightState {
    state.lock(|cell| *cell.borrow())
}

/// Führt einen Request auf einen beliebigen Pfad gegen den gemeinsamen Zustand aus
///
/// Unbekannte Pfade liefern 204 (Preflight) oder 404 aus esp-core.
/// Signalisiert dem LED-Task, wenn sich der Zustand geändert hat.
pub fn dispatch<'a>(
    state: &SharedLightState,
    changed: &StateChangedSignal,
    method: HttpMethod,
    path: &str,
    origin: Option<&'a str>,
) -> ApiResponse<'a> {
    let response =
        state.lock(|cell| esp_core::api::handle(method, path, origin, &mut cell.borrow_mut()));
    if response.is_mutation() {
        changed.signal(());
    }
    response
}
