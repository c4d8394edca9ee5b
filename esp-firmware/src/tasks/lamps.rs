// Lampen Task - Setzt die drei Raum-Lampen anhand des Steuerzustands
use defmt::{error, info};
use embassy_futures::select::select;
use embassy_time::{Duration, Instant, Ticker};

use crate::config::LAMP_POLL_INTERVAL_MS;
use crate::hal::GpioLampWriter;
use crate::{
    BlinkEngine, LampLevels, LampWriter, SharedLightState, StateChangedSignal, drive, snapshot,
};

/// Lampen Logic - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Kooperativer Poll-Loop:
/// - Wacht alle `LAMP_POLL_INTERVAL_MS` auf oder sofort nach einer
///   Zustandsänderung durch den HTTP-Server
/// - Liest eine Kopie des gemeinsamen Zustands
/// - Lässt die `BlinkEngine` aus Zustand und Zeit die Pegel berechnen
/// - Schreibt die Pegel auf die Lampen (Schreibfehler werden nur geloggt)
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `L: LampWriter` ermöglicht:
/// - Real Hardware (GpioLampWriter) im Production-Code
/// - Mock Implementation in Tests
///
/// # Parameter
/// - `led`: Lamp Writer (Hardware oder Mock)
/// - `state`: Gemeinsamer Steuerzustand
/// - `changed`: Signal vom HTTP-Server nach jeder Änderung
pub async fn lamp_update_logic<L: LampWriter>(
    mut led: L,
    state: &'static SharedLightState,
    changed: &'static StateChangedSignal,
) -> ! {
    let mut engine = BlinkEngine::new();
    let mut ticker = Ticker::every(Duration::from_millis(LAMP_POLL_INTERVAL_MS));

    // Nur Änderungen loggen, sonst flutet der 10ms-Loop das Log
    let mut last_levels: Option<LampLevels> = None;

    loop {
        let current = snapshot(state);

        if let Some(levels) = engine.update(&current, Instant::now().as_millis()) {
            if let Err(e) = drive(&mut led, levels) {
                error!("LAMP: Failed to write lamps: {}", e);
            } else if last_levels != Some(levels) {
                info!("LAMP: {} ({})", levels, current);
                last_levels = Some(levels);
            }
        }

        // Nächster Tick oder sofort nach einer Änderung via HTTP
        select(ticker.next(), changed.wait()).await;
    }
}

/// Lampen Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die testbare `lamp_update_logic()` Funktion auf.
///
/// # Parameter
/// - `bedroom` / `bathroom` / `living_room`: GPIO-Peripherals der Lampen
/// - `state`: Gemeinsamer Steuerzustand
/// - `changed`: Signal vom HTTP-Server
#[embassy_executor::task]
pub async fn lamp_task(
    bedroom: esp_hal::peripherals::GPIO4<'static>,
    bathroom: esp_hal::peripherals::GPIO5<'static>,
    living_room: esp_hal::peripherals::GPIO6<'static>,
    state: &'static SharedLightState,
    changed: &'static StateChangedSignal,
) {
    info!("LAMP: Task started");

    // Hardware initialisieren: alle Ausgänge starten aus
    let led = GpioLampWriter::new(bedroom, bathroom, living_room);

    // Business Logic aufrufen (testbar!)
    lamp_update_logic(led, state, changed).await
}
