//! Wiederholungs-Schleife für langlebige Netzwerk-Dienste
//!
//! Ressourcen, die nur einmal angelegt werden dürfen (z.B. `StaticCell`-Buffer),
//! gehören VOR den Aufruf und werden von jedem Versuch nur geliehen.

use core::future::Future;
use core::ops::ControlFlow;

/// Führt `attempt` wiederholt aus
///
/// Nach jedem Ende eines Versuchs (regulär oder mit Fehler) bekommt `recover`
/// das Ergebnis und entscheidet, ob ein weiterer Versuch folgt.
pub async fn retry<T, E, A, AF, R, RF>(mut attempt: A, mut recover: R)
where
    A: FnMut() -> AF,
    AF: Future<Output = Result<T, E>>,
    R: FnMut(Result<T, E>) -> RF,
    RF: Future<Output = ControlFlow<()>>,
{
    loop {
        let outcome = attempt().await;
        if recover(outcome).await.is_break() {
            return;
        }
    }
}
