//! Integration Tests für die Retry-Schleife der Netzwerk-Dienste
//!
//! Bildet den Aufbau des mDNS-Tasks nach: Buffer einmal aus einer StaticCell,
//! danach beliebig viele Versuche, die sich die Buffer nur leihen.

use core::cell::{Cell, RefCell};
use core::ops::ControlFlow;

use embassy_futures::block_on;
use esp_core::retry;
use static_cell::StaticCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SocketError {
    BindFailed,
}

/// Ersatz für den UDP-Stack: merkt sich, wie oft gebunden wurde
struct FakeUdp {
    buffer: &'static [u8; 64],
    binds: Cell<u32>,
}

impl FakeUdp {
    async fn run(&self) -> Result<(), SocketError> {
        self.binds.set(self.binds.get() + 1);
        assert_eq!(self.buffer.len(), 64);
        Err(SocketError::BindFailed)
    }
}

// ============================================================================
// Tests: Wiederholung mit einmal angelegten Ressourcen
// ============================================================================

#[test]
fn test_failed_attempts_reuse_static_buffers() {
    static BUFFERS: StaticCell<[u8; 64]> = StaticCell::new();
    let udp = FakeUdp {
        buffer: BUFFERS.init([0u8; 64]),
        binds: Cell::new(0),
    };
    let udp = &udp;
    let recoveries = Cell::new(0u32);

    block_on(retry(
        move || udp.run(),
        |outcome| {
            assert_eq!(outcome, Err(SocketError::BindFailed));
            recoveries.set(recoveries.get() + 1);
            let flow = if recoveries.get() < 3 {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            };
            core::future::ready(flow)
        },
    ));

    // Drei Versuche ohne erneute Initialisierung der StaticCell
    assert_eq!(udp.binds.get(), 3);
    assert_eq!(recoveries.get(), 3);
}

#[test]
fn test_regular_stop_is_reported_to_recover() {
    let attempts = Cell::new(0u32);
    let seen = Cell::new(None);

    block_on(retry(
        || {
            attempts.set(attempts.get() + 1);
            core::future::ready(Ok::<u32, SocketError>(attempts.get()))
        },
        |outcome| {
            seen.set(Some(outcome));
            core::future::ready(ControlFlow::Break(()))
        },
    ));

    assert_eq!(attempts.get(), 1);
    assert_eq!(seen.get(), Some(Ok(1)));
}

#[test]
fn test_recover_can_await_before_next_attempt() {
    let log = RefCell::new(Vec::new());
    let log = &log;

    block_on(retry(
        move || {
            log.borrow_mut().push("attempt");
            core::future::ready(Err::<(), _>(SocketError::BindFailed))
        },
        move |_| async move {
            // Entspricht Timer + wait_for_network im Task
            embassy_futures::yield_now().await;
            log.borrow_mut().push("recover");
            if log.borrow().len() < 4 {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        },
    ));

    assert_eq!(
        *log.borrow(),
        ["attempt", "recover", "attempt", "recover"]
    );
}
