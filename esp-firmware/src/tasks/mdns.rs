// mDNS Responder Task - Advertised Hostname via Multicast DNS
//
// Dünner Wrapper um edge-mdns: Beantwortet A-Record Queries für
// <MDNS_HOSTNAME>.local, damit die Steuerseite ohne IP-Adresse erreichbar ist.
// Transport: UDP Multicast auf 224.0.0.251:5353 über edge-nal-embassy.

use defmt::{Debug2Format, error, info, warn};
use embassy_net::Stack;
use embassy_time::{Duration, Timer};

use core::net::{Ipv4Addr, SocketAddr};
use core::ops::ControlFlow;
use core::sync::atomic::{AtomicU32, Ordering};

use edge_mdns::{HostAnswersMdnsHandler, buf::VecBufAccess, domain::base::Ttl, host::Host, io};
use edge_nal::{MulticastV4, UdpBind, UdpSplit};
use edge_nal_embassy::{Udp, UdpBuffers};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;

use crate::config::{
    MDNS_HOSTNAME, MDNS_MULTICAST_ADDR, MDNS_PACKET_BUFFER_SIZE, MDNS_PORT,
    MDNS_RECONNECT_DELAY_SECS, MDNS_TTL_SECS, MDNS_UDP_BUFFER_SIZE,
};
use crate::retry;
use crate::tasks::wifi::wait_for_network;

/// Counter für mDNS Transaction IDs (Eindeutigkeit reicht, keine Kryptographie)
static RNG_COUNTER: AtomicU32 = AtomicU32::new(0);

fn mdns_rng(buf: &mut [u8]) {
    let mut counter = RNG_COUNTER.fetch_add(1, Ordering::Relaxed);
    for chunk in buf.chunks_mut(4) {
        let bytes = counter.to_le_bytes();
        let len = chunk.len().min(4);
        chunk[..len].copy_from_slice(&bytes[..len]);
        counter = counter.wrapping_add(1);
    }
}

/// UDP-Buffer für den mDNS-Socket (ein Socket)
type MdnsUdpBuffers = UdpBuffers<1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>;

/// UDP-Stack über den statischen mDNS-Buffern
type MdnsUdp = Udp<'static, 1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>;

/// mDNS Responder Task
///
/// Wartet auf WiFi + DHCP und startet dann den Responder.
/// Bei jedem Fehler: Neustart nach `MDNS_RECONNECT_DELAY_SECS`.
#[embassy_executor::task]
pub async fn mdns_responder_task(stack: &'static Stack<'static>) {
    info!("mDNS: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("mDNS: Network ready");

    // StaticCell darf nur einmal befüllt werden: Buffer vor der Retry-Schleife
    // anlegen, jeder Versuch leiht sich nur den UDP-Stack
    static UDP_BUFFERS: static_cell::StaticCell<MdnsUdpBuffers> = static_cell::StaticCell::new();
    let udp_stack: MdnsUdp = Udp::new(*stack, UDP_BUFFERS.init_with(MdnsUdpBuffers::new));
    let udp_stack = &udp_stack;

    retry(
        move || run_mdns_responder(stack, udp_stack),
        move |outcome| async move {
            match outcome {
                Ok(()) => warn!("mDNS: Responder stopped normally"),
                Err(e) => error!("mDNS: Error: {}", e),
            }
            info!("mDNS: Reconnecting in {}s...", MDNS_RECONNECT_DELAY_SECS);
            Timer::after(Duration::from_secs(MDNS_RECONNECT_DELAY_SECS)).await;
            wait_for_network(stack).await;
            ControlFlow::Continue(())
        },
    )
    .await;
}

/// Bindet den Multicast-Socket und lässt den Responder laufen
///
/// Kehrt nur bei Fehlern zurück. Der Socket wird beim Verlassen freigegeben,
/// die Buffer in `udp_stack` bleiben für den nächsten Versuch erhalten.
async fn run_mdns_responder(
    stack: &'static Stack<'static>,
    udp_stack: &MdnsUdp,
) -> Result<(), MdnsError> {
    // IP kann nach einem Reconnect fehlen, dann erneut versuchen
    let our_ip = stack
        .config_v4()
        .ok_or(MdnsError::NoAddress)?
        .address
        .address();
    info!("mDNS: Using IP {}", Debug2Format(&our_ip));

    let mut socket = udp_stack
        .bind(SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), MDNS_PORT))
        .await
        .map_err(|_| MdnsError::SocketBindFailed)?;

    socket
        .join_v4(Ipv4Addr::from(MDNS_MULTICAST_ADDR), Ipv4Addr::UNSPECIFIED)
        .await
        .map_err(|_| MdnsError::MulticastJoinFailed)?;

    let (recv, send) = socket.split();

    let host = Host {
        hostname: MDNS_HOSTNAME,
        ipv4: our_ip.into(),
        // Kein IPv6 (kein proto-ipv6 in smoltcp)
        ipv6: [0u8; 16].into(),
        ttl: Ttl::from_secs(MDNS_TTL_SECS),
    };

    let recv_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();
    let send_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();

    // Von der API verlangt, Broadcasts werden nicht ausgelöst
    let signal = Signal::<NoopRawMutex, ()>::new();

    let mdns = io::Mdns::new(
        Some(our_ip),
        None,
        recv,
        send,
        recv_buf,
        send_buf,
        mdns_rng,
        &signal,
    );

    info!(
        "mDNS: Responder running, advertising '{}.local'",
        MDNS_HOSTNAME
    );

    mdns.run(HostAnswersMdnsHandler::new(&host))
        .await
        .map_err(|_| MdnsError::ResponderFailed)?;

    Ok(())
}

/// mDNS Fehler-Typen
///
/// Jeder Fehler führt zu einem neuen Versuch über `retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MdnsError {
    /// Keine IPv4-Adresse vom DHCP (Verbindung verloren)
    NoAddress,
    /// UDP Socket konnte nicht auf MDNS_PORT gebunden werden
    SocketBindFailed,
    /// Multicast-Gruppe konnte nicht gejoint werden
    MulticastJoinFailed,
    /// mDNS Responder Loop ist fehlgeschlagen
    ResponderFailed,
}

impl defmt::Format for MdnsError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MdnsError::NoAddress => defmt::write!(fmt, "No IPv4 address"),
            MdnsError::SocketBindFailed => defmt::write!(fmt, "Socket bind failed"),
            MdnsError::MulticastJoinFailed => defmt::write!(fmt, "Multicast join failed"),
            MdnsError::ResponderFailed => defmt::write!(fmt, "Responder failed"),
        }
    }
}
