// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// HTTP-Tasks und Lampen-Task teilen sich den Steuerzustand (Mutex + Signal).

pub mod http;
pub mod lamps;
pub mod mdns;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use http::http_server_task;
pub use lamps::lamp_task;
pub use mdns::mdns_responder_task;
pub use wifi::{connection_task, dhcp_task, net_task};
