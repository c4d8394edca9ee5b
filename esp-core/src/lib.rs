//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Zustand, Blink-Logik, REST-Dispatcher, Retry-Schleife und Traits.

#![no_std]

pub mod api;
pub mod logic;
pub mod retry;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use api::{ApiBody, ApiResponse, ApiRoute, CorsHeaders, HttpMethod, ResponseBody};
pub use logic::{BlinkEngine, drive};
pub use retry::retry;
pub use traits::{LampWriter, LedError};
pub use types::{BlinkTiming, LampLevels, LightState, Room};
