//! REST-API Dispatcher
//!
//! Bildet Methode + Pfad auf Zustandsänderungen ab und beschreibt die
//! Antwort (Status, CORS-Header, JSON-Body). Die Firmware übernimmt nur
//! noch das Schreiben auf den Socket.

use serde::Serialize;

use crate::types::{LightState, Room};

/// Erlaubte Methoden für CORS-Preflight
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Erlaubte Request-Header für CORS-Preflight
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Body der 404-Antwort
pub const NOT_FOUND_BODY: &str = "Not found";

/// HTTP-Methoden, die der Dispatcher unterscheidet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Options,
    Other,
}

impl HttpMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "OPTIONS" => HttpMethod::Options,
            _ => HttpMethod::Other,
        }
    }
}

/// Feste API-Routen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    Status,
    Toggle,
    Room(Room),
    Speed,
    Alternate,
}

impl ApiRoute {
    /// Alle Routen (für die Router-Registrierung)
    pub const ALL: [ApiRoute; 7] = [
        ApiRoute::Status,
        ApiRoute::Toggle,
        ApiRoute::Room(Room::Bedroom),
        ApiRoute::Room(Room::Bathroom),
        ApiRoute::Room(Room::LivingRoom),
        ApiRoute::Speed,
        ApiRoute::Alternate,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            ApiRoute::Status => "/api/status",
            ApiRoute::Toggle => "/api/toggle",
            ApiRoute::Room(Room::Bedroom) => "/api/kamar",
            ApiRoute::Room(Room::Bathroom) => "/api/kamarmandi",
            ApiRoute::Room(Room::LivingRoom) => "/api/ruangtamu",
            ApiRoute::Speed => "/api/speed",
            ApiRoute::Alternate => "/api/alternate",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Die einzige Methode, auf die diese Route reagiert
    pub const fn method(self) -> HttpMethod {
        match self {
            ApiRoute::Status => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }
}

/// Antwort-Body im JSON-Format
///
/// Feldnamen und Reihenfolge entsprechen dem bestehenden Browser-Client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiBody {
    Status {
        #[serde(rename = "ledEnabled")]
        enabled: bool,
        #[serde(rename = "ledKamar")]
        bedroom: bool,
        #[serde(rename = "ledKamarMandi")]
        bathroom: bool,
        #[serde(rename = "ledRuangTamu")]
        living_room: bool,
        #[serde(rename = "fastBlink")]
        fast_blink: bool,
        #[serde(rename = "alternateMode")]
        alternate: bool,
    },
    Toggle {
        success: bool,
        #[serde(rename = "ledEnabled")]
        enabled: bool,
        #[serde(rename = "fastBlink")]
        fast_blink: bool,
    },
    Bedroom {
        success: bool,
        #[serde(rename = "ledKamar")]
        on: bool,
    },
    Bathroom {
        success: bool,
        #[serde(rename = "ledKamarMandi")]
        on: bool,
    },
    LivingRoom {
        success: bool,
        #[serde(rename = "ledRuangTamu")]
        on: bool,
    },
    Speed {
        success: bool,
        #[serde(rename = "fastBlink")]
        fast_blink: bool,
    },
    Alternate {
        success: bool,
        #[serde(rename = "alternateMode")]
        alternate: bool,
    },
}

impl ApiBody {
    pub fn status(state: &LightState) -> Self {
        ApiBody::Status {
            enabled: state.enabled,
            bedroom: state.room(Room::Bedroom),
            bathroom: state.room(Room::Bathroom),
            living_room: state.room(Room::LivingRoom),
            fast_blink: state.fast_blink,
            alternate: state.alternate,
        }
    }

    fn room(room: Room, on: bool) -> Self {
        match room {
            Room::Bedroom => ApiBody::Bedroom { success: true, on },
            Room::Bathroom => ApiBody::Bathroom { success: true, on },
            Room::LivingRoom => ApiBody::LivingRoom { success: true, on },
        }
    }
}

/// CORS-Header einer Antwort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsHeaders<'a> {
    /// Wert für `Access-Control-Allow-Origin`
    pub allow_origin: &'a str,
    /// `Access-Control-Allow-Credentials: true` senden
    pub allow_credentials: bool,
}

impl<'a> CorsHeaders<'a> {
    /// Spiegelt einen vorhandenen Origin zurück, sonst Wildcard ohne Credentials
    pub fn for_origin(origin: Option<&'a str>) -> Self {
        match origin {
            Some(origin) if !origin.is_empty() => Self {
                allow_origin: origin,
                allow_credentials: true,
            },
            _ => Self {
                allow_origin: "*",
                allow_credentials: false,
            },
        }
    }

    pub const fn allow_methods(&self) -> &'static str {
        CORS_ALLOW_METHODS
    }

    pub const fn allow_headers(&self) -> &'static str {
        CORS_ALLOW_HEADERS
    }
}

/// Antwort-Inhalt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseBody {
    Empty,
    Json(ApiBody),
    Text(&'static str),
}

/// Vollständige Beschreibung einer API-Antwort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiResponse<'a> {
    pub status: u16,
    pub cors: Option<CorsHeaders<'a>>,
    pub body: ResponseBody,
}

impl<'a> ApiResponse<'a> {
    fn ok(cors: CorsHeaders<'a>, body: ApiBody) -> Self {
        Self {
            status: 200,
            cors: Some(cors),
            body: ResponseBody::Json(body),
        }
    }

    fn preflight(cors: CorsHeaders<'a>) -> Self {
        Self {
            status: 204,
            cors: Some(cors),
            body: ResponseBody::Empty,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            cors: None,
            body: ResponseBody::Text(NOT_FOUND_BODY),
        }
    }

    /// Hat der Request den Zustand verändert?
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.body,
            ResponseBody::Json(body) if !matches!(body, ApiBody::Status { .. })
        )
    }
}

/// Verarbeitet einen Request gegen den gemeinsamen Zustand
///
/// - Bekannte Route + passende Methode: Zustand ändern, 200 mit JSON
/// - `OPTIONS` auf einen beliebigen Pfad: 204 Preflight, Zustand unverändert
/// - Alles andere: 404 ohne CORS-Header
pub fn handle<'a>(
    method: HttpMethod,
    path: &str,
    origin: Option<&'a str>,
    state: &mut LightState,
) -> ApiResponse<'a> {
    match ApiRoute::from_path(path) {
        Some(route) => handle_route(method, route, origin, state),
        None if method == HttpMethod::Options => {
            ApiResponse::preflight(CorsHeaders::for_origin(origin))
        }
        None => ApiResponse::not_found(),
    }
}

/// Wie [`handle`], aber mit bereits aufgelöster Route
pub fn handle_route<'a>(
    method: HttpMethod,
    route: ApiRoute,
    origin: Option<&'a str>,
    state: &mut LightState,
) -> ApiResponse<'a> {
    let cors = CorsHeaders::for_origin(origin);

    if method == HttpMethod::Options {
        return ApiResponse::preflight(cors);
    }
    if method != route.method() {
        return ApiResponse::not_found();
    }

    let body = match route {
        ApiRoute::Status => ApiBody::status(state),
        ApiRoute::Toggle => {
            state.toggle_master();
            ApiBody::Toggle {
                success: true,
                enabled: state.enabled,
                fast_blink: state.fast_blink,
            }
        }
        ApiRoute::Room(room) => {
            state.toggle_room(room);
            ApiBody::room(room, state.room(room))
        }
        ApiRoute::Speed => {
            state.toggle_speed();
            ApiBody::Speed {
                success: true,
                fast_blink: state.fast_blink,
            }
        }
        ApiRoute::Alternate => {
            state.toggle_alternate();
            ApiBody::Alternate {
                success: true,
                alternate: state.alternate,
            }
        }
    };
    ApiResponse::ok(cors, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_resolve() {
        for route in ApiRoute::ALL {
            assert_eq!(ApiRoute::from_path(route.path()), Some(route));
        }
        assert_eq!(ApiRoute::from_path("/api/kamar/"), None);
        assert_eq!(ApiRoute::from_path("/"), None);
    }

    #[test]
    fn test_cors_wildcard_without_origin() {
        let cors = CorsHeaders::for_origin(None);
        assert_eq!(cors.allow_origin, "*");
        assert!(!cors.allow_credentials);

        let cors = CorsHeaders::for_origin(Some(""));
        assert_eq!(cors.allow_origin, "*");
        assert!(!cors.allow_credentials);
    }

    #[test]
    fn test_wrong_method_is_not_found() {
        let mut state = LightState::new();
        let response = handle(HttpMethod::Get, "/api/toggle", None, &mut state);
        assert_eq!(response, ApiResponse::not_found());
        assert_eq!(state, LightState::new());
    }
}
