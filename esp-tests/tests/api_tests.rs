//! Integration Tests für den REST-Dispatcher
//!
//! Prüft Routen, CORS-Header und das JSON-Format, das der Browser-Client erwartet

use esp_core::api::{CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, NOT_FOUND_BODY, handle};
use esp_core::{ApiBody, ApiResponse, HttpMethod, LightState, ResponseBody, Room};

fn to_json(body: &ApiBody) -> String {
    let mut buffer = [0u8; 256];
    let n = serde_json_core::to_slice(body, &mut buffer).unwrap();
    String::from_utf8(buffer[..n].to_vec()).unwrap()
}

fn json_body(response: &ApiResponse<'_>) -> String {
    match response.body {
        ResponseBody::Json(body) => to_json(&body),
        other => panic!("Expected JSON body, got {:?}", other),
    }
}

// ============================================================================
// Tests: Status
// ============================================================================

#[test]
fn test_status_initial() {
    let mut state = LightState::new();
    let response = handle(HttpMethod::Get, "/api/status", None, &mut state);

    assert_eq!(response.status, 200);
    assert_eq!(
        json_body(&response),
        r#"{"ledEnabled":false,"ledKamar":false,"ledKamarMandi":false,"ledRuangTamu":false,"fastBlink":false,"alternateMode":false}"#
    );
    assert!(!response.is_mutation());
}

#[test]
fn test_status_reflects_state() {
    let mut state = LightState::new();
    state.toggle_master();
    state.toggle_room(Room::Bathroom);
    state.toggle_alternate();

    let response = handle(HttpMethod::Get, "/api/status", None, &mut state);
    assert_eq!(
        json_body(&response),
        r#"{"ledEnabled":true,"ledKamar":false,"ledKamarMandi":true,"ledRuangTamu":false,"fastBlink":false,"alternateMode":true}"#
    );
}

// ============================================================================
// Tests: Toggle-Routen
// ============================================================================

#[test]
fn test_toggle_resets_blink_modes() {
    let mut state = LightState::new();
    state.fast_blink = true;
    state.alternate = true;

    let response = handle(HttpMethod::Post, "/api/toggle", None, &mut state);
    assert_eq!(response.status, 200);
    assert_eq!(
        json_body(&response),
        r#"{"success":true,"ledEnabled":true,"fastBlink":false}"#
    );
    assert!(state.enabled);
    assert!(!state.alternate);
    assert!(response.is_mutation());
}

#[test]
fn test_room_routes_toggle_one_room() {
    let cases = [
        ("/api/kamar", Room::Bedroom, "ledKamar"),
        ("/api/kamarmandi", Room::Bathroom, "ledKamarMandi"),
        ("/api/ruangtamu", Room::LivingRoom, "ledRuangTamu"),
    ];

    for (path, room, key) in cases {
        let mut state = LightState::new();

        let response = handle(HttpMethod::Post, path, None, &mut state);
        assert_eq!(
            json_body(&response),
            format!(r#"{{"success":true,"{}":true}}"#, key)
        );
        assert!(state.room(room));
        assert_eq!(state.steady_levels().lit_count(), 1);

        let response = handle(HttpMethod::Post, path, None, &mut state);
        assert_eq!(
            json_body(&response),
            format!(r#"{{"success":true,"{}":false}}"#, key)
        );
        assert!(!state.room(room));
    }
}

#[test]
fn test_speed_and_alternate() {
    let mut state = LightState::new();

    let response = handle(HttpMethod::Post, "/api/speed", None, &mut state);
    assert_eq!(json_body(&response), r#"{"success":true,"fastBlink":true}"#);

    let response = handle(HttpMethod::Post, "/api/alternate", None, &mut state);
    assert_eq!(
        json_body(&response),
        r#"{"success":true,"alternateMode":true}"#
    );

    // Speed/Alternate lassen den Hauptschalter in Ruhe
    assert!(!state.enabled);
}

// ============================================================================
// Tests: CORS
// ============================================================================

#[test]
fn test_cors_echoes_origin_with_credentials() {
    let mut state = LightState::new();
    let response = handle(
        HttpMethod::Get,
        "/api/status",
        Some("http://192.168.1.20:5500"),
        &mut state,
    );

    let cors = response.cors.unwrap();
    assert_eq!(cors.allow_origin, "http://192.168.1.20:5500");
    assert!(cors.allow_credentials);
    assert_eq!(cors.allow_methods(), CORS_ALLOW_METHODS);
    assert_eq!(cors.allow_headers(), CORS_ALLOW_HEADERS);
}

#[test]
fn test_cors_wildcard_without_origin() {
    let mut state = LightState::new();
    let response = handle(HttpMethod::Post, "/api/speed", None, &mut state);

    let cors = response.cors.unwrap();
    assert_eq!(cors.allow_origin, "*");
    assert!(!cors.allow_credentials);
}

#[test]
fn test_preflight_does_not_touch_state() {
    let mut state = LightState::new();
    let response = handle(
        HttpMethod::Options,
        "/api/toggle",
        Some("http://localhost"),
        &mut state,
    );

    assert_eq!(response.status, 204);
    assert_eq!(response.body, ResponseBody::Empty);
    assert!(response.cors.is_some());
    assert_eq!(state, LightState::new());
}

#[test]
fn test_preflight_on_unknown_path() {
    let mut state = LightState::new();
    let response = handle(HttpMethod::Options, "/favicon.ico", None, &mut state);
    assert_eq!(response.status, 204);
}

#[test]
fn test_preflight_on_any_path_carries_cors() {
    let mut state = LightState::new();

    for path in ["/", "/favicon.ico", "/api", "/api/unknown/deeper"] {
        let response = handle(
            HttpMethod::Options,
            path,
            Some("http://192.168.1.20:5500"),
            &mut state,
        );
        assert_eq!(response.status, 204, "path {}", path);
        assert_eq!(response.body, ResponseBody::Empty);
        let cors = response.cors.expect("Preflight without CORS headers");
        assert_eq!(cors.allow_origin, "http://192.168.1.20:5500");
        assert!(cors.allow_credentials);
    }

    assert_eq!(state, LightState::new());
}

// ============================================================================
// Tests: 404
// ============================================================================

#[test]
fn test_unknown_path_is_not_found() {
    let mut state = LightState::new();
    let response = handle(HttpMethod::Get, "/api/unknown", None, &mut state);

    assert_eq!(response.status, 404);
    assert_eq!(response.cors, None);
    assert_eq!(response.body, ResponseBody::Text(NOT_FOUND_BODY));
}

#[test]
fn test_unknown_non_api_paths_are_plain_not_found() {
    let mut state = LightState::new();

    for (method, path) in [
        (HttpMethod::Get, "/favicon.ico"),
        (HttpMethod::Post, "/"),
        (HttpMethod::parse("PUT"), "/index.html"),
    ] {
        let response = handle(method, path, Some("http://example.com"), &mut state);
        assert_eq!(response.status, 404, "path {}", path);
        assert_eq!(response.cors, None);
        assert_eq!(response.body, ResponseBody::Text("Not found"));
        assert!(!response.is_mutation());
    }

    assert_eq!(state, LightState::new());
}

#[test]
fn test_wrong_method_is_not_found() {
    let mut state = LightState::new();

    let response = handle(HttpMethod::Post, "/api/status", None, &mut state);
    assert_eq!(response.status, 404);

    let response = handle(HttpMethod::Get, "/api/kamar", None, &mut state);
    assert_eq!(response.status, 404);

    let response = handle(HttpMethod::parse("DELETE"), "/api/toggle", None, &mut state);
    assert_eq!(response.status, 404);

    assert_eq!(state, LightState::new());
}
