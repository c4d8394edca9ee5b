// HTTP Server Task - Serviert Steuerseite und REST-API
use defmt::{info, warn};
use embassy_net::Stack;
use embassy_time::Duration;
use esp_core::{CorsHeaders, ResponseBody};
use picoserve::{
    io::embedded_io_async,
    request::{Path, Request},
    response::{Body, HeadersIter, IntoResponse, Json, Response, StatusCode},
    routing::{PathRouterService, RequestHandlerService, get},
};

use crate::config::*;
use crate::web::INDEX_HTML;
use crate::{ApiResponse, HttpMethod, SharedLightState, StateChangedSignal, dispatch};

/// Hängt die CORS-Header an eine picoserve-Response an
///
/// `Access-Control-Allow-Credentials` wird nur bei gespiegeltem Origin gesendet,
/// ohne `cors` (404) bleibt die Response unverändert.
fn with_cors<'a, H: HeadersIter, B: Body>(
    response: Response<H, B>,
    cors: Option<CorsHeaders<'a>>,
) -> Response<impl HeadersIter, B> {
    let headers = cors.map(|cors| {
        [
            ("Access-Control-Allow-Origin", cors.allow_origin),
            ("Access-Control-Allow-Methods", cors.allow_methods()),
            ("Access-Control-Allow-Headers", cors.allow_headers()),
        ]
    });
    let credentials = cors
        .filter(|cors| cors.allow_credentials)
        .map(|_| ("Access-Control-Allow-Credentials", "true"));

    response.with_headers(headers).with_headers(credentials)
}

/// Response-Wrapper für API-Antworten aus esp-core
/// Übersetzt Status, CORS-Header und Body in eine picoserve-Response
struct ApiReply<'a>(ApiResponse<'a>);

impl IntoResponse for ApiReply<'_> {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        let ApiResponse { status, cors, body } = self.0;
        let status = StatusCode::new(status);

        match body {
            ResponseBody::Json(body) => {
                with_cors(Json(body).into_response().with_status_code(status), cors)
                    .write_to(connection, response_writer)
                    .await
            }
            ResponseBody::Text(text) => {
                with_cors(Response::new(status, text), cors)
                    .write_to(connection, response_writer)
                    .await
            }
            ResponseBody::Empty => {
                with_cors(Response::new(status, ""), cors)
                    .write_to(connection, response_writer)
                    .await
            }
        }
    }
}

/// Dispatcher-Service für alle Pfade außer `GET /`
///
/// Nimmt alle Methoden an, damit CORS-Preflights (`OPTIONS`) auf jedem Pfad,
/// falsche Methoden und unbekannte Pfade über den Dispatcher in esp-core laufen
/// statt über den eingebauten 404-Handler von picoserve.
#[derive(Clone, Copy)]
struct ApiService {
    state: &'static SharedLightState,
    changed: &'static StateChangedSignal,
}

impl ApiService {
    async fn respond<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        &self,
        request: Request<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        let method = HttpMethod::parse(request.parts.method());
        let path = request.parts.path().encoded();

        // Origin kopieren, damit der Request-Body danach konsumiert werden kann
        let mut origin = heapless::String::<CORS_ORIGIN_MAX_LEN>::new();
        let has_origin = match request
            .parts
            .headers()
            .get("Origin")
            .and_then(|value| value.as_str().ok())
        {
            Some(value) if origin.push_str(value).is_ok() => true,
            Some(value) => {
                warn!(
                    "HTTP: Origin header too long ({} > {} bytes), answering with wildcard CORS",
                    value.len(),
                    CORS_ORIGIN_MAX_LEN
                );
                false
            }
            None => false,
        };

        let response = dispatch(
            self.state,
            self.changed,
            method,
            path,
            has_origin.then_some(origin.as_str()),
        );
        info!(
            "HTTP: {} {} -> {}",
            request.parts.method(),
            path,
            response.status
        );

        let connection = request.body_connection.finalize().await?;
        ApiReply(response)
            .write_to(connection, response_writer)
            .await
    }
}

// Für `OPTIONS /` neben der Steuerseite
impl RequestHandlerService<()> for ApiService {
    async fn call_request_handler_service<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        &self,
        _state: &(),
        _path_parameters: (),
        request: Request<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        self.respond(request, response_writer).await
    }
}

// Fallback für alle übrigen Pfade
impl PathRouterService<()> for ApiService {
    async fn call_request_handler_service<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        &self,
        _state: &(),
        _current_path_parameters: (),
        _path: Path<'_>,
        request: Request<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        self.respond(request, response_writer).await
    }
}

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// Dieser Task stellt den HTTP-Server bereit:
/// - Serviert die Steuerseite auf GET /
/// - REST-API unter /api/* (Status lesen, Schalter umschalten)
/// - CORS-Preflight auf jedem Pfad, sonst 404 "Not found"
/// - Ändert den gemeinsamen Zustand und weckt den Lampen-Task
///
/// **Task Pool:** Diese Task wird `HTTP_TASK_COUNT`x gespawnt für concurrent connections:
/// - Der Browser pollt /api/status jede Sekunde und sendet parallel POSTs
/// - Verhindert Blockierung wenn eine Connection aktiv ist
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `state`: Gemeinsamer Steuerzustand
/// - `changed`: Signal an den Lampen-Task
// pool_size muss HTTP_TASK_COUNT entsprechen
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    state: &'static SharedLightState,
    changed: &'static StateChangedSignal,
) {
    info!("HTTP: Server task {} starting on port {}...", task_id, HTTP_PORT);

    let api = ApiService { state, changed };

    // Router-Konfiguration: Steuerseite auf GET /, alles andere an den Dispatcher
    let app = picoserve::Router::from_service(api)
        .route("/", get(serve_html).options_service(api));

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    // HTTP-Buffer für Requests/Responses
    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

    // TCP-Buffers für Socket
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    // Server erstellen
    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // Server starten (lauscht auf HTTP_PORT)
    // task_id ermöglicht mehrere concurrent Server-Instanzen
    let _ = server
        .listen_and_serve(task_id, *stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert die Steuerseite
async fn serve_html() -> impl IntoResponse {
    Response::new(StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}
