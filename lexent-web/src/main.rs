//! Servidor web Axum com WebSocket para visualização da extração em tempo real

use anyhow::{bail, Context};
use axum::{
    extract::{
        rejection::JsonRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use lexent_core::{corpus::demo_texts, describe, scan, scan_streaming, Extraction, ExtractorSet, ScanEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    /// Extratores usados quando a requisição não escolhe nenhum
    default_set: ExtractorSet<'static>,
}

impl AppState {
    /// Resolve os extratores pedidos, ou o conjunto padrão quando o campo é omitido.
    ///
    /// Uma lista explícita vazia é um erro: varreria sem extrator nenhum.
    fn extractors(&self, names: Option<Vec<String>>) -> Result<ExtractorSet<'static>, String> {
        match names {
            None => Ok(self.default_set.clone()),
            Some(names) if names.is_empty() => Err("nenhum extrator selecionado".to_string()),
            Some(names) => ExtractorSet::from_names(names).map_err(|err| err.to_string()),
        }
    }
}

/// Conjunto padrão a partir de `LEXENT_EXTRACTORS` (nomes separados por vírgula).
fn default_set(env: Option<&str>) -> anyhow::Result<ExtractorSet<'static>> {
    let Some(names) = env else {
        return Ok(ExtractorSet::all());
    };
    let set = ExtractorSet::from_names(names.split(',').map(str::trim).filter(|n| !n.is_empty()))
        .context("LEXENT_EXTRACTORS inválido")?;
    if set.is_empty() {
        bail!("LEXENT_EXTRACTORS não nomeia nenhum extrator");
    }
    Ok(set)
}

/// Interpreta uma mensagem do WebSocket: JSON `{text, extractors}` ou texto puro.
///
/// O texto volta intacto para que os offsets se refiram ao que o cliente enviou.
fn ws_request(message: &str) -> (String, Option<Vec<String>>) {
    match serde_json::from_str::<ScanRequest>(message) {
        Ok(req) => (req.text, req.extractors),
        Err(_) => (message.to_string(), None),
    }
}

#[derive(Deserialize)]
struct ScanRequest {
    text: String,
    #[serde(default)]
    extractors: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ScanResponse {
    extractions: Vec<Extraction>,
    total: usize,
    processing_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("LEXENT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let default_set = default_set(std::env::var("LEXENT_EXTRACTORS").ok().as_deref())?;
    info!(extractors = ?default_set.names(), "conjunto padrão de extratores");

    let state = Arc::new(AppState { default_set });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("falha ao escutar em {addr}"))?;
    info!("🚀 Servidor lexent iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/scan", post(scan_handler))
        .route("/extractors", get(extractors_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Extração via HTTP POST (sem streaming)
async fn scan_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(%rejection, "corpo inválido");
            return bad_request(rejection.body_text());
        }
    };

    if req.text.trim().is_empty() {
        return bad_request("Texto vazio".to_string());
    }

    let set = match state.extractors(req.extractors) {
        Ok(set) => set,
        Err(err) => {
            warn!(%err, "requisição rejeitada");
            return bad_request(err);
        }
    };

    let start = std::time::Instant::now();
    let extractions = scan(&req.text, &set);
    let total = extractions.len();

    Json(ScanResponse {
        extractions,
        total,
        processing_ms: start.elapsed().as_millis() as u64,
    })
    .into_response()
}

/// Lista os extratores do catálogo
async fn extractors_handler() -> impl IntoResponse {
    Json(describe())
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, executa a varredura e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let (text_str, names) = ws_request(&text);

                if text_str.trim().is_empty() {
                    continue;
                }

                let set = match state.extractors(names) {
                    Ok(set) => set,
                    Err(err) => {
                        let payload = serde_json::json!({ "type": "Error", "data": { "message": err } });
                        if socket.send(Message::Text(payload.to_string().into())).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                info!(extractors = ?set.names(), "Varrendo via WebSocket: {} bytes", text_str.len());

                // A varredura é síncrona: roda fora do runtime e coleta os eventos
                let (tx, rx) = std::sync::mpsc::channel::<ScanEvent>();
                let handle = tokio::task::spawn_blocking(move || {
                    scan_streaming(&text_str, &set, tx);
                });
                if let Err(err) = handle.await {
                    warn!(%err, "varredura interrompida");
                    continue;
                }

                let events: Vec<ScanEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use lexent_core::corpus::NUM_CORPUS;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            default_set: ExtractorSet::from_names(["integers"]).unwrap(),
        }
    }

    async fn post_scan(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = router(Arc::new(state()))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/scan")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_default_set_when_field_omitted() {
        assert_eq!(state().extractors(None).unwrap().names(), vec!["integers"]);
    }

    #[test]
    fn test_explicit_empty_list_is_an_error() {
        let err = state().extractors(Some(vec![])).unwrap_err();
        assert_eq!(err, "nenhum extrator selecionado");
    }

    #[test]
    fn test_requested_names_override_default() {
        let set = state()
            .extractors(Some(vec!["mixed_ordinals".to_string()]))
            .unwrap();
        assert_eq!(set.names(), vec!["mixed_ordinals"]);
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = state()
            .extractors(Some(vec!["romans".to_string()]))
            .unwrap_err();
        assert_eq!(err, "unknown extractor: romans");
    }

    #[test]
    fn test_default_set_from_env() {
        assert_eq!(default_set(None).unwrap().len(), 5);
        assert_eq!(
            default_set(Some(" dates_iso8601 , integers")).unwrap().names(),
            vec!["dates_iso8601", "integers"]
        );
        assert!(default_set(Some("integers,romans")).is_err());
    }

    #[test]
    fn test_default_set_from_env_rejects_no_names() {
        assert!(default_set(Some("")).is_err());
        assert!(default_set(Some(" , ")).is_err());
    }

    #[test]
    fn test_ws_request_keeps_text_untouched() {
        assert_eq!(ws_request("\n5th"), ("\n5th".to_string(), None));

        let json = serde_json::json!({ "text": "\n5th ", "extractors": ["mixed_ordinals"] }).to_string();
        assert_eq!(
            ws_request(&json),
            ("\n5th ".to_string(), Some(vec!["mixed_ordinals".to_string()]))
        );
    }

    #[test]
    fn test_ws_offsets_match_http_scan() {
        let (text, names) = ws_request(NUM_CORPUS);
        let set = state().extractors(names).unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        scan_streaming(&text, &set, tx);
        let streamed = rx
            .iter()
            .find_map(|event| match event {
                ScanEvent::Done { extractions, .. } => Some(extractions),
                _ => None,
            })
            .unwrap();

        let direct = scan(NUM_CORPUS, &set);
        assert_eq!(streamed, direct);
        let first = &direct[0].matched;
        assert_eq!(&NUM_CORPUS[first.start..first.end], first.text);
    }

    #[tokio::test]
    async fn test_scan_offsets_into_untrimmed_text() {
        let (status, body) = post_scan(r#"{"text": "\n 42"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["extractions"][0]["start"], 2);
        assert_eq!(body["extractions"][0]["end"], 4);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (status, body) = post_scan("isto não é json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_extractor_list_is_rejected() {
        let (status, body) = post_scan(r#"{"text": "42", "extractors": []}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "nenhum extrator selecionado");
    }
}
