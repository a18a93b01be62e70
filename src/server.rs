use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::sync::{broadcast, Mutex};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{answer_warnings, question_catalog, ApiDiagnosisRequest, ApiDiagnosisResponse};
use crate::history::{HistoryEntry, HistoryStore};
use crate::llm::LlmClient;
use dream_gacha::config::DiagnosisConfig;
use dream_gacha::diagnose;

#[derive(Clone)]
struct AppState {
    llm_client: Option<LlmClient>,
    history: Arc<HistoryStore>,
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StreamEvent>>>>,
}

#[derive(Clone, Serialize)]
struct StreamEvent {
    event: String,
    message: String,
    timestamp_ms: u128,
}

#[derive(serde::Deserialize)]
struct StreamQuery {
    request_id: String,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, _) = DiagnosisConfig::load(None)?;
    let history = HistoryStore::load(PathBuf::from(&args.history_path)).await?;
    let state = AppState {
        llm_client: LlmClient::from_env(None, &config.llm),
        history: Arc::new(history),
        channels: Arc::new(Mutex::new(HashMap::new())),
    };

    let web_root = args.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/questions", get(questions_handler))
        .route("/api/diagnose", post(diagnose_handler))
        .route("/api/diagnose/stream", get(stream_handler))
        .route("/api/history", get(history_list_handler))
        .route(
            "/api/history/:id",
            get(history_get_handler).delete(history_delete_handler),
        )
        .nest_service("/", static_service)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "dream-gacha server listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn questions_handler() -> impl IntoResponse {
    Json(question_catalog())
}

async fn diagnose_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiDiagnosisRequest>,
) -> Result<Json<ApiDiagnosisResponse>, (StatusCode, String)> {
    let use_ai = request.use_ai.unwrap_or(false);
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(generate_request_id);
    let input = request
        .into_input()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let channel = if use_ai {
        Some(get_or_create_channel(&state, &request_id).await)
    } else {
        None
    };

    let mut warnings = answer_warnings(&input);
    let output = diagnose(&input);

    let composed = if use_ai {
        if let Some(sender) = channel.as_ref() {
            send_event(sender, "start", "Preparing personalized reading");
        }
        match &state.llm_client {
            Some(client) => {
                if let Some(sender) = channel.as_ref() {
                    send_event(sender, "calling", "Asking the dream oracle");
                }
                match client.compose_message(input.name.as_deref(), &output).await {
                    Ok(result) => {
                        if let Some(sender) = channel.as_ref() {
                            send_event(sender, "received", "Received personalized reading");
                        }
                        Some(result)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "personalized reading failed");
                        warnings.push(format!("personalized reading failed: {}", err));
                        if let Some(sender) = channel.as_ref() {
                            send_event(sender, "error", "Oracle call failed");
                        }
                        None
                    }
                }
            }
            None => {
                warnings.push("personalized reading not configured: set LLM_API_KEY".to_string());
                if let Some(sender) = channel.as_ref() {
                    send_event(sender, "error", "Personalized reading not configured");
                }
                None
            }
        }
    } else {
        None
    };

    if let Some(sender) = channel.as_ref() {
        send_event(sender, "done", "Diagnosis complete");
        schedule_cleanup(state.channels.clone(), request_id.clone());
    }

    let response = ApiDiagnosisResponse::from_output(
        output,
        composed.as_ref().map(|result| result.message.clone()),
        composed.map(|result| result.trace),
        warnings,
        request_id.clone(),
    );

    let entry = HistoryEntry {
        id: request_id,
        created_at: now_ms().to_string(),
        name: input.name.clone(),
        dream_type: response.dream_type.clone(),
        input: serde_json::json!({
            "birth_date": input.birth_date,
            "answers": input.answers,
        }),
        output: serde_json::to_value(&response).unwrap_or_default(),
    };
    if let Err(err) = state.history.add(entry).await {
        tracing::warn!(error = %err, "failed to record diagnosis history");
    }

    Ok(Json(response))
}

async fn stream_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>, StatusCode>
{
    let sender = get_or_create_channel(&state, &query.request_id).await;
    let receiver = sender.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(data)))
        }
        Err(_) => None,
    });

    send_event(&sender, "connected", "Streaming diagnosis status");
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(8))))
}

async fn history_list_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.history.list().await)
}

async fn history_get_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<HistoryEntry>, StatusCode> {
    state
        .history
        .get(&entry_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn history_delete_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = state
        .history
        .delete(&entry_id)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "history entry not found".to_string()))
    }
}

async fn get_or_create_channel(
    state: &AppState,
    request_id: &str,
) -> broadcast::Sender<StreamEvent> {
    let mut guard = state.channels.lock().await;
    if let Some(sender) = guard.get(request_id) {
        return sender.clone();
    }
    let (sender, _) = broadcast::channel(32);
    guard.insert(request_id.to_string(), sender.clone());
    sender
}

fn send_event(sender: &broadcast::Sender<StreamEvent>, event: &str, message: &str) {
    let _ = sender.send(StreamEvent {
        event: event.to_string(),
        message: message.to_string(),
        timestamp_ms: now_ms(),
    });
}

fn schedule_cleanup(
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StreamEvent>>>>,
    request_id: String,
) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        let mut guard = channels.lock().await;
        guard.remove(&request_id);
    });
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
