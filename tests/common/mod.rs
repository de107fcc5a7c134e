#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use home_telemetry::chart::{ChartSeries, ChartSink};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Default)]
pub struct MockState {
    pub data: Mutex<Value>,
    pub alert: Mutex<Value>,
    pub data_down: AtomicBool,
    pub alert_down: AtomicBool,
    pub saved: Mutex<Option<Value>>,
    pub last_drought_code: Mutex<Option<String>>,
}

impl MockState {
    pub fn new(data: Value, alert: Value) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            alert: Mutex::new(alert),
            ..Default::default()
        })
    }

    pub fn set_data_down(&self, down: bool) {
        self.data_down.store(down, Ordering::SeqCst);
    }

    pub fn set_alert_down(&self, down: bool) {
        self.alert_down.store(down, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub renders: Vec<ChartSeries>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, series: &ChartSeries) {
        self.renders.push(series.clone());
    }
}

async fn data(State(state): State<Arc<MockState>>) -> Result<Json<Value>, StatusCode> {
    if state.data_down.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.data.lock().unwrap().clone()))
}

async fn check_alert(State(state): State<Arc<MockState>>) -> Result<Json<Value>, StatusCode> {
    if state.alert_down.load(Ordering::SeqCst) {
        return Err(StatusCode::BAD_GATEWAY);
    }
    Ok(Json(state.alert.lock().unwrap().clone()))
}

async fn weather(Query(params): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    if params.get("city").map(String::as_str) != Some("Le Petit-Quevilly,FR") {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "main": {"temp": 21.456, "feels_like": 21.04, "temp_min": 19.95, "temp_max": 23.0,
                 "humidity": 64, "pressure": 1016},
        "wind": {"speed": 4.12, "deg": 250},
        "clouds": {"all": 75},
        "visibility": 10000,
        "sys": {"sunrise": 1_752_898_080, "sunset": 1_752_954_600},
        "weather": [{"main": "Clouds", "description": "nuageux"}]
    })))
}

async fn uv(Query(params): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    if !params.contains_key("city") {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"value": 6.2})))
}

async fn drought(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let code = params.get("code").cloned().unwrap_or_default();
    *state.last_drought_code.lock().unwrap() = Some(code.clone());
    if code != "76" && code != "2A" {
        return Err((StatusCode::NOT_FOUND, Json(json!({"error": "Département non trouvé"}))));
    }
    Ok(Json(json!({
        "code": code, "nom": "Seine-Maritime", "niveauGraviteMax": "alerte",
        "niveauGraviteSupMax": "alerte", "niveauGraviteSouMax": null, "niveauGraviteAepMax": null
    })))
}

async fn drought_all() -> Json<Value> {
    Json(json!([
        {"code": "76", "nom": "Seine-Maritime", "niveauGraviteMax": "alerte"},
        {"code": "27", "nom": "Eure", "niveauGraviteMax": null},
        {"code": "2A", "nom": "Corse-du-Sud", "niveauGraviteMax": "crise"}
    ]))
}

async fn save_alert_config(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    *state.saved.lock().unwrap() = Some(body);
    Json(json!({"success": true, "message": "Configuration sauvegardée"}))
}

async fn user_status() -> Json<Value> {
    Json(json!({"logged_in": true, "username": "camille", "is_admin": false, "can_access_panel": true}))
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

/// Serves the mock dashboard API on an ephemeral port and returns its base URL.
pub async fn serve(state: Arc<MockState>) -> String {
    let router = Router::new()
        .route("/data", get(data))
        .route("/api/check_alert", get(check_alert))
        .route("/api/weather", get(weather))
        .route("/api/uv", get(uv))
        .route("/api/secheresse", get(drought))
        .route("/api/secheresse_all", get(drought_all))
        .route("/save-alert-config", post(save_alert_config))
        .route("/user/status", get(user_status))
        .route("/maintenance/data", get(not_json))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn sample_data() -> Value {
    json!([
        {"device_id": "esp32-salon", "time": "19/07/2025 11:00:00", "temperature": "19.2", "humidity": "58"},
        {"device_id": "esp32-salon", "time": "19/07/2025 10:00:00", "temperature": "18.5", "humidity": "60"},
        {"device_id": "esp32-salon", "time": "19/07/2025 10:30:00", "temperature": "oops", "humidity": "59"}
    ])
}

pub fn breach_alert() -> Value {
    json!({"alert": true, "temperature": 35, "humidity": 50,
           "temp_min": 10, "temp_max": 30, "humidity_min": 30, "humidity_max": 70})
}
