use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::food::{ComboGenerator, DishCombo, Pools};
use crate::image::{ImageAcquirer, ImageResult};

#[derive(Clone)]
pub struct AppState {
    pools: Arc<Pools>,
    acquirer: Arc<ImageAcquirer>,
}

impl AppState {
    pub fn new(pools: Arc<Pools>, acquirer: ImageAcquirer) -> Self {
        Self {
            pools,
            acquirer: Arc::new(acquirer),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct SeedQuery {
    seed: Option<u64>,
}

#[derive(Deserialize, Validate)]
pub struct ImageRequest {
    #[validate(length(min = 1, max = 1000))]
    prompt: String,
    seed: Option<u64>,
}

#[derive(Serialize)]
pub struct DishResponse {
    dish: DishCombo,
    image: ImageResult,
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

fn api_error(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse { status: message })).into_response()
}

/// Create and configure the API router
pub fn create_api(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", get(generate_handler))
        .route("/api/image", post(image_handler))
        .route("/api/dish", get(dish_handler))
        .layer(cors)
        .with_state(state)
}

fn generate_dish(pools: &Arc<Pools>, seed: Option<u64>) -> Result<DishCombo, Response> {
    let generator = match seed {
        Some(seed) => ComboGenerator::seeded(pools.clone(), seed),
        None => ComboGenerator::from_entropy(pools.clone()),
    };
    generator.map(|mut g| g.generate()).map_err(|e| {
        error!("Generator error: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

async fn health_check() -> Response {
    Json(ApiResponse {
        status: "Server is running and healthy".to_string(),
    })
    .into_response()
}

async fn generate_handler(State(state): State<AppState>, Query(query): Query<SeedQuery>) -> Response {
    match generate_dish(&state.pools, query.seed) {
        Ok(dish) => Json(dish).into_response(),
        Err(response) => response,
    }
}

async fn image_handler(State(state): State<AppState>, Json(request): Json<ImageRequest>) -> Response {
    if let Err(e) = request.validate() {
        return api_error(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e));
    }

    let image = match request.seed {
        Some(seed) => state.acquirer.acquire_image_seeded(&request.prompt, seed).await,
        None => state.acquirer.acquire_image(&request.prompt).await,
    };
    Json(image).into_response()
}

async fn dish_handler(State(state): State<AppState>, Query(query): Query<SeedQuery>) -> Response {
    let dish = match generate_dish(&state.pools, query.seed) {
        Ok(dish) => dish,
        Err(response) => return response,
    };
    info!("Serving dish {} '{}'", dish.id, dish.title);
    let image = state.acquirer.acquire_image_seeded(&dish.description, dish.id).await;
    Json(DishResponse { dish, image }).into_response()
}
