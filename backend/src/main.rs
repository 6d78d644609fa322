use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use triangle_core::{
    Derivation, Quantity, Solution, SolverConfig, Triangle, TriangleSolver, Vertex,
};

const ADDR_ENV: &str = "TRIANGLE_BACKEND_ADDR";
const CONFIG_ENV: &str = "TRIANGLE_SOLVER_CONFIG";

/// Format an error as a JSON response for the frontend
fn format_error(status: StatusCode, code: &str, message: &str, severity: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "severity": severity
    });
    (status, Json(body)).into_response()
}

// Application State
struct AppState {
    solver: TriangleSolver,
}

#[derive(Debug, Serialize)]
struct SolveResponse {
    triangle: Triangle,
    steps: Vec<Derivation>,
    /// Steps rendered for display, in production order
    lines: Vec<String>,
    rounds: usize,
    converged: bool,
    complete: bool,
    hypotenuse: Option<Vertex>,
}

impl From<Solution> for SolveResponse {
    fn from(solution: Solution) -> Self {
        Self {
            lines: solution.steps.iter().map(render_step).collect(),
            complete: solution.is_complete(),
            triangle: solution.triangle,
            steps: solution.steps,
            rounds: solution.rounds,
            converged: solution.converged,
            hypotenuse: solution.hypotenuse,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("loading solver config from {}", path);
            SolverConfig::from_path(&path)?
        }
        Err(_) => SolverConfig::default(),
    };

    let shared_state = Arc::new(AppState {
        solver: TriangleSolver::new(config),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/solve", post(solve))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr: SocketAddr = std::env::var(ADDR_ENV)
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> String {
    banner()
}

fn banner() -> String {
    format!(
        "Triangle solver {}. Enter the known values of the triangle.",
        triangle_core::version()
    )
}

async fn solve(State(state): State<Arc<AppState>>, Json(request): Json<Triangle>) -> Response {
    if let Err(message) = validate_input(&request) {
        warn!("rejected input: {}", message);
        return format_error(StatusCode::BAD_REQUEST, "INVALID_INPUT", &message, "error");
    }

    match state.solver.run(request) {
        Ok(solution) => Json(SolveResponse::from(solution)).into_response(),
        Err(e) => format_error(StatusCode::UNPROCESSABLE_ENTITY, e.code(), &e.to_string(), "error"),
    }
}

/// Per-field range checks the solver leaves to its caller.
fn validate_input(triangle: &Triangle) -> Result<(), String> {
    for vertex in Vertex::ALL {
        if let Some(side) = triangle.side(vertex) {
            if !side.is_finite() || side <= 0.0 {
                return Err(format!(
                    "{} must be a positive length, got {}",
                    Quantity::Side(vertex),
                    side
                ));
            }
        }
        if let Some(angle) = triangle.angle(vertex) {
            if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
                return Err(format!(
                    "{} must be between 0° and 180°, got {}",
                    Quantity::Angle(vertex),
                    angle
                ));
            }
        }
    }

    if triangle.known_angle_sum() > 180.0 {
        return Err("interior angles cannot sum to more than 180°".to_string());
    }
    Ok(())
}

/// At most four decimals, trailing zeros dropped.
fn format_value(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn render_step(step: &Derivation) -> String {
    let (label, unit) = match step.quantity {
        Quantity::Side(v) => (format!("Side {}", v.to_string().to_lowercase()), ""),
        Quantity::Angle(v) => (format!("Angle {}", v), "°"),
    };
    format!("{} = {}{} ({})", label, format_value(step.value), unit, step.method)
}
