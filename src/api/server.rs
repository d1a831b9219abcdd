use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};
use warp::http::StatusCode;
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::api::form::{parse_contact, parse_parameters, validate_parameters};
use crate::api::pages::{render_contact, render_dashboard, DashboardOutcome};
use crate::config::ServerSettings;
use crate::core::{PredictorError, PredictorResult};
use crate::ml::{MachineParameters, PerformanceBand, PredictionEngine, PARAMETER_CATALOG};
use crate::track_performance;

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// JSON body of a successful API prediction
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_output: f64,
    pub band: PerformanceBand,
    pub model: String,
    pub parameters: MachineParameters,
}

/// JSON body of a failed API request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Vec<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

/// HTTP front end for the prediction engine
pub struct PredictorServer {
    config: ServerSettings,
    engine: Arc<PredictionEngine>,
}

impl PredictorServer {
    pub fn new(config: ServerSettings, engine: PredictionEngine) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
        }
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(&self) -> PredictorResult<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| PredictorError::ServerError(format!("Invalid server address: {}", e)))?;

        let (bound, server) = warp::serve(self.routes())
            .try_bind_with_graceful_shutdown(addr, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for shutdown signal: {}", e);
                }
            })
            .map_err(|e| PredictorError::ServerError(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Prediction server listening on http://{}", bound);
        server.await;
        info!("Prediction server stopped");

        Ok(())
    }

    /// Every route, with rejection handling and request tracing applied.
    /// CORS headers are only added when `enable_cors` is set.
    pub fn routes(&self) -> BoxedFilter<(Response,)> {
        let routes = self
            .page_routes()
            .or(self.api_routes())
            .or(contact_routes());

        if self.config.enable_cors {
            let cors = warp::cors()
                .allow_any_origin()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["Content-Type"]);

            routes
                .with(cors)
                .recover(handle_rejection)
                .with(warp::trace::request())
                .map(into_response)
                .boxed()
        } else {
            routes
                .recover(handle_rejection)
                .with(warp::trace::request())
                .map(into_response)
                .boxed()
        }
    }

    /// Server-rendered dashboard
    fn page_routes(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        // GET / and GET /dashboard
        let dashboard = warp::path::end()
            .or(warp::path("dashboard").and(warp::path::end()))
            .unify()
            .and(warp::get())
            .map(|| warp::reply::html(render_dashboard(&HashMap::new(), DashboardOutcome::Empty)));

        // POST /predict
        let predict = warp::path("predict")
            .and(warp::path::end())
            .and(warp::post())
            .and(form_body())
            .and(with_engine(Arc::clone(&self.engine)))
            .and_then(predict_form);

        dashboard.or(predict)
    }

    /// JSON API
    fn api_routes(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        // POST /api/predict
        let predict = warp::path!("api" / "predict")
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_BODY_BYTES))
            .and(warp::body::json())
            .and(with_engine(Arc::clone(&self.engine)))
            .and_then(predict_json);

        // GET /api/parameters
        let parameters = warp::path!("api" / "parameters")
            .and(warp::get())
            .map(|| warp::reply::json(&PARAMETER_CATALOG.to_vec()));

        // GET /health
        let engine = Arc::clone(&self.engine);
        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(move || {
                warp::reply::json(&serde_json::json!({
                    "status": "ok",
                    "model": engine.model_name(),
                }))
            });

        predict.or(parameters).or(health)
    }
}

/// Contact form pages
fn contact_routes() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    // GET /contact
    let contact = warp::path("contact")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::html(render_contact(None, None)));

    // POST /submit
    let submit = warp::path("submit")
        .and(warp::path::end())
        .and(warp::post())
        .and(form_body())
        .and_then(submit_contact);

    contact.or(submit)
}

fn into_response<R: Reply>(reply: R) -> Response {
    reply.into_response()
}

fn with_engine(
    engine: Arc<PredictionEngine>,
) -> impl Filter<Extract = (Arc<PredictionEngine>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&engine))
}

fn form_body() -> impl Filter<Extract = (HashMap<String, String>,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::form())
}

async fn predict_form(
    fields: HashMap<String, String>,
    engine: Arc<PredictionEngine>,
) -> Result<impl Reply, Infallible> {
    track_performance!("predict_form");

    let (html, status) = match parse_parameters(&fields) {
        Ok(params) => {
            let result = engine.predict(&params);
            info!(
                predicted_output = result.predicted_output,
                band = %result.band,
                "Prediction served"
            );
            (
                render_dashboard(&fields, DashboardOutcome::Prediction(&result)),
                StatusCode::OK,
            )
        }
        Err(errors) => {
            warn!("Rejected dashboard submission: {}", errors);
            (
                render_dashboard(&fields, DashboardOutcome::Errors(&errors)),
                StatusCode::BAD_REQUEST,
            )
        }
    };

    Ok(warp::reply::with_status(warp::reply::html(html), status))
}

async fn predict_json(
    params: MachineParameters,
    engine: Arc<PredictionEngine>,
) -> Result<Response, Infallible> {
    track_performance!("predict_json");

    if let Err(errors) = validate_parameters(&params) {
        warn!("Rejected API prediction: {}", errors);
        let body = ErrorResponse {
            error: "Invalid machine parameters".to_string(),
            details: errors.messages(),
        };
        return Ok(
            warp::reply::with_status(warp::reply::json(&body), StatusCode::BAD_REQUEST)
                .into_response(),
        );
    }

    let result = engine.predict(&params);
    info!(
        predicted_output = result.predicted_output,
        band = %result.band,
        "Prediction served"
    );

    let body = PredictionResponse {
        predicted_output: result.predicted_output,
        band: result.band,
        model: engine.model_name().to_string(),
        parameters: params,
    };
    Ok(warp::reply::json(&body).into_response())
}

async fn submit_contact(fields: HashMap<String, String>) -> Result<impl Reply, Infallible> {
    let (html, status) = match parse_contact(&fields) {
        Ok(submission) => {
            info!(name = %submission.name, "Contact message received");
            debug!(email = %submission.email, "Contact reply address");
            (
                render_contact(Some(&submission.greeting()), None),
                StatusCode::OK,
            )
        }
        Err(errors) => {
            warn!("Rejected contact submission: {}", errors);
            (render_contact(None, Some(&errors)), StatusCode::BAD_REQUEST)
        }
    };

    Ok(warp::reply::with_status(warp::reply::html(html), status))
}

/// Global Error Handler
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found"))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        let mut body = ErrorResponse::new("Malformed request body");
        body.details.push(e.to_string());
        (StatusCode::BAD_REQUEST, body)
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            ErrorResponse::new("Content-Length header required"),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::new("Request body too large"),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorResponse::new("Unsupported content type"),
        )
    } else if err.find::<warp::cors::CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, ErrorResponse::new("Origin not allowed"))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("Method Not Allowed"),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("Internal Server Error"),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
