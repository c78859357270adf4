//! HTTP front end: REST endpoints over the todo store plus two HTML pages.

mod handlers;
mod pages;

use anyhow::Result;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::error::TodoError;
use crate::store::TodoStore;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Store shared by every handler. Holding the lock serializes request handling.
pub type SharedStore = Arc<Mutex<Box<dyn TodoStore>>>;

/// Per-request context, inserted by the trace id middleware
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub trace_id: String,
}

#[derive(Clone)]
pub struct WebServer {
    pub store: SharedStore,
    pub listen_addr: String,
}

impl WebServer {
    pub fn new(store: impl TodoStore + 'static, listen_addr: &str) -> Self {
        let store: Box<dyn TodoStore> = Box::new(store);
        Self {
            store: Arc::new(Mutex::new(store)),
            listen_addr: listen_addr.to_string(),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/about", get(pages::about))
            .route("/todolist", get(pages::todo_list))
            .route(
                "/todo",
                post(handlers::create_todo).put(handlers::update_todo),
            )
            .route(
                "/todo/:id",
                get(handlers::get_todo).delete(handlers::delete_todo),
            )
            .with_state(self.clone())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let trace_id = req
                    .extensions()
                    .get::<RequestContext>()
                    .map(|ctx| ctx.trace_id.as_str())
                    .unwrap_or("not found");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    trace_id = %trace_id,
                )
            }))
            .layer(middleware::from_fn(assign_trace_id))
    }

    pub async fn start(self) -> Result<()> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(&self.listen_addr).await?;
        print_banner(&self.listen_addr);
        tracing::info!("Listening on http://{}", self.listen_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

/// axum middleware: give every request a fresh trace id
async fn assign_trace_id(mut req: Request, next: Next) -> Response {
    let trace_id = crate::logging::new_trace_id();
    req.extensions_mut().insert(RequestContext {
        trace_id: trace_id.clone(),
    });

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn print_banner(addr: &str) {
    println!("Server started, available at http://{}", addr);
    println!("about page can be found at http://{}/about", addr);
    println!("todolist page can be found at http://{}/todolist", addr);
    println!("GET /todo/{{id}}, returns single record");
    println!("DELETE /todo/{{id}}, deletes a single record identified by {{id}}");
    println!("PUT /todo, with request body, updates a record");
    println!("POST /todo, with request body, creates a new record");
}

/// Error returned from a handler. Rendered as plain text carrying the trace id.
#[derive(Debug)]
pub struct ApiError {
    context: String,
    error: TodoError,
    trace_id: String,
}

impl ApiError {
    pub fn new(context: impl Into<String>, error: TodoError, ctx: &RequestContext) -> Self {
        Self {
            context: context.into(),
            error,
            trace_id: ctx.trace_id.clone(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = format!(
            "{}, Error returned: {} TraceID: {}",
            self.context, self.error, self.trace_id
        );
        tracing::error!(error_code = self.error.error_code(), "{}", message);
        (self.status_code(), message).into_response()
    }
}
