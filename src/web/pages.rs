use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};
use minijinja::{context, Environment};

use super::{ApiError, RequestContext, WebServer};
use crate::todo::permitted_statuses;

const ABOUT_TEMPLATE: &str = "about.html";
const TODO_LIST_TEMPLATE: &str = "todolist.html";

/// Templates are compiled into the binary; `.html` names turn on auto-escaping.
fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(ABOUT_TEMPLATE, include_str!("../../templates/about.html"))?;
    env.add_template(TODO_LIST_TEMPLATE, include_str!("../../templates/todolist.html"))?;
    Ok(env)
}

fn render_to_string(name: &str, ctx: minijinja::Value) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let template = env.get_template(name)?;
    template.render(ctx)
}

fn render(name: &str, ctx: minijinja::Value, trace_id: &str) -> Response {
    match render_to_string(name, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(template = name, "Unable to render template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unable to execute template file {} TraceID: {}", name, trace_id),
            )
                .into_response()
        }
    }
}

/// GET /about
pub async fn about(Extension(ctx): Extension<RequestContext>) -> Response {
    tracing::info!("path about called");
    render(
        ABOUT_TEMPLATE,
        context! { statuses => permitted_statuses() },
        &ctx.trace_id,
    )
}

/// GET /todolist - current collection as an HTML table
pub async fn todo_list(
    Extension(ctx): Extension<RequestContext>,
    State(state): State<WebServer>,
) -> Result<Response, ApiError> {
    tracing::info!("path todolist called");

    let todos = {
        let store = state.store.lock().await;
        store
            .list_all()
            .map_err(|e| ApiError::new("Unable to load todo listing", e, &ctx))?
    };

    Ok(render(
        TODO_LIST_TEMPLATE,
        context! {
            title => "Todos Page",
            heading => "Current To Do Listing",
            trace_id => &ctx.trace_id,
            todos => todos,
        },
        &ctx.trace_id,
    ))
}
