use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use oauth2_session_axum::{AuthUser, O2S_REDIRECT_USER, redirect_found};

#[derive(Template)]
#[template(path = "index_user.j2", escape = "html")]
struct IndexTemplateUser<'a> {
    user: &'a AuthUser,
}

#[derive(Template)]
#[template(path = "index_anon.j2", escape = "html")]
struct IndexTemplateAnon;

#[derive(Template)]
#[template(path = "login.j2", escape = "html")]
struct LoginFailedTemplate;

fn render(template: &impl Template) -> Result<Html<String>, (StatusCode, String)> {
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

pub(crate) async fn index(user: Option<AuthUser>) -> Result<Html<String>, (StatusCode, String)> {
    match user {
        Some(u) => {
            tracing::trace!("Rendering index for user {}", u.id);
            render(&IndexTemplateUser { user: &u })
        }
        None => render(&IndexTemplateAnon),
    }
}

pub(crate) async fn login_failed(user: Option<AuthUser>) -> Result<Response, (StatusCode, String)> {
    if user.is_some() {
        return Ok(redirect_found(O2S_REDIRECT_USER));
    }
    Ok(render(&LoginFailedTemplate)?.into_response())
}
