use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::preferences::Theme;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThemeBody {
    /// `default`, `excel` or `steel`.
    pub theme: String,
}

/// GET /preferences/theme
#[utoipa::path(
    get,
    path = "/preferences/theme",
    responses(
        (status = 200, description = "Current theme", body = ThemeBody),
    ),
    tag = "preferences"
)]
pub async fn get_theme(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let preferences = state.preferences.clone();
    let theme = web::block(move || preferences.theme()).await??;
    Ok(HttpResponse::Ok().json(ThemeBody {
        theme: theme.to_string(),
    }))
}

/// PUT /preferences/theme
#[utoipa::path(
    put,
    path = "/preferences/theme",
    request_body = ThemeBody,
    responses(
        (status = 200, description = "Theme saved", body = ThemeBody),
        (status = 422, description = "Unknown theme"),
    ),
    tag = "preferences"
)]
pub async fn set_theme(
    state: web::Data<AppState>,
    body: web::Json<ThemeBody>,
) -> Result<HttpResponse, AppError> {
    let theme: Theme = body.theme.parse()?;
    let preferences = state.preferences.clone();
    let theme = web::block(move || preferences.set_theme(theme)).await??;
    Ok(HttpResponse::Ok().json(ThemeBody {
        theme: theme.to_string(),
    }))
}
