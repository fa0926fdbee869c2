//! Display settings for the planner UI.

use axum::{extract::State, Json};
use serde::Serialize;
use shared::Language;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub sidebar_background: String,
    pub sidebar_foreground: String,
    pub accent_color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettingsResponse {
    pub language: Language,
    pub available_languages: Vec<Language>,
    pub theme: ThemeSettings,
}

/// GET /api/v1/settings/display
pub async fn display(State(state): State<AppState>) -> Json<DisplaySettingsResponse> {
    let display = &state.config.display;
    Json(DisplaySettingsResponse {
        language: display.language,
        available_languages: vec![Language::Pt, Language::It],
        theme: ThemeSettings {
            sidebar_background: display.sidebar_background.clone(),
            sidebar_foreground: display.sidebar_foreground.clone(),
            accent_color: display.accent_color.clone(),
        },
    })
}
