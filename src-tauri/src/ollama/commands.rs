use tauri::State;

use crate::{
    ollama::OllamaClient,
    settings::OllamaSettings,
    AppState,
};

fn client_from_state(state: &State<'_, AppState>) -> OllamaClient {
    OllamaClient::from_settings(&state.settings.ollama())
}

#[tauri::command]
pub async fn check_ollama_status(state: State<'_, AppState>) -> Result<bool, String> {
    let client = client_from_state(&state);
    Ok(client.is_available().await)
}

/// Runs on its own; the timer keeps ticking while the model answers.
#[tauri::command]
pub async fn expand_note(
    state: State<'_, AppState>,
    title: String,
    main_ideas: String,
) -> Result<String, String> {
    let client = client_from_state(&state);
    client
        .expand_note(&title, &main_ideas)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_ollama_settings(state: State<'_, AppState>) -> Result<OllamaSettings, String> {
    Ok(state.settings.stored_ollama())
}

#[tauri::command]
pub fn set_ollama_settings(
    state: State<'_, AppState>,
    settings: OllamaSettings,
) -> Result<(), String> {
    state
        .settings
        .update_ollama(settings)
        .map_err(|e| e.to_string())
}
