use tauri::State;

use crate::{
    models::{NoteData, TagNoteGroup},
    timer::TagTimeResult,
    AppState,
};

#[tauri::command]
pub async fn set_activity_title(
    state: State<'_, AppState>,
    index: usize,
    title: String,
) -> Result<(), String> {
    state
        .timer
        .set_activity_title(index, title)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_activity_tags(
    state: State<'_, AppState>,
    index: usize,
    tags: String,
) -> Result<(), String> {
    state
        .timer
        .set_activity_tags(index, tags)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_note(
    state: State<'_, AppState>,
    index: usize,
    note: NoteData,
) -> Result<(), String> {
    state
        .timer
        .save_note(index, note)
        .await
        .map_err(|e| e.to_string())
}

/// `None` clears the result panel (blank query).
#[tauri::command]
pub async fn search_tag(
    state: State<'_, AppState>,
    query: String,
) -> Result<Option<TagTimeResult>, String> {
    Ok(state.timer.search_tag(&query).await)
}

#[tauri::command]
pub async fn list_notes_by_tag(
    state: State<'_, AppState>,
    filter: Option<String>,
) -> Result<Vec<TagNoteGroup>, String> {
    let filter = filter.unwrap_or_default();
    Ok(state.timer.notes_by_tag(&filter).await)
}
