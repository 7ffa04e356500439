use tauri::State;

use crate::{
    activity::HistoryRow,
    timer::{TimerController, TimerSnapshot},
};

use crate::AppState;

fn controller_from_state(state: &State<'_, AppState>) -> TimerController {
    state.timer.clone()
}

#[tauri::command]
pub async fn get_timer_state(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn start_timer(state: State<'_, AppState>) -> Result<TimerSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.start().await)
}

/// The freshly committed row, or `None` when nothing was running.
#[tauri::command]
pub async fn pause_timer(state: State<'_, AppState>) -> Result<Option<HistoryRow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.pause().await)
}

#[tauri::command]
pub async fn reset_timer(state: State<'_, AppState>) -> Result<Option<HistoryRow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.reset().await)
}

#[tauri::command]
pub async fn get_history(state: State<'_, AppState>) -> Result<Vec<HistoryRow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.history_rows().await)
}
