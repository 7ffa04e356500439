pub mod activity;
pub mod models;
pub mod ollama;
pub mod settings;
pub mod tags;
pub mod timer;
pub mod utils;

pub use activity::{ActivityLog, HistoryRow};
pub use models::{IntervalKind, IntervalRecord, NoteData};
pub use ollama::{NoteExpansionError, OllamaClient};
pub use tags::{compute_tag_time, TagAnnotations};
pub use timer::{History, RunningState, TimerController, TimerState, TimerStatus};

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use log::warn;
    use tauri::{AppHandle, Emitter, Manager, RunEvent};

    use crate::{
        activity::commands::{
            list_notes_by_tag, save_note, search_tag, set_activity_tags, set_activity_title,
        },
        ollama::commands::{
            check_ollama_status, expand_note, get_ollama_settings, set_ollama_settings,
        },
        settings::SettingsStore,
        timer::{
            commands::{get_history, get_timer_state, pause_timer, reset_timer, start_timer},
            TimerController, TimerEvent, TimerEventSink,
        },
        utils::init_logging,
    };

    pub struct AppState {
        pub(crate) timer: TimerController,
        pub(crate) settings: SettingsStore,
    }

    /// Forwards controller notifications to the webview.
    struct WebviewEvents(AppHandle);

    impl TimerEventSink for WebviewEvents {
        fn emit(&self, event: TimerEvent) {
            if let Err(err) = self.0.emit(event.name(), &event) {
                warn!("failed to emit {}: {err}", event.name());
            }
        }
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let verbose = std::env::var("TAGTIMER_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        init_logging(verbose);

        log::info!("TagTimer starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let config_dir = app
                        .path()
                        .app_config_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&config_dir)?;

                    let settings_store = SettingsStore::new(config_dir.join("settings.json"))?;
                    let ollama = settings_store.ollama();
                    log::info!("Note expansion via {} ({})", ollama.base_url, ollama.model);

                    let events = Arc::new(WebviewEvents(app.handle().clone()));
                    app.manage(AppState {
                        timer: TimerController::new(events),
                        settings: settings_store,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                get_timer_state,
                start_timer,
                pause_timer,
                reset_timer,
                get_history,
                set_activity_title,
                set_activity_tags,
                save_note,
                search_tag,
                list_notes_by_tag,
                check_ollama_status,
                expand_note,
                get_ollama_settings,
                set_ollama_settings,
            ])
            .build(tauri::generate_context!())
            .expect("error while building tauri application")
            .run(|app, event| {
                if let (RunEvent::Exit, Some(state)) = (event, app.try_state::<AppState>()) {
                    tauri::async_runtime::block_on(state.timer.shutdown());
                }
            });
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
