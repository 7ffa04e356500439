fn main() {
    // Only the webview shell needs the Tauri codegen (config, capabilities, icons).
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
