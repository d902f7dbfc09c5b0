fn main() {
    // Tauri build embeds the app config and Windows resources (icons) for the
    // desktop binary. The library alone needs nothing.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
