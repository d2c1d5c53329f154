// SPDX-License-Identifier: MPL-2.0
use tempfile::tempdir;
use toast_queue::config::{self, Config, QueueConfig};
use toast_queue::notifications::{ToastInput, ToastStore, VirtualScheduler};

#[test]
fn store_uses_capacity_and_durations_from_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config = Config {
        queue: QueueConfig {
            max_toasts: Some(2),
            default_duration_ms: Some(300),
            error_duration_ms: Some(900),
        },
    };
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let clock = VirtualScheduler::new();
    let store = ToastStore::new(loaded.queue_settings(), clock.clone());
    let info = store.add(ToastInput::info("info"));
    let error = store.add(ToastInput::error("error"));
    store.add(ToastInput::success("third").persistent());

    assert_eq!(store.len(), 2);
    assert!(!store.contains(&info), "oldest toast evicted at capacity 2");

    clock.advance_ms(300);
    assert!(store.contains(&error));
    clock.advance_ms(600);
    assert!(!store.contains(&error));

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn hand_written_file_with_negative_values_degrades_gracefully() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[queue]\nmax_toasts = -3\ndefault_duration_ms = -1\n",
    )
    .expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("negative numbers still parse");
    let store = ToastStore::new(loaded.queue_settings(), VirtualScheduler::new());

    store.add(ToastInput::info("dropped"));
    assert!(store.is_empty(), "zero capacity evicts every toast");
}
