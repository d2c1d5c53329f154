// SPDX-License-Identifier: MPL-2.0
//! Command-line demo: pushes toasts into a queue backed by real timers and
//! prints every state change until the queue drains.
//!
//! ```text
//! toast_queue [--max N] [--config-dir DIR] [--persistent] [VARIANT:]TITLE...
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use toast_queue::config;
use toast_queue::domain::queue::MaxToasts;
use toast_queue::notifications::{
    QueueSettings, StoreSnapshot, ToastInput, ToastStore, TokioScheduler, Variant,
};
use tokio::sync::Notify;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

struct Flags {
    max: Option<i64>,
    config_dir: Option<String>,
    persistent: bool,
    entries: Vec<String>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let max = args.opt_value_from_str("--max")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let persistent = args.contains("--persistent");
    let entries = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();
    Ok(Flags {
        max,
        config_dir,
        persistent,
        entries,
    })
}

/// `error:Disk full` becomes an error toast; text without a known prefix is info.
fn parse_entry(entry: &str) -> ToastInput {
    match entry.split_once(':') {
        Some((name, title)) => match Variant::from_name(name) {
            Some(variant) => ToastInput::new(variant, title.trim()),
            None => ToastInput::info(entry),
        },
        None => ToastInput::info(entry),
    }
}

fn print_snapshot(snapshot: &StoreSnapshot) {
    let toasts: Vec<String> = snapshot
        .toasts
        .iter()
        .map(|toast| format!("{} [{}] {}", toast.id(), toast.variant(), toast.title()))
        .collect();
    println!("{} | {}", snapshot.announcement, toasts.join(", "));
}

async fn run(
    local: Rc<LocalSet>,
    settings: QueueSettings,
    persistent: bool,
    entries: Vec<String>,
) {
    let store = ToastStore::new(settings, TokioScheduler::new(local));
    let changed = Rc::new(Notify::new());

    let subscription = store.subscribe({
        let changed = Rc::clone(&changed);
        move |snapshot: &StoreSnapshot| {
            print_snapshot(snapshot);
            changed.notify_one();
        }
    });

    for entry in &entries {
        let input = parse_entry(entry);
        store.add(if persistent { input.persistent() } else { input });
    }

    // Persistent toasts (explicit, or a zero default duration) never drain.
    if !persistent {
        while store.list().iter().any(|toast| !toast.is_persistent()) {
            changed.notified().await;
        }
    }

    subscription.unsubscribe();
    store.dispose();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (config, warning) = config::load_with_override(flags.config_dir.map(PathBuf::from));
    if let Some(message) = warning {
        tracing::warn!("{message}");
    }
    let mut settings = config.queue_settings();
    if let Some(max) = flags.max {
        settings = settings.with_max_toasts(MaxToasts::from_signed(max));
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    let local = Rc::new(LocalSet::new());
    local.block_on(
        &runtime,
        run(Rc::clone(&local), settings, flags.persistent, flags.entries),
    );
    ExitCode::SUCCESS
}
