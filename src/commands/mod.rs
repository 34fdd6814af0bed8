//! Command dispatch and handlers.

pub mod bootstrap;
pub mod repair;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::logging;

/// Dispatch a parsed command to its handler.
///
/// When `CKAN_REPAIR_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files below it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;

    if let Err(err) = logging::init(&settings.log_level, settings.log_file.as_deref()) {
        eprintln!("Warning: {err}");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let session = settings
        .record_dir
        .as_deref()
        .map(|dir| RecordingSession::new_in(dir, &settings.site_url))
        .transpose()?;

    let ctx = match &session {
        Some(session) => ServiceContext::recording(&settings, session),
        None => ServiceContext::live(&settings),
    }
    .map_err(|e| format!("Failed to build HTTP clients: {e}"))?;

    let result = runtime.block_on(dispatch_with_context(command, &ctx, &settings));

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    match command {
        Command::Repair { dataset_ids, dry_run, limit } => {
            repair::run(ctx, settings, dataset_ids, *dry_run, *limit).await
        }
        Command::Bootstrap { file } => bootstrap::run(ctx, file).await,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
