//! Logging integration for formkit.
//!
//! Turns the logging part of [`Settings`](crate::settings::Settings) into a
//! [`tracing`] subscriber scoped to the formkit crates, and opens a span per
//! form submission.

use crate::settings::{LogFormat, Settings};

/// Targets a bare `log_level` applies to. Everything else logs at `warn`.
pub const LOG_TARGETS: &[&str] = &[
    "formkit",
    "formkit_core",
    "formkit_forms",
    "formkit_server",
    "formkit_cli",
    "tower_http",
];

/// Builds the filter directive for `settings.log_level`.
///
/// A bare level such as `"debug"` is scoped to [`LOG_TARGETS`], so the
/// formkit crates and request tracing get that level while dependencies stay
/// at `warn`. Anything containing `=` or `,` is a full directive and is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use formkit_core::logging::log_filter;
/// use formkit_core::Settings;
///
/// let settings = Settings { log_level: "debug".into(), ..Settings::default() };
/// assert!(log_filter(&settings).starts_with("warn,formkit=debug,"));
/// ```
pub fn log_filter(settings: &Settings) -> String {
    let level = settings.log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    std::iter::once("warn".to_string())
        .chain(LOG_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global tracing subscriber for a formkit process.
///
/// The filter comes from [`log_filter`]; an unparsable `log_level` falls
/// back to `info` for the formkit targets. The format follows
/// [`Settings::effective_log_format`]. Output goes to stderr so stdout stays
/// free for `validate` and `render` output. Installing twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let directive = log_filter(settings);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        EnvFilter::new(log_filter(&Settings {
            log_level: "info".to_string(),
            ..Settings::default()
        }))
    });
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match settings.effective_log_format() {
        LogFormat::Pretty => builder
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_ok() {
        tracing::debug!(filter = %directive, "logging initialized");
    }
}

/// Creates a tracing span for one form submission.
///
/// # Examples
///
/// ```
/// use formkit_core::logging::submission_span;
///
/// let span = submission_span("User Registration");
/// let _guard = span.enter();
/// tracing::info!("validating");
/// ```
pub fn submission_span(form_title: &str) -> tracing::Span {
    tracing::info_span!("submit", form = form_title)
}
