//! Tracing setup for the CLI.
//!
//! Human-readable lines go to stderr; `--log-file` adds a daily-rotated JSON
//! file. Anything derived from subprocess output or API responses passes
//! through [`redact`] before it is logged, so GitHub tokens stay out of both.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE: &str = "ghsetup.log";
const REDACTED: &str = "[REDACTED]";

/// Classic (`ghp_`, `gho_`, `ghu_`, `ghs_`, `ghr_`) and fine-grained
/// (`github_pat_`) personal access tokens.
static GITHUB_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:gh[opusr]_[A-Za-z0-9]{16,}|github_pat_[A-Za-z0-9_]{16,})")
        .expect("valid token regex")
});

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a JSON log file, rotated daily. If it
///   cannot be opened, logging continues on stderr with a warning.
pub fn init(verbose: bool, log_file: Option<&Path>) {
    let registry = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer());

    match log_file.map(|path| file_layer(path)) {
        Some(Ok(file)) => registry.with(file).init(),
        Some(Err(e)) => {
            registry.init();
            tracing::warn!(error = %format!("{:#}", e), "File logging disabled");
        }
        None => registry.init(),
    }
}

/// Replaces anything shaped like a GitHub token with `[REDACTED]`.
pub fn redact(text: &str) -> Cow<'_, str> {
    GITHUB_TOKEN_RE.replace_all(text, REDACTED)
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("ghsetup={}", level)
}

fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
}

fn file_layer<S>(path: &Path) -> anyhow::Result<impl Layer<S> + use<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;

    let prefix = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE))
        .to_string_lossy()
        .into_owned();
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(dir)
        .with_context(|| format!("cannot open log file in {}", dir.display()))?;

    Ok(fmt::layer().with_writer(appender).with_ansi(false).json())
}

/// Runs `f` with a debug-level subscriber and returns everything it logged.
#[cfg(test)]
pub(crate) fn capture_debug<F: FnOnce()>(f: F) -> String {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(default_directive(true)))
        .with(
            fmt::layer()
                .with_writer(move || writer.clone())
                .with_ansi(false),
        );
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
