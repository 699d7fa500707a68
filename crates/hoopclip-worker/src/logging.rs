//! Structured session logging.
//!
//! Every analysis run gets a session id so its log lines can be grouped,
//! whichever output format the subscriber uses.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Install the global tracing subscriber.
///
/// `LOG_FORMAT=json` selects JSON lines; anything else gets colored text.
/// `RUST_LOG` directives are honored on top of the defaults.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in ["hoopclip=info", "hoopclip_tracking=info", "hoopclip_media=info"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Session logger with a stable id and operation name.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    operation: String,
}

impl SessionLogger {
    /// New logger with a fresh random session id.
    pub fn new(operation: &str) -> Self {
        Self::from_string(&Uuid::new_v4().to_string(), operation)
    }

    pub fn from_string(session_id: &str, operation: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Session started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Session progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Session warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Session error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Session completed: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Span carrying the session id, for work spread over several tasks.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "session",
            session_id = %self.session_id,
            operation = %self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = SessionLogger::new("shot_tracking");
        let b = SessionLogger::new("shot_tracking");
        assert_ne!(a.session_id(), b.session_id());
        assert!(Uuid::parse_str(a.session_id()).is_ok());
        assert_eq!(a.operation(), "shot_tracking");
    }

    #[test]
    fn test_from_string() {
        let logger = SessionLogger::from_string("game-7", "render");
        assert_eq!(logger.session_id(), "game-7");
        assert_eq!(logger.operation(), "render");
    }
}
