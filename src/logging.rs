//! Process-wide logger bootstrap for the binaries.
//!
//! Library code only talks to the `log` facade; a binary calls [`init_from_env`] once at
//! startup to route those records to stderr through `flexi_logger`.

use flexi_logger::{Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

pub const LOG_ENV: &str = "SHIFT_TIMELINE_LOG";
const DEFAULT_LOG_SPEC: &str = "info";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Starts stderr logging with a `flexi_logger` spec such as `"debug"` or
/// `"info, shift_timeline::view=debug"`.
///
/// Repeated calls after a successful start are no-ops. Never panics.
pub fn init_logging(spec: &str) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    LOGGER
        .get_or_try_init(|| {
            let handle = Logger::try_with_str(spec)
                .map_err(|err| format!("invalid log spec `{spec}`: {err}"))?
                .log_to_stderr()
                .format(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;
            info!(
                "logging started spec={spec} version={}",
                env!("CARGO_PKG_VERSION")
            );
            Ok(handle)
        })
        .map(|_| ())
}

/// Reads the log spec from `SHIFT_TIMELINE_LOG`, defaulting to `info`.
pub fn init_from_env() -> Result<(), String> {
    let spec = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_SPEC.to_string());
    init_logging(&spec)
}
