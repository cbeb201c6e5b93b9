//! Diagnostics setup.
//!
//! Trellis logs through `tracing`. Applications that already install a
//! subscriber need nothing from here; [`init`] is a convenience for programs
//! and tests that want trellis output on stderr.

use std::{io, str::FromStr};

use tracing::level_filters::LevelFilter;

use crate::{
    Options,
    error::{Error, Result},
};

/// Parse a level name such as `"warn"` or `"trace"`.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|e| Error::Options(format!("bad log level {level:?}: {e}")))
}

/// Install a compact stderr subscriber at `options.log_level`. Returns
/// `Ok(false)` if a global subscriber was already set, which makes repeated
/// calls harmless.
pub fn init(options: &Options) -> Result<bool> {
    let level = parse_level(&options.log_level)?;
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
        .is_ok();
    Ok(installed)
}
