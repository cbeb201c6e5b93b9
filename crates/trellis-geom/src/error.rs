use std::{error::Error as StdError, fmt};

/// Geometry errors. Only produced by parsing; arithmetic never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value could not be parsed from text.
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(s) => write!(f, "parse: {s}"),
        }
    }
}

impl StdError for Error {}

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a comma-separated list of exactly `n` floats.
pub(crate) fn parse_floats(s: &str, n: usize) -> Result<Vec<f64>> {
    let parts = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|e| Error::Parse(format!("{p:?}: {e}")))
        })
        .collect::<Result<Vec<f64>>>()?;
    if parts.len() != n {
        return Err(Error::Parse(format!(
            "expected {n} values, got {} in {s:?}",
            parts.len()
        )));
    }
    Ok(parts)
}
