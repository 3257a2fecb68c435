use thiserror::Error;

/// Internal-exception band (spec §7.4): caught once at the `optimize_schedule`
/// entry point and turned into `{success: false, error}`. Recoverable input
/// anomalies (§7.1/§7.2) never produce this type — those are logged as
/// warnings and the offending item is dropped instead of failing the call.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;
