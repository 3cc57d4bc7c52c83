use thiserror::Error;

/// Errors raised by the exchange-rate gateway and currency state store.
#[derive(Error, Debug)]
pub enum FxError {
    /// The FX provider could not be reached or returned a non-success status.
    #[error("Failed to fetch exchange rates: {0}")]
    Fetch(String),

    /// The FX provider answered with an unexpected payload shape or an
    /// explicit error result. The existing cache is never replaced on this.
    #[error("Unexpected FX provider payload: {0}")]
    UpstreamPayload(String),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Selection store error: {0}")]
    Selection(String),
}
