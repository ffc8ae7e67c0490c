use thiserror::Error;

use slowq_model::ModelError;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("task data unavailable: {0}")]
    DataUnavailable(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("http request failed")]
    Http(#[from] reqwest::Error),

    #[error("cluster answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("missing credentials: {0} is not set")]
    MissingCredentials(&'static str),
}
