use thiserror::Error;

#[derive(Error, Debug)]
pub enum EspnError {
    #[error("The request to ESPN could not be completed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ESPN responded with the non-success status {0}.")]
    Status(u16),

    #[error("The response from ESPN is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("The response from ESPN is missing {0}.")]
    MissingData(&'static str),

    #[error("Failed to parse the date {0:?}.")]
    InvalidDate(String),
}
