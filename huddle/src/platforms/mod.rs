//! Clients of the platforms notifications are sent to.

pub mod telegram;
pub mod twitter;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("The request could not be completed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram rejected the request: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("The Telegram file could not be downloaded: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("{platform} rejected the request with status {status}: {reason}")]
    Rejected {
        platform: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{0} sent a response that could not be understood.")]
    InvalidResponse(&'static str),
}
