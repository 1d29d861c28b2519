use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No period in the window produced a single usable day.
    #[error("no prayer times collected between {start} and {end}")]
    EmptyHorizon { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
