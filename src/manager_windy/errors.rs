use std::fmt;

/// Why a Windy request produced no data
#[derive(Debug, PartialEq)]
pub enum WindyError {
    /// No credential configured for the capability, no request was made
    Disabled(&'static str),
    /// Transport failure or non-success status
    Remote(String),
    /// Response body did not have the expected shape
    Document(String),
    /// Well-formed response without any time series entries
    NoData,
}

impl fmt::Display for WindyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindyError::Disabled(e) => write!(f, "WindyError::Disabled: {} not configured", e),
            WindyError::Remote(e) => write!(f, "WindyError::Remote: {}", e),
            WindyError::Document(e) => write!(f, "WindyError::Document: {}", e),
            WindyError::NoData => write!(f, "WindyError::NoData: empty time series"),
        }
    }
}
impl From<reqwest::Error> for WindyError {
    fn from(e: reqwest::Error) -> Self {
        WindyError::Remote(e.to_string())
    }
}
impl From<serde_json::Error> for WindyError {
    fn from(e: serde_json::Error) -> Self {
        WindyError::Document(e.to_string())
    }
}
