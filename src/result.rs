//! Result file parsing.
//!
//! The result file holds `<status code> SPACE <response text>`. Only the first
//! space is a delimiter, so the response text may contain further spaces and
//! newlines and is served back byte for byte.

use axum::http::StatusCode;

use crate::error::ResultError;

/// Lowest status code the result file may request
pub const MIN_STATUS_CODE: i64 = 200;

/// First status code past the accepted range
pub const MAX_STATUS_CODE_EXCLUSIVE: i64 = 600;

/// Parsed content of the result file at the time of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFileContents {
    pub status: StatusCode,
    pub body: String,
}

impl StatusFileContents {
    /// Parse the raw text of the result file.
    ///
    /// # Errors
    /// * `ResultError::Format` if the text contains no space
    /// * `ResultError::InvalidCode` if the part before the first space is not an integer
    /// * `ResultError::InvalidCodeValue` if the integer is outside `200..600`
    pub fn parse(text: &str) -> Result<Self, ResultError> {
        let (code, body) = text
            .split_once(' ')
            .ok_or_else(|| ResultError::Format(text.to_string()))?;

        let code: i64 = code
            .parse()
            .map_err(|_| ResultError::InvalidCode(text.to_string()))?;

        if !(MIN_STATUS_CODE..MAX_STATUS_CODE_EXCLUSIVE).contains(&code) {
            return Err(ResultError::InvalidCodeValue(text.to_string()));
        }

        let status = u16::try_from(code)
            .ok()
            .and_then(|c| StatusCode::from_u16(c).ok())
            .ok_or_else(|| ResultError::InvalidCodeValue(text.to_string()))?;

        Ok(Self {
            status,
            body: body.to_string(),
        })
    }

    /// Decode raw file bytes and parse them. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResultError> {
        Self::parse(&String::from_utf8_lossy(bytes))
    }
}
