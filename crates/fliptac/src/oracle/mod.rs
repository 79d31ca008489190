//! External move oracles (difficulty 3 and 4).
//!
//! An oracle hands move choice to something outside the process: a tensor
//! inference service or a language model. Oracles never fail a turn. Any
//! failure degrades to a uniformly random legal move and the reason rides
//! along in the [`Selection`](crate::selectors::Selection).

mod http;
mod tensor;
mod text;

pub use http::HttpTensorClient;
pub use tensor::{TensorInference, TensorOracle, encode_board};
pub use text::{MoveReply, TextInference, TextOracle, build_prompt, parse_reply};

use fliptac_core::Coord;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Why an oracle fell back to a random move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OracleError {
    /// An earlier failure disabled the oracle for the rest of the session.
    #[display("Oracle disabled after an earlier failure")]
    Unavailable,

    /// The inference backend returned an error.
    #[display("Inference failed: {}", _0)]
    Inference(String),

    /// The backend did not answer in time.
    #[display("No reply within {:?}", _0)]
    Timeout(Duration),

    /// The reply could not be parsed.
    #[display("Malformed reply: {}", _0)]
    Malformed(String),

    /// The reply named a cell the mover cannot claim.
    #[display("Oracle chose {} which is not a legal move", _0)]
    IllegalMove(Coord),

    /// The score vector does not cover the board.
    #[display("Expected {} scores, got {}", expected, got)]
    ScoreCount {
        /// Cells on the board.
        expected: usize,
        /// Scores received.
        got: usize,
    },
}

impl std::error::Error for OracleError {}

/// Awaits `request`, giving up after `limit`.
///
/// Both the timeout and the request's own error become an [`OracleError`].
pub async fn within<T, E, F>(limit: Duration, request: F) -> Result<T, OracleError>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(limit, request).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(OracleError::Inference(e.to_string())),
        Err(_) => {
            warn!(limit = ?limit, "Oracle request timed out");
            Err(OracleError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_within_passes_value() {
        let result = within(Duration::from_secs(1), async { Ok::<_, String>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_within_maps_error() {
        let result: Result<(), _> =
            within(Duration::from_secs(1), async { Err("backend down".to_string()) }).await;
        assert_eq!(result, Err(OracleError::Inference("backend down".to_string())));
    }

    #[tokio::test]
    async fn test_within_times_out() {
        let limit = Duration::from_millis(20);
        let result: Result<(), _> = within(limit, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, String>(())
        })
        .await;
        assert_eq!(result, Err(OracleError::Timeout(limit)));
    }
}
