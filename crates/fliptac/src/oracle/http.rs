//! HTTP transport for tensor inference.

use super::tensor::TensorInference;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct TensorRequest<'a> {
    channels: &'a [Vec<Vec<f32>>],
}

#[derive(Debug, Deserialize)]
struct TensorReply {
    scores: Vec<f32>,
}

/// Posts `{"channels": ...}` to an inference endpoint and reads back
/// `{"scores": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpTensorClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpTensorClient {
    /// Creates a client for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TensorInference for HttpTensorClient {
    #[instrument(skip(self, channels), fields(endpoint = %self.endpoint))]
    async fn infer(&self, channels: &[Vec<Vec<f32>>]) -> anyhow::Result<Vec<f32>> {
        let reply: TensorReply = self
            .http
            .post(&self.endpoint)
            .json(&TensorRequest { channels })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(scores = reply.scores.len(), "Inference reply");
        Ok(reply.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let planes = vec![vec![vec![0.0_f32; 2]; 2]; 3];
        let json = serde_json::to_value(TensorRequest { channels: &planes }).unwrap();
        assert_eq!(json["channels"].as_array().unwrap().len(), 3);
        assert_eq!(json["channels"][0][1].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_reply_rejects_missing_scores() {
        assert!(serde_json::from_str::<TensorReply>(r#"{"q": [1.0]}"#).is_err());
        let reply: TensorReply = serde_json::from_str(r#"{"scores": [0.5, 1.5]}"#).unwrap();
        assert_eq!(reply.scores, vec![0.5, 1.5]);
    }
}
