//! Prediction service trait

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{UnredactionRequest, UnredactionResponse};

/// Anything that can turn masked text into replacement words
#[async_trait]
pub trait UnredactionClient: Send + Sync {
    /// Submit masked text and receive one replacement per masked position
    async fn unredact(&self, request: &UnredactionRequest) -> Result<UnredactionResponse>;
}
