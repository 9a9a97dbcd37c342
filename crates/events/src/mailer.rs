use async_trait::async_trait;

use crate::email::EmailError;

/// Something that can deliver a plain-text email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}
