//! Outgoing email.
//!
//! Messages are handed to a `MailSender` on a spawned task, so a slow or failing
//! transport never fails the request that triggered the email.

use std::sync::Arc;

use async_trait::async_trait;

use crate::server::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Transport used to deliver email.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Default transport: writes each message to the log instead of delivering it.
pub struct LogMailSender {
    from: String,
}

impl LogMailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "Email sent:\n{}",
            message.body
        );
        Ok(())
    }
}

/// Keeps every sent message in memory.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailSender {
    sent: tokio::sync::Mutex<Vec<EmailMessage>>,
}

#[cfg(test)]
impl RecordingMailSender {
    pub async fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Waits until at least `count` messages were recorded, giving up after about a second.
    pub async fn wait_for(&self, count: usize) -> Vec<EmailMessage> {
        for _ in 0..100 {
            let sent = self.messages().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.messages().await
    }
}

#[cfg(test)]
#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Cloneable handle that dispatches email in the background.
#[derive(Clone)]
pub struct Mailer {
    sender: Arc<dyn MailSender>,
}

impl Mailer {
    pub fn new(sender: Arc<dyn MailSender>) -> Self {
        Self { sender }
    }

    /// Queues `message` for delivery and returns immediately.
    ///
    /// Delivery failures are logged and otherwise ignored.
    pub fn send(&self, message: EmailMessage) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Err(e) = sender.send(&message).await {
                tracing::error!("Failed to send email to {}: {}", message.to, e);
            }
        });
    }
}
