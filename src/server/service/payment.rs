//! Payment gateways used at checkout.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::server::{
    error::AppError,
    model::transaction::{PaymentMethod, TransactionStatus},
};

/// One charge against the customer, identified by its transaction reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub reference: String,
    pub email: String,
    pub amount: i64,
}

/// What the payment provider reported for a charge.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeOutcome {
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    pub error_message: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the customer.
    ///
    /// # Returns
    /// - `Ok(ChargeOutcome)` - The provider answered, whatever the charge status
    /// - `Err(AppError)` - The provider could not be reached
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome, AppError>;
}

/// Paystack charge API client.
pub struct PaystackGateway {
    http_client: reqwest::Client,
    secret_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct PaystackChargeBody<'a> {
    email: &'a str,
    amount: i64,
    reference: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct PaystackChargeResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<PaystackChargeData>,
}

#[derive(Deserialize, Debug, Default)]
struct PaystackChargeData {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl PaystackGateway {
    pub fn new(http_client: reqwest::Client, secret_key: String, base_url: String) -> Self {
        Self {
            http_client,
            secret_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome, AppError> {
        let response = self
            .http_client
            .post(format!("{}/charge", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&PaystackChargeBody {
                email: &request.email,
                amount: request.amount,
                reference: &request.reference,
            })
            .send()
            .await?;

        let status = response.status();
        let body: PaystackChargeResponse = response.json().await?;
        tracing::debug!(
            "Paystack answered {} for charge {}",
            status,
            request.reference
        );

        Ok(outcome_from_response(body))
    }
}

fn outcome_from_response(body: PaystackChargeResponse) -> ChargeOutcome {
    let data = body.data.unwrap_or_default();
    let status = match data.status.as_deref() {
        Some("success") => TransactionStatus::Success,
        Some("failed") => TransactionStatus::Failed,
        _ => TransactionStatus::Pending,
    };
    let error_message = match status {
        TransactionStatus::Failed => data.message.or(body.message),
        _ => None,
    };

    ChargeOutcome {
        status,
        payment_method: PaymentMethod::Paystack,
        error_message,
    }
}

/// Settles every charge with a uniformly random status.
pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome, AppError> {
        const STATUSES: [TransactionStatus; 3] = [
            TransactionStatus::Pending,
            TransactionStatus::Success,
            TransactionStatus::Failed,
        ];
        let status = STATUSES[rand::rng().random_range(0..STATUSES.len())];
        tracing::debug!("Simulated {:?} charge for {}", status, request.reference);

        Ok(ChargeOutcome {
            status,
            payment_method: PaymentMethod::Paystack,
            error_message: None,
        })
    }
}

/// Answers every charge with the same outcome, or fails every charge.
#[cfg(test)]
pub struct FixedGateway {
    outcome: Option<ChargeOutcome>,
}

#[cfg(test)]
impl FixedGateway {
    pub fn new(status: TransactionStatus, error_message: Option<&str>) -> Self {
        Self {
            outcome: Some(ChargeOutcome {
                status,
                payment_method: PaymentMethod::Paystack,
                error_message: error_message.map(str::to_string),
            }),
        }
    }

    /// A gateway whose provider is unreachable.
    pub fn unreachable() -> Self {
        Self { outcome: None }
    }
}

#[cfg(test)]
#[async_trait]
impl PaymentGateway for FixedGateway {
    async fn charge(&self, _request: ChargeRequest) -> Result<ChargeOutcome, AppError> {
        self.outcome
            .clone()
            .ok_or_else(|| AppError::InternalError("payment provider unreachable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: Option<&str>, message: Option<&str>) -> PaystackChargeResponse {
        PaystackChargeResponse {
            message: Some("Charge attempted".to_string()),
            data: Some(PaystackChargeData {
                status: status.map(str::to_string),
                message: message.map(str::to_string),
            }),
        }
    }

    #[test]
    fn maps_paystack_statuses() {
        assert_eq!(
            outcome_from_response(response(Some("success"), None)).status,
            TransactionStatus::Success
        );
        assert_eq!(
            outcome_from_response(response(Some("send_otp"), None)).status,
            TransactionStatus::Pending
        );
        assert_eq!(
            outcome_from_response(PaystackChargeResponse::default()).status,
            TransactionStatus::Pending
        );
    }

    #[test]
    fn keeps_failure_message() {
        let outcome = outcome_from_response(response(Some("failed"), Some("Declined")));

        assert_eq!(outcome.status, TransactionStatus::Failed);
        assert_eq!(outcome.error_message.as_deref(), Some("Declined"));
    }

    #[tokio::test]
    async fn simulated_gateway_always_answers() {
        let request = ChargeRequest {
            reference: "rfb_0123456789".to_string(),
            email: "jane@example.com".to_string(),
            amount: 1000,
        };

        for _ in 0..20 {
            let outcome = SimulatedGateway.charge(request.clone()).await.unwrap();
            assert_eq!(outcome.payment_method, PaymentMethod::Paystack);
        }
    }
}
