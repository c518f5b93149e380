use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::transaction::TransactionDto,
    server::{error::AppError, model::Choice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl Choice for TransactionStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Success, Self::Failed];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Paystack,
}

impl Choice for PaymentMethod {
    const ALL: &'static [Self] = &[Self::Paystack];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Paystack => "PAYSTACK",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLog {
    pub id: i32,
    pub property_name: Option<String>,
    pub reference: String,
    pub property_id: Uuid,
    pub agent_id: i32,
    pub client_id: i32,
    pub amount: i64,
    pub number_of_shares: i32,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransactionLog {
    pub fn from_entity(entity: entity::transaction_log::Model) -> Result<Self, AppError> {
        Ok(Self {
            status: TransactionStatus::from_column("status", &entity.status)?,
            payment_method: PaymentMethod::from_column("payment_method", &entity.payment_method)?,
            id: entity.id,
            property_name: entity.property_name,
            reference: entity.reference,
            property_id: entity.property_id,
            agent_id: entity.agent_id,
            client_id: entity.client_id,
            amount: entity.amount,
            number_of_shares: entity.number_of_shares,
            error_message: entity.error_message_from_payment_service,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> TransactionDto {
        TransactionDto {
            reference: self.reference,
            property_name: self.property_name,
            property: self.property_id,
            status: self.status.as_str().to_string(),
            amount: self.amount,
            number_of_shares: self.number_of_shares,
            created_at: self.created_at,
        }
    }
}

/// A transaction log row built during checkout, written once the cart is settled.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTransactionLogParam {
    pub property_name: String,
    pub reference: String,
    pub property_id: Uuid,
    pub agent_id: i32,
    pub client_id: i32,
    pub amount: i64,
    pub number_of_shares: i32,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    pub error_message: Option<String>,
}
