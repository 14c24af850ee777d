//! Customers, orders, and how they are paid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerKind {
    Particular,
    Comerce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    pub name: String,
    pub address: String,
    pub email: String,
    pub cellphone: String,
    #[serde(rename = "type")]
    pub kind: CustomerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    Pending,
    #[serde(rename = "In Quotas")]
    InQuotas,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    pub date: NaiveDate,
    pub products: Vec<u64>,
    pub price: String,
    pub delivery_cost: String,
    pub total_amount: String,
    pub customer: u64,
    pub state: OrderState,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Credit Card")]
    CreditCard,
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
    Cryptocurrency,
}

/// Payment of one order. The transaction number is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<i64>,
    pub amount: String,
    pub method: PaymentMethod,
    pub order: u64,
}

/// One installment of a payment.
///
/// Quotas listed per payment come back as raw rows (`id`, `payment_id`);
/// the aliases accept both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    pub current_quota: i32,
    pub total_quota: i32,
    pub value: String,
    pub date: NaiveDate,
    #[serde(alias = "payment_id")]
    pub payment: u64,
}

/// Body of the quota-by-payment lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotasByPayment {
    pub payment: u64,
}
