//! Containers, flavours, and the products made from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of vessel beer is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    Keg,
    Growler,
    Bottle,
}

impl ContainerKind {
    /// Capacities, in liters, the business stocks for this kind.
    pub fn available_liters(&self) -> &'static [f64] {
        match self {
            ContainerKind::Keg => &[20.0, 30.0, 50.0],
            ContainerKind::Growler => &[2.0],
            ContainerKind::Bottle => &[0.5, 1.0, 2.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    #[serde(rename = "type")]
    pub kind: ContainerKind,
    pub liters: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavour {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_lt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductState {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "In Transit")]
    InTransit,
    Empty,
}

/// A filled container of a given flavour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    /// Code engraved on the keg.
    pub code: String,
    pub container: u64,
    pub flavour: u64,
    pub arrived_date: NaiveDate,
    pub price: String,
    pub state: ProductState,
}
