//! Back-office records exchanged with the backend.
//!
//! Decimal amounts travel as strings, exactly as the backend renders them,
//! so no precision is lost on the way through. Foreign keys are primary
//! keys of the referenced record.

mod account;
mod catalog;
mod report;
mod sales;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use account::{NewPassword, NewUser, PasswordResetRequest, UserFields, UserProfile};
pub use catalog::{Container, ContainerKind, Flavour, Product, ProductState};
pub use report::{ReportAccepted, ReportRequest};
pub use sales::{
    Customer, CustomerKind, Order, OrderState, Payment, PaymentMethod, Quota, QuotasByPayment,
};

/// A record exposed as a CRUD collection by the backend.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection endpoint, with leading and trailing slash.
    const COLLECTION: &'static str;

    /// Primary key assigned by the backend; `None` before creation.
    fn pk(&self) -> Option<u64>;

    /// Endpoint of a single record.
    fn detail_endpoint(pk: u64) -> String {
        format!("{}{}/", Self::COLLECTION, pk)
    }
}

macro_rules! impl_resource {
    ($ty:ty, $collection:literal) => {
        impl Resource for $ty {
            const COLLECTION: &'static str = $collection;

            fn pk(&self) -> Option<u64> {
                self.pk
            }
        }
    };
}

impl_resource!(Customer, "/customer/");
impl_resource!(Container, "/container/");
impl_resource!(Flavour, "/flavour/");
impl_resource!(Product, "/product/");
impl_resource!(Order, "/order/");
impl_resource!(Payment, "/payment/");
impl_resource!(Quota, "/quota/");
