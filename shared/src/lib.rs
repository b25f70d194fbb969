//! Shared contracts for the POS sandbox simulator
//!
//! This crate carries the pieces both sides of the wire agree on:
//!
//! - **Models** (`models`): catalog entities, order/payment/refund payloads
//!   as the external platform represents them
//! - **Gateways** (`gateway`): trait boundaries over the platform's REST
//!   API, implemented by `pos-client` and faked in engine tests
//!
//! All monetary amounts are integers in the currency's minor unit (cents).
//! Externally stored tax rates use basis-point units where 1% = 10,000.

pub mod gateway;
pub mod models;

pub use gateway::{
    AuditSink, CashDrawerGateway, CatalogAdmin, CatalogProvider, GatewayError, GatewayResult,
    GiftCardGateway, OrderGateway, PaymentGateway, RefundGateway,
};
