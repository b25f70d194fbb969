//! Gateway contracts over the external platform's REST API
//!
//! Every capability the engine consumes is a trait here, implemented over
//! HTTP in `pos-client` and by deterministic fakes in engine tests. The
//! wrappers themselves are thin marshalers; no business rules live behind
//! these boundaries.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::audit::{SimulatedOrderAudit, SimulatedPaymentAudit};
use crate::models::{
    CashEvent, Category, CategoryCreate, ComboDefinition, CouponDefinition, Customer,
    CustomerCreate, DiningOption, Discount, DiscountCreate, DiscountPayload, Employee,
    EmployeeCreate, GiftCard, GiftCardRedemption, Item, ItemCreate, LineItem, LineItemCreate,
    ModificationCreate, ModifierGroup, ModifierGroupCreate, Order, OrderCreate, OrderState,
    OrderType, OrderTypeCreate, PaymentCreate, PaymentRecord, RefundCreate, RefundRecord,
    ServiceChargePayload, SplitShare, TaxRate, TaxRateCreate, Tender,
};

/// Gateway error taxonomy
///
/// `Transport` and `Status` are transient external failures the engine
/// logs and survives; `InvalidPayload` is a caller contract violation and
/// always propagates.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the platform
    #[error("platform returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Resource missing on the platform
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller constructed a structurally invalid payload
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl GatewayError {
    /// Transient failures are logged and skipped; structural ones propagate
    pub fn is_transient(&self) -> bool {
        !matches!(self, GatewayError::InvalidPayload(_))
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Read access to the merchant catalog
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn items(&self) -> GatewayResult<Vec<Item>>;
    async fn categories(&self) -> GatewayResult<Vec<Category>>;
    async fn modifier_groups(&self) -> GatewayResult<Vec<ModifierGroup>>;
    async fn discount_definitions(&self) -> GatewayResult<Vec<Discount>>;
    async fn combo_definitions(&self) -> GatewayResult<Vec<ComboDefinition>>;
    async fn coupon_definitions(&self) -> GatewayResult<Vec<CouponDefinition>>;
    async fn tax_rates(&self) -> GatewayResult<Vec<TaxRate>>;
    async fn tenders(&self) -> GatewayResult<Vec<Tender>>;
    async fn employees(&self) -> GatewayResult<Vec<Employee>>;
    async fn customers(&self) -> GatewayResult<Vec<Customer>>;
    async fn order_types(&self) -> GatewayResult<Vec<OrderType>>;
    async fn gift_cards(&self) -> GatewayResult<Vec<GiftCard>>;
}

/// Write access used by entity seeding only
#[async_trait]
pub trait CatalogAdmin: Send + Sync {
    async fn create_category(&self, payload: CategoryCreate) -> GatewayResult<Category>;
    async fn create_item(&self, payload: ItemCreate) -> GatewayResult<Item>;
    async fn create_modifier_group(
        &self,
        payload: ModifierGroupCreate,
    ) -> GatewayResult<ModifierGroup>;
    async fn create_discount(&self, payload: DiscountCreate) -> GatewayResult<Discount>;
    async fn create_tax_rate(&self, payload: TaxRateCreate) -> GatewayResult<TaxRate>;
    async fn create_employee(&self, payload: EmployeeCreate) -> GatewayResult<Employee>;
    async fn create_customer(&self, payload: CustomerCreate) -> GatewayResult<Customer>;
    async fn create_order_type(&self, payload: OrderTypeCreate) -> GatewayResult<OrderType>;
}

/// Order lifecycle operations
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, payload: OrderCreate) -> GatewayResult<Order>;
    async fn add_line_item(
        &self,
        order_id: &str,
        payload: LineItemCreate,
    ) -> GatewayResult<LineItem>;
    async fn set_dining_option(
        &self,
        order_id: &str,
        dining_option: DiningOption,
    ) -> GatewayResult<()>;
    async fn set_order_type(&self, order_id: &str, order_type_id: &str) -> GatewayResult<()>;
    async fn add_modification(
        &self,
        order_id: &str,
        payload: ModificationCreate,
    ) -> GatewayResult<()>;
    /// Apply a discount; the payload always carries a pre-computed amount
    async fn apply_discount(&self, order_id: &str, payload: DiscountPayload) -> GatewayResult<()>;
    async fn apply_service_charge(
        &self,
        order_id: &str,
        payload: ServiceChargePayload,
    ) -> GatewayResult<()>;
    async fn update_total(&self, order_id: &str, total: i64) -> GatewayResult<()>;
    async fn update_state(&self, order_id: &str, state: OrderState) -> GatewayResult<()>;
    async fn get_order(&self, order_id: &str) -> GatewayResult<Order>;
    /// Ask the platform for its view of the order total
    async fn calculate_total(&self, order_id: &str) -> GatewayResult<i64>;
}

/// Payment settlement operations
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_payment(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord>;
    async fn process_split_payment(
        &self,
        order_id: &str,
        total: i64,
        tip_amount: i64,
        tax_amount: i64,
        shares: Vec<SplitShare>,
    ) -> GatewayResult<Vec<PaymentRecord>>;
    /// Tokenize-and-charge via the card processing integration
    async fn process_card_payment_via_ecommerce(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord>;
}

/// Refund operations
#[async_trait]
pub trait RefundGateway: Send + Sync {
    async fn create_full_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord>;
    async fn create_partial_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord>;
}

/// Gift card operations
#[async_trait]
pub trait GiftCardGateway: Send + Sync {
    async fn fetch_gift_cards(&self) -> GatewayResult<Vec<GiftCard>>;
    /// Redeem up to `amount` from a card; partial redemptions succeed with
    /// a non-zero shortfall
    async fn redeem_gift_card(
        &self,
        card_id: &str,
        amount: i64,
    ) -> GatewayResult<GiftCardRedemption>;
}

/// Cash drawer bookkeeping
#[async_trait]
pub trait CashDrawerGateway: Send + Sync {
    async fn record_cash_payment(&self, event: CashEvent) -> GatewayResult<()>;
}

/// Best-effort local audit mirror
///
/// Implementations must be tolerant of failure; callers log and swallow
/// every error from this trait.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record_simulated_order(&self, record: SimulatedOrderAudit) -> GatewayResult<()>;
    async fn record_simulated_payment(&self, record: SimulatedPaymentAudit) -> GatewayResult<()>;
    async fn mark_refunded(&self, order_id: &str) -> GatewayResult<()>;
    async fn generate_daily_summary(
        &self,
        business_date: &str,
        summary: serde_json::Value,
    ) -> GatewayResult<()>;
}
