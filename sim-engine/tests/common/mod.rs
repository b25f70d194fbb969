//! Deterministic in-memory fakes of the gateway traits
//!
//! One `FakePlatform` stands in for the whole external platform; tests
//! inspect its state to assert what the engine actually sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shared::gateway::{
    AuditSink, CashDrawerGateway, CatalogAdmin, CatalogProvider, GatewayError, GatewayResult,
    GiftCardGateway, OrderGateway, PaymentGateway, RefundGateway,
};
use shared::models::{
    CashEvent, Category, CategoryCreate, ComboDefinition, CouponDefinition, Customer,
    CustomerCreate, DiningOption, Discount, DiscountCreate, DiscountPayload, Employee,
    EmployeeCreate, GiftCard, GiftCardRedemption, Item, ItemCreate, LineItem, LineItemCreate,
    ModificationCreate, ModifierGroup, ModifierGroupCreate, Order, OrderCreate, OrderState,
    OrderType, OrderTypeCreate, PaymentCreate, PaymentRecord, RefundCreate, RefundRecord,
    ServiceChargePayload, SimulatedOrderAudit, SimulatedPaymentAudit, SplitShare, TaxRate,
    TaxRateCreate, Tender,
};

/// One order as the fake platform tracks it
#[derive(Debug, Clone, Default)]
pub struct FakeOrder {
    pub employee_id: String,
    pub customer_id: Option<String>,
    pub state: OrderState,
    pub dining_option: Option<DiningOption>,
    pub order_type_id: Option<String>,
    pub line_items: Vec<LineItem>,
    pub modifications: Vec<ModificationCreate>,
    pub discounts: Vec<DiscountPayload>,
    pub service_charges: Vec<ServiceChargePayload>,
    pub total: i64,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub orders: HashMap<String, FakeOrder>,
    pub payments: Vec<PaymentRecord>,
    pub refunds: Vec<RefundRecord>,
    pub cash_events: Vec<CashEvent>,
    pub gift_cards: HashMap<String, GiftCard>,
    pub audit_orders: Vec<SimulatedOrderAudit>,
    pub audit_payments: Vec<SimulatedPaymentAudit>,
    pub audit_refund_marks: Vec<String>,
    pub audit_summaries: Vec<String>,
}

/// In-memory platform double
pub struct FakePlatform {
    pub items: Mutex<Vec<Item>>,
    pub categories: Mutex<Vec<Category>>,
    pub modifier_groups: Mutex<Vec<ModifierGroup>>,
    pub discounts: Mutex<Vec<Discount>>,
    pub combos: Vec<ComboDefinition>,
    pub coupons: Vec<CouponDefinition>,
    pub tax_rates: Mutex<Vec<TaxRate>>,
    pub tenders: Vec<Tender>,
    pub employees: Mutex<Vec<Employee>>,
    pub customers: Mutex<Vec<Customer>>,
    pub order_types: Mutex<Vec<OrderType>>,
    pub state: Mutex<FakeState>,
    next_id: AtomicU64,
    /// Failure injection: every add_line_item call errors
    pub fail_line_items: AtomicBool,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            modifier_groups: Mutex::new(Vec::new()),
            discounts: Mutex::new(Vec::new()),
            combos: Vec::new(),
            coupons: Vec::new(),
            tax_rates: Mutex::new(Vec::new()),
            tenders: Vec::new(),
            employees: Mutex::new(Vec::new()),
            customers: Mutex::new(Vec::new()),
            order_types: Mutex::new(Vec::new()),
            state: Mutex::new(FakeState::default()),
            next_id: AtomicU64::new(1),
            fail_line_items: AtomicBool::new(false),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl FakePlatform {
    /// A small but complete merchant: items across categories, three
    /// tenders (cash, credit, gift card), employees, customers, funded
    /// gift cards
    pub fn with_sample_catalog() -> Self {
        let platform = Self::default();

        let categories = ["Breakfast", "Appetizers", "Entrees", "Sides", "Desserts", "Drinks", "Alcohol"];
        *lock(&platform.categories) = categories
            .iter()
            .enumerate()
            .map(|(idx, name)| Category {
                id: format!("cat-{idx}"),
                name: name.to_string(),
                sort_order: idx as i32,
            })
            .collect();

        *lock(&platform.tax_rates) = vec![TaxRate {
            id: "tax-1".to_string(),
            name: "Sales Tax".to_string(),
            rate: 82_500,
            is_default: true,
        }];

        *lock(&platform.modifier_groups) = vec![ModifierGroup {
            id: "mg-1".to_string(),
            name: "Toppings".to_string(),
            min_required: 0,
            max_allowed: Some(2),
            modifiers: vec![
                shared::models::Modifier {
                    id: "mod-1".to_string(),
                    name: "Extra Cheese".to_string(),
                    price: 150,
                },
                shared::models::Modifier {
                    id: "mod-2".to_string(),
                    name: "Bacon".to_string(),
                    price: 200,
                },
            ],
        }];

        let menu = [
            ("Pancakes", "Breakfast", 1099),
            ("Chicken Wings", "Appetizers", 1299),
            ("Nachos", "Appetizers", 1199),
            ("Cheeseburger", "Entrees", 1499),
            ("Salmon", "Entrees", 2199),
            ("Fries", "Sides", 499),
            ("Side Salad", "Sides", 549),
            ("Lava Cake", "Desserts", 899),
            ("Soda", "Drinks", 299),
            ("Lemonade", "Drinks", 399),
            ("IPA", "Alcohol", 699),
        ];
        *lock(&platform.items) = menu
            .iter()
            .enumerate()
            .map(|(idx, (name, category, price))| Item {
                id: format!("item-{idx}"),
                name: name.to_string(),
                price: *price,
                category_id: None,
                category_name: Some(category.to_string()),
                modifier_group_ids: if idx % 3 == 0 {
                    vec!["mg-1".to_string()]
                } else {
                    vec![]
                },
                tax_rate_ids: vec!["tax-1".to_string()],
                hidden: false,
            })
            .collect();

        *lock(&platform.employees) = (0..4)
            .map(|idx| Employee {
                id: format!("emp-{idx}"),
                name: format!("Employee {idx}"),
                role: Some("EMPLOYEE".to_string()),
                pin: None,
            })
            .collect();

        *lock(&platform.customers) = (0..6)
            .map(|idx| Customer {
                id: format!("cust-{idx}"),
                first_name: format!("First{idx}"),
                last_name: format!("Last{idx}"),
                email: None,
                phone: None,
                visit_count: None,
            })
            .collect();

        *lock(&platform.order_types) = vec![
            OrderType {
                id: "ot-1".to_string(),
                label: "Dine In".to_string(),
            },
            OrderType {
                id: "ot-2".to_string(),
                label: "Take Out".to_string(),
            },
            OrderType {
                id: "ot-3".to_string(),
                label: "Delivery".to_string(),
            },
        ];

        let mut platform = platform;
        platform.tenders = vec![
            Tender {
                id: "tender-cash".to_string(),
                label: "Cash".to_string(),
                label_key: Some("com.pos.tender.cash".to_string()),
                enabled: true,
            },
            Tender {
                id: "tender-credit".to_string(),
                label: "Credit Card".to_string(),
                label_key: Some("com.pos.tender.credit_card".to_string()),
                enabled: true,
            },
            Tender {
                id: "tender-gift".to_string(),
                label: "Gift Card".to_string(),
                label_key: Some("com.pos.tender.gift_card".to_string()),
                enabled: true,
            },
        ];

        {
            let mut state = lock(&platform.state);
            for idx in 0..3 {
                state.gift_cards.insert(
                    format!("gc-{idx}"),
                    GiftCard {
                        id: format!("gc-{idx}"),
                        active: true,
                        balance: 2500 * (idx as i64 + 1),
                    },
                );
            }
        }

        platform
    }

    pub fn set_gift_card_balances(&self, balance: i64) {
        let mut state = lock(&self.state);
        for card in state.gift_cards.values_mut() {
            card.balance = balance;
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        lock(&self.state)
    }
}

#[async_trait]
impl CatalogProvider for FakePlatform {
    async fn items(&self) -> GatewayResult<Vec<Item>> {
        Ok(lock(&self.items).clone())
    }
    async fn categories(&self) -> GatewayResult<Vec<Category>> {
        Ok(lock(&self.categories).clone())
    }
    async fn modifier_groups(&self) -> GatewayResult<Vec<ModifierGroup>> {
        Ok(lock(&self.modifier_groups).clone())
    }
    async fn discount_definitions(&self) -> GatewayResult<Vec<Discount>> {
        Ok(lock(&self.discounts).clone())
    }
    async fn combo_definitions(&self) -> GatewayResult<Vec<ComboDefinition>> {
        Ok(self.combos.clone())
    }
    async fn coupon_definitions(&self) -> GatewayResult<Vec<CouponDefinition>> {
        Ok(self.coupons.clone())
    }
    async fn tax_rates(&self) -> GatewayResult<Vec<TaxRate>> {
        Ok(lock(&self.tax_rates).clone())
    }
    async fn tenders(&self) -> GatewayResult<Vec<Tender>> {
        Ok(self.tenders.clone())
    }
    async fn employees(&self) -> GatewayResult<Vec<Employee>> {
        Ok(lock(&self.employees).clone())
    }
    async fn customers(&self) -> GatewayResult<Vec<Customer>> {
        Ok(lock(&self.customers).clone())
    }
    async fn order_types(&self) -> GatewayResult<Vec<OrderType>> {
        Ok(lock(&self.order_types).clone())
    }
    async fn gift_cards(&self) -> GatewayResult<Vec<GiftCard>> {
        Ok(lock(&self.state).gift_cards.values().cloned().collect())
    }
}

#[async_trait]
impl CatalogAdmin for FakePlatform {
    async fn create_category(&self, payload: CategoryCreate) -> GatewayResult<Category> {
        let category = Category {
            id: self.next_id("cat"),
            name: payload.name,
            sort_order: payload.sort_order,
        };
        lock(&self.categories).push(category.clone());
        Ok(category)
    }

    async fn create_item(&self, payload: ItemCreate) -> GatewayResult<Item> {
        let category_name = payload.category_id.as_ref().and_then(|id| {
            lock(&self.categories)
                .iter()
                .find(|c| c.id == *id)
                .map(|c| c.name.clone())
        });
        let item = Item {
            id: self.next_id("item"),
            name: payload.name,
            price: payload.price,
            category_id: payload.category_id,
            category_name,
            modifier_group_ids: payload.modifier_group_ids,
            tax_rate_ids: payload.tax_rate_ids,
            hidden: false,
        };
        lock(&self.items).push(item.clone());
        Ok(item)
    }

    async fn create_modifier_group(
        &self,
        payload: ModifierGroupCreate,
    ) -> GatewayResult<ModifierGroup> {
        let group = ModifierGroup {
            id: self.next_id("mg"),
            name: payload.name,
            min_required: payload.min_required,
            max_allowed: payload.max_allowed,
            modifiers: payload
                .modifiers
                .into_iter()
                .map(|m| shared::models::Modifier {
                    id: self.next_id("mod"),
                    name: m.name,
                    price: m.price,
                })
                .collect(),
        };
        lock(&self.modifier_groups).push(group.clone());
        Ok(group)
    }

    async fn create_discount(&self, payload: DiscountCreate) -> GatewayResult<Discount> {
        let discount = Discount {
            id: self.next_id("disc"),
            name: payload.name,
            percentage: payload.percentage,
            amount: payload.amount,
            discount_type: payload.discount_type,
            scope: payload.scope,
            min_order_amount: payload.min_order_amount,
            categories: payload.categories,
            loyalty_tier: payload.loyalty_tier,
            active_days: payload.active_days,
            start_hour: payload.start_hour,
            end_hour: payload.end_hour,
            active: true,
        };
        lock(&self.discounts).push(discount.clone());
        Ok(discount)
    }

    async fn create_tax_rate(&self, payload: TaxRateCreate) -> GatewayResult<TaxRate> {
        let rate = TaxRate {
            id: self.next_id("tax"),
            name: payload.name,
            rate: payload.rate,
            is_default: payload.is_default,
        };
        lock(&self.tax_rates).push(rate.clone());
        Ok(rate)
    }

    async fn create_employee(&self, payload: EmployeeCreate) -> GatewayResult<Employee> {
        let employee = Employee {
            id: self.next_id("emp"),
            name: payload.name,
            role: payload.role,
            pin: payload.pin,
        };
        lock(&self.employees).push(employee.clone());
        Ok(employee)
    }

    async fn create_customer(&self, payload: CustomerCreate) -> GatewayResult<Customer> {
        let customer = Customer {
            id: self.next_id("cust"),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            visit_count: None,
        };
        lock(&self.customers).push(customer.clone());
        Ok(customer)
    }

    async fn create_order_type(&self, payload: OrderTypeCreate) -> GatewayResult<OrderType> {
        let order_type = OrderType {
            id: self.next_id("ot"),
            label: payload.label,
        };
        lock(&self.order_types).push(order_type.clone());
        Ok(order_type)
    }
}

#[async_trait]
impl OrderGateway for FakePlatform {
    async fn create_order(&self, payload: OrderCreate) -> GatewayResult<Order> {
        let id = self.next_id("order");
        lock(&self.state).orders.insert(
            id.clone(),
            FakeOrder {
                employee_id: payload.employee_id.clone(),
                customer_id: payload.customer_id.clone(),
                ..Default::default()
            },
        );
        Ok(Order {
            id,
            state: OrderState::Open,
            total: 0,
            employee_id: Some(payload.employee_id),
            customer_id: payload.customer_id,
            dining_option: None,
            order_type_id: None,
            line_items: vec![],
        })
    }

    async fn add_line_item(
        &self,
        order_id: &str,
        payload: LineItemCreate,
    ) -> GatewayResult<LineItem> {
        if self.fail_line_items.load(Ordering::Relaxed) {
            return Err(GatewayError::Transport("injected line item failure".to_string()));
        }
        let price = lock(&self.items)
            .iter()
            .find(|i| i.id == payload.item_id)
            .map(|i| i.price)
            .unwrap_or(0);
        let line = LineItem {
            id: self.next_id("line"),
            item_id: payload.item_id,
            name: String::new(),
            price,
            quantity: payload.quantity,
            note: payload.note,
        };
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.line_items.push(line.clone());
        Ok(line)
    }

    async fn set_dining_option(
        &self,
        order_id: &str,
        dining_option: DiningOption,
    ) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.dining_option = Some(dining_option);
        Ok(())
    }

    async fn set_order_type(&self, order_id: &str, order_type_id: &str) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.order_type_id = Some(order_type_id.to_string());
        Ok(())
    }

    async fn add_modification(
        &self,
        order_id: &str,
        payload: ModificationCreate,
    ) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.modifications.push(payload);
        Ok(())
    }

    async fn apply_discount(&self, order_id: &str, payload: DiscountPayload) -> GatewayResult<()> {
        if !payload.is_structurally_valid() {
            return Err(GatewayError::InvalidPayload(
                "bare percentage discount".to_string(),
            ));
        }
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.discounts.push(payload);
        Ok(())
    }

    async fn apply_service_charge(
        &self,
        order_id: &str,
        payload: ServiceChargePayload,
    ) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.service_charges.push(payload);
        Ok(())
    }

    async fn update_total(&self, order_id: &str, total: i64) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.total = total;
        Ok(())
    }

    async fn update_state(&self, order_id: &str, new_state: OrderState) -> GatewayResult<()> {
        let mut state = lock(&self.state);
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        order.state = new_state;
        Ok(())
    }

    async fn get_order(&self, order_id: &str) -> GatewayResult<Order> {
        let state = lock(&self.state);
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        Ok(Order {
            id: order_id.to_string(),
            state: order.state,
            total: order.total,
            employee_id: Some(order.employee_id.clone()),
            customer_id: order.customer_id.clone(),
            dining_option: order.dining_option,
            order_type_id: order.order_type_id.clone(),
            line_items: order.line_items.clone(),
        })
    }

    async fn calculate_total(&self, order_id: &str) -> GatewayResult<i64> {
        let state = lock(&self.state);
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;
        Ok(order.total)
    }
}

#[async_trait]
impl PaymentGateway for FakePlatform {
    async fn process_payment(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord> {
        let record = PaymentRecord {
            id: self.next_id("pay"),
            order_id: order_id.to_string(),
            tender_id: payload.tender_id,
            amount: payload.amount,
            tip_amount: payload.tip_amount,
            tax_amount: payload.tax_amount,
        };
        lock(&self.state).payments.push(record.clone());
        Ok(record)
    }

    async fn process_split_payment(
        &self,
        order_id: &str,
        total: i64,
        tip_amount: i64,
        tax_amount: i64,
        shares: Vec<SplitShare>,
    ) -> GatewayResult<Vec<PaymentRecord>> {
        let mut records = Vec::with_capacity(shares.len());
        let mut allocated = (0, 0, 0);
        for (idx, share) in shares.iter().enumerate() {
            let (amount, tip, tax) = if idx == shares.len() - 1 {
                (
                    total - allocated.0,
                    tip_amount - allocated.1,
                    tax_amount - allocated.2,
                )
            } else {
                (
                    total * share.percentage / 100,
                    tip_amount * share.percentage / 100,
                    tax_amount * share.percentage / 100,
                )
            };
            allocated = (allocated.0 + amount, allocated.1 + tip, allocated.2 + tax);
            let record = PaymentRecord {
                id: self.next_id("pay"),
                order_id: order_id.to_string(),
                tender_id: share.tender_id.clone(),
                amount,
                tip_amount: tip,
                tax_amount: tax,
            };
            lock(&self.state).payments.push(record.clone());
            records.push(record);
        }
        Ok(records)
    }

    async fn process_card_payment_via_ecommerce(
        &self,
        order_id: &str,
        payload: PaymentCreate,
    ) -> GatewayResult<PaymentRecord> {
        self.process_payment(order_id, payload).await
    }
}

#[async_trait]
impl GiftCardGateway for FakePlatform {
    async fn fetch_gift_cards(&self) -> GatewayResult<Vec<GiftCard>> {
        Ok(lock(&self.state).gift_cards.values().cloned().collect())
    }

    async fn redeem_gift_card(
        &self,
        card_id: &str,
        amount: i64,
    ) -> GatewayResult<GiftCardRedemption> {
        let mut state = lock(&self.state);
        let card = state
            .gift_cards
            .get_mut(card_id)
            .ok_or_else(|| GatewayError::NotFound(card_id.to_string()))?;
        let redeemed = amount.min(card.balance).max(0);
        card.balance -= redeemed;
        Ok(GiftCardRedemption {
            success: redeemed > 0,
            amount_redeemed: redeemed,
            remaining_balance: card.balance,
            shortfall: amount - redeemed,
        })
    }
}

#[async_trait]
impl RefundGateway for FakePlatform {
    async fn create_full_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord> {
        let mut state = lock(&self.state);
        let amount = state
            .payments
            .iter()
            .find(|p| p.id == payload.payment_id)
            .map(|p| p.amount)
            .ok_or_else(|| GatewayError::NotFound(payload.payment_id.clone()))?;
        let record = RefundRecord {
            id: self.next_id("refund"),
            order_id: payload.order_id,
            payment_id: payload.payment_id,
            amount,
            reason: payload.reason,
        };
        state.refunds.push(record.clone());
        Ok(record)
    }

    async fn create_partial_refund(&self, payload: RefundCreate) -> GatewayResult<RefundRecord> {
        let amount = payload
            .amount
            .ok_or_else(|| GatewayError::InvalidPayload("partial refund needs amount".to_string()))?;
        let record = RefundRecord {
            id: self.next_id("refund"),
            order_id: payload.order_id,
            payment_id: payload.payment_id,
            amount,
            reason: payload.reason,
        };
        lock(&self.state).refunds.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl CashDrawerGateway for FakePlatform {
    async fn record_cash_payment(&self, event: CashEvent) -> GatewayResult<()> {
        lock(&self.state).cash_events.push(event);
        Ok(())
    }
}

#[async_trait]
impl AuditSink for FakePlatform {
    async fn record_simulated_order(&self, record: SimulatedOrderAudit) -> GatewayResult<()> {
        lock(&self.state).audit_orders.push(record);
        Ok(())
    }

    async fn record_simulated_payment(&self, record: SimulatedPaymentAudit) -> GatewayResult<()> {
        lock(&self.state).audit_payments.push(record);
        Ok(())
    }

    async fn mark_refunded(&self, order_id: &str) -> GatewayResult<()> {
        lock(&self.state).audit_refund_marks.push(order_id.to_string());
        Ok(())
    }

    async fn generate_daily_summary(
        &self,
        business_date: &str,
        _summary: serde_json::Value,
    ) -> GatewayResult<()> {
        lock(&self.state).audit_summaries.push(business_date.to_string());
        Ok(())
    }
}
