//! POS sandbox simulation engine
//!
//! Populates a sandbox merchant and exercises its REST API with
//! statistically plausible restaurant traffic.
//!
//! # Module structure
//!
//! ```text
//! sim-engine/src/
//! ├── core/          # Configuration, errors
//! ├── util/          # Logging, random distributions
//! ├── periods        # Meal periods and the day scheduler
//! ├── discounts/     # Seven-step discount waterfall, combos, coupons
//! ├── loyalty        # Visit-count loyalty tiers
//! ├── order          # In-memory order aggregate
//! ├── assembler      # End-to-end single-order build
//! ├── payments       # Tender routing, splits, gift cards
//! ├── refunds        # Post-batch refund pass
//! ├── orchestrator   # Full-day and on-demand drivers
//! ├── catalog        # Catalog snapshot + cached definition store
//! ├── cache          # Bounded TTL cache
//! ├── data           # Seed catalog loading (dir override or bundled)
//! ├── seeding        # Idempotent entity upsert
//! ├── stats          # Daily statistics accumulator
//! └── audit          # JSONL audit mirror
//! ```

pub mod assembler;
pub mod audit;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod data;
pub mod discounts;
pub mod loyalty;
pub mod order;
pub mod orchestrator;
pub mod payments;
pub mod periods;
pub mod refunds;
pub mod seeding;
pub mod stats;
pub mod util;

pub use assembler::{AssemblyOutcome, OrderAssembler};
pub use catalog::{CatalogSnapshot, DefinitionStore};
pub use core::{Config, SimError, SimResult};
pub use discounts::{DiscountKind, DiscountResolver, ResolverGates};
pub use loyalty::LoyaltyTier;
pub use orchestrator::{DayOrchestrator, RunSummary};
pub use payments::PaymentRouter;
pub use periods::{MealPeriod, MealPeriodScheduler, OrderVolume};
pub use refunds::RefundProcessor;
pub use seeding::EntityGenerator;
pub use stats::DailyStatistics;
pub use util::logger::{init_logger, init_logger_with_file};
