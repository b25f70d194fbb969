use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pos_client::PlatformClient;
use shared::gateway::AuditSink;
use sim_engine::audit::{FileAuditSink, NoopAuditSink};
use sim_engine::cli::{Cli, Command};
use sim_engine::data::SeedData;
use sim_engine::{
    Config, DayOrchestrator, DefinitionStore, EntityGenerator, MealPeriodScheduler, OrderAssembler,
    OrderVolume, PaymentRouter, RefundProcessor, SimError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    sim_engine::init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    let cli = Cli::parse();
    tracing::info!(merchant = %config.merchant_id, "sim-engine starting");

    let client = Arc::new(PlatformClient::new(&config.client_config()));
    let seed = SeedData::load(config.seed_data_dir.as_deref())?;

    match cli.command {
        Command::Seed => {
            let generator = EntityGenerator::new(client.clone(), client.clone());
            let report = generator.seed(&seed).await?;
            tracing::info!(
                created = report.created,
                existing = report.existing,
                failed = report.failed,
                "seed command finished"
            );
        }
        Command::Simulate { date, days } => {
            let start = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|e| SimError::Invalid(format!("bad --date {raw}: {e}")))?,
                None => chrono::Local::now().date_naive(),
            };
            let orchestrator = build_orchestrator(&config, &client, &seed);
            let mut rng = seeded_rng(&config);
            for offset in 0..days.max(1) {
                let date = start + Duration::days(i64::from(offset));
                let summary = orchestrator.run_day(&mut rng, date).await?;
                tracing::info!(
                    date = %summary.business_date,
                    orders = summary.stats.orders_generated,
                    revenue = summary.stats.revenue_total,
                    "day complete"
                );
            }
        }
        Command::OnDemand { count } => {
            let orchestrator = build_orchestrator(&config, &client, &seed);
            let mut rng = seeded_rng(&config);
            let summary = orchestrator.run_on_demand(&mut rng, count).await?;
            tracing::info!(
                orders = summary.stats.orders_generated,
                revenue = summary.stats.revenue_total,
                "on-demand batch complete"
            );
        }
    }

    Ok(())
}

fn seeded_rng(config: &Config) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn build_orchestrator(
    config: &Config,
    client: &Arc<PlatformClient>,
    seed: &SeedData,
) -> DayOrchestrator {
    let audit: Arc<dyn AuditSink> = match &config.audit_path {
        Some(path) => Arc::new(FileAuditSink::new(path)),
        None => Arc::new(NoopAuditSink),
    };

    let router = PaymentRouter::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client.ecommerce_configured(),
    );
    let assembler = OrderAssembler::new(
        client.clone(),
        router,
        audit.clone(),
        config.flat_tax_rate,
        config.merchant_tz(),
    );
    let refunds = RefundProcessor::new(client.clone(), audit.clone());
    let definitions = DefinitionStore::new(client.clone(), seed.fallback_definitions());
    let scheduler = MealPeriodScheduler::new(
        OrderVolume {
            weekday: config.weekday_orders,
            friday: config.friday_orders,
            saturday: config.saturday_orders,
            sunday: config.sunday_orders,
        },
        config.merchant_tz(),
    );

    DayOrchestrator::new(
        client.clone(),
        definitions,
        assembler,
        refunds,
        audit,
        scheduler,
        config.refund_percentage,
    )
}
