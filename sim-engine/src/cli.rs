//! Operator CLI

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sim-engine",
    about = "Sandbox data generator for the POS platform",
    long_about = "Seeds a sandbox merchant catalog and simulates realistic \
                  day-long streams of restaurant orders, payments, discounts, \
                  and refunds against the platform's REST API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Idempotently seed the merchant catalog from the local seed data")]
    Seed,
    #[command(about = "Simulate one or more realistic days of orders")]
    Simulate {
        #[arg(long, help = "Business date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,
        #[arg(long, default_value_t = 1, help = "Number of consecutive days")]
        days: u32,
    },
    #[command(about = "Generate a fixed number of orders right now")]
    OnDemand {
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
}
