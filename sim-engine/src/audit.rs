//! Local audit mirror
//!
//! Append-only JSONL file of simulated activity. Strictly best-effort:
//! callers swallow every error this sink returns, so a full disk or a
//! bad path can never interrupt a run.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;
use tokio::io::AsyncWriteExt;

use shared::gateway::{AuditSink, GatewayError, GatewayResult};
use shared::models::{SimulatedOrderAudit, SimulatedPaymentAudit};

/// JSONL file sink
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, value: serde_json::Value) -> GatewayResult<()> {
        let mut line = value.to_string();
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn record_simulated_order(&self, record: SimulatedOrderAudit) -> GatewayResult<()> {
        self.append(json!({ "type": "ORDER", "record": record })).await
    }

    async fn record_simulated_payment(&self, record: SimulatedPaymentAudit) -> GatewayResult<()> {
        self.append(json!({ "type": "PAYMENT", "record": record })).await
    }

    async fn mark_refunded(&self, order_id: &str) -> GatewayResult<()> {
        self.append(json!({ "type": "REFUND", "order_id": order_id })).await
    }

    async fn generate_daily_summary(
        &self,
        business_date: &str,
        summary: serde_json::Value,
    ) -> GatewayResult<()> {
        self.append(json!({
            "type": "DAILY_SUMMARY",
            "business_date": business_date,
            "summary": summary,
        }))
        .await
    }
}

/// Sink used when mirroring is disabled
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
    async fn record_simulated_order(&self, _record: SimulatedOrderAudit) -> GatewayResult<()> {
        Ok(())
    }

    async fn record_simulated_payment(&self, _record: SimulatedPaymentAudit) -> GatewayResult<()> {
        Ok(())
    }

    async fn mark_refunded(&self, _order_id: &str) -> GatewayResult<()> {
        Ok(())
    }

    async fn generate_daily_summary(
        &self,
        _business_date: &str,
        _summary: serde_json::Value,
    ) -> GatewayResult<()> {
        Ok(())
    }
}
