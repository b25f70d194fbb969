//! Employee Model

use serde::{Deserialize, Serialize};

/// Merchant employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Platform role label (e.g. "MANAGER", "EMPLOYEE")
    pub role: Option<String>,
    /// Register PIN, present only on sandbox accounts
    pub pin: Option<String>,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub role: Option<String>,
    pub pin: Option<String>,
}
