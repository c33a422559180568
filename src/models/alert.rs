use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Severity;

const SYSTEM_ISSUER: &str = "system";

/// 告警发起方；地理围栏告警由系统发起，不记在游客本人名下
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertIssuer {
    System,
    Tourist(String),
}

impl AlertIssuer {
    pub fn as_str(&self) -> &str {
        match self {
            AlertIssuer::System => SYSTEM_ISSUER,
            AlertIssuer::Tourist(id) => id,
        }
    }
}

impl From<String> for AlertIssuer {
    fn from(issuer: String) -> Self {
        if issuer == SYSTEM_ISSUER {
            AlertIssuer::System
        } else {
            AlertIssuer::Tourist(issuer)
        }
    }
}

impl From<AlertIssuer> for String {
    fn from(issuer: AlertIssuer) -> Self {
        issuer.as_str().to_string()
    }
}

impl fmt::Display for AlertIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub target_tourist: String,
    pub issued_by: AlertIssuer,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn from_system(
        target_tourist: &str,
        severity: Severity,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            alert_id: Uuid::new_v4(),
            severity,
            message,
            target_tourist: target_tourist.to_string(),
            issued_by: AlertIssuer::System,
            created_at,
        }
    }
}
