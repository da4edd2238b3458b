//! PaymentGateway - Subscription billing gateways that call our webhooks

use serde::{Deserialize, Serialize};

/// Payment gateway delivering subscription webhooks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    Asaas,
    AbacatePay,
}

impl PaymentGateway {
    /// Header carrying the hex HMAC-SHA256 signature of the raw body
    pub fn signature_header(&self) -> &'static str {
        match self {
            PaymentGateway::Asaas => "asaas-signature",
            PaymentGateway::AbacatePay => "x-abacatepay-signature",
        }
    }

    /// Secret name holding the shared signing key
    pub fn secret_name(&self) -> &'static str {
        match self {
            PaymentGateway::Asaas => "ASAAS_WEBHOOK_SECRET",
            PaymentGateway::AbacatePay => "ABACATEPAY_WEBHOOK_SECRET",
        }
    }
}

impl std::fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentGateway::Asaas => write!(f, "asaas"),
            PaymentGateway::AbacatePay => write!(f, "abacatepay"),
        }
    }
}

impl std::str::FromStr for PaymentGateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asaas" => Ok(PaymentGateway::Asaas),
            "abacatepay" | "abacate-pay" => Ok(PaymentGateway::AbacatePay),
            _ => Err(format!("Unknown payment gateway: {}", s)),
        }
    }
}
