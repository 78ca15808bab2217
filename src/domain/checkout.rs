use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Accepted payment options. `Card` is the pre-selected default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    Crypto,
}

/// Transient checkout input buffer. Lives only while the checkout screen is
/// active; discarded on navigation away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Every text field is required. Reports the first field that is empty
    /// after trimming; this is the only validation the checkout performs.
    pub fn validate(&self) -> Result<(), SessionError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("phone", &self.phone),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(SessionError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Receipt retained for the success screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_number: String,
    pub total_items: u32,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
}

/// `ORD-` followed by the uppercase base-36 rendering of `millis`. The
/// number is cosmetic: derived from the clock, never persisted, and
/// collisions are tolerated.
pub fn order_number(millis: u128) -> String {
    format!("ORD-{}", to_base36(millis))
}

/// Order number for the current wall clock.
pub fn order_number_now() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    order_number(millis)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out.iter().rev().collect()
}
