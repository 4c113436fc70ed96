//! Payment entity - settlement for a closed TimeRecord

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Payment processing status.
///
/// `Pending -> Paid | Failed`; `Failed -> Pending` re-queues a retry.
/// `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Database/string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// Parse from the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Whether `self -> to` is a legal transition
    pub fn can_transition(&self, to: PaymentStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Paid)
                | (Self::Pending, Self::Failed)
                | (Self::Failed, Self::Pending)
        )
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Snowflake,
    pub time_record_id: Snowflake,
    /// Amount owed in integer cents
    pub amount_cents: i64,
    /// Human-readable reference, e.g. "PAY-7K2M9QXA"
    pub reference: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new pending Payment
    pub fn new(
        id: Snowflake,
        time_record_id: Snowflake,
        amount_cents: i64,
        reference: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            time_record_id,
            amount_cents,
            reference,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount owed for `worked_minutes` at `hourly_rate_cents`, rounded
    /// down to whole cents.
    pub fn amount_for(worked_minutes: i32, hourly_rate_cents: i64) -> i64 {
        i64::from(worked_minutes) * hourly_rate_cents / 60
    }

    /// Apply a guarded status transition
    pub fn transition(&mut self, to: PaymentStatus) -> Result<(), DomainError> {
        if !self.status.can_transition(to) {
            return Err(DomainError::InvalidPaymentTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Generate a random payment reference code
pub fn generate_payment_reference() -> String {
    use rand::Rng;

    // Unambiguous uppercase alphanumerics (no O/0 or I/1 confusion pairs)
    const CHARSET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    const CODE_LEN: usize = 8;

    let mut rng = rand::thread_rng();
    let code: String = (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("PAY-{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payment() -> Payment {
        Payment::new(
            Snowflake::new(1),
            Snowflake::new(9),
            Payment::amount_for(480, 6200),
            generate_payment_reference(),
        )
    }

    #[test]
    fn test_amount_for_whole_hours() {
        // 8 hours at $62.00/h = $496.00
        assert_eq!(Payment::amount_for(480, 6200), 49600);
    }

    #[test]
    fn test_amount_for_partial_hours_rounds_down() {
        // 450 minutes at $62.00/h = $465.00 exactly
        assert_eq!(Payment::amount_for(450, 6200), 46500);
        // 100 minutes at $55.55/h = 9258.33... -> 9258 cents
        assert_eq!(Payment::amount_for(100, 5555), 9258);
        assert_eq!(Payment::amount_for(0, 6200), 0);
    }

    #[test]
    fn test_new_payment_is_pending() {
        let payment = sample_payment();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount_cents, 49600);
    }

    #[test]
    fn test_settle_and_fail() {
        let mut payment = sample_payment();
        payment.transition(PaymentStatus::Paid).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);

        let mut payment = sample_payment();
        payment.transition(PaymentStatus::Failed).unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    #[test]
    fn test_failed_payment_can_be_requeued() {
        let mut payment = sample_payment();
        payment.transition(PaymentStatus::Failed).unwrap();
        payment.transition(PaymentStatus::Pending).unwrap();
        payment.transition(PaymentStatus::Paid).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
    }

    #[test]
    fn test_paid_is_terminal() {
        let mut payment = sample_payment();
        payment.transition(PaymentStatus::Paid).unwrap();
        for to in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            assert!(matches!(
                payment.transition(to),
                Err(DomainError::InvalidPaymentTransition { .. })
            ));
        }
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_payment_reference();
        assert!(reference.starts_with("PAY-"));
        assert_eq!(reference.len(), 12);
    }
}
