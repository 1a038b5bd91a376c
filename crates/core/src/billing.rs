//! Patient billing: charge and payment history with a derived status.

use serde::Serialize;
use ward_types::NonEmptyText;

/// Payment state of a bill.
///
/// Derived from the charge/payment totals after every mutation, unless a
/// manual [`Bill::set_status`] override is in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BillStatus {
    #[default]
    Pending,
    PartiallyPaid,
    FullyCleared,
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BillStatus::Pending => "Pending",
            BillStatus::PartiallyPaid => "Partially Paid",
            BillStatus::FullyCleared => "Fully Cleared",
        };
        f.write_str(label)
    }
}

/// A single charge line.
#[derive(Debug, Clone, Serialize)]
pub struct Charge {
    pub description: NonEmptyText,
    pub amount: f64,
}

/// A single payment line.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub method: NonEmptyText,
    pub amount: f64,
}

/// An owned snapshot of the full billing state for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct BillSummary {
    pub charges: Vec<Charge>,
    pub payments: Vec<Payment>,
    pub total_charges: f64,
    pub total_payments: f64,
    pub balance: f64,
    pub status: BillStatus,
}

/// Charges and payments for one patient.
///
/// The status is recomputed after every charge or payment mutation:
/// a non-positive balance means fully cleared, otherwise any payment at all
/// means partially paid, otherwise pending. A manual override via
/// [`Bill::set_status`] persists until the next mutation recomputes it.
#[derive(Debug, Default)]
pub struct Bill {
    charges: Vec<Charge>,
    payments: Vec<Payment>,
    status: BillStatus,
}

impl Bill {
    /// Appends a charge and recomputes the status.
    ///
    /// Non-positive amounts are ignored without error.
    pub fn add_charge(&mut self, description: NonEmptyText, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.charges.push(Charge {
            description,
            amount,
        });
        self.recompute_status();
    }

    /// Appends a payment and recomputes the status.
    ///
    /// Non-positive amounts are ignored without error.
    pub fn add_payment(&mut self, method: NonEmptyText, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.payments.push(Payment { method, amount });
        self.recompute_status();
    }

    /// Sum of all charges, recomputed from the full history on every call.
    pub fn total_charges(&self) -> f64 {
        self.charges.iter().map(|c| c.amount).sum()
    }

    /// Sum of all payments, recomputed from the full history on every call.
    pub fn total_payments(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Outstanding amount: total charges minus total payments.
    pub fn balance(&self) -> f64 {
        self.total_charges() - self.total_payments()
    }

    pub fn status(&self) -> BillStatus {
        self.status
    }

    /// Manually overrides the status.
    ///
    /// The override bypasses derivation until the next charge or payment
    /// mutation recomputes the status.
    pub fn set_status(&mut self, status: BillStatus) {
        self.status = status;
    }

    /// An owned snapshot of charges, payments, totals, balance, and status.
    pub fn summary(&self) -> BillSummary {
        BillSummary {
            charges: self.charges.clone(),
            payments: self.payments.clone(),
            total_charges: self.total_charges(),
            total_payments: self.total_payments(),
            balance: self.balance(),
            status: self.status,
        }
    }

    fn recompute_status(&mut self) {
        self.status = if self.balance() <= 0.0 {
            BillStatus::FullyCleared
        } else if self.total_payments() > 0.0 {
            BillStatus::PartiallyPaid
        } else {
            BillStatus::Pending
        };
    }
}
