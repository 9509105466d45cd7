//! Shared account ledger.
//!
//! [`Account`] is a cheap handle around a mutex-guarded balance and payment
//! log. Clones share the same ledger, so every vehicle and any worker thread
//! can hold one. A deduction updates the balance and appends the payment
//! under a single lock acquisition; there is no insufficient-funds check and
//! the balance may go negative.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// One deduction, in log order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub amount: f64,
    pub vendor: String,
    /// Paying vehicle, when the deduction came from a vehicle step.
    pub vehicle: Option<String>,
    /// Simulation tick of the deduction, when known.
    pub tick: Option<u64>,
}

#[derive(Debug)]
struct LedgerState {
    initial_balance: f64,
    balance: f64,
    payments: Vec<Payment>,
}

#[derive(Debug, Clone, Resource)]
pub struct Account {
    inner: Arc<Mutex<LedgerState>>,
}

impl Account {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LedgerState {
                initial_balance,
                balance: initial_balance,
                payments: Vec::new(),
            })),
        }
    }

    /// Deducts `amount` and records it against `vendor`. Returns the new balance.
    pub fn deduct(&self, amount: f64, vendor: impl Into<String>) -> f64 {
        self.apply(Payment {
            amount,
            vendor: vendor.into(),
            vehicle: None,
            tick: None,
        })
    }

    /// Deducts a toll paid by `vehicle` at `tick`. Returns the new balance.
    pub fn charge(&self, vehicle: &str, tick: u64, amount: f64, vendor: &str) -> f64 {
        self.apply(Payment {
            amount,
            vendor: vendor.to_string(),
            vehicle: Some(vehicle.to_string()),
            tick: Some(tick),
        })
    }

    fn apply(&self, payment: Payment) -> f64 {
        let mut state = self.lock();
        state.balance -= payment.amount;
        state.payments.push(payment);
        state.balance
    }

    pub fn balance(&self) -> f64 {
        self.lock().balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.lock().initial_balance
    }

    /// Snapshot of the payment log.
    pub fn payments(&self) -> Vec<Payment> {
        self.lock().payments.clone()
    }

    pub fn payment_count(&self) -> usize {
        self.lock().payments.len()
    }

    pub fn total_paid(&self) -> f64 {
        self.lock().payments.iter().map(|p| p.amount).sum()
    }

    /// Payments made by one vehicle, in log order.
    pub fn payments_for(&self, vehicle: &str) -> Vec<Payment> {
        self.lock()
            .payments
            .iter()
            .filter(|p| p.vehicle.as_deref() == Some(vehicle))
            .cloned()
            .collect()
    }

    // A panic while holding the lock cannot leave a half-applied deduction,
    // so a poisoned ledger is still consistent.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn deduct_records_payment_and_returns_balance() {
        let account = Account::new(100.0);
        assert_eq!(account.deduct(10.0, "V_A"), 90.0);
        assert_eq!(account.balance(), 90.0);
        assert_eq!(
            account.payments(),
            vec![Payment {
                amount: 10.0,
                vendor: "V_A".to_string(),
                vehicle: None,
                tick: None,
            }]
        );
    }

    #[test]
    fn balance_may_go_negative() {
        let account = Account::new(5.0);
        assert_eq!(account.deduct(7.5, "Vendor_A"), -2.5);
        assert_eq!(account.payment_count(), 1);
    }

    #[test]
    fn clones_share_the_ledger() {
        let account = Account::new(50.0);
        let handle = account.clone();
        handle.charge("Vehicle_0", 3, 20.0, "Vendor_B");
        assert_eq!(account.balance(), 30.0);
        assert_eq!(account.payments_for("Vehicle_0").len(), 1);
        assert!(account.payments_for("Vehicle_1").is_empty());
    }

    #[test]
    fn concurrent_deductions_are_not_lost() {
        let account = Account::new(100.0);
        let a = account.clone();
        let b = account.clone();
        let ta = thread::spawn(move || a.deduct(10.0, "V_A"));
        let tb = thread::spawn(move || b.deduct(5.0, "V_B"));
        ta.join().expect("thread a");
        tb.join().expect("thread b");

        assert_eq!(account.balance(), 85.0);
        let mut vendors: Vec<_> = account
            .payments()
            .into_iter()
            .map(|p| (p.vendor, p.amount))
            .collect();
        vendors.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(
            vendors,
            vec![("V_A".to_string(), 10.0), ("V_B".to_string(), 5.0)]
        );
    }

    #[test]
    fn many_threads_balance_matches_log() {
        let account = Account::new(1000.0);
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let account = account.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        account.charge(&format!("Vehicle_{t}"), i, 0.25, "Vendor_A");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker");
        }

        assert_eq!(account.payment_count(), 2000);
        assert_eq!(account.balance(), 1000.0 - 500.0);
        assert_eq!(account.balance(), account.initial_balance() - account.total_paid());
    }
}
