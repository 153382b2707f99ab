//! # Receipt State
//!
//! The receipt being filled in. Same locking shape as
//! [`QuotationState`](super::QuotationState), without listeners: the
//! receipt form re-reads the whole record after each edit.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use quote_core::{ReceiptDetails, ReceiptFlag, ReceiptTextField};
use tracing::debug;

/// Shared receipt state.
#[derive(Debug)]
pub struct ReceiptState {
    receipt: Arc<Mutex<ReceiptDetails>>,
}

impl ReceiptState {
    pub fn new(receipt: ReceiptDetails) -> Self {
        ReceiptState {
            receipt: Arc::new(Mutex::new(receipt)),
        }
    }

    pub fn with_receipt<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ReceiptDetails) -> R,
    {
        let receipt = self.receipt.lock().expect("Receipt mutex poisoned");
        f(&receipt)
    }

    pub fn with_receipt_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ReceiptDetails) -> R,
    {
        let mut receipt = self.receipt.lock().expect("Receipt mutex poisoned");
        f(&mut receipt)
    }

    pub fn snapshot(&self) -> ReceiptDetails {
        self.with_receipt(ReceiptDetails::clone)
    }

    pub fn set_text(&self, field: ReceiptTextField, value: &str) {
        self.with_receipt_mut(|r| r.set_text(field, value));
        debug!(?field, "receipt field updated");
    }

    pub fn set_flag(&self, flag: ReceiptFlag, checked: bool) {
        self.with_receipt_mut(|r| r.set_flag(flag, checked));
        debug!(?flag, checked, "receipt flag updated");
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.with_receipt_mut(|r| r.set_date(date));
        debug!(%date, "receipt date updated");
    }
}
