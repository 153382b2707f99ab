//! # Quotation State
//!
//! The live quotation being priced: scope items, typed unit prices, tax
//! rate and client block.
//!
//! ## Thread Safety
//! The quotation is wrapped in `Arc<Mutex<T>>`: the form writes to it on
//! every keystroke while export reads it. Listeners are notified after the
//! lock is released so they can read the state back without deadlocking.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quotation State Operations                           │
//! │                                                                         │
//! │  Form Action              Method                   Event                │
//! │  ───────────              ──────                   ─────                │
//! │                                                                         │
//! │  Open pricing modal ────► load() ────────────────► Loaded              │
//! │                                                                         │
//! │  Type a unit price ─────► set_unit_price() ──────► UnitPriceChanged    │
//! │                                                                         │
//! │  Type a tax rate ───────► set_tax_rate_input() ──► TaxRateChanged      │
//! │                                                                         │
//! │  Edit client block ─────► set_client_detail() ───► ClientChanged       │
//! │                                                                         │
//! │  Render ────────────────► summary() ─────────────► (read only,         │
//! │                                                     recomputed)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use quote_core::validation::validate_unique_placeholders;
use quote_core::{
    calculate_totals, price_quotation, ClientDetails, ClientField, CoreError, CoreResult,
    PricedQuotation, QuotationStructure, QuotationTotals, TaxRate, UnitPriceMap, UnitPriority,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Quotation
// =============================================================================

/// Everything the user has entered for one quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub structure: QuotationStructure,
    pub prices: UnitPriceMap,
    pub tax_rate: TaxRate,
    /// Tax rate box content as typed ("10." while typing "10.5").
    pub tax_rate_input: String,
    pub client: ClientDetails,
}

impl Quotation {
    /// Empty quotation dated `date`.
    pub fn new(date: NaiveDate, tax_rate: TaxRate) -> Self {
        Quotation {
            structure: QuotationStructure::default(),
            prices: UnitPriceMap::new(),
            tax_rate,
            tax_rate_input: format_percentage(tax_rate),
            client: ClientDetails::dated(date),
        }
    }

    /// Replaces the scope items and starts every price empty.
    ///
    /// ## Errors
    /// Duplicate or empty price placeholders: accepting them would let two
    /// lines silently share one price.
    pub fn load(&mut self, structure: QuotationStructure) -> CoreResult<()> {
        validate_unique_placeholders(&structure.items)?;

        self.prices = structure
            .items
            .iter()
            .map(|item| (item.price_placeholder.clone(), String::new()))
            .collect();
        self.structure = structure;
        Ok(())
    }

    /// Stores the raw text of a unit price box.
    pub fn set_unit_price(&mut self, placeholder: &str, value: &str) -> CoreResult<()> {
        if !self.structure.has_placeholder(placeholder) {
            return Err(CoreError::UnknownPlaceholder(placeholder.to_string()));
        }
        self.prices.set(placeholder, value);
        Ok(())
    }

    /// Stores the raw tax-rate text and the rate it stands for.
    pub fn set_tax_rate_input(&mut self, input: &str) {
        self.tax_rate_input = input.to_string();
        self.tax_rate = TaxRate::from_percentage_input(input);
    }

    /// Updates one field of the client block.
    ///
    /// Dates use the `YYYY-MM-DD` format of a date input.
    pub fn set_client_detail(&mut self, field: ClientField, value: &str) -> CoreResult<()> {
        match field {
            ClientField::Name => self.client.name = value.to_string(),
            ClientField::Address => self.client.address = value.to_string(),
            ClientField::ProjectId => self.client.project_id = value.to_string(),
            ClientField::Date => {
                self.client.date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
                    ValidationError::InvalidFormat {
                        field: "date".to_string(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }
        Ok(())
    }

    /// Sorted, priced lines and totals, recomputed on every call.
    pub fn summary(&self, priority: &UnitPriority) -> PricedQuotation {
        price_quotation(&self.structure, &self.prices, self.tax_rate, priority)
    }

    /// Totals only.
    pub fn totals(&self) -> QuotationTotals {
        calculate_totals(&self.structure.items, &self.prices, self.tax_rate)
    }
}

/// "10" for 0.10, "8.25" for 0.0825: what the tax box shows initially.
fn format_percentage(rate: TaxRate) -> String {
    let pct = (rate.percentage() * 100.0).round() / 100.0;
    format!("{}", pct)
}

// =============================================================================
// Events
// =============================================================================

/// Emitted after every successful state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuotationEvent {
    Loaded { item_count: usize },
    UnitPriceChanged { placeholder: String },
    TaxRateChanged { tax_rate: TaxRate },
    ClientChanged { field: ClientField },
}

/// Handle returned by [`QuotationState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&QuotationEvent) + Send + Sync>;

// =============================================================================
// Quotation State
// =============================================================================

/// Shared quotation state with change notification.
///
/// ## Why Subscribe?
/// Nothing here caches derived values. The UI re-reads [`Quotation::summary`]
/// when told something changed, which keeps the modal consistent without
/// any invalidation logic.
pub struct QuotationState {
    quotation: Arc<Mutex<Quotation>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl QuotationState {
    pub fn new(quotation: Quotation) -> Self {
        QuotationState {
            quotation: Arc::new(Mutex::new(quotation)),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Executes a function with read access to the quotation.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = state.with_quotation(|q| q.totals());
    /// ```
    pub fn with_quotation<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Quotation) -> R,
    {
        let quotation = self.quotation.lock().expect("Quotation mutex poisoned");
        f(&quotation)
    }

    /// Executes a function with write access to the quotation.
    ///
    /// Prefer the typed mutators below; they also notify listeners.
    pub fn with_quotation_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Quotation) -> R,
    {
        let mut quotation = self.quotation.lock().expect("Quotation mutex poisoned");
        f(&mut quotation)
    }

    pub fn load(&self, structure: QuotationStructure) -> CoreResult<()> {
        let item_count = structure.items.len();
        self.with_quotation_mut(|q| q.load(structure))?;
        debug!(item_count, "quotation loaded");
        self.notify(&QuotationEvent::Loaded { item_count });
        Ok(())
    }

    pub fn set_unit_price(&self, placeholder: &str, value: &str) -> CoreResult<()> {
        self.with_quotation_mut(|q| q.set_unit_price(placeholder, value))?;
        debug!(placeholder, value, "unit price updated");
        self.notify(&QuotationEvent::UnitPriceChanged {
            placeholder: placeholder.to_string(),
        });
        Ok(())
    }

    pub fn set_tax_rate_input(&self, input: &str) -> TaxRate {
        let tax_rate = self.with_quotation_mut(|q| {
            q.set_tax_rate_input(input);
            q.tax_rate
        });
        debug!(input, rate = tax_rate.fraction(), "tax rate updated");
        self.notify(&QuotationEvent::TaxRateChanged { tax_rate });
        tax_rate
    }

    pub fn set_client_detail(&self, field: ClientField, value: &str) -> CoreResult<()> {
        self.with_quotation_mut(|q| q.set_client_detail(field, value))?;
        self.notify(&QuotationEvent::ClientChanged { field });
        Ok(())
    }

    pub fn summary(&self, priority: &UnitPriority) -> PricedQuotation {
        self.with_quotation(|q| q.summary(priority))
    }

    /// Registers a change listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&QuotationEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .expect("Listener mutex poisoned")
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().expect("Listener mutex poisoned");
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn notify(&self, event: &QuotationEvent) {
        // Snapshot so listeners may (un)subscribe while being called
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .expect("Listener mutex poisoned")
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for QuotationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotationState")
            .field("quotation", &self.quotation)
            .finish_non_exhaustive()
    }
}
