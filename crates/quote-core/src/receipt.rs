//! # Payment Receipt
//!
//! The bilingual (English / Arabic) receipt handed to a subscriber after
//! paying for a tent, services or track advertising.
//!
//! ## Field Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field kind            Stored as                                        │
//! │  ──────────            ─────────                                        │
//! │  names, amount,        UPPER-CASED on every edit                        │
//! │  tent, counts, notes                                                    │
//! │                                                                         │
//! │  day / month / year    as typed (defaults from the receipt date)        │
//! │                                                                         │
//! │  subscriptionPurpose   as typed, "ENGLISH / عربي"                        │
//! │                        the English half is upper-cased when printed,    │
//! │                        the Arabic half is left alone                    │
//! │                                                                         │
//! │  services, ad zones    checkboxes                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Fields
// =============================================================================

/// Free-text fields of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ReceiptTextField {
    Day,
    Month,
    Year,
    ReceivedFromName,
    Amount,
    SubscriptionPurpose,
    TentNumber,
    UsagePurpose,
    Description,
    AdsTotalQuantity,
    CarFlagsCount,
    BannerFlagsCount,
    Notes,
    ReceiverName,
    PayerName,
}

impl ReceiptTextField {
    /// Whether edits to this field are stored upper-cased.
    ///
    /// The date parts are numeric and the subscription purpose carries an
    /// Arabic half, so those three keep what was typed.
    pub fn is_uppercased(&self) -> bool {
        !matches!(
            self,
            ReceiptTextField::Day
                | ReceiptTextField::Month
                | ReceiptTextField::Year
                | ReceiptTextField::SubscriptionPurpose
        )
    }
}

/// Checkbox fields of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ReceiptFlag {
    ElectricityAvailable,
    ChairsAvailable,
    TableAvailable,
    AdsZoneA,
    AdsZoneB,
    AdsZoneC,
    AdsZoneD,
    AdsZoneE,
    AdsZoneF,
}

impl ReceiptFlag {
    /// Advertising zones in track order.
    pub const AD_ZONES: [ReceiptFlag; 6] = [
        ReceiptFlag::AdsZoneA,
        ReceiptFlag::AdsZoneB,
        ReceiptFlag::AdsZoneC,
        ReceiptFlag::AdsZoneD,
        ReceiptFlag::AdsZoneE,
        ReceiptFlag::AdsZoneF,
    ];

    /// Zone letter for ad-zone flags.
    pub fn zone_letter(&self) -> Option<char> {
        match self {
            ReceiptFlag::AdsZoneA => Some('A'),
            ReceiptFlag::AdsZoneB => Some('B'),
            ReceiptFlag::AdsZoneC => Some('C'),
            ReceiptFlag::AdsZoneD => Some('D'),
            ReceiptFlag::AdsZoneE => Some('E'),
            ReceiptFlag::AdsZoneF => Some('F'),
            _ => None,
        }
    }
}

// =============================================================================
// Receipt Details
// =============================================================================

/// Everything printed on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptDetails {
    pub day: String,
    pub month: String,
    pub year: String,
    #[ts(as = "String")]
    pub receipt_date: NaiveDate,

    pub received_from_name: String,
    pub amount: String,
    /// "TENT RENTAL / إيجار خيمة"
    pub subscription_purpose: String,
    pub tent_number: String,
    pub usage_purpose: String,

    pub electricity_available: bool,
    pub chairs_available: bool,
    pub table_available: bool,

    pub description: String,

    pub ads_zone_a: bool,
    pub ads_zone_b: bool,
    pub ads_zone_c: bool,
    pub ads_zone_d: bool,
    pub ads_zone_e: bool,
    pub ads_zone_f: bool,
    pub ads_total_quantity: String,
    pub car_flags_count: String,
    pub banner_flags_count: String,

    pub notes: String,
    pub receiver_name: String,
    pub payer_name: String,
}

impl ReceiptDetails {
    /// Blank receipt whose date fields all show `date`.
    pub fn dated(date: NaiveDate) -> Self {
        ReceiptDetails {
            day: date.format("%d").to_string(),
            month: date.format("%m").to_string(),
            year: date.format("%Y").to_string(),
            receipt_date: date,
            received_from_name: String::new(),
            amount: String::new(),
            subscription_purpose: String::new(),
            tent_number: String::new(),
            usage_purpose: String::new(),
            electricity_available: false,
            chairs_available: false,
            table_available: false,
            description: String::new(),
            ads_zone_a: false,
            ads_zone_b: false,
            ads_zone_c: false,
            ads_zone_d: false,
            ads_zone_e: false,
            ads_zone_f: false,
            ads_total_quantity: String::new(),
            car_flags_count: String::new(),
            banner_flags_count: String::new(),
            notes: String::new(),
            receiver_name: String::new(),
            payer_name: String::new(),
        }
    }

    /// Moves the receipt to `date`, overwriting day, month and year.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.day = date.format("%d").to_string();
        self.month = date.format("%m").to_string();
        self.year = date.format("%Y").to_string();
        self.receipt_date = date;
    }

    pub fn text(&self, field: ReceiptTextField) -> &str {
        match field {
            ReceiptTextField::Day => &self.day,
            ReceiptTextField::Month => &self.month,
            ReceiptTextField::Year => &self.year,
            ReceiptTextField::ReceivedFromName => &self.received_from_name,
            ReceiptTextField::Amount => &self.amount,
            ReceiptTextField::SubscriptionPurpose => &self.subscription_purpose,
            ReceiptTextField::TentNumber => &self.tent_number,
            ReceiptTextField::UsagePurpose => &self.usage_purpose,
            ReceiptTextField::Description => &self.description,
            ReceiptTextField::AdsTotalQuantity => &self.ads_total_quantity,
            ReceiptTextField::CarFlagsCount => &self.car_flags_count,
            ReceiptTextField::BannerFlagsCount => &self.banner_flags_count,
            ReceiptTextField::Notes => &self.notes,
            ReceiptTextField::ReceiverName => &self.receiver_name,
            ReceiptTextField::PayerName => &self.payer_name,
        }
    }

    fn text_mut(&mut self, field: ReceiptTextField) -> &mut String {
        match field {
            ReceiptTextField::Day => &mut self.day,
            ReceiptTextField::Month => &mut self.month,
            ReceiptTextField::Year => &mut self.year,
            ReceiptTextField::ReceivedFromName => &mut self.received_from_name,
            ReceiptTextField::Amount => &mut self.amount,
            ReceiptTextField::SubscriptionPurpose => &mut self.subscription_purpose,
            ReceiptTextField::TentNumber => &mut self.tent_number,
            ReceiptTextField::UsagePurpose => &mut self.usage_purpose,
            ReceiptTextField::Description => &mut self.description,
            ReceiptTextField::AdsTotalQuantity => &mut self.ads_total_quantity,
            ReceiptTextField::CarFlagsCount => &mut self.car_flags_count,
            ReceiptTextField::BannerFlagsCount => &mut self.banner_flags_count,
            ReceiptTextField::Notes => &mut self.notes,
            ReceiptTextField::ReceiverName => &mut self.receiver_name,
            ReceiptTextField::PayerName => &mut self.payer_name,
        }
    }

    /// Stores an edit, upper-casing it when the field asks for it.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use quote_core::{ReceiptDetails, ReceiptTextField};
    ///
    /// let mut receipt = ReceiptDetails::dated(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
    /// receipt.set_text(ReceiptTextField::ReceivedFromName, "al noor");
    /// assert_eq!(receipt.received_from_name, "AL NOOR");
    /// assert_eq!(receipt.day, "07");
    /// ```
    pub fn set_text(&mut self, field: ReceiptTextField, value: &str) {
        *self.text_mut(field) = if field.is_uppercased() {
            value.to_uppercase()
        } else {
            value.to_string()
        };
    }

    pub fn flag(&self, flag: ReceiptFlag) -> bool {
        match flag {
            ReceiptFlag::ElectricityAvailable => self.electricity_available,
            ReceiptFlag::ChairsAvailable => self.chairs_available,
            ReceiptFlag::TableAvailable => self.table_available,
            ReceiptFlag::AdsZoneA => self.ads_zone_a,
            ReceiptFlag::AdsZoneB => self.ads_zone_b,
            ReceiptFlag::AdsZoneC => self.ads_zone_c,
            ReceiptFlag::AdsZoneD => self.ads_zone_d,
            ReceiptFlag::AdsZoneE => self.ads_zone_e,
            ReceiptFlag::AdsZoneF => self.ads_zone_f,
        }
    }

    pub fn set_flag(&mut self, flag: ReceiptFlag, checked: bool) {
        let slot = match flag {
            ReceiptFlag::ElectricityAvailable => &mut self.electricity_available,
            ReceiptFlag::ChairsAvailable => &mut self.chairs_available,
            ReceiptFlag::TableAvailable => &mut self.table_available,
            ReceiptFlag::AdsZoneA => &mut self.ads_zone_a,
            ReceiptFlag::AdsZoneB => &mut self.ads_zone_b,
            ReceiptFlag::AdsZoneC => &mut self.ads_zone_c,
            ReceiptFlag::AdsZoneD => &mut self.ads_zone_d,
            ReceiptFlag::AdsZoneE => &mut self.ads_zone_e,
            ReceiptFlag::AdsZoneF => &mut self.ads_zone_f,
        };
        *slot = checked;
    }

    /// English half of the subscription purpose, upper-cased.
    ///
    /// `"tent rental / إيجار خيمة"` → `"TENT RENTAL"`; without a `/` the
    /// whole text is the English half.
    pub fn subscription_purpose_en(&self) -> String {
        self.subscription_purpose
            .split('/')
            .next()
            .unwrap_or("")
            .trim()
            .to_uppercase()
    }

    /// Arabic half of the subscription purpose, empty when there is none.
    pub fn subscription_purpose_ar(&self) -> &str {
        self.subscription_purpose
            .split('/')
            .nth(1)
            .map(str::trim)
            .unwrap_or("")
    }

    /// Letters of the checked advertising zones, in track order.
    pub fn selected_ad_zones(&self) -> Vec<char> {
        ReceiptFlag::AD_ZONES
            .iter()
            .filter(|zone| self.flag(**zone))
            .filter_map(|zone| zone.zone_letter())
            .collect()
    }
}
