//! # Plain-Text Renderer
//!
//! The "Export Text" documents.
//!
//! A quotation prints the client block, one entry per scope line in
//! display order, then the totals. Amounts go through the configured
//! currency formatter.
//!
//! ```text
//! QUOTATION
//! Client:   Al Noor Trading
//! Date:     2026-10-19
//! ...
//!   2. [FLOORING] Floor tiles
//!      Qty: 2 | Material/Finish: Porcelain
//!      Price per SQM: $5.00 | Item Total: $10.00
//! ...
//! Subtotal:     $40.00
//! Tax (10%):    $4.00
//! Grand Total:  $44.00
//! ```
//!
//! A receipt prints every label in English and Arabic:
//!
//! ```text
//! RECEIPT / وصل استلام مبلغ
//! DATE / تاريخ الاستلام:  07/03/2025
//! RECEIVED FROM / وصلنا من السادة:  AL NOOR TRADING
//! FOR TENT RENTAL / وذلك بدل إيجار خيمة
//! ...
//! THIS RECEIPT IS NOT A TAX INVOICE. / هذا الوصل لا يعتبر فاتورة ضريبية.
//! ```

use std::fmt::Write as _;
use std::fs;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::info;

use quote_core::{ReceiptDetails, ReceiptFlag};

use super::{Document, DocumentRenderer, OutputMode, QuotationDocument, RenderOutput};
use crate::error::ExportError;
use crate::state::ConfigState;

const RULE: &str = "------------------------------------------------------------";

const RECEIPT_EVENT: &str = "TRIPOLI KARTING RACE 2025 - SEASON 1 / مهرجان طرابلس للكارتينج";

/// Renders quotations and receipts as UTF-8 text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    config: ConfigState,
}

impl TextRenderer {
    pub fn new(config: ConfigState) -> Self {
        TextRenderer { config }
    }

    /// The document body.
    pub fn render_text(&self, document: &QuotationDocument) -> String {
        let fmt = |v: f64| self.config.format_currency(v);
        let client = &document.client;
        let priced = &document.priced;
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "QUOTATION");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "Client:   {}", or_dash(&client.name));
        let _ = writeln!(out, "Address:  {}", or_dash(&client.address));
        let _ = writeln!(out, "Date:     {}", client.date.format("%Y-%m-%d"));
        let _ = writeln!(out, "Project:  {}", or_dash(&client.project_id));
        let _ = writeln!(out, "{RULE}");

        if priced.lines.is_empty() {
            let _ = writeln!(out, "(no scope items)");
        }

        for line in &priced.lines {
            let item = &line.item;
            let _ = writeln!(
                out,
                "{:>3}. [{}] {}",
                item.id,
                item.category.replacen('_', " ", 1),
                item.description
            );
            let _ = writeln!(
                out,
                "     Qty: {} | Material/Finish: {}",
                or_na(&item.quantity),
                or_dash(&item.material_or_finish)
            );
            let _ = writeln!(
                out,
                "     Price per {}: {} | Item Total: {}",
                item.unit_label(),
                fmt(line.unit_price),
                fmt(line.line_total)
            );
        }

        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{:<14}{}", "Subtotal:", fmt(priced.totals.subtotal));
        let _ = writeln!(
            out,
            "{:<14}{}",
            format!("Tax ({}%):", trim_number(priced.tax_rate.percentage())),
            fmt(priced.totals.tax_amount)
        );
        let _ = writeln!(out, "{:<14}{}", "Grand Total:", fmt(priced.totals.grand_total));

        out
    }

    /// The receipt body.
    pub fn render_receipt_text(&self, receipt: &ReceiptDetails) -> String {
        let check = |flag: ReceiptFlag| if receipt.flag(flag) { "[x]" } else { "[ ]" };
        let zones = receipt.selected_ad_zones();
        let zones = if zones.is_empty() {
            "-".to_string()
        } else {
            zones.iter().map(char::to_string).collect::<Vec<_>>().join(", ")
        };
        let mut out = String::new();

        let _ = writeln!(out, "RECEIPT / وصل استلام مبلغ");
        let _ = writeln!(out, "{RECEIPT_EVENT}");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(
            out,
            "DATE / تاريخ الاستلام:  {}/{}/{}",
            receipt.day, receipt.month, receipt.year
        );
        let _ = writeln!(out, "RECEIVED FROM / وصلنا من السادة:  {}", receipt.received_from_name);
        let _ = writeln!(out, "AMOUNT / مبلغ وقدره:  {}", receipt.amount);
        let _ = writeln!(
            out,
            "FOR {} / وذلك بدل {}",
            receipt.subscription_purpose_en(),
            receipt.subscription_purpose_ar()
        );
        let _ = writeln!(out, "TENT NO. / الخيمة رقم:  {}", receipt.tent_number);
        let _ = writeln!(out, "USAGE PURPOSE / جهة الاستعمال:  {}", receipt.usage_purpose);
        let _ = writeln!(out, "{RULE}");

        let _ = writeln!(out, "ADDITIONAL SERVICES / خدمات اخرى");
        let _ = writeln!(out, "  {} ELECTRICITY / توفير كهرباء", check(ReceiptFlag::ElectricityAvailable));
        let _ = writeln!(out, "  {} CHAIRS / توفير كراسي", check(ReceiptFlag::ChairsAvailable));
        let _ = writeln!(out, "  {} TABLE / توفير طاولات", check(ReceiptFlag::TableAvailable));
        let _ = writeln!(out, "DESCRIPTION / الشرح:  {}", receipt.description);
        let _ = writeln!(out, "{RULE}");

        let _ = writeln!(out, "ADVERTISEMENTS ON TRACK / إعلانات على مسار الحلبة");
        let _ = writeln!(out, "  ZONES:  {zones}");
        let _ = writeln!(out, "  TOTAL QTY / العدد الإجمالي:  {}", receipt.ads_total_quantity);
        let _ = writeln!(out, "  CAR FLAGS / أعلام على السيارات:  {}", receipt.car_flags_count);
        let _ = writeln!(out, "  BANNER FLAGS / أعلام على الأرصفة:  {}", receipt.banner_flags_count);
        let _ = writeln!(out, "NOTES / ملاحظات:  {}", receipt.notes);
        let _ = writeln!(out, "{RULE}");

        let _ = writeln!(out, "RECEIVER'S SIGNATURE / المستلم:  {}", receipt.receiver_name);
        let _ = writeln!(out, "SIGNATURE / الإمضاء:  {}", receipt.payer_name);
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "THIS RECEIPT IS NOT A TAX INVOICE. / هذا الوصل لا يعتبر فاتورة ضريبية.");

        out
    }

    /// Body of either document.
    pub fn render_document(&self, document: &Document) -> String {
        match document {
            Document::Quotation(quotation) => self.render_text(quotation),
            Document::Receipt(receipt) => self.render_receipt_text(receipt),
        }
    }

    /// File name used by [`OutputMode::Save`].
    ///
    /// `quotation-<project>.txt`, or `receipt-<date>[-<tent>].txt`.
    pub fn file_name(document: &Document) -> String {
        match document {
            Document::Quotation(quotation) => match slug(&quotation.client.project_id) {
                Some(slug) => format!("quotation-{slug}.txt"),
                None => "quotation-untitled.txt".to_string(),
            },
            Document::Receipt(receipt) => {
                let date = receipt.receipt_date.format("%Y-%m-%d");
                match slug(&receipt.tent_number) {
                    Some(slug) => format!("receipt-{date}-{slug}.txt"),
                    None => format!("receipt-{date}.txt"),
                }
            }
        }
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, document: &Document, mode: OutputMode) -> Result<RenderOutput, ExportError> {
        let body = self.render_document(document);

        match mode {
            OutputMode::DataUriString => Ok(RenderOutput::DataUri(format!(
                "data:text/plain;charset=utf-8;base64,{}",
                STANDARD.encode(body.as_bytes())
            ))),
            OutputMode::Save => {
                fs::create_dir_all(&self.config.output_dir)?;
                let path = self.config.output_dir.join(Self::file_name(document));
                fs::write(&path, body)?;
                info!(path = %path.display(), document = document.kind(), "document saved");
                Ok(RenderOutput::Saved(path))
            }
        }
    }
}

/// Lower-case ASCII slug, `None` when nothing printable remains.
fn slug(value: &str) -> Option<String> {
    let slug: String = value
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    (!slug.is_empty()).then(|| slug.to_string())
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// 10 → "10", 8.25 → "8.25"
fn trim_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}
