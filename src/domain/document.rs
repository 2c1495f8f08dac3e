//! Renderer-facing configuration.
//!
//! `DocumentConfig` and `OrganizationConfig` come from the on-disk config file;
//! the request payload is mapped into `DocumentConfig::first_part` before
//! rendering.

use crate::domain::model::{Item, Payload};
use crate::utils::error::{DocgenError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Printed before every amount, e.g. `"JPY "` or `"$"`.
    pub currency: String,
    /// Number of minor-unit digits in amounts (0 for JPY, 2 for USD).
    pub decimal_places: u32,
    /// Percent applied to the subtotal.
    pub tax_rate: u32,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub first_part: Part,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub name: String,
    pub address: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_account: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub title: String,
    pub date: String,
    pub name: String,
    pub items: Vec<LineItem>,
    pub doc_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub title: String,
    pub unit_price: i64,
    pub quantity: u64,
    pub unit: String,
}

impl From<Item> for LineItem {
    fn from(item: Item) -> Self {
        Self {
            title: item.title,
            unit_price: item.unit_price,
            quantity: item.quantity,
            unit: item.unit,
        }
    }
}

impl From<Payload> for Part {
    fn from(payload: Payload) -> Self {
        Self {
            title: payload.title,
            date: payload.date,
            name: payload.name,
            items: payload.items.into_iter().map(LineItem::from).collect(),
            doc_type: payload.doc_type,
        }
    }
}

impl LineItem {
    pub fn amount(&self) -> Result<i64> {
        i64::try_from(self.quantity)
            .ok()
            .and_then(|quantity| self.unit_price.checked_mul(quantity))
            .ok_or_else(|| {
                DocgenError::render(format!("amount overflows for item '{}'", self.title))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl Totals {
    /// Tax is truncated toward zero.
    pub fn compute(part: &Part, tax_rate: u32) -> Result<Self> {
        let mut subtotal: i64 = 0;
        for item in &part.items {
            subtotal = subtotal
                .checked_add(item.amount()?)
                .ok_or_else(|| DocgenError::render("subtotal overflows"))?;
        }

        let tax = subtotal
            .checked_mul(i64::from(tax_rate))
            .map(|scaled| scaled / 100)
            .ok_or_else(|| DocgenError::render("tax overflows"))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| DocgenError::render("total overflows"))?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }
}
