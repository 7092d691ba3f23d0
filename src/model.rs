// 🧾 Records - Expense, Group and its SubItems
//
// Expense  -> flat record in expenses.json
// Group    -> named collection in groups.json, owns its items
// SubItem  -> lives only inside one Group's items
//
// Totals are derived on every read, never persisted.

use crate::error::{Result, TrackerError};
use crate::store::Record;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY & STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Maintenance,
    Home,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Maintenance, Category::Home, Category::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Maintenance => "maintenance",
            Category::Home => "home",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "maintenance" => Ok(Category::Maintenance),
            "home" => Ok(Category::Home),
            "other" => Ok(Category::Other),
            other => Err(TrackerError::validation(format!(
                "unknown category '{}' (expected maintenance, home or other)",
                other
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Paid,
    Unpaid,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Paid => "paid",
            Status::Unpaid => "unpaid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Status::Paid)
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "paid" => Ok(Status::Paid),
            "unpaid" => Ok(Status::Unpaid),
            other => Err(TrackerError::validation(format!(
                "unknown status '{}' (expected paid or unpaid)",
                other
            ))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AMOUNT COERCION
// ============================================================================

/// Coerce a client-supplied amount (number or numeric string) into a finite f64
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TrackerError::validation(format!(
            "amount '{}' is not a number",
            raw
        ))),
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> serde::de::Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<f64, E> {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(E::custom("amount must be finite"))
            }
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<f64, E> {
            parse_amount(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// Stored amounts are read leniently: null, missing or non-numeric values count as 0
fn deserialize_stored_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct StoredAmountVisitor;

    impl<'de> serde::de::Visitor<'de> for StoredAmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<f64, E> {
            Ok(if v.is_finite() { v } else { 0.0 })
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<f64, E> {
            Ok(parse_amount(v).unwrap_or(0.0))
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: serde::de::Error>(self) -> std::result::Result<f64, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(StoredAmountVisitor)
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::validation(format!("{} is required", field)));
    }
    Ok(())
}

// ============================================================================
// EXPENSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default, deserialize_with = "deserialize_stored_amount")]
    pub amount: f64,
    /// Kept as stored; only input dates are checked
    #[serde(default)]
    pub date: String,
    pub status: Status,
}

/// Every mutable field of an Expense; updates always supply all of them
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseFields {
    pub description: String,
    pub category: Category,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    pub status: Status,
}

impl ExpenseFields {
    pub fn validate(&self) -> Result<()> {
        require_text("description", &self.description)
    }
}

impl Expense {
    pub fn from_fields(id: String, fields: ExpenseFields) -> Self {
        Expense {
            id,
            description: fields.description,
            category: fields.category,
            amount: fields.amount,
            date: fields.date.to_string(),
            status: fields.status,
        }
    }

    /// Full replacement of every mutable field; id and position stay put
    pub fn apply(&mut self, fields: ExpenseFields) {
        self.description = fields.description;
        self.category = fields.category;
        self.amount = fields.amount;
        self.date = fields.date.to_string();
        self.status = fields.status;
    }
}

impl Record for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Totals over the whole expense list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: f64,
    pub paid_total: f64,
    pub unpaid_total: f64,
}

impl ExpenseSummary {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        expenses.iter().fold(ExpenseSummary::default(), |mut acc, e| {
            acc.count += 1;
            acc.total += e.amount;
            if e.status.is_paid() {
                acc.paid_total += e.amount;
            } else {
                acc.unpaid_total += e.amount;
            }
            acc
        })
    }
}

// ============================================================================
// GROUP & SUB-ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_stored_amount")]
    pub amount: f64,
    /// Kept as stored; only input dates are checked
    #[serde(default)]
    pub date: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubItemFields {
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    pub status: Status,
}

impl SubItemFields {
    pub fn validate(&self) -> Result<()> {
        require_text("description", &self.description)
    }
}

impl SubItem {
    pub fn from_fields(id: String, fields: SubItemFields) -> Self {
        SubItem {
            id,
            description: fields.description,
            amount: fields.amount,
            date: fields.date.to_string(),
            status: fields.status,
        }
    }

    pub fn apply(&mut self, fields: SubItemFields) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.date = fields.date.to_string();
        self.status = fields.status;
    }
}

impl Record for SubItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub items: Vec<SubItem>,
    pub created_date: DateTime<Utc>,
}

/// Mutable fields of a Group (items and createdDate are never replaced)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupFields {
    pub name: String,
    pub category: Category,
}

impl GroupFields {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }
}

impl Group {
    pub fn total(&self) -> f64 {
        group_total(self)
    }

    pub fn paid_total(&self) -> f64 {
        group_paid_total(self)
    }

    pub fn unpaid_total(&self) -> f64 {
        group_unpaid_total(self)
    }
}

impl Record for Group {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Sum of every item amount, regardless of status
pub fn group_total(group: &Group) -> f64 {
    group.items.iter().map(|item| item.amount).sum()
}

pub fn group_paid_total(group: &Group) -> f64 {
    group
        .items
        .iter()
        .filter(|item| item.status.is_paid())
        .map(|item| item.amount)
        .sum()
}

pub fn group_unpaid_total(group: &Group) -> f64 {
    group
        .items
        .iter()
        .filter(|item| !item.status.is_paid())
        .map(|item| item.amount)
        .sum()
}

/// Per-group totals as served to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotals {
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub total: f64,
    pub paid_total: f64,
    pub unpaid_total: f64,
}

impl From<&Group> for GroupTotals {
    fn from(group: &Group) -> Self {
        GroupTotals {
            id: group.id.clone(),
            name: group.name.clone(),
            item_count: group.items.len(),
            total: group.total(),
            paid_total: group.paid_total(),
            unpaid_total: group.unpaid_total(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
