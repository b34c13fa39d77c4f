//! # Field Value Resolver
//!
//! Turns a placed field into the text printed on the form.
//!
//! Resolution never fails. A field that has nothing to show for this record
//! (an unknown id left over in an old template, a missing value, `day31` in
//! February) resolves to an empty string and prints nothing.
//!
//! ## Formats
//!
//! | Kind    | Example input | Printed      |
//! |---------|---------------|--------------|
//! | money   | -1234.5       | `-1,234.50`  |
//! | kg      | 214.46        | `214`        |
//! | percent | 5             | `5.0`        |
//! | percent | 0             | (empty)      |
//! | month   | 2             | `February`   |
//! | day     | 18.0 + 27.4   | `45`         |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{DayOfMonth, FieldRef, FixedField, ValueFormat};

/// Shown for a day with no (or an all-zero) collection.
pub const NO_COLLECTION: &str = "-";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Externally computed settlement figures for one customer and month.
///
/// Field names follow the invoice resource of the settlement service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettlementRecord {
    pub book_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_name_sinhala: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,

    pub grade1_kg: Option<f64>,
    pub grade2_kg: Option<f64>,
    pub total_kg: Option<f64>,
    pub supply_deduction_percentage: Option<f64>,
    pub supply_deduction_kg: Option<f64>,
    pub payable_kg: Option<f64>,

    pub grade1_rate: Option<f64>,
    pub grade2_rate: Option<f64>,
    pub grade1_amount: Option<f64>,
    pub grade2_amount: Option<f64>,
    pub total_amount: Option<f64>,

    pub last_month_arrears: Option<f64>,
    pub advance_amount: Option<f64>,
    pub loan_amount: Option<f64>,
    pub fertilizer1_amount: Option<f64>,
    pub fertilizer2_amount: Option<f64>,
    pub tea_packets_total: Option<f64>,
    pub agrochemicals_amount: Option<f64>,
    pub transport_deduction: Option<f64>,
    pub stamp_fee: Option<f64>,
    pub other_deductions: Option<f64>,
    pub total_deductions: Option<f64>,
    pub net_amount: Option<f64>,
}

/// One day's collected weight for the settlement's customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCollectionEntry {
    #[serde(rename = "collectionDate", alias = "date")]
    pub date: NaiveDate,
    #[serde(rename = "grade1", alias = "grade1Weight", default)]
    pub grade1_weight: Option<f64>,
    #[serde(rename = "grade2", alias = "grade2Weight", default)]
    pub grade2_weight: Option<f64>,
}

impl DailyCollectionEntry {
    pub fn new(date: NaiveDate, grade1_weight: f64, grade2_weight: f64) -> Self {
        Self {
            date,
            grade1_weight: Some(grade1_weight),
            grade2_weight: Some(grade2_weight),
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.grade1_weight.unwrap_or(0.0) + self.grade2_weight.unwrap_or(0.0)
    }
}

/// Resolve a stored field id. Ids outside the catalog resolve to `""`.
pub fn resolve_id(
    id: &str,
    settlement: &SettlementRecord,
    daily: &[DailyCollectionEntry],
) -> String {
    match FieldRef::parse(id) {
        Some(field) => resolve(field, settlement, daily),
        None => String::new(),
    }
}

/// Resolve a catalog field against one settlement.
pub fn resolve(
    field: FieldRef,
    settlement: &SettlementRecord,
    daily: &[DailyCollectionEntry],
) -> String {
    match field {
        FieldRef::Day(day) => resolve_day(day, settlement, daily),
        FieldRef::Fixed(fixed) => resolve_fixed(fixed, settlement),
    }
}

fn resolve_day(
    day: DayOfMonth,
    settlement: &SettlementRecord,
    daily: &[DailyCollectionEntry],
) -> String {
    let (Some(year), Some(month)) = (settlement.year, settlement.month) else {
        return NO_COLLECTION.to_string();
    };
    let Some(last_day) = last_day_of_month(year, month) else {
        return NO_COLLECTION.to_string();
    };
    if u32::from(day.get()) > last_day {
        return String::new();
    }
    let Some(date) = NaiveDate::from_ymd_opt(year, month, u32::from(day.get())) else {
        return String::new();
    };

    // Later entries win if the service sends the same date twice.
    let total = daily
        .iter()
        .rev()
        .find(|entry| entry.date == date)
        .map(DailyCollectionEntry::total_weight);

    match total {
        Some(kg) if kg > 0.0 => format_kg(kg),
        _ => NO_COLLECTION.to_string(),
    }
}

fn resolve_fixed(field: FixedField, s: &SettlementRecord) -> String {
    use FixedField::*;

    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let number = match field {
        BookNumber => return text(&s.book_number),
        CustomerName => return text(&s.customer_name),
        CustomerNameSinhala => return text(&s.customer_name_sinhala),
        Year => return s.year.map(|y| y.to_string()).unwrap_or_default(),
        Month => return s.month.and_then(month_name).unwrap_or_default().to_string(),

        Grade1Kg => s.grade1_kg,
        Grade2Kg => s.grade2_kg,
        TotalKg => s.total_kg,
        SupplyDeductionKg => s.supply_deduction_kg,
        SupplyDeductionPercent => s.supply_deduction_percentage,
        PayableKg => s.payable_kg,

        Grade1Rate => s.grade1_rate,
        Grade2Rate => s.grade2_rate,
        Grade1Amount => s.grade1_amount,
        Grade2Amount => s.grade2_amount,
        TotalAmount => s.total_amount,
        TotalDeductions => s.total_deductions,
        NetAmount => s.net_amount,
        Advance => s.advance_amount,
        Loan => s.loan_amount,
        Fertilizer1 => s.fertilizer1_amount,
        Fertilizer2 => s.fertilizer2_amount,
        TeaPackets => s.tea_packets_total,
        Transport => s.transport_deduction,
        StampFee => s.stamp_fee,
        OtherDeductions => s.other_deductions,
        Arrears => s.last_month_arrears,
        Agrochemicals => s.agrochemicals_amount,
    };

    let Some(value) = number.filter(|v| v.is_finite()) else {
        return String::new();
    };

    match field.format() {
        ValueFormat::Money => format_money(value),
        ValueFormat::Kg => format_kg(value),
        // No deduction rate prints blank.
        ValueFormat::Percent if value == 0.0 => String::new(),
        ValueFormat::Percent => format!("{:.1}", value),
        ValueFormat::Text | ValueFormat::MonthName => value.to_string(),
    }
}

/// Last day of `month` in `year`, `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt().map(|last| last.day())
}

/// English name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Signed amount with two decimals and comma thousands separators.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Weight rounded to a whole kilogram, no separators.
pub fn format_kg(value: f64) -> String {
    format!("{}", value.round() as i64)
}
