//! # Field Catalog
//!
//! The fixed vocabulary of data fields an operator can place on a template.
//!
//! Field ids are parsed once into a [`FieldRef`], so the rest of the crate
//! matches on a closed variant instead of inspecting id strings:
//!
//! ```
//! use overprint::catalog::{FieldRef, FixedField};
//!
//! assert_eq!(FieldRef::parse("netAmount"), Some(FieldRef::Fixed(FixedField::NetAmount)));
//! assert_eq!(FieldRef::parse("day07").map(|f| f.id()), Some("day07".to_string()));
//! assert_eq!(FieldRef::parse("day32"), None);
//! ```
//!
//! Day fields (`day01`..`day31`) are generated rather than listed by hand.

use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Number of day fields in the catalog.
pub const MAX_DAY: u8 = 31;

/// How a fixed field's value is formatted for print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Rendered verbatim.
    Text,
    /// Month number rendered as an English month name.
    MonthName,
    /// Rounded integer, no separators.
    Kg,
    /// One decimal place.
    Percent,
    /// Signed, two decimals, thousands separators.
    Money,
}

macro_rules! fixed_fields {
    ($($variant:ident => ($id:literal, $label:literal, $sample:literal, $format:ident)),+ $(,)?) => {
        /// A catalog field backed directly by a settlement attribute.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FixedField {
            $($variant),+
        }

        impl FixedField {
            /// Every fixed field, in catalog order.
            pub const ALL: &'static [FixedField] = &[$(FixedField::$variant),+];

            /// Stable identifier stored in templates.
            pub fn id(self) -> &'static str {
                match self {
                    $(FixedField::$variant => $id),+
                }
            }

            /// Human label shown in the editor.
            pub fn label(self) -> &'static str {
                match self {
                    $(FixedField::$variant => $label),+
                }
            }

            /// Representative value for preview mode.
            pub fn sample_value(self) -> &'static str {
                match self {
                    $(FixedField::$variant => $sample),+
                }
            }

            pub fn format(self) -> ValueFormat {
                match self {
                    $(FixedField::$variant => ValueFormat::$format),+
                }
            }

            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(FixedField::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

fixed_fields! {
    BookNumber => ("bookNumber", "Book Number", "001", Text),
    CustomerName => ("customerName", "Customer Name (English)", "John Doe", Text),
    CustomerNameSinhala => ("customerNameSinhala", "Customer Name (Sinhala)", "ජෝන් ඩෝ", Text),
    Month => ("month", "Month", "January", MonthName),
    Year => ("year", "Year", "2025", Text),
    Grade1Kg => ("grade1Kg", "Grade 1 Kg", "150.50", Kg),
    Grade2Kg => ("grade2Kg", "Grade 2 Kg", "75.25", Kg),
    TotalKg => ("totalKg", "Total Kg", "225.75", Kg),
    SupplyDeductionKg => ("supplyDeductionKg", "Supply Deduction Kg", "11.29", Kg),
    SupplyDeductionPercent => ("supplyDeductionPercent", "Supply Deduction %", "5.0", Percent),
    PayableKg => ("payableKg", "Payable Kg", "214.46", Kg),
    Grade1Rate => ("grade1Rate", "Grade 1 Rate", "120.00", Money),
    Grade2Rate => ("grade2Rate", "Grade 2 Rate", "100.00", Money),
    Grade1Amount => ("grade1Amount", "Grade 1 Amount", "18,060.00", Money),
    Grade2Amount => ("grade2Amount", "Grade 2 Amount", "7,525.00", Money),
    TotalAmount => ("totalAmount", "Gross Amount", "25,585.00", Money),
    TotalDeductions => ("totalDeductions", "Total Deductions", "5,000.00", Money),
    NetAmount => ("netAmount", "Net Amount", "20,585.00", Money),
    Advance => ("advance", "Advance", "2,000.00", Money),
    Loan => ("loan", "Loan", "1,500.00", Money),
    Fertilizer1 => ("fertilizer1", "Fertilizer 1", "500.00", Money),
    Fertilizer2 => ("fertilizer2", "Fertilizer 2", "300.00", Money),
    TeaPackets => ("teaPackets", "Tea Packets", "200.00", Money),
    Transport => ("transport", "Transport", "250.00", Money),
    StampFee => ("stampFee", "Stamp Fee", "50.00", Money),
    OtherDeductions => ("otherDeductions", "Other Deductions", "200.00", Money),
    Arrears => ("arrears", "Arrears (Last Month)", "0.00", Money),
    Agrochemicals => ("agrochemicals", "Agrochemicals", "0.00", Money),
}

/// Fixed fields listed before the day block in the catalog.
const HEADER_FIELDS: usize = 5;

/// A day of the month, 1 through 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub fn new(day: u8) -> Option<Self> {
        (1..=MAX_DAY).contains(&day).then_some(Self(day))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// A parsed field identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRef {
    Fixed(FixedField),
    Day(DayOfMonth),
}

impl FieldRef {
    /// Parse a stored field id. Unknown ids give `None`.
    ///
    /// Day ids must be `day` followed by exactly two digits.
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(fixed) = FixedField::from_id(id) {
            return Some(FieldRef::Fixed(fixed));
        }
        let digits = id.strip_prefix("day")?;
        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day: u8 = digits.parse().ok()?;
        DayOfMonth::new(day).map(FieldRef::Day)
    }

    pub fn id(self) -> String {
        match self {
            FieldRef::Fixed(f) => f.id().to_string(),
            FieldRef::Day(d) => format!("day{:02}", d.get()),
        }
    }

    pub fn label(self) -> String {
        match self {
            FieldRef::Fixed(f) => f.label().to_string(),
            FieldRef::Day(d) => format!("Day {:02}", d.get()),
        }
    }

    pub fn sample_value(self) -> String {
        match self {
            FieldRef::Fixed(f) => f.sample_value().to_string(),
            FieldRef::Day(d) if (d.get() - 1) % 3 == 0 => "45".to_string(),
            FieldRef::Day(_) => "-".to_string(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// One catalog entry, as listed to the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub sample_value: String,
    #[serde(skip)]
    pub field: FieldRef,
}

impl From<FieldRef> for FieldDescriptor {
    fn from(field: FieldRef) -> Self {
        Self {
            id: field.id(),
            label: field.label(),
            sample_value: field.sample_value(),
            field,
        }
    }
}

static CATALOG: LazyLock<Vec<FieldDescriptor>> = LazyLock::new(|| {
    let fixed = FixedField::ALL.iter().map(|f| FieldRef::Fixed(*f));
    let days = (1..=MAX_DAY).filter_map(DayOfMonth::new).map(FieldRef::Day);

    fixed
        .clone()
        .take(HEADER_FIELDS)
        .chain(days)
        .chain(fixed.skip(HEADER_FIELDS))
        .map(FieldDescriptor::from)
        .collect()
});

/// The full field catalog, in display order.
pub fn catalog() -> &'static [FieldDescriptor] {
    &CATALOG
}

/// Look up a catalog entry by id.
pub fn descriptor(id: &str) -> Option<&'static FieldDescriptor> {
    CATALOG.iter().find(|d| d.id == id)
}

/// Font family presets offered by the editor.
///
/// The first entry is the default for templates that never set one.
pub const FONT_FAMILIES: &[(&str, &str)] = &[
    ("Courier New", "'Courier New', Courier, monospace"),
    ("Arial", "Arial, sans-serif"),
    ("Times New Roman", "'Times New Roman', serif"),
    ("Verdana", "Verdana, sans-serif"),
    ("Noto Sans Sinhala", "'Noto Sans Sinhala', sans-serif"),
];

/// Default font family for printed text.
pub const DEFAULT_FONT_FAMILY: &str = FONT_FAMILIES[0].1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(catalog().len(), FixedField::ALL.len() + MAX_DAY as usize);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let ids: HashSet<_> = catalog().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_catalog_order() {
        let ids: Vec<_> = catalog().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids[4], "year");
        assert_eq!(ids[5], "day01");
        assert_eq!(ids[35], "day31");
        assert_eq!(ids[36], "grade1Kg");
        assert_eq!(ids.last(), Some(&"agrochemicals"));
    }

    #[test]
    fn test_every_entry_parses_back() {
        for d in catalog() {
            assert_eq!(FieldRef::parse(&d.id), Some(d.field), "{}", d.id);
        }
    }

    #[test]
    fn test_day_labels_and_samples() {
        let day1 = descriptor("day01").unwrap();
        assert_eq!(day1.label, "Day 01");
        assert_eq!(day1.sample_value, "45");
        assert_eq!(descriptor("day02").unwrap().sample_value, "-");
        assert_eq!(descriptor("day04").unwrap().sample_value, "45");
        assert_eq!(descriptor("day31").unwrap().label, "Day 31");
    }

    #[test]
    fn test_parse_rejects_malformed_days() {
        for id in ["day", "day1", "day00", "day32", "day001", "dayab", "Day01"] {
            assert_eq!(FieldRef::parse(id), None, "{}", id);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(FieldRef::parse("customerPhone"), None);
        assert!(descriptor("customerPhone").is_none());
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let json = serde_json::to_value(descriptor("netAmount").unwrap()).unwrap();
        assert_eq!(json["sampleValue"], "20,585.00");
        assert!(json.get("field").is_none());
    }

    #[test]
    fn test_default_font_family() {
        assert_eq!(DEFAULT_FONT_FAMILY, "'Courier New', Courier, monospace");
    }
}
