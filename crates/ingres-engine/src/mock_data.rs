//! Deterministic stand-in for groundwater figures.
//!
//! Values are derived from a hash of the query, so the same question always yields
//! the same numbers and changing any field changes them.

use ingres_core::{Component, Period};
use serde::{Deserialize, Serialize};

/// Unit every figure is reported in (million cubic metres).
pub const UNIT: &str = "MCM";

const NON_MONSOON_FACTOR: f64 = 0.6;
const ANNUAL_FACTOR: f64 = 1.6;

/// One figure in a data reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Display name, e.g. `Pune recharge (Monsoon)`
    pub name: String,
    /// Value with two decimals
    pub value: String,
    /// Unit of `value`
    pub unit: String,
    /// Year label of the query
    pub year: String,
    /// Season the figure covers
    pub period: Period,
}

impl DataRecord {
    fn new(location: &str, component: Component, year: &str, period: Period, value: f64) -> Self {
        let label = match period {
            Period::Monsoon => "Monsoon",
            Period::NonMonsoon => "Non-Monsoon",
            Period::Annual => "Annual Total",
        };
        Self {
            name: format!("{location} {component} ({label})"),
            value: format!("{value:.2}"),
            unit: UNIT.to_owned(),
            year: year.to_owned(),
            period,
        }
    }

    /// Numeric value, zero if it cannot be parsed.
    pub fn numeric_value(&self) -> f64 {
        self.value.parse().unwrap_or(0.0)
    }
}

/// 32-bit rolling string hash over UTF-16 code units, as a magnitude.
pub fn query_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Records for a query: monsoon and non-monsoon figures plus the annual total for
/// annual queries, otherwise only the requested season.
pub fn generate(location: &str, component: Component, year: &str, period: Period) -> Vec<DataRecord> {
    let key = format!("{location}_{component}_{year}_{period}").to_lowercase();
    let base = f64::from(query_hash(&key) % 1000 + 200);

    let mut records = Vec::with_capacity(3);
    if matches!(period, Period::Annual | Period::Monsoon) {
        records.push(DataRecord::new(location, component, year, Period::Monsoon, base));
    }
    if matches!(period, Period::Annual | Period::NonMonsoon) {
        records.push(DataRecord::new(
            location,
            component,
            year,
            Period::NonMonsoon,
            base * NON_MONSOON_FACTOR,
        ));
    }
    if period == Period::Annual {
        records.push(DataRecord::new(
            location,
            component,
            year,
            Period::Annual,
            base * ANNUAL_FACTOR,
        ));
    }
    records
}
