//! Money value object and pt-BR number formatting.
//!
//! Amounts keep full floating precision internally; rounding to two
//! decimals only happens when a value is presented.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use super::ValidationError;

/// A monetary amount in Brazilian reais.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Zero reais.
    pub const ZERO: Self = Self(0.0);

    /// Creates an amount without validation (internal arithmetic).
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Creates an amount, rejecting negative or non-finite values.
    pub fn try_new(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(field, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(ValidationError::out_of_range(field, 0, i64::MAX, value as i64));
        }
        Ok(Self(value))
    }

    /// Returns the raw amount.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true for a strictly positive, finite amount.
    pub fn is_positive(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns this amount rounded to centavos.
    pub fn rounded(&self) -> Self {
        Self(round2(self.0))
    }

    /// Returns `share` of this amount rounded to centavos (e.g. 0.6 for 60%).
    pub fn share(&self, share: f64) -> Self {
        Self(round2(self.0 * share))
    }

    /// Formats as `R$ 1.234,56`.
    pub fn format_brl(&self) -> String {
        format!("R$ {}", format_decimal_br(self.0, 2))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Money {
    type Output = Money;

    fn mul(self, rhs: f64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_brl())
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a number the pt-BR way: `.` groups thousands, `,` separates decimals.
pub fn format_decimal_br(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{},{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Parses a pt-BR currency literal such as `1.234,56`.
pub fn parse_decimal_br(literal: &str) -> Option<f64> {
    let normalized: String = literal
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok()
}
