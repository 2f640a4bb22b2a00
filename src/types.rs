//! Core types used throughout haggle

use crate::error::{HaggleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Free-form metadata value. Never interpreted by the negotiation core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        AttributeValue::List(value)
    }
}

/// Open string-keyed metadata mapping
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Quality tier of a product
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    /// Standard grade
    B,
    /// Premium grade
    A,
    /// Premium export tier
    Export,
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityGrade::B => write!(f, "B"),
            QualityGrade::A => write!(f, "A"),
            QualityGrade::Export => write!(f, "Export"),
        }
    }
}

/// The good under negotiation. Built once per scenario and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub quality_grade: QualityGrade,
    pub origin: String,
    /// Reference price in the smallest display currency unit
    pub base_market_price: u64,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Product {
    /// Check the positivity constraints on quantity and market price
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HaggleError::InvalidProduct("empty product name".to_string()));
        }
        if self.quantity == 0 {
            return Err(HaggleError::InvalidProduct(format!(
                "{}: quantity must be positive",
                self.name
            )));
        }
        if self.base_market_price == 0 {
            return Err(HaggleError::InvalidProduct(format!(
                "{}: base market price must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// Party in a negotiation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Buyer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Seller => write!(f, "seller"),
            Role::Buyer => write!(f, "buyer"),
        }
    }
}
