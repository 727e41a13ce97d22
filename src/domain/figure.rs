use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A currency code plus numeric amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Figure {
    pub currency: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_from: Option<ConversionSource>,
}

impl Figure {
    pub fn new(currency: impl Into<String>, amount: f64) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            amount,
            converted_from: None,
        }
    }

    pub fn converted(
        currency: impl Into<String>,
        amount: f64,
        source: ConversionSource,
    ) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            amount,
            converted_from: Some(source),
        }
    }

    pub fn is_converted(&self) -> bool {
        self.converted_from.is_some()
    }
}

/// Provenance for a figure converted from another currency.
///
/// Carried for disclosure only; no conversion math happens here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionSource {
    pub currency: String,
    pub amount: f64,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_date: Option<NaiveDate>,
}

/// Per-currency reduction of many figures into one summed figure each.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FigureEnumeration(BTreeMap<String, Figure>);

impl FigureEnumeration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `figure` into the enumeration, summing with any figure already
    /// keyed by the same currency. Conversion provenance does not survive a
    /// merge since the sum no longer maps to a single source amount.
    pub fn add(&mut self, figure: &Figure) {
        self.0
            .entry(figure.currency.clone())
            .and_modify(|existing| {
                existing.amount += figure.amount;
                existing.converted_from = None;
            })
            .or_insert_with(|| figure.clone());
    }

    pub fn merge(&mut self, other: &FigureEnumeration) {
        for figure in other.0.values() {
            self.add(figure);
        }
    }

    pub fn get(&self, currency: &str) -> Option<&Figure> {
        self.0.get(currency)
    }

    pub fn amount(&self, currency: &str) -> Option<f64> {
        self.get(currency).map(|figure| figure.amount)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Figure)> {
        self.0.iter().map(|(code, figure)| (code.as_str(), figure))
    }
}

impl FromIterator<Figure> for FigureEnumeration {
    fn from_iter<I: IntoIterator<Item = Figure>>(iter: I) -> Self {
        let mut enumeration = Self::new();
        for figure in iter {
            enumeration.add(&figure);
        }
        enumeration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_currency_figures_sum_into_one_key() {
        let mut totals = FigureEnumeration::new();
        totals.add(&Figure::new("CAD", 100.0));
        totals.add(&Figure::new("CAD", 250.5));
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.amount("CAD"), Some(350.5));
    }

    #[test]
    fn differing_currencies_stay_separate() {
        let totals: FigureEnumeration =
            [Figure::new("CAD", 100.0), Figure::new("usd", 40.0)]
                .into_iter()
                .collect();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.amount("CAD"), Some(100.0));
        assert_eq!(totals.amount("USD"), Some(40.0));
    }

    #[test]
    fn merge_drops_conversion_provenance() {
        let source = ConversionSource {
            currency: "USD".into(),
            amount: 75.0,
            rate: 1.36,
            rate_date: None,
        };
        let mut totals = FigureEnumeration::new();
        totals.add(&Figure::converted("CAD", 102.0, source));
        totals.add(&Figure::new("CAD", 1.0));
        let merged = totals.get("CAD").expect("merged figure");
        assert!(!merged.is_converted());
        assert_eq!(merged.amount, 103.0);
    }
}
