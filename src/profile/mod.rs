//! Form state to canonical profile.
//!
//! [`assemble_profile`] arranges a [`FieldBag`](crate::model::FieldBag) into
//! the fixed `student` / `preferences` / `must_have` / `priorities` /
//! `diversity` shape and prunes every empty value out of it.

mod assemble;
mod prune;

pub use assemble::assemble_profile;

use assemble::absent_unless_given;

use crate::model::FieldBag;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightSummary {
    pub weights: Vec<(&'static str, f64)>,
    pub total: f64,
}

/// Slider readout: every priority weight and their sum, missing weights as zero.
pub fn weight_summary(fields: &FieldBag) -> WeightSummary {
    let weights = fields
        .weights
        .entries()
        .into_iter()
        .map(|(key, input)| (key, absent_unless_given(input).unwrap_or(0.0)))
        .collect::<Vec<(&'static str, f64)>>();
    let total = weights.iter().map(|(_, weight)| weight).sum();

    WeightSummary { weights, total }
}
