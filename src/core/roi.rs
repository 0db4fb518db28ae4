use crate::domain::model::{RoiForm, RoiInputs, RoiResult};
use serde::{Deserialize, Serialize};

pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Share of manual hour cost recoverable through automation.
pub const CAPTURE_FACTOR: f64 = 0.7;

/// Business constants of the saving formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiAssumptions {
    pub weeks_per_year: f64,
    pub capture_factor: f64,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            weeks_per_year: WEEKS_PER_YEAR,
            capture_factor: CAPTURE_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoiCalculator {
    assumptions: RoiAssumptions,
}

impl RoiCalculator {
    pub fn new(assumptions: RoiAssumptions) -> Self {
        Self { assumptions }
    }

    /// Annual saving, payback and ROI for one set of inputs.
    ///
    /// Zero saving gives a zero payback and zero investment gives a zero
    /// ROI. No rounding happens here.
    pub fn compute(&self, inputs: &RoiInputs) -> RoiResult {
        let annual_saving = inputs.employees
            * inputs.hours_per_week
            * inputs.cost_per_hour
            * self.assumptions.weeks_per_year
            * self.assumptions.capture_factor;

        let payback_years = if annual_saving != 0.0 {
            inputs.investment / annual_saving
        } else {
            0.0
        };

        let roi_percent = if inputs.investment != 0.0 {
            ((annual_saving - inputs.investment) / inputs.investment) * 100.0
        } else {
            0.0
        };

        RoiResult {
            annual_saving,
            payback_years,
            roi_percent,
        }
    }

    /// Coerces a submitted form and computes it.
    pub fn compute_form(&self, form: &RoiForm) -> RoiResult {
        let inputs = RoiInputs::from_form(form);
        let result = self.compute(&inputs);
        tracing::debug!(
            employees = inputs.employees,
            hours_per_week = inputs.hours_per_week,
            cost_per_hour = inputs.cost_per_hour,
            investment = inputs.investment,
            annual_saving = result.annual_saving,
            "ROI computed"
        );
        result
    }
}
