//! Scenario runner for budget what-if projections
//!
//! Holds one input snapshot and projects it under alternative monthly
//! budgets or horizons without touching the repository.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FinanceResult;
use crate::finance::ProjectionInputs;
use crate::projection::{HorizonProjection, ProjectionConfig, ProjectionEngine, ProjectionSummary};

/// Outcome of projecting one alternative monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetScenario {
    pub monthly_budget: f64,
    pub summary: ProjectionSummary,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(store.snapshot(), ProjectionConfig::new(2026, 0, 3));
/// let scenarios = runner.run_budgets(&[1200.0, 1500.0, 1800.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    inputs: ProjectionInputs,
    config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(inputs: ProjectionInputs, config: ProjectionConfig) -> Self {
        Self { inputs, config }
    }

    /// Project the stored inputs with the stored config
    pub fn run(&self) -> FinanceResult<HorizonProjection> {
        ProjectionEngine::new(self.config.clone()).project(&self.inputs)
    }

    /// Project the stored inputs with a different horizon
    pub fn run_with(&self, config: ProjectionConfig) -> FinanceResult<HorizonProjection> {
        ProjectionEngine::new(config).project(&self.inputs)
    }

    /// Project each monthly budget in parallel; results keep input order
    pub fn run_budgets(&self, budgets: &[f64]) -> FinanceResult<Vec<BudgetScenario>> {
        budgets
            .par_iter()
            .map(|&budget| {
                let mut inputs = self.inputs.clone();
                inputs.config.monthly_fixed_budget = budget;
                let projection = ProjectionEngine::new(self.config.clone()).project(&inputs)?;
                Ok(BudgetScenario {
                    monthly_budget: budget,
                    summary: projection.summary(),
                })
            })
            .collect()
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut ProjectionInputs {
        &mut self.inputs
    }
}
