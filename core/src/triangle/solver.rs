use super::error::FeasibilityError;
use super::rules::{all_rules, Rule};
use super::types::{Derivation, Triangle, Vertex};
use super::validate;
use crate::config::SolverConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Stage of a single solve call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolvePhase {
    /// Minimum information and angle-sum checks
    Validating,
    /// Running rule rounds until nothing changes or the round cap is hit
    Propagating,
    /// Triangle inequality on the final side set
    Finalizing,
    Done,
    Rejected(FeasibilityError),
}

/// Result of one propagation round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub triangle: Triangle,
    /// Values filled during the round, in production order
    pub derivations: Vec<Derivation>,
    /// False when the record is unchanged, i.e. a fixed point was reached
    pub progressed: bool,
}

/// Successful solve with the derivation trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Final record. May still have unknown fields if under-constrained.
    pub triangle: Triangle,
    /// Every derived value, in the order it was produced
    pub steps: Vec<Derivation>,
    /// Number of propagation rounds executed
    pub rounds: usize,
    /// True if propagation stopped at a fixed point or with every field known,
    /// false if it was cut off by the round cap
    pub converged: bool,
    /// Side opposite a right angle, if the triangle has one
    pub hypotenuse: Option<Vertex>,
}

impl Solution {
    pub fn is_complete(&self) -> bool {
        self.triangle.is_complete()
    }
}

pub struct TriangleSolver {
    config: SolverConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for TriangleSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl TriangleSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config, rules: all_rules() }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve with the default configuration
    pub fn solve(triangle: Triangle) -> Result<Solution, FeasibilityError> {
        Self::default().run(triangle)
    }

    /// Validate, propagate to a fixed point (or the round cap), then check the
    /// triangle inequality on the result.
    pub fn run(&self, triangle: Triangle) -> Result<Solution, FeasibilityError> {
        let mut phase = SolvePhase::Validating;
        let mut current = triangle;
        let mut steps = Vec::new();
        let mut rounds = 0;
        let mut settled = false;

        loop {
            phase = match phase {
                SolvePhase::Validating => match validate::precheck(&current) {
                    Ok(()) => SolvePhase::Propagating,
                    Err(e) => SolvePhase::Rejected(e),
                },
                SolvePhase::Propagating => match self.round(&current) {
                    Ok(outcome) => {
                        rounds += 1;
                        debug!(
                            round = rounds,
                            derived = outcome.derivations.len(),
                            progressed = outcome.progressed,
                            "propagation round finished"
                        );
                        steps.extend(outcome.derivations);
                        current = outcome.triangle;
                        settled = !outcome.progressed;

                        if outcome.progressed
                            && rounds < self.config.max_rounds
                            && !current.is_complete()
                        {
                            SolvePhase::Propagating
                        } else {
                            SolvePhase::Finalizing
                        }
                    }
                    Err(e) => SolvePhase::Rejected(e),
                },
                SolvePhase::Finalizing => match validate::postcheck(&current) {
                    Ok(()) => SolvePhase::Done,
                    Err(e) => SolvePhase::Rejected(e),
                },
                SolvePhase::Done => {
                    let converged = settled || current.is_complete();
                    info!(
                        rounds,
                        steps = steps.len(),
                        complete = current.is_complete(),
                        converged,
                        "triangle solved"
                    );
                    return Ok(Solution {
                        triangle: current,
                        steps,
                        rounds,
                        converged,
                        hypotenuse: current.hypotenuse(),
                    });
                }
                SolvePhase::Rejected(e) => {
                    warn!(code = e.code(), rounds, "triangle rejected: {}", e);
                    return Err(e);
                }
            };
        }
    }

    /// Run every applicable rule once, in order, against `triangle`.
    pub fn round(&self, triangle: &Triangle) -> Result<RoundOutcome, FeasibilityError> {
        let mut current = *triangle;
        let mut derivations = Vec::new();

        for rule in &self.rules {
            if !rule.applies(&current) {
                continue;
            }
            for derivation in rule.apply(&current, &self.config)? {
                if let Some(next) = current.fill(&derivation) {
                    debug!(
                        rule = rule.id(),
                        quantity = %derivation.quantity,
                        value = derivation.value,
                        "derived"
                    );
                    current = next;
                    derivations.push(derivation);
                }
            }
        }

        let progressed = !current.approx_eq(triangle, self.config.settle_epsilon);
        Ok(RoundOutcome { triangle: current, derivations, progressed })
    }
}
