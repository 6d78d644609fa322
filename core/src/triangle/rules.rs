//! Deduction rules for partially known triangles
//!
//! Each rule inspects a [`Triangle`] and proposes values for fields that are
//! still unknown. Rules never overwrite a known value, so running one twice
//! against the same record yields nothing new the second time.

use super::error::FeasibilityError;
use super::types::{Derivation, Method, Quantity, Triangle, Vertex};
use crate::config::SolverConfig;

/// Rule trait - all deduction rules implement this
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Whether the driver should run this rule against `triangle`
    fn applies(&self, triangle: &Triangle) -> bool;

    /// Derive values for unknown fields, in production order.
    ///
    /// Later derivations may build on earlier ones from the same call.
    fn apply(
        &self,
        triangle: &Triangle,
        config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError>;
}

/// Rules in the order the driver runs them each round
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AngleSumCompletion),
        Box::new(RightTriangleResolution),
        Box::new(CosineRuleSide),
        Box::new(CosineRuleAngle),
        Box::new(SineRule),
    ]
}

/// Opposite side from two sides and their included angle (degrees).
pub fn side_from_cosine_rule(adjacent1: f64, adjacent2: f64, included_angle: f64) -> f64 {
    let radicand = adjacent1.powi(2) + adjacent2.powi(2)
        - 2.0 * adjacent1 * adjacent2 * included_angle.to_radians().cos();
    // Can only dip below zero through rounding.
    radicand.max(0.0).sqrt()
}

/// Angle (degrees) opposite `opposite`, or `None` if the cosine ratio is not finite.
///
/// The ratio is clamped to [-1, 1] so borderline-exact inputs still resolve.
pub fn angle_from_cosine_rule(adjacent1: f64, adjacent2: f64, opposite: f64) -> Option<f64> {
    let cos_angle = (adjacent1.powi(2) + adjacent2.powi(2) - opposite.powi(2))
        / (2.0 * adjacent1 * adjacent2);
    if !cos_angle.is_finite() {
        return None;
    }
    Some(cos_angle.clamp(-1.0, 1.0).acos().to_degrees())
}

/// `side / sin(angle)`, if it is finite and positive.
pub fn sine_ratio(side: f64, angle: f64) -> Option<f64> {
    let ratio = side / angle.to_radians().sin();
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

fn arcsine_degrees(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Working copy that accumulates derivations for a single rule invocation
struct Derivations {
    current: Triangle,
    produced: Vec<Derivation>,
}

impl Derivations {
    fn new(triangle: &Triangle) -> Self {
        Self { current: *triangle, produced: Vec::new() }
    }

    fn record(&mut self, quantity: Quantity, value: f64, method: Method) {
        let derivation = Derivation::new(quantity, value, method);
        if let Some(next) = self.current.fill(&derivation) {
            self.current = next;
            self.produced.push(derivation);
        }
    }

    fn finish(self) -> Vec<Derivation> {
        self.produced
    }
}

/// Two known angles determine the third: C = 180 - A - B
pub struct AngleSumCompletion;

impl Rule for AngleSumCompletion {
    fn id(&self) -> &'static str {
        "angle_sum_completion"
    }

    fn applies(&self, triangle: &Triangle) -> bool {
        triangle.known_angles_count() == 2
    }

    fn apply(
        &self,
        triangle: &Triangle,
        _config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError> {
        let mut out = Derivations::new(triangle);

        if let Some(missing) = Vertex::ALL.into_iter().find(|&v| triangle.angle(v).is_none()) {
            let value = 180.0 - triangle.known_angle_sum();
            let quantity = Quantity::Angle(missing);
            if value <= 0.0 {
                return Err(FeasibilityError::domain(
                    quantity,
                    format!("known angles leave {}° for the third", value),
                ));
            }
            out.record(quantity, value, Method::AngleSum);
        }

        Ok(out.finish())
    }
}

/// Right triangle: Pythagorean theorem for a missing side, then arcsine for
/// the acute angles once the hypotenuse is known.
pub struct RightTriangleResolution;

impl RightTriangleResolution {
    fn leg(
        out: &mut Derivations,
        vertex: Vertex,
        hypotenuse: f64,
        other_leg: f64,
    ) -> Result<(), FeasibilityError> {
        let radicand = hypotenuse.powi(2) - other_leg.powi(2);
        let quantity = Quantity::Side(vertex);
        if radicand <= 0.0 {
            return Err(FeasibilityError::domain(
                quantity,
                format!("leg {} is not shorter than hypotenuse {}", other_leg, hypotenuse),
            ));
        }
        out.record(quantity, radicand.sqrt(), Method::Pythagorean);
        Ok(())
    }
}

impl Rule for RightTriangleResolution {
    fn id(&self) -> &'static str {
        "right_triangle_resolution"
    }

    fn applies(&self, triangle: &Triangle) -> bool {
        triangle.has_right_angle()
    }

    fn apply(
        &self,
        triangle: &Triangle,
        config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError> {
        let right = match triangle.hypotenuse() {
            Some(v) => v,
            None => return Ok(Vec::new()),
        };
        let (p, q) = right.others();
        let mut out = Derivations::new(triangle);

        if triangle.known_sides_count() == 2 {
            match (triangle.side(right), triangle.side(p), triangle.side(q)) {
                (None, Some(leg1), Some(leg2)) => {
                    let hypotenuse = (leg1.powi(2) + leg2.powi(2)).sqrt();
                    out.record(Quantity::Side(right), hypotenuse, Method::Pythagorean);
                }
                (Some(hypotenuse), None, Some(leg)) => Self::leg(&mut out, p, hypotenuse, leg)?,
                (Some(hypotenuse), Some(leg), None) => Self::leg(&mut out, q, hypotenuse, leg)?,
                _ => {}
            }
        }

        if let Some(hypotenuse) = out.current.side(right) {
            for vertex in [p, q] {
                if out.current.angle(vertex).is_some() {
                    continue;
                }
                if let Some(leg) = out.current.side(vertex) {
                    let sine = leg / hypotenuse;
                    let quantity = Quantity::Angle(vertex);
                    if sine > 1.0 + config.domain_tolerance {
                        return Err(FeasibilityError::domain(
                            quantity,
                            format!("leg {} is longer than hypotenuse {}", leg, hypotenuse),
                        ));
                    }
                    out.record(quantity, arcsine_degrees(sine), Method::Arcsine);
                }
            }
        }

        Ok(out.finish())
    }
}

/// Law of cosines: c² = a² + b² - 2ab·cos(C)
pub struct CosineRuleSide;

impl Rule for CosineRuleSide {
    fn id(&self) -> &'static str {
        "cosine_rule_side"
    }

    fn applies(&self, triangle: &Triangle) -> bool {
        !triangle.all_sides_known() && triangle.can_use_cosine_rule()
    }

    fn apply(
        &self,
        triangle: &Triangle,
        _config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError> {
        let mut out = Derivations::new(triangle);

        for vertex in [Vertex::C, Vertex::A, Vertex::B] {
            let (p, q) = vertex.others();
            let current = out.current;
            if current.side(vertex).is_some() {
                continue;
            }
            if let (Some(adj1), Some(adj2), Some(angle)) =
                (current.side(p), current.side(q), current.angle(vertex))
            {
                let side = side_from_cosine_rule(adj1, adj2, angle);
                let quantity = Quantity::Side(vertex);
                if !side.is_finite() || side <= 0.0 {
                    return Err(FeasibilityError::domain(
                        quantity,
                        format!("law of cosines gives a degenerate length {}", side),
                    ));
                }
                out.record(quantity, side, Method::LawOfCosines);
            }
        }

        Ok(out.finish())
    }
}

/// Law of cosines solved for the angles once all three sides are known
pub struct CosineRuleAngle;

impl Rule for CosineRuleAngle {
    fn id(&self) -> &'static str {
        "cosine_rule_angle"
    }

    fn applies(&self, triangle: &Triangle) -> bool {
        triangle.all_sides_known() && !triangle.all_angles_known()
    }

    fn apply(
        &self,
        triangle: &Triangle,
        _config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError> {
        let mut out = Derivations::new(triangle);

        for vertex in Vertex::ALL {
            if triangle.angle(vertex).is_some() {
                continue;
            }
            let (p, q) = vertex.others();
            if let (Some(adj1), Some(adj2), Some(opposite)) =
                (triangle.side(p), triangle.side(q), triangle.side(vertex))
            {
                let quantity = Quantity::Angle(vertex);
                let angle = angle_from_cosine_rule(adj1, adj2, opposite).ok_or_else(|| {
                    FeasibilityError::domain(quantity, "cosine ratio is not a finite number")
                })?;
                out.record(quantity, angle, Method::LawOfCosines);
            }
        }

        Ok(out.finish())
    }
}

/// Law of sines: a / sin(A) = b / sin(B) = c / sin(C)
///
/// Angles are always taken as the principal arcsine. The second solution of
/// the two-sides-and-non-included-angle case is never considered.
pub struct SineRule;

impl Rule for SineRule {
    fn id(&self) -> &'static str {
        "sine_rule"
    }

    fn applies(&self, triangle: &Triangle) -> bool {
        triangle.known_sides_count() >= 1 && triangle.known_angles_count() >= 1
    }

    fn apply(
        &self,
        triangle: &Triangle,
        config: &SolverConfig,
    ) -> Result<Vec<Derivation>, FeasibilityError> {
        let ratio = Vertex::ALL
            .into_iter()
            .find_map(|v| match (triangle.side(v), triangle.angle(v)) {
                (Some(side), Some(angle)) => sine_ratio(side, angle),
                _ => None,
            });
        let ratio = match ratio {
            Some(r) => r,
            None => return Ok(Vec::new()),
        };

        let mut out = Derivations::new(triangle);

        for vertex in Vertex::ALL {
            if out.current.side(vertex).is_some() {
                continue;
            }
            if let Some(angle) = out.current.angle(vertex) {
                out.record(
                    Quantity::Side(vertex),
                    ratio * angle.to_radians().sin(),
                    Method::LawOfSines,
                );
            }
        }

        for vertex in Vertex::ALL {
            if out.current.angle(vertex).is_some() {
                continue;
            }
            if let Some(side) = out.current.side(vertex) {
                let sine = side / ratio;
                let quantity = Quantity::Angle(vertex);
                if sine > 1.0 + config.domain_tolerance {
                    return Err(FeasibilityError::domain(
                        quantity,
                        format!("sine of {} would be {}", quantity, sine),
                    ));
                }
                out.record(quantity, arcsine_degrees(sine), Method::LawOfSines);
            }
        }

        Ok(out.finish())
    }
}
