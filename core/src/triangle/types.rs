use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance (degrees) for recognising a right angle and for checking that
/// three supplied angles close to 180°.
pub const ANGLE_EPSILON: f64 = 1e-4;

/// Triangle vertex. Side `a` is opposite vertex `A`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertex {
    A,
    B,
    C,
}

impl Vertex {
    pub const ALL: [Vertex; 3] = [Vertex::A, Vertex::B, Vertex::C];

    /// The two other vertices, in A, B, C order.
    pub fn others(self) -> (Vertex, Vertex) {
        match self {
            Vertex::A => (Vertex::B, Vertex::C),
            Vertex::B => (Vertex::A, Vertex::C),
            Vertex::C => (Vertex::A, Vertex::B),
        }
    }

    fn upper(self) -> &'static str {
        match self {
            Vertex::A => "A",
            Vertex::B => "B",
            Vertex::C => "C",
        }
    }

    fn lower(self) -> &'static str {
        match self {
            Vertex::A => "a",
            Vertex::B => "b",
            Vertex::C => "c",
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upper())
    }
}

/// One of the six measurable quantities of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "vertex")]
pub enum Quantity {
    Side(Vertex),
    Angle(Vertex),
}

impl Quantity {
    pub fn is_angle(&self) -> bool {
        matches!(self, Quantity::Angle(_))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Side(v) => write!(f, "side {}", v.lower()),
            Quantity::Angle(v) => write!(f, "angle {}", v.upper()),
        }
    }
}

/// Identity used to derive a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Interior angles sum to 180°
    AngleSum,
    /// hyp² = leg² + leg²
    Pythagorean,
    /// Angle of a right triangle from asin(leg / hyp)
    Arcsine,
    LawOfCosines,
    LawOfSines,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AngleSum => write!(f, "sum of interior angles = 180°"),
            Self::Pythagorean => write!(f, "Pythagorean theorem"),
            Self::Arcsine => write!(f, "arcsine"),
            Self::LawOfCosines => write!(f, "law of cosines"),
            Self::LawOfSines => write!(f, "law of sines"),
        }
    }
}

/// A single derived value, in the order it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub quantity: Quantity,
    pub value: f64,
    pub method: Method,
}

impl Derivation {
    pub fn new(quantity: Quantity, value: f64, method: Method) -> Self {
        Self { quantity, value, method }
    }
}

/// Partially known triangle: three side lengths and three angles (degrees),
/// each either known or unknown.
///
/// Known sides are finite and positive; known angles lie in (0, 180).
/// Callers are responsible for those ranges, the solver only fills fields
/// that are still unknown and never overwrites a known one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    #[serde(default)]
    pub side_a: Option<f64>,
    #[serde(default)]
    pub side_b: Option<f64>,
    #[serde(default)]
    pub side_c: Option<f64>,
    #[serde(default)]
    pub angle_a: Option<f64>,
    #[serde(default)]
    pub angle_b: Option<f64>,
    #[serde(default)]
    pub angle_c: Option<f64>,
}

impl Triangle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the six optional inputs in `a, b, c, A, B, C` order.
    pub fn from_values(sides: [Option<f64>; 3], angles: [Option<f64>; 3]) -> Self {
        Self {
            side_a: sides[0],
            side_b: sides[1],
            side_c: sides[2],
            angle_a: angles[0],
            angle_b: angles[1],
            angle_c: angles[2],
        }
    }

    pub fn with_side(mut self, vertex: Vertex, value: f64) -> Self {
        *self.slot_mut(Quantity::Side(vertex)) = Some(value);
        self
    }

    pub fn with_angle(mut self, vertex: Vertex, value: f64) -> Self {
        *self.slot_mut(Quantity::Angle(vertex)) = Some(value);
        self
    }

    pub fn side(&self, vertex: Vertex) -> Option<f64> {
        self.get(Quantity::Side(vertex))
    }

    pub fn angle(&self, vertex: Vertex) -> Option<f64> {
        self.get(Quantity::Angle(vertex))
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Side(Vertex::A) => self.side_a,
            Quantity::Side(Vertex::B) => self.side_b,
            Quantity::Side(Vertex::C) => self.side_c,
            Quantity::Angle(Vertex::A) => self.angle_a,
            Quantity::Angle(Vertex::B) => self.angle_b,
            Quantity::Angle(Vertex::C) => self.angle_c,
        }
    }

    fn slot_mut(&mut self, quantity: Quantity) -> &mut Option<f64> {
        match quantity {
            Quantity::Side(Vertex::A) => &mut self.side_a,
            Quantity::Side(Vertex::B) => &mut self.side_b,
            Quantity::Side(Vertex::C) => &mut self.side_c,
            Quantity::Angle(Vertex::A) => &mut self.angle_a,
            Quantity::Angle(Vertex::B) => &mut self.angle_b,
            Quantity::Angle(Vertex::C) => &mut self.angle_c,
        }
    }

    /// Returns a copy with `derivation` applied, or `None` if its target is
    /// already known.
    pub fn fill(&self, derivation: &Derivation) -> Option<Triangle> {
        if self.get(derivation.quantity).is_some() {
            return None;
        }
        let mut next = *self;
        *next.slot_mut(derivation.quantity) = Some(derivation.value);
        Some(next)
    }

    pub fn has_right_angle(&self) -> bool {
        self.right_angle_vertex().is_some()
    }

    /// First vertex (A, B, C order) whose angle is within `ANGLE_EPSILON` of 90°.
    pub fn right_angle_vertex(&self) -> Option<Vertex> {
        Vertex::ALL.into_iter().find(|&v| {
            self.angle(v)
                .map_or(false, |angle| (angle - 90.0).abs() < ANGLE_EPSILON)
        })
    }

    /// Side opposite the right angle, if there is one.
    pub fn hypotenuse(&self) -> Option<Vertex> {
        self.right_angle_vertex()
    }

    pub fn all_sides_known(&self) -> bool {
        self.known_sides_count() == 3
    }

    pub fn all_angles_known(&self) -> bool {
        self.known_angles_count() == 3
    }

    pub fn is_complete(&self) -> bool {
        self.all_sides_known() && self.all_angles_known()
    }

    pub fn known_sides_count(&self) -> usize {
        [self.side_a, self.side_b, self.side_c].iter().filter(|v| v.is_some()).count()
    }

    pub fn known_angles_count(&self) -> usize {
        [self.angle_a, self.angle_b, self.angle_c].iter().filter(|v| v.is_some()).count()
    }

    pub fn known_values_count(&self) -> usize {
        self.known_sides_count() + self.known_angles_count()
    }

    /// Sum of the known angles in degrees.
    pub fn known_angle_sum(&self) -> f64 {
        Vertex::ALL.iter().filter_map(|&v| self.angle(v)).sum()
    }

    /// True when two sides and their included angle are known at some vertex.
    pub fn can_use_cosine_rule(&self) -> bool {
        Vertex::ALL.into_iter().any(|v| {
            let (p, q) = v.others();
            self.angle(v).is_some() && self.side(p).is_some() && self.side(q).is_some()
        })
    }

    /// Field-wise comparison: unknowns must match exactly, knowns within `epsilon`.
    pub fn approx_eq(&self, other: &Triangle, epsilon: f64) -> bool {
        Vertex::ALL.into_iter().all(|v| {
            same_measure(self.side(v), other.side(v), epsilon)
                && same_measure(self.angle(v), other.angle(v), epsilon)
        })
    }
}

fn same_measure(lhs: Option<f64>, rhs: Option<f64>, epsilon: f64) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() <= epsilon,
        _ => false,
    }
}
