//! Conversion graph between recognized color spaces.
//!
//! Only adjacent spaces have a direct transform:
//!
//! ```text
//!             ACES2065-1
//!                 |
//! sRGB --- Linear --- XYZ --- LAB
//!                 |
//!               ACEScg
//! ```
//!
//! Every other pair is composed through intermediates. [`Conversion::resolve`]
//! runs a breadth-first search over the edge table, so the composed route is
//! always the shortest one, and materializes each hop into a [`Step`] once.
//! Adjacent matrix steps are fused.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ColorSpace;
//! use imgalgo_color::Conversion;
//!
//! let conv = Conversion::resolve(ColorSpace::Srgb, ColorSpace::Lab).unwrap();
//! assert_eq!(
//!     conv.path(),
//!     &[ColorSpace::Srgb, ColorSpace::Linear, ColorSpace::Xyz, ColorSpace::Lab]
//! );
//!
//! let mut px = [1.0, 1.0, 1.0];
//! conv.apply(&mut px);
//! assert!((px[0] - 100.0).abs() < 1e-3);
//! ```

use std::collections::VecDeque;

use imgalgo_core::ColorSpace;
use imgalgo_math::{
    ACES_AP0, ACES_AP1, Mat3, SRGB_TO_XYZ, XYZ_TO_SRGB, rgb_to_srgb_matrix, srgb_to_rgb_matrix,
};
use tracing::debug;

use crate::colormath;
use crate::error::{ColorError, ColorResult};
use crate::transfer;

/// A direct transform between two adjacent spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    SrgbDecode,
    SrgbEncode,
    LinearToXyz,
    XyzToLinear,
    LinearToAp0,
    Ap0ToLinear,
    LinearToAp1,
    Ap1ToLinear,
    XyzToLab,
    LabToXyz,
}

use ColorSpace::*;

static EDGES: &[(ColorSpace, ColorSpace, Edge)] = &[
    (Srgb, Linear, Edge::SrgbDecode),
    (Linear, Srgb, Edge::SrgbEncode),
    (Linear, Xyz, Edge::LinearToXyz),
    (Xyz, Linear, Edge::XyzToLinear),
    (Linear, Aces2065_1, Edge::LinearToAp0),
    (Aces2065_1, Linear, Edge::Ap0ToLinear),
    (Linear, AcesCg, Edge::LinearToAp1),
    (AcesCg, Linear, Edge::Ap1ToLinear),
    (Xyz, Lab, Edge::XyzToLab),
    (Lab, Xyz, Edge::LabToXyz),
];

impl Edge {
    fn step(self) -> Step {
        match self {
            Edge::SrgbDecode => Step::SrgbDecode,
            Edge::SrgbEncode => Step::SrgbEncode,
            Edge::LinearToXyz => Step::Matrix(SRGB_TO_XYZ),
            Edge::XyzToLinear => Step::Matrix(XYZ_TO_SRGB),
            Edge::LinearToAp0 => Step::Matrix(srgb_to_rgb_matrix(&ACES_AP0)),
            Edge::Ap0ToLinear => Step::Matrix(rgb_to_srgb_matrix(&ACES_AP0)),
            Edge::LinearToAp1 => Step::Matrix(srgb_to_rgb_matrix(&ACES_AP1)),
            Edge::Ap1ToLinear => Step::Matrix(rgb_to_srgb_matrix(&ACES_AP1)),
            Edge::XyzToLab => Step::XyzToLab,
            Edge::LabToXyz => Step::LabToXyz,
        }
    }
}

/// One materialized transform applied to a pixel triplet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Linear 3x3 transform.
    Matrix(Mat3),
    /// sRGB curve decode.
    SrgbDecode,
    /// sRGB curve encode.
    SrgbEncode,
    /// CIE XYZ to L\*a\*b\*.
    XyzToLab,
    /// CIE L\*a\*b\* to XYZ.
    LabToXyz,
}

impl Step {
    /// Applies this step to one triplet.
    #[inline]
    pub fn apply(&self, px: &mut [f32; 3]) {
        match self {
            Step::Matrix(m) => *px = m.apply(*px),
            Step::SrgbDecode => transfer::srgb_to_linear(px),
            Step::SrgbEncode => transfer::linear_to_srgb(px),
            Step::XyzToLab => colormath::xyz_to_lab(px),
            Step::LabToXyz => colormath::lab_to_xyz(px),
        }
    }
}

/// A resolved, ready-to-apply conversion between two spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    path: Vec<ColorSpace>,
    steps: Vec<Step>,
}

impl Conversion {
    /// Finds the shortest route from `from` to `to` and builds its steps.
    ///
    /// `from == to` resolves to an empty conversion.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnsupportedConversion`] if the graph has no route.
    pub fn resolve(from: ColorSpace, to: ColorSpace) -> ColorResult<Self> {
        let edges = shortest_path(from, to).ok_or(ColorError::UnsupportedConversion { from, to })?;

        let mut path = vec![from];
        let mut steps: Vec<Step> = Vec::with_capacity(edges.len());
        for &(_, dst, edge) in &edges {
            path.push(dst);
            match (steps.last_mut(), edge.step()) {
                (Some(Step::Matrix(prev)), Step::Matrix(next)) => *prev = next * *prev,
                (_, step) => steps.push(step),
            }
        }

        debug!(%from, %to, hops = edges.len(), steps = steps.len(), "resolved color conversion");
        Ok(Self { path, steps })
    }

    /// Spaces visited, source first, target last.
    pub fn path(&self) -> &[ColorSpace] {
        &self.path
    }

    /// Materialized steps in application order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Source space.
    pub fn from(&self) -> ColorSpace {
        self.path[0]
    }

    /// Target space.
    pub fn to(&self) -> ColorSpace {
        self.path[self.path.len() - 1]
    }

    /// Returns `true` if applying this conversion changes nothing.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Converts one triplet in place.
    #[inline]
    pub fn apply(&self, px: &mut [f32; 3]) {
        for step in &self.steps {
            step.apply(px);
        }
    }
}

const SPACES: usize = ColorSpace::ALL.len();

fn index_of(space: ColorSpace) -> usize {
    ColorSpace::ALL
        .iter()
        .position(|&s| s == space)
        .unwrap_or_default()
}

/// BFS over [`EDGES`]; ties break in table order.
fn shortest_path(from: ColorSpace, to: ColorSpace) -> Option<Vec<(ColorSpace, ColorSpace, Edge)>> {
    let mut prev: [Option<usize>; SPACES] = [None; SPACES];
    let mut seen = [false; SPACES];
    let mut queue = VecDeque::from([from]);
    seen[index_of(from)] = true;

    while let Some(space) = queue.pop_front() {
        if space == to {
            break;
        }
        for (i, &(src, dst, _)) in EDGES.iter().enumerate() {
            if src == space && !seen[index_of(dst)] {
                seen[index_of(dst)] = true;
                prev[index_of(dst)] = Some(i);
                queue.push_back(dst);
            }
        }
    }

    if !seen[index_of(to)] {
        return None;
    }

    let mut route = Vec::new();
    let mut at = to;
    while at != from {
        let edge = EDGES[prev[index_of(at)]?];
        route.push(edge);
        at = edge.0;
    }
    route.reverse();
    Some(route)
}
