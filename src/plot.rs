use crate::errors::{VizError, VizResult};
use serde::{Deserialize, Serialize};

/// Samples per axis of the reference plane. A rendering constant, not data-derived.
pub const SURFACE_RESOLUTION: usize = 100;

const ROOT_MARKER_SIZE: u32 = 5;
const POINT_MARKER_SIZE: u32 = 2;
const ACCENT_COLOR: &str = "orange";
const SURFACE_OPACITY: f64 = 0.25;
const TRANSPARENT: &str = "rgba(0,0,0,0)";

// ── Lattice input ──

/// One node of the binomial lattice. Arrives on the wire as `[t, state, price]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct LatticePoint {
    pub time_years: f64,
    pub state_index: f64,
    pub price: f64,
}

impl From<(f64, f64, f64)> for LatticePoint {
    fn from((time_years, state_index, price): (f64, f64, f64)) -> Self {
        Self {
            time_years,
            state_index,
            price,
        }
    }
}

impl From<LatticePoint> for (f64, f64, f64) {
    fn from(p: LatticePoint) -> Self {
        (p.time_years, p.state_index, p.price)
    }
}

/// Which side of the reference price a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSide {
    AtOrAbove,
    Below,
}

impl PriceSide {
    #[inline]
    pub fn classify(price: f64, reference: f64) -> Self {
        if price >= reference {
            Self::AtOrAbove
        } else {
            Self::Below
        }
    }

    #[inline]
    pub fn color(self) -> &'static str {
        match self {
            Self::AtOrAbove => "green",
            Self::Below => "red",
        }
    }
}

// ── Traces ──

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    pub color: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: &'static str,
    pub marker: Marker,
}

impl ScatterTrace {
    fn markers(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, marker: Marker) -> Self {
        Self {
            kind: "scatter3d",
            x,
            y,
            z,
            mode: "markers",
            marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Row-major grid, `y.len()` rows of `x.len()` samples.
    pub z: Vec<Vec<f64>>,
    pub colorscale: [(f64, &'static str); 2],
    pub opacity: f64,
    pub showscale: bool,
}

// ── Layout (fixed framing) ──

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub up: Vec3,
    pub center: Vec3,
    pub eye: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    pub title: &'static str,
    pub nticks: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub camera: Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub showlegend: bool,
    pub scene: Scene,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            showlegend: false,
            scene: Scene {
                xaxis: Axis { title: "x (years)", nticks: 5, color: "white" },
                yaxis: Axis { title: "y (movement)", nticks: 10, color: "white" },
                zaxis: Axis { title: "z ($)", nticks: 5, color: "white" },
                camera: Camera {
                    up: Vec3 { x: 0.1, y: 0.08, z: 1.0 },
                    center: Vec3 { x: -0.1, y: 0.04, z: -0.15 },
                    eye: Vec3 { x: -1.5, y: -1.3, z: 0.1 },
                },
            },
            width: 400,
            height: 300,
            margin: Margin { l: 0, r: 0, t: 0, b: 0 },
            paper_bgcolor: TRANSPARENT,
            plot_bgcolor: TRANSPARENT,
        }
    }
}

// ── Scene ──

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub reference_price: f64,
    pub points_trace: ScatterTrace,
    pub boundary_trace: SurfaceTrace,
    pub root_marker_trace: ScatterTrace,
    pub layout: Layout,
}

/// Plotly figure view: `{data: [points, boundary, root], layout}`.
#[derive(Debug, Serialize)]
pub struct Figure<'a> {
    pub data: (&'a ScatterTrace, &'a SurfaceTrace, &'a ScatterTrace),
    pub layout: &'a Layout,
}

impl SceneDescription {
    pub fn figure(&self) -> Figure<'_> {
        Figure {
            data: (&self.points_trace, &self.boundary_trace, &self.root_marker_trace),
            layout: &self.layout,
        }
    }
}

/// `count` evenly spaced samples over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, count: usize) -> VizResult<Vec<f64>> {
    if count < 2 {
        return Err(VizError::InsufficientData(format!(
            "linspace needs at least 2 samples, got {count}"
        )));
    }

    let step = (stop - start) / (count - 1) as f64;
    let mut samples: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    if let Some(last) = samples.last_mut() {
        *last = stop;
    }
    Ok(samples)
}

/// Build the renderable scene for a price lattice.
///
/// Element 0 is the root node; its price is the reference used for point
/// coloring and for the height of the boundary plane. The plane spans
/// `[0, t_last]` by `[-depth, depth]`.
pub fn project(lattice: &[LatticePoint], depth: u32) -> VizResult<SceneDescription> {
    let (Some(root), Some(last)) = (lattice.first(), lattice.last()) else {
        return Err(VizError::InsufficientData("empty price lattice".into()));
    };
    let reference = root.price;

    let root_marker_trace = ScatterTrace::markers(
        vec![root.time_years],
        vec![root.state_index],
        vec![reference],
        Marker {
            size: ROOT_MARKER_SIZE,
            color: vec![ACCENT_COLOR],
        },
    );

    let points_trace = ScatterTrace::markers(
        lattice.iter().map(|p| p.time_years).collect(),
        lattice.iter().map(|p| p.state_index).collect(),
        lattice.iter().map(|p| p.price).collect(),
        Marker {
            size: POINT_MARKER_SIZE,
            color: lattice
                .iter()
                .map(|p| PriceSide::classify(p.price, reference).color())
                .collect(),
        },
    );

    let span = f64::from(depth);
    let boundary_trace = SurfaceTrace {
        kind: "surface",
        x: linspace(0.0, last.time_years, SURFACE_RESOLUTION)?,
        y: linspace(-span, span, SURFACE_RESOLUTION)?,
        z: vec![vec![reference; SURFACE_RESOLUTION]; SURFACE_RESOLUTION],
        colorscale: [(0.0, ACCENT_COLOR), (1.0, ACCENT_COLOR)],
        opacity: SURFACE_OPACITY,
        showscale: false,
    };

    Ok(SceneDescription {
        reference_price: reference,
        points_trace,
        boundary_trace,
        root_marker_trace,
        layout: Layout::default(),
    })
}
