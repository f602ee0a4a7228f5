use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// One of the six fixed sides of the cube.
///
/// The declaration order is the catalogue order: scoring ties and the
/// uniform spin pick both walk faces in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
}

/// Axis a face is turned around to reach its place on the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// Where a face sits relative to the cube's center: an optional turn around
/// one axis, then a push outward along the turned Z axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FacePlacement {
    pub turn: Option<(Axis, f64)>,
    pub translate_z: f64,
}

impl FacePlacement {
    /// CSS-style transform string, e.g. `rotateY(180deg) translateZ(100px)`.
    pub fn css(&self) -> String {
        let push = format!("translateZ({}px)", self.translate_z);
        match self.turn {
            None => push,
            Some((Axis::X, deg)) => format!("rotateX({deg}deg) {push}"),
            Some((Axis::Y, deg)) => format!("rotateY({deg}deg) {push}"),
        }
    }
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    /// Position of this face in catalogue order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Orientation at which this face directly confronts the viewer.
    pub fn home(self) -> Orientation {
        match self {
            Face::Front => Orientation::new(0.0, 0.0),
            Face::Back => Orientation::new(0.0, 180.0),
            Face::Right => Orientation::new(0.0, -90.0),
            Face::Left => Orientation::new(0.0, 90.0),
            Face::Top => Orientation::new(-90.0, 0.0),
            Face::Bottom => Orientation::new(90.0, 0.0),
        }
    }

    /// Placement of the face on a cube with the given edge length.
    ///
    /// Each placement turn is the inverse of the face's home orientation, so
    /// applying the home orientation on top brings the face to the front.
    pub fn placement(self, cube_size: f64) -> FacePlacement {
        let turn = match self {
            Face::Front => None,
            Face::Back => Some((Axis::Y, 180.0)),
            Face::Right => Some((Axis::Y, 90.0)),
            Face::Left => Some((Axis::Y, -90.0)),
            Face::Top => Some((Axis::X, 90.0)),
            Face::Bottom => Some((Axis::X, -90.0)),
        };
        FacePlacement {
            turn,
            translate_z: cube_size / 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Right => "right",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized face name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFaceError(pub String);

impl fmt::Display for ParseFaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown face '{}'", self.0)
    }
}

impl std::error::Error for ParseFaceError {}

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFaceError(s.to_string()))
    }
}
