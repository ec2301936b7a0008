//! Coordinate reprojection between two PROJ definitions.

use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// A reusable transform from one CRS to another.
///
/// Geographic CRSs take and return degrees (x = longitude, y = latitude);
/// projected CRSs take and return their own units.
pub struct Projection {
    from: Proj,
    to: Proj,
    from_geographic: bool,
    to_geographic: bool,
}

fn is_geographic(definition: &str) -> bool {
    definition.contains("+proj=longlat") || definition.contains("+proj=latlong")
}

impl Projection {
    pub fn new(from: &str, to: &str) -> Result<Self, String> {
        let from_proj = Proj::from_proj_string(from)
            .map_err(|e| format!("invalid source CRS \"{from}\": {e}"))?;
        let to_proj =
            Proj::from_proj_string(to).map_err(|e| format!("invalid target CRS \"{to}\": {e}"))?;

        Ok(Self {
            from: from_proj,
            to: to_proj,
            from_geographic: is_geographic(from),
            to_geographic: is_geographic(to),
        })
    }

    pub fn project_coord(&self, c: Coord<f64>) -> Result<Coord<f64>, String> {
        let mut point = if self.from_geographic {
            (c.x.to_radians(), c.y.to_radians(), 0.0)
        } else {
            (c.x, c.y, 0.0)
        };

        transform(&self.from, &self.to, &mut point).map_err(|e| e.to_string())?;

        let (x, y, _) = point;
        if !x.is_finite() || !y.is_finite() {
            return Err(format!("coordinate ({}, {}) has no projection", c.x, c.y));
        }

        Ok(if self.to_geographic {
            Coord {
                x: x.to_degrees(),
                y: y.to_degrees(),
            }
        } else {
            Coord { x, y }
        })
    }

    pub fn project(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>, String> {
        geometry.try_map_coords(|c| self.project_coord(c))
    }
}
