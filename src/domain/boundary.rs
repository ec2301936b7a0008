use geo::MultiPolygon;

/// A named region (borough or fare zone) in the planar CRS of its
/// [`BoundarySet`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// Everything the Boundary Store produces.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    pub boroughs: Vec<BoundaryPolygon>,
    /// `None` when no zones archive is configured. An archive without a
    /// usable zone file still gives `Some(vec![])`.
    pub zones: Option<Vec<BoundaryPolygon>>,
    /// PROJ definition of the CRS every geometry above is expressed in.
    pub crs: String,
    /// Non-fatal problems met while loading, worded for the user.
    pub notices: Vec<String>,
}
