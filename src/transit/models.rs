use serde::Deserialize;

// StopPoint/Mode/{mode} response
//  └── stopPoints[]
//       ├── id
//       ├── commonName
//       ├── lat
//       ├── lon
//       └── ...         (ignored)

#[derive(Debug, Clone, Deserialize)]
pub struct StopPoint {
    pub id: String,
    #[serde(rename = "commonName")]
    pub common_name: String,
    pub lat: f64,
    pub lon: f64,
}
