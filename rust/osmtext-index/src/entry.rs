use serde::{Deserialize, Serialize};

/// A named geographic point, as stored in a shard file.
///
/// Shard files are JSON arrays of `{"name": string, "lat": number, "lon": number}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl AddressEntry {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> AddressEntry {
        AddressEntry {
            name: name.into(),
            lat,
            lon,
        }
    }
}
