use crate::domains::scene::LightColor;
use serde::{Deserialize, Serialize};

/// Wire record from a position endpoint. The server sends a bare JSON array
/// of these; `position` arity is validated separately because the feed is not
/// trusted to always send a planar pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: String,
    pub position: Vec<f64>,
}

/// Wire record from the state endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: String,
    pub state: LightColor,
}

/// A position record that passed validation: planar (x, z), height supplied
/// per entity class at apply time.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    pub id: String,
    pub x: f64,
    pub z: f64,
}

impl PositionRecord {
    /// Validate the coordinate arity. Records with anything other than two
    /// coordinates are dropped without affecting the rest of the batch.
    pub fn validate(self) -> Option<PositionSample> {
        match self.position.as_slice() {
            [x, z] => Some(PositionSample {
                id: self.id,
                x: *x,
                z: *z,
            }),
            _ => None,
        }
    }
}

/// A state record is already fully validated by decoding: the id is opaque
/// and the state decoded into the closed color set.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSample {
    pub id: String,
    pub state: LightColor,
}

impl From<StateRecord> for StateSample {
    fn from(record: StateRecord) -> Self {
        Self {
            id: record.id,
            state: record.state,
        }
    }
}
