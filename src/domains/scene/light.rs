use serde::{Deserialize, Serialize};

/// Traffic-light color as reported by the remote feed. The feed in practice
/// only alternates red/green; yellow is accepted all the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

impl LightColor {
    /// All colors, in fixture order. Each corresponds to one mutually
    /// exclusive emissive sub-indicator on the fixture.
    pub const ALL: [LightColor; 3] = [LightColor::Red, LightColor::Yellow, LightColor::Green];

    /// Name of the sub-indicator object carrying this color.
    pub fn indicator_name(&self) -> &'static str {
        match self {
            LightColor::Red => "red",
            LightColor::Yellow => "yellow",
            LightColor::Green => "green",
        }
    }
}
