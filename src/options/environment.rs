use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::environment::DEFAULT_LODS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Environment", inline)]
#[serde(default)]
/// Environment-map pre-filtering parameters.
pub struct EnvironmentOptions {
    /// Number of mip levels packed into the atlas.
    #[schemars(skip)]
    pub lods: u32,
    /// Face size of the procedural studio cubemap, in texels.
    #[schemars(title = "Studio Resolution", range(min = 16, max = 1024))]
    pub face_size: u32,
    /// Brightness of the studio key light.
    #[schemars(title = "Key Light", range(min = 0.0, max = 20.0), extend("step" = 0.1))]
    pub key_light_intensity: f32,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            lods: DEFAULT_LODS,
            face_size: 1 << DEFAULT_LODS,
            key_light_intensity: 6.0,
        }
    }
}
