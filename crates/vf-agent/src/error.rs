//! Fleet construction errors.

use thiserror::Error;

use vf_core::FloatId;
use vf_mission::MissionError;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("float {float}: {source}")]
    Mission {
        float:  FloatId,
        #[source]
        source: MissionError,
    },

    #[error("float {float}: deployment depth {depth} m outside [{surface}, {bottom}]")]
    DeploymentDepth {
        float:   FloatId,
        depth:   f64,
        surface: f64,
        bottom:  f64,
    },

    #[error("float {float}: deployment position ({lat}, {lon}) is outside the field domain")]
    DeploymentPosition { float: FloatId, lat: f64, lon: f64 },

    #[error("{missions} per-float missions supplied for {floats} deployments")]
    MissionCount { missions: usize, floats: usize },

    #[error("fleet of {0} floats exceeds the FloatId range")]
    TooManyFloats(usize),

    #[error("{0} not found in fleet")]
    FloatNotFound(FloatId),
}

pub type FleetResult<T> = Result<T, FleetError>;
