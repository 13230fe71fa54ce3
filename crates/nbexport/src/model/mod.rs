//! Fitted-model access: object dumps, introspection and probability queries.

mod estimator;
mod introspect;
mod object;
mod table;

pub use estimator::{
    DISCRETE_ESTIMATOR, DiscreteEstimator, Estimator, NORMAL_ESTIMATOR, NormalEstimator,
    ProbabilityQueryable, QueryShape, probability,
};
pub use introspect::{ExtractedModel, IntrospectionProfile, PROFILES, introspect, profile_for};
pub use object::{ModelHandle, ObjectNode};
pub use table::DistributionTable;
