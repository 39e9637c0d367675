pub mod config;
pub mod error;
pub mod keys;
pub mod model;
pub mod svg;
pub mod geometry {
    pub mod cubic;
    pub mod limits;
    pub mod sampler;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod label;
    pub mod locate;
    pub mod quadratic;
    pub mod routing;
}

pub use algorithms::label::{label_offset, EdgeLabel};
pub use algorithms::locate::{
    closest_parameter, closest_point_on_curve, point_at_parameter, tangent_angle_at, ClosestPoint,
};
pub use algorithms::routing::{compute_path, EdgeCurve};
pub use config::Config;
pub use error::{ConfigError, GeometryError};
pub use geometry::cubic::CubicBezier;
pub use geometry::sampler::{PathSampler, SampledCubic};
pub use model::{LabelSide, Point, Side};
pub use svg::parse_cubic_path;
