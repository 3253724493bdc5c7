pub mod sphere;

pub use sphere::{MAX_SPHERE_SEGMENTS, SphereOptions, create_sphere};
