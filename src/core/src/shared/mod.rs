pub mod coordinate;
pub mod kinematics;

pub use coordinate::*;
pub use kinematics::*;
