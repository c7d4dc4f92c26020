pub mod actor;
pub mod clock;
pub mod engine;
pub mod history;
pub mod input;
pub mod path;
pub mod physics;
pub mod possession;
pub mod stage;

pub use actor::*;
pub use clock::*;
pub use engine::*;
pub use history::*;
pub use input::*;
pub use path::*;
pub use physics::*;
pub use possession::*;
pub use stage::*;

/// Elapsed play time in milliseconds.
pub type Millis = f64;
