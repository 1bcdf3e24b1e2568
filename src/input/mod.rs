pub mod tilt;

pub use tilt::TiltController;
