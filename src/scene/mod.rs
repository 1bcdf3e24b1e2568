pub mod compositor;

pub use compositor::{Phase, RenderPrimitive, SceneCompositor, Viewport};
