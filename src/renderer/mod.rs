//! Canvas 2D rendering module
//!
//! Paints the scene from `GameState` alone. The only input that is not game
//! state is wall-clock time, used for the seaweed sway.

pub mod layout;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
