pub mod bridge;
pub mod estimate;
pub mod scenario;

#[cfg(target_arch = "wasm32")]
pub mod wasm;
