//! WASM bridge exposing the Duffing integrator to a browser front end.

pub mod system;

pub use system::WasmDuffing;
