pub mod error;
pub mod logging;
pub mod render;
pub mod session;
pub mod settings;
