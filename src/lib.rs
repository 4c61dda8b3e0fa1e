pub mod error;
pub mod scene;

// Input model modules
pub mod strip;
pub mod table;

// Layout-and-mapping engine modules
pub mod grid;
pub mod intensity;
pub mod layout;
pub mod pipeline;

pub mod cli;
