pub mod grouping;
pub mod model;
pub mod render;
pub mod state;
