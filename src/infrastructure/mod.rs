// Infrastructure layer: default collaborators and the text processors
pub mod import_path;
pub mod processors;

pub use import_path::*;
pub use processors::*;
