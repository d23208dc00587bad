pub mod presets;
pub mod run;

pub use presets::*;
pub use run::*;
