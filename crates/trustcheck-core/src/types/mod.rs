mod checks;
mod findings;
mod probe;
mod report;
mod target;

pub use checks::*;
pub use findings::*;
pub use probe::*;
pub use report::*;
pub use target::*;
