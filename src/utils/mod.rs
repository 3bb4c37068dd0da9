// Utils compartidos

pub mod constants;
pub mod scheduler;
pub mod storage;

pub use constants::*;
pub use scheduler::*;
pub use storage::*;
