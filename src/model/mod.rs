pub mod decision;
pub mod instrument;
pub mod signal;
pub mod tick;
