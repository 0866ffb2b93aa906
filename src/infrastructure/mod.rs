pub mod logging;
pub mod observability;
