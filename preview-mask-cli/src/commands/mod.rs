pub mod apps;
pub mod get;
pub mod set;
