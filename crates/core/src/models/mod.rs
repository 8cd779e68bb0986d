pub mod analysis;
pub mod budget;
pub mod forecast;
pub mod month;
pub mod observation;
pub mod plan;
pub mod source;
pub mod transaction;
