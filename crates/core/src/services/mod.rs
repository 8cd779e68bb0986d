pub mod analysis_service;
pub mod budget_service;
pub mod forecast_service;
pub mod plan_service;
pub mod projection_service;
