pub mod budget_service;
pub mod debt_service;
pub mod growth_service;
pub mod salary_service;
