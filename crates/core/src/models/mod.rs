pub mod amount;
pub mod analytics;
pub mod budget;
pub mod debt;
pub mod growth;
pub mod profile;
pub mod salary;
pub mod settings;
