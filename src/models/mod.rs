pub mod criteria;
pub mod property;
