pub mod analytics;
pub mod interest;
pub mod planning;
pub mod time_value;
