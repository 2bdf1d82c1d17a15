pub mod calculator;
pub mod insights;
pub mod results;
