pub mod assign;
pub mod generate;
pub mod report;
