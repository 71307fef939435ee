pub mod outcome;
pub mod record;
pub mod records;
