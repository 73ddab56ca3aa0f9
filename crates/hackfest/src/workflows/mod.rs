pub mod judging;
pub mod registration;
