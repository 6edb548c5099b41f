pub mod coincheck;
pub mod zaif;
