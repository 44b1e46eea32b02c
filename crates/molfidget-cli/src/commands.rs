pub mod fidget;
