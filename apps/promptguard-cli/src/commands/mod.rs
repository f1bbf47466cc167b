pub mod check;
pub mod hook;
pub mod install;
pub mod rules;
