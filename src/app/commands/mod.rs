pub mod output;
pub mod pr;
