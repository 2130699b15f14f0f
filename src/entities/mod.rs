pub mod funding_round;
pub mod startup;

pub use startup::Status;
