pub mod assessment;
pub mod delivery;
pub mod intake;
