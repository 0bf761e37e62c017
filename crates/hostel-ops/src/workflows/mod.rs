pub mod allocation;
pub mod complaints;
pub mod roster;
