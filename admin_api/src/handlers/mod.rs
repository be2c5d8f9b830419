pub mod episodes;
pub mod guests;
pub mod sponsors;
pub mod structs;
