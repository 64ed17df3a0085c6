pub mod blow;
pub mod rng;
