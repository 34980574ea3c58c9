pub mod bounds;
pub mod clock;
pub mod director;
pub mod rng;
pub mod roster;
pub mod score;
