pub mod bareme;
pub mod feedback;
pub mod regimes;
pub mod simulate;
