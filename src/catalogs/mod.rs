pub mod hipparcos;
pub mod stellarium;
