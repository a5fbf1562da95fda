pub mod leaf;
pub mod merkle;
pub mod token;

pub use leaf::*;
pub use merkle::*;
pub use token::*;
