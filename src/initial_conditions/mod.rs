mod boundary;
pub mod rand;

pub use boundary::*;
pub use self::rand::*;
