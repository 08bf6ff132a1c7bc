pub mod ring;

pub use ring::{Ring, Winding};
