pub mod pii;

pub use pii::{mask_tail, Masked};
