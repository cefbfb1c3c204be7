pub mod alert;
pub mod forecast;

pub use alert::*;
pub use forecast::*;
