pub mod order;
pub mod payment;
pub mod report;

pub use order::*;
pub use payment::*;
pub use report::*;
