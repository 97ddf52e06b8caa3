pub mod account;
pub mod clarity;
pub mod contract;
pub mod token;

pub use account::*;
pub use clarity::*;
pub use contract::*;
pub use token::*;
