pub mod currency;
pub mod domain;
pub mod error;
pub mod protocol;
