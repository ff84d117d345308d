pub mod analysis;
pub mod fetch;
pub mod overview;
pub mod quarters;
pub mod session;
pub mod status;
pub mod transcript;
