pub mod geo;
pub mod session;
pub mod split;
pub mod stream;
pub mod summary;
