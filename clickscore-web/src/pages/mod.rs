pub mod index;
pub mod not_found;

pub use index::IndexPage;
pub use not_found::NotFound;
