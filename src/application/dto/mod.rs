pub mod slugs;

pub use slugs::SlugAssignment;
