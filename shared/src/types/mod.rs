pub mod pagination;

pub use pagination::PageWindow;
