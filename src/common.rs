pub mod dfs;
pub mod indexed_heap;
pub mod matrix;

pub use dfs::{DfsEvent, DfsEvents};
pub use indexed_heap::IndexedMinHeap;
pub use matrix::Matrix;
