pub mod error {
    pub use fsutil::error::*;
}

pub mod solution;
pub mod workspace;

pub use solution::*;
pub use workspace::*;
