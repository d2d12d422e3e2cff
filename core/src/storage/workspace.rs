use std::path::{Path, PathBuf};

use super::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct Workspace<'a> {
    home: &'a Path,
}

impl<'w> Workspace<'w> {
    #[inline]
    pub fn new(home: &'w Path) -> Self {
        Self { home }
    }

    /// Directory for one solution of `exercise`.
    /// Solutions of the same exercise by different users never collide.
    pub fn solution_path(&self, exercise: &str, solution_id: &str) -> PathBuf {
        self.home.join(exercise).join(solution_id)
    }

    #[must_use]
    pub fn create_solution_dir(&self, exercise: &str, solution_id: &str) -> Result<PathBuf> {
        let dir = self.solution_path(exercise, solution_id);
        fsutil::mkdir_all(&dir)?;
        Ok(dir)
    }
}
