use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use colored::Colorize as _;
use exer_core::style::ColorTheme as _;

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "[{}] {}",
                level.as_str().color(level.color()),
                record.args()
            )
        })
        .init();
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paths_under_home_get_a_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            replace_homedir_to_tilde(home.join(".config").join("exer")),
            Path::new("~").join(".config").join("exer")
        );
    }

    #[test]
    fn other_paths_are_untouched() {
        let path = PathBuf::from("relative/config.toml");
        assert_eq!(replace_homedir_to_tilde(path.clone()), path);
    }
}
