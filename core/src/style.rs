use colored::{Color, Colorize};

use crate::action::DownloadReport;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

pub fn print_download_report(report: &DownloadReport) {
    for f in &report.failed {
        eprintln!(
            "{} {:#}",
            format!("Failed to download: {}:", f.file).bright_red(),
            f.error
        );
    }
    for file in &report.skipped {
        log::info!("Skipped empty file: {}", file);
    }

    crate::print_success!("\nDownloaded to\n{}", report.solution_dir.to_string_lossy());
}
