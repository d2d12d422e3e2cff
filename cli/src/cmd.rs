pub mod download;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Workspace root (overrides the config file and EXER_WORKSPACE)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("d"))]
    Download(download::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Download(args) => download::exec(args, self).await,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::{CommandFactory as _, Parser as _};

    #[test]
    fn command_table_is_consistent() {
        GlobalArgs::command().debug_assert();
    }

    #[test]
    fn download_alias_and_flags() {
        let args =
            GlobalArgs::try_parse_from(["exer", "d", "bob", "-t", "ruby", "--workspace", "/tmp/ws"])
                .unwrap();
        let Subcommand::Download(dl) = &args.subcmd;
        assert_eq!(dl.exercise.as_deref(), Some("bob"));
        assert_eq!(dl.track.as_deref(), Some("ruby"));
        assert_eq!(dl.uuid, None);
        assert_eq!(args.workspace, Some(PathBuf::from("/tmp/ws")));
    }

    #[test]
    fn download_by_uuid() {
        let args = GlobalArgs::try_parse_from(["exer", "download", "--uuid", "abc-123"]).unwrap();
        let Subcommand::Download(dl) = &args.subcmd;
        assert_eq!(dl.uuid.as_deref(), Some("abc-123"));
        assert_eq!(dl.exercise, None);

        let args = GlobalArgs::try_parse_from(["exer", "download", "-u", "abc-123"]).unwrap();
        let Subcommand::Download(dl) = &args.subcmd;
        assert_eq!(dl.uuid.as_deref(), Some("abc-123"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(GlobalArgs::try_parse_from(["exer", "submit"]).is_err());
    }
}
