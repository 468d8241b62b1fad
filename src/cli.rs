use std::path::PathBuf;

use clap::Parser;

use crate::route::StartPage;
use crate::theme::ThemeMode;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Terminal portfolio and blog with a command palette")]
pub struct Args {
    /// Color scheme for this session, overriding the config file
    #[arg(short, long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Page to open on startup
    #[arg(short, long, value_enum, default_value = "home")]
    pub page: StartPage,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the command palette actions as JSON and exit
    #[arg(long)]
    pub list_actions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["folio"]).unwrap();
        assert_eq!(args.theme, None);
        assert_eq!(args.page, StartPage::Home);
        assert!(args.config.is_none());
        assert!(!args.list_actions);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "folio",
            "--theme",
            "light",
            "--page",
            "writing",
            "--config",
            "/tmp/folio.toml",
            "--list-actions",
        ])
        .unwrap();
        assert_eq!(args.theme, Some(ThemeMode::Light));
        assert_eq!(args.page, StartPage::Writing);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/folio.toml")));
        assert!(args.list_actions);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Args::try_parse_from(["folio", "--theme", "sepia"]).is_err());
    }
}
