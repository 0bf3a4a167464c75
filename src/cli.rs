use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// Timeline editor surface for a scriptable music sequencer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Theme file (JSON) overriding the default palette
    #[arg(short = 't', long = "theme", value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Map -v count to a log level filter
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_maps_to_level() {
        let args = Args::parse_from(["seqline"]);
        assert_eq!(args.log_level(), log::LevelFilter::Warn);

        let args = Args::parse_from(["seqline", "-vv"]);
        assert_eq!(args.log_level(), log::LevelFilter::Debug);

        let args = Args::parse_from(["seqline", "-vvvv"]);
        assert_eq!(args.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_theme_and_config_dir_args() {
        let args = Args::parse_from(["seqline", "-t", "dark.json", "--config-dir", "/tmp/cfg"]);
        assert_eq!(args.theme, Some(PathBuf::from("dark.json")));
        assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/cfg")));
    }
}
