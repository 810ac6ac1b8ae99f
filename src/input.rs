use std::fs;

use clap::Parser;

use crate::error::{Error, Result};

/// 输出格式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(OutputFormat::Txt),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unsupported output format: {}. supported: txt, json", s)),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "subhunt")]
#[command(version)]
#[command(about = "Subdomain enumeration and DNS resolver validation", long_about = None, arg_required_else_help = true)]
pub struct Opts {
    /// input file: subdomains for --active, resolvers for --working-resolver
    #[arg(short, long)]
    pub list: Option<String>,

    /// target domain
    #[arg(short, long)]
    pub domain: Option<String>,

    /// wordlist path
    #[arg(short, long)]
    pub wordlist: Option<String>,

    /// output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// resolvers path, 8.8.8.8 and 1.1.1.1 on default
    #[arg(short, long)]
    pub resolver: Option<String>,

    /// identify resolvers that are functioning correctly
    #[arg(long, visible_alias = "wr")]
    pub working_resolver: bool,

    /// find subdomains using passive methods
    #[arg(long, visible_alias = "ps")]
    pub passive: bool,

    /// find subdomains using active resolution
    #[arg(long, visible_alias = "as")]
    pub active: bool,

    /// concurrent DNS queries
    #[arg(short, long, default_value_t = 50)]
    pub concurrency: usize,

    /// permutation levels
    #[arg(long, default_value_t = 2)]
    pub levels: usize,

    /// per-query timeout in seconds
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// output format (txt, json)
    #[arg(long, default_value = "txt")]
    pub format: String,

    /// only print warnings and errors
    #[arg(short, long)]
    pub silent: bool,

    /// log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// 按行读取文件，去掉首尾空白并跳过空行
pub fn read_lines(path: &str) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_lines_skips_blank() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "www.example.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  api.example.com  ").unwrap();
        writeln!(file, "   ").unwrap();

        let lines = read_lines(file.path().to_str().unwrap()).unwrap();
        assert_eq!(lines, vec!["www.example.com", "api.example.com"]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines("/nonexistent/resolvers.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_output_format() {
        assert_eq!("TXT".parse::<OutputFormat>(), Ok(OutputFormat::Txt));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_opts_aliases() {
        let opts = Opts::try_parse_from([
            "subhunt", "--as", "-d", "example.com", "-w", "words.txt", "-o", "out.txt",
        ])
        .unwrap();
        assert!(opts.active);
        assert!(!opts.passive);
        assert_eq!(opts.domain.as_deref(), Some("example.com"));
        assert_eq!(opts.concurrency, 50);
        assert_eq!(opts.levels, 2);
        assert_eq!(opts.timeout, 3);

        let opts = Opts::try_parse_from(["subhunt", "--wr", "-l", "r.txt", "-o", "ok.txt"]).unwrap();
        assert!(opts.working_resolver);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let zero = Opts::try_parse_from(["subhunt", "--wr", "-l", "r.txt", "-o", "ok.txt", "-t", "0"]);
        assert!(zero.is_err());

        let one = Opts::try_parse_from(["subhunt", "--wr", "-l", "r.txt", "-o", "ok.txt", "-t", "1"]).unwrap();
        assert_eq!(one.timeout, 1);
    }
}
