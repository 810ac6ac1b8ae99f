use std::fs::File;
use std::io::Write;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::input::OutputFormat;

/// JSON导出结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub kind: String,
    pub count: usize,
    pub results: Vec<String>,
    pub export_time: String,
}

/// 导出结果到文件
///
/// `txt` 每行一个结果；`json` 额外带上结果类型和导出时间。
pub fn export_results(
    results: &[String],
    kind: &str,
    output_path: &str,
    format: OutputFormat,
) -> Result<()> {
    let data = match format {
        OutputFormat::Txt => results.join("\n"),
        OutputFormat::Json => {
            let export_data = ExportData {
                kind: kind.to_string(),
                count: results.len(),
                results: results.to_vec(),
                export_time: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            };
            serde_json::to_string_pretty(&export_data)?
        }
    };

    let io_err = |source| Error::Io {
        path: output_path.to_string(),
        source,
    };
    let mut file = File::create(output_path).map_err(io_err)?;
    file.write_all(data.as_bytes()).map_err(io_err)?;

    info!("{} saved to {}", kind, output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["www.example.com".to_string(), "api.example.com".to_string()]
    }

    #[test]
    fn test_export_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path = path.to_str().unwrap();

        export_results(&names(), "subdomains", path, OutputFormat::Txt).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, "www.example.com\napi.example.com");
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path = path.to_str().unwrap();

        export_results(&names(), "resolvers", path, OutputFormat::Json).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        let data: ExportData = serde_json::from_str(&written).unwrap();
        assert_eq!(data.kind, "resolvers");
        assert_eq!(data.count, 2);
        assert_eq!(data.results, names());
    }

    #[test]
    fn test_export_bad_path() {
        let err = export_results(&names(), "subdomains", "/nonexistent/dir/out.txt", OutputFormat::Txt)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
