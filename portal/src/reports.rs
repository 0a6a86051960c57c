//! ディスク使用量レポート
//!
//! CIパイプライン（`check_disk` アクション）がレポートディレクトリへ書き出す
//! `check_disk_*.json` を探し、最新のものを解析する。

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::common::error::{PortalError, PortalResult};

const REPORT_PREFIX: &str = "check_disk_";
const REPORT_SUFFIX: &str = ".json";

/// パイプラインが書き出すレポートファイルの中身
#[derive(Debug, Clone, Default, Deserialize)]
struct RawDiskReport {
    #[serde(default)]
    df: String,
    #[serde(default)]
    docker_df: String,
    #[serde(default)]
    generated_at: String,
}

/// `/ops/disk` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskReport {
    /// レポート生成時刻（ファイル記載のまま）
    pub generated_at: String,
    /// `df` 出力のヘッダー列
    pub headers: Vec<String>,
    /// `df` 出力の各行
    pub rows: Vec<Vec<String>>,
    /// `docker system df` 出力
    pub docker_info: String,
    /// `df` 出力の原文
    pub raw_df: String,
}

/// レポートファイルを新しい順に列挙
///
/// ディレクトリが存在しない場合は空リストを返す。
pub async fn list_reports(dir: &Path) -> PortalResult<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PortalError::Internal(format!("read {}: {}", dir.display(), e))),
    };

    let mut reports: Vec<(SystemTime, PathBuf)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?
    {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with(REPORT_PREFIX) && name.ends_with(REPORT_SUFFIX)) {
            continue;
        }
        let modified = entry
            .metadata()
            .await
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        reports.push((modified, entry.path()));
    }

    reports.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(reports.into_iter().map(|(_, path)| path).collect())
}

/// 最新レポートを読み込んで解析（無ければ `None`）
pub async fn latest_report(dir: &Path) -> PortalResult<Option<DiskReport>> {
    let Some(path) = list_reports(dir).await?.into_iter().next() else {
        return Ok(None);
    };

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PortalError::Internal(format!("read {}: {}", path.display(), e)))?;
    let raw: RawDiskReport = serde_json::from_str(&text)
        .map_err(|e| PortalError::Internal(format!("parse {}: {}", path.display(), e)))?;

    Ok(Some(parse_report(raw)))
}

fn parse_report(raw: RawDiskReport) -> DiskReport {
    let mut lines = raw.df.lines();
    let headers = lines
        .next()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect();

    DiskReport {
        generated_at: raw.generated_at,
        headers,
        rows,
        docker_info: raw.docker_df,
        raw_df: raw.df,
    }
}
