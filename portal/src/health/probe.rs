//! 単一エンドポイントのプローブ
//!
//! アドレス文字列からプロトコルを判別し、タイムアウト付きの死活確認を行う。
//!
//! 判別順:
//! 1. `tcp://host:port` → TCP接続
//! 2. `http://` / `https://` → HTTPプローブ
//! 3. `host:<数字>` → TCP接続
//! 4. それ以外 → `http://<address>` へのHTTPプローブ
//!
//! HTTPプローブはHEADを先に送り、通信エラーまたは400以上ならGETで取り直す。
//! 最終ステータスが500未満なら稼働中とみなす（4xxは到達可能扱い）。

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use tokio::net::TcpStream;
use tracing::debug;

use crate::types::{ProbeResult, ProbeStatus};

/// HTTPプローブのタイムアウト（1リクエストあたり）
pub const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// TCP接続のタイムアウト
pub const TCP_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// 判別済みのプローブ先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// TCP接続
    Tcp {
        /// ホスト名またはIPアドレス
        host: String,
        /// ポート番号
        port: u16,
    },
    /// HTTP(S) URL
    Http(String),
}

/// アドレス文字列を判別
///
/// 解析できない場合はエラー説明文を返す（呼び出し側で `up=false` に変換する）。
pub fn classify(address: &str) -> Result<ProbeTarget, String> {
    if address.starts_with("tcp://") {
        return parse_tcp_url(address);
    }
    if address.starts_with("http://") || address.starts_with("https://") {
        return Ok(ProbeTarget::Http(address.to_string()));
    }
    if let Some((host, port)) = address.rsplit_once(':') {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            let port = port
                .parse::<u16>()
                .map_err(|_| format!("invalid port: {}", port))?;
            return Ok(ProbeTarget::Tcp {
                host: host.to_string(),
                port,
            });
        }
    }
    Ok(ProbeTarget::Http(format!("http://{}", address)))
}

fn parse_tcp_url(address: &str) -> Result<ProbeTarget, String> {
    let url = Url::parse(address).map_err(|e| format!("invalid address {}: {}", address, e))?;
    let host = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| format!("missing host in {}", address))?;
    let port = url
        .port()
        .ok_or_else(|| format!("missing port in {}", address))?;
    Ok(ProbeTarget::Tcp {
        host: host.to_string(),
        port,
    })
}

/// プローブエンジン
///
/// 副作用はなく、失敗はすべて `up=false` の結果として返す。
#[derive(Clone)]
pub struct ProbeEngine {
    client: Client,
    http_timeout: Duration,
    tcp_timeout: Duration,
}

impl ProbeEngine {
    /// 共有HTTPクライアントからプローブエンジンを作成
    pub fn new(client: Client) -> Self {
        Self {
            client,
            http_timeout: HTTP_PROBE_TIMEOUT,
            tcp_timeout: TCP_PROBE_TIMEOUT,
        }
    }

    /// タイムアウトを設定
    pub fn with_timeouts(mut self, http_timeout: Duration, tcp_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self.tcp_timeout = tcp_timeout;
        self
    }

    /// 単一アドレスをプローブ
    pub async fn probe(&self, address: &str) -> ProbeResult {
        let start = Instant::now();

        let outcome = match classify(address) {
            Ok(ProbeTarget::Tcp { host, port }) => self.probe_tcp(&host, port).await,
            Ok(ProbeTarget::Http(url)) => self.probe_http(&url).await,
            Err(reason) => Err(reason),
        };
        let latency_ms = elapsed_ms(start);

        match outcome {
            Ok((up, status)) => ProbeResult {
                up,
                status,
                latency_ms,
            },
            Err(reason) => {
                debug!(address = %address, error = %reason, latency_ms, "Probe failed");
                ProbeResult::down(reason, latency_ms)
            }
        }
    }

    async fn probe_tcp(&self, host: &str, port: u16) -> Result<(bool, ProbeStatus), String> {
        match tokio::time::timeout(self.tcp_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => Ok((true, ProbeStatus::open())),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("timed out".to_string()),
        }
    }

    async fn probe_http(&self, url: &str) -> Result<(bool, ProbeStatus), String> {
        let code = match self.head_status(url).await {
            Ok(code) if code < 400 => code,
            Ok(code) => {
                debug!(url = %url, status = code, "HEAD returned error status, retrying with GET");
                self.get_status(url).await?
            }
            Err(e) => {
                debug!(url = %url, error = %e, "HEAD failed, retrying with GET");
                self.get_status(url).await?
            }
        };
        Ok((code < 500, ProbeStatus::Code(code)))
    }

    async fn head_status(&self, url: &str) -> Result<u16, String> {
        self.client
            .head(url)
            .timeout(self.http_timeout)
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(|e| e.to_string())
    }

    async fn get_status(&self, url: &str) -> Result<u16, String> {
        self.client
            .get(url)
            .timeout(self.http_timeout)
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(|e| e.to_string())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    (start.elapsed().as_secs_f64() * 1000.0).round() as u64
}
