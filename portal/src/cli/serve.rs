//! serve サブコマンド
//!
//! ポータルサーバーを起動します。

use clap::Args;

use crate::config::PortalConfig;

/// serve サブコマンドの引数
///
/// 未指定の項目は環境変数の設定値を使う。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 引数で設定を上書き
    pub fn apply(&self, mut config: PortalConfig) -> PortalConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        config
    }
}
