use clap::{Args, Parser, Subcommand};
use crate::input::OpeningSpec;
use net_sizer_common::{PriceTier, Unit};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "net-sizer")]
#[command(about = "網戸の規格サイズ照合・見積書作成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 開口部サイズをカタログと照合
    Match {
        #[command(flatten)]
        openings: OpeningArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 照合結果から請求書を作成
    Invoice {
        #[command(flatten)]
        openings: OpeningArgs,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// 価格区分 (selling/deal/event)
        #[arg(short, long, default_value = "selling")]
        tier: PriceTier,

        /// 値引率（%、0-100）
        #[arg(short, long)]
        discount: Option<String>,

        /// 数量指定（開口部番号=数量、複数可）
        #[arg(short, long = "qty")]
        quantities: Vec<QuantitySpec>,

        /// 数量・価格区分・値引率を対話式で入力
        #[arg(short, long)]
        interactive: bool,
    },

    /// カタログの内容を集計表示
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のカタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 既定の製品ラインを設定 (door/window)
        #[arg(long)]
        set_product_line: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// カタログと製品ラインの指定
#[derive(Args, Clone, Debug)]
pub struct CatalogArgs {
    /// サイズカタログJSON（省略時は設定ファイルの値）
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// 製品ライン (door/window、省略時は設定ファイルの値)
    #[arg(short, long)]
    pub product_line: Option<String>,

    /// カスタム製品ラインJSON
    #[arg(long)]
    pub line_file: Option<PathBuf>,
}

/// 開口部の指定
#[derive(Args, Clone, Debug)]
pub struct OpeningArgs {
    /// 開口部サイズ（高さx幅[:色]、例: 120x180 90x90:gr）
    #[arg(required = true)]
    pub openings: Vec<OpeningSpec>,

    /// 寸法の単位 (cm/feet/inch)
    #[arg(short, long, default_value = "cm")]
    pub unit: String,

    /// 既定の色コード
    #[arg(long, default_value = "BLACK")]
    pub color: String,
}

impl OpeningArgs {
    /// 不明な単位はcm扱い（警告ログあり）
    pub fn unit(&self) -> Unit {
        Unit::parse_lenient(&self.unit)
    }
}

/// 数量指定 `N=Q`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantitySpec {
    pub opening_index: usize,
    pub quantity: u32,
}

impl std::str::FromStr for QuantitySpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, quantity) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid quantity: {}. Use OPENING=QTY (e.g. 1=2)", s))?;

        let opening_index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("Invalid opening number: {}", index))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid quantity: {}", quantity))?;

        Ok(QuantitySpec {
            opening_index,
            quantity,
        })
    }
}
