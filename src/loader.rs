//! カタログ・製品ラインの読み込み

use crate::error::{NetSizerError, Result};
use net_sizer_common::{FitEngine, ProductLine, SizeCatalog};
use std::path::Path;

/// カタログJSONを非同期で読む
pub async fn load_catalog(path: &Path) -> Result<SizeCatalog> {
    let content = tokio::fs::read_to_string(path).await?;
    let catalog = SizeCatalog::from_json(&content)?;
    tracing::debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// 製品ラインを決める（ファイル指定がプリセット名より優先）
pub fn resolve_product_line(name: &str, file: Option<&Path>) -> Result<ProductLine> {
    if let Some(path) = file {
        return Ok(ProductLine::from_file(path)?);
    }
    ProductLine::from_preset(name).ok_or_else(|| NetSizerError::UnknownProductLine(name.to_string()))
}

/// エンジンを作り、カタログを読み込む
///
/// 読み込みに失敗してもエンジンは返す（計算時に CatalogUnavailable になる）。
pub async fn prepare_engine(product_line: ProductLine, catalog_path: &Path) -> FitEngine {
    let mut engine = FitEngine::new(product_line);
    match load_catalog(catalog_path).await {
        Ok(catalog) => engine.set_catalog(catalog),
        Err(e) => engine.mark_failed(format!("{}: {}", catalog_path.display(), e)),
    }
    engine
}
