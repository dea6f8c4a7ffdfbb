//! 回填 `name_lower` 字段
//!
//! 旧数据可能缺少小写名称或与名称不一致，搜索依赖这个字段。

use gestio::{
    infrastructure::{logger, store},
    Config,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _guard = logger::init(&config.logging)?;

    let store = store::open(&config.store).await?;
    let updated = store.backfill_name_lower().await?;

    info!("Updated {} products", updated);
    Ok(())
}
