use comanda_engine::{
    Bootstrap, Config, EngineSettings, HttpMenuFetcher, StateStorage, bootstrap::DEFAULT_MENU_JSON,
    print_banner, setup_environment,
};
use shared::AppError;
use shared::util::format_ars;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 与配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 设置环境 (工作目录, 日志)
    setup_environment(&config)?;

    print_banner();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        total_tables = config.total_tables,
        "Comanda engine starting..."
    );

    // 3. 打开存储
    let storage = StateStorage::open(config.db_path())?;

    // 4. 菜单获取 + 状态回放
    let mut boot = Bootstrap::new(storage, EngineSettings::from(&config))
        .with_bundled_menu(DEFAULT_MENU_JSON);
    if let Some(url) = &config.menu_url {
        let timeout = Duration::from_millis(config.menu_fetch_timeout_ms);
        boot = boot.with_fetcher(HttpMenuFetcher::new(url.as_str(), timeout)?);
    }

    let (engine, origin) = match boot.run().await {
        Ok(booted) => booted,
        Err(e) => {
            let err = AppError::from(e);
            tracing::error!(code = %err.code, error = %err, "Startup failed");
            return Err(err.into());
        }
    };

    // 5. 概览
    for (table_id, table) in engine.tables().iter().filter(|(_, t)| !t.is_free()) {
        tracing::info!(
            table_id,
            total = %format_ars(table.total),
            items = table.items.len(),
            covers = table.covers(),
            "Open table"
        );
    }
    let summary = engine.daily_summary();
    tracing::info!(
        menu = %origin,
        sales = summary.sale_count,
        revenue = %format_ars(summary.revenue),
        covers = summary.covers(),
        open_tables = summary.open_tables,
        kitchen_queue = summary.active_orders,
        "Comanda engine ready"
    );

    Ok(())
}
