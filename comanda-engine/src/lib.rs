//! Comanda Engine - 餐厅点单/厨房/收银状态引擎
//!
//! # 架构概述
//!
//! - **状态** (`state`): 菜单库存、购物车、厨房订单、桌台、销售流水
//! - **引擎** (`engine`): 校验、编排、原子持久化、变更广播
//! - **启动** (`bootstrap`): 菜单获取 (本地 → 远程 → 内置) 与状态回放
//! - **存储** (`storage`): redb 键值 JSON 存储
//! - **会话** (`session`): 操作员会话
//!
//! # 模块结构
//!
//! ```text
//! comanda-engine/src/
//! ├── core/          # 配置
//! ├── state/         # 状态组件
//! ├── engine/        # PosEngine
//! ├── bootstrap/     # 启动流程、远程菜单
//! ├── storage.rs     # redb 持久化
//! ├── session.rs     # 会话
//! └── utils/         # 日志
//! ```

pub mod bootstrap;
pub mod core;
pub mod engine;
pub mod session;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use bootstrap::{BootError, Bootstrap, HttpMenuFetcher, MenuFetcher, MenuOrigin, Readiness};
pub use core::Config;
pub use engine::{Decline, EngineError, EngineResult, EngineSettings, PosEngine};
pub use session::SessionGate;
pub use storage::{StateStorage, StorageError};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 准备运行环境: 工作目录、日志、过期日志清理
///
/// `.env` 需在 [`Config::from_env`] 之前加载。
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(&log_dir))?;
    let removed = cleanup_old_logs(&log_dir, utils::logger::APP_LOG_RETENTION_DAYS)?;
    if removed > 0 {
        tracing::info!(removed, "Old log files removed");
    }
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
