use std::path::PathBuf;

/// 引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (数据库、日志) |
/// | TOTAL_TABLES | 10 | 桌台数量 |
/// | MENU_URL | (未设置) | 远程菜单地址 |
/// | MENU_FETCH_TIMEOUT_MS | 5000 | 远程菜单超时(毫秒) |
/// | BEVERAGE_CATEGORY_ID | beverages | 饮料库存报表的分类 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/comanda TOTAL_TABLES=14 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// 桌台数量，桌号 1..=total_tables
    pub total_tables: u32,
    /// 远程菜单 URL；未设置时跳过远程获取
    pub menu_url: Option<String>,
    /// 远程菜单请求超时 (毫秒)
    pub menu_fetch_timeout_ms: u64,
    /// 饮料分类 ID
    pub beverage_category_id: String,
    /// 日志级别
    pub log_level: String,
    /// JSON 日志格式
    pub log_json: bool,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            total_tables: std::env::var("TOTAL_TABLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(10),
            menu_url: std::env::var("MENU_URL").ok().filter(|v| !v.trim().is_empty()),
            menu_fetch_timeout_ms: std::env::var("MENU_FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            beverage_category_id: std::env::var("BEVERAGE_CATEGORY_ID")
                .unwrap_or_else(|_| "beverages".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, total_tables: u32) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.total_tables = total_tables;
        config
    }

    /// 状态数据库路径
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("comanda.redb")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_paths() {
        let config = Config::with_overrides("/tmp/comanda", 6);
        assert_eq!(config.total_tables, 6);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/comanda/comanda.redb"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/comanda/logs"));
    }
}
