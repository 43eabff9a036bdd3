//! # 菜谱管理服务
//!
//! 提供菜谱的增删改查 REST 接口：
//! - 应用层 `app`：路由、处理器、业务服务与查询过滤器
//! - 核心层 `core`：统一错误处理与请求日志中间件
//! - 基础设施层 `infrastructure`：内存 / PostgreSQL 存储与日志初始化
//! - 配置 `config`：TOML 配置文件与环境变量覆盖

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;
use tracing::info;

pub use app::{create_app, openapi, recipe::service::RecipeService, AppState};
pub use config::{Config, ConfigError, StorageBackend};
pub use crate::core::error::CoreError;

use app::recipe::store::RecipeStore;
use infrastructure::MemoryRecipeStore;

/// 启动错误
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage backend '{0}' is not available in this build (enable the `database` feature)")]
    BackendUnavailable(&'static str),
    #[error("database initialization failed: {0}")]
    Database(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StartupError {
    fn from(err: sqlx::Error) -> Self {
        StartupError::Database(err.to_string())
    }
}

/// 按配置构建存储实现
pub async fn build_store(config: &Config) -> Result<Arc<dyn RecipeStore>, StartupError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory recipe store");
            Ok(Arc::new(MemoryRecipeStore::new()))
        }
        #[cfg(feature = "database")]
        StorageBackend::Postgres => {
            let manager = infrastructure::database::DatabaseManager::new(&config.storage).await?;
            manager.create_tables().await?;
            info!("Using PostgreSQL recipe store");
            Ok(Arc::new(manager.into_store()))
        }
        #[cfg(not(feature = "database"))]
        StorageBackend::Postgres => Err(StartupError::BackendUnavailable("postgres")),
    }
}
