//! A股连板股看板后端服务
//!
//! 提供连板股、涨停趋势与统计数据的 RESTful API 服务
//! 数据来源：东方财富

mod app;        // 应用与中间件组装
mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{web, HttpServer};
use env_logger::Env;

use crate::config::{AppConfig, ConfigSource};
use crate::services::{BoardService, EastMoneyClient};

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 0.0.0.0:5000
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match source {
        ConfigSource::File(path) => log::info!("从 {} 加载配置成功", path.display()),
        ConfigSource::Invalid { path, error } => {
            log::warn!("加载配置文件 {} 失败: {}，使用默认配置", path.display(), error)
        }
        ConfigSource::Default => log::info!("使用默认配置"),
    }

    let client = EastMoneyClient::new(&config.upstream)?;
    let service = web::Data::new(BoardService::new(client, config.board.clone()));

    log::info!("启动连板看板后端服务，数据源: 东方财富");
    log::info!("监听地址: {}", config.bind_addr());

    let mut server = HttpServer::new(move || app::build_app(service.clone()));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await?;
    Ok(())
}
