use anyhow::Result;
use quiz_bank_builder::config::{Config, DEFAULT_CONFIG_FILE};
use quiz_bank_builder::utils::logging;
use quiz_bank_builder::App;
use std::path::Path;

fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load(Path::new(DEFAULT_CONFIG_FILE))?;

    // 运行应用
    App::new(config).run()?;

    Ok(())
}
