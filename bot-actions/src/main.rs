use anyhow::Context;
use bot_actions::{
    ActionRequest, ActionState, ApiResponse, AppError, dispatch, setup_environment,
};
use std::io::Read;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();

    // 2. 初始化运行状态 (存储路径、短信实现)
    let state = ActionState::initialize(config);

    // 3. 从 stdin 读取一个请求
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read action request from stdin")?;

    let result = match serde_json::from_str::<ActionRequest>(&input) {
        Ok(request) => dispatch(&state, &request).await,
        Err(e) => Err(AppError::invalid_request(format!("Malformed action request: {e}"))),
    };

    // 4. 响应写到 stdout，日志在 stderr
    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(code = %e.code, category = e.code.category().name(), "Action failed: {}", e);
            println!("{}", serde_json::to_string(&ApiResponse::error(&e))?);
            std::process::exit(1);
        }
    }
}
