use std::sync::Arc;

use returnly_agent::ReturnsEngine;
use returnly_core::config::AppConfig;
use returnly_core::returns::ReturnOutcome;
use returnly_db::{connect_with_settings, SqlOrderRepository};

use crate::commands::CommandResult;

pub fn run(config: &AppConfig, order_id: &str) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let engine = ReturnsEngine::new(Arc::new(SqlOrderRepository::new(pool.clone())));
        let outcome = engine.check_return_eligibility(order_id).await;
        pool.close().await;
        Ok::<ReturnOutcome, (&'static str, String, u8)>(outcome)
    });

    match result {
        Ok(ReturnOutcome::DatabaseError { detail }) => {
            CommandResult::failure("check", "database", detail, 5)
        }
        Ok(outcome) => CommandResult::success("check", outcome.to_string()),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("check", error_class, message, exit_code)
        }
    }
}
