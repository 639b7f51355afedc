use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::engine::ReturnsEngine;

/// A named tool callable by the agent framework. Business rejections are
/// never an `Err`: every taxonomy variant comes back as rendered text inside
/// `Ok`, so nothing propagates as an uncaught fault across the boundary.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Unknown tool names are a caller wiring bug, not a user-facing
    /// condition, so they do surface as an error.
    pub async fn dispatch(&self, name: &str, input: Value) -> Result<Value> {
        let Some(tool) = self.tools.get(name) else {
            bail!("unknown tool `{name}`");
        };
        tool.execute(input).await
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

pub struct CheckReturnEligibilityTool {
    engine: Arc<ReturnsEngine>,
}

pub struct InitiateReturnTool {
    engine: Arc<ReturnsEngine>,
}

impl CheckReturnEligibilityTool {
    pub fn new(engine: Arc<ReturnsEngine>) -> Self {
        Self { engine }
    }
}

impl InitiateReturnTool {
    pub fn new(engine: Arc<ReturnsEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Tool for CheckReturnEligibilityTool {
    fn name(&self) -> &'static str {
        "check_return_eligibility"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let Some(order_id) = order_id_argument(&input) else {
            return Ok(missing_order_id_reply());
        };
        let outcome = self.engine.check_return_eligibility(order_id).await;
        Ok(Value::String(outcome.to_string()))
    }
}

#[async_trait]
impl Tool for InitiateReturnTool {
    fn name(&self) -> &'static str {
        "initiate_return"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let Some(order_id) = order_id_argument(&input) else {
            return Ok(missing_order_id_reply());
        };
        let outcome = self.engine.initiate_return(order_id).await;
        Ok(Value::String(outcome.to_string()))
    }
}

/// Registry holding both return tools over a shared engine.
pub fn returns_toolset(engine: Arc<ReturnsEngine>) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(CheckReturnEligibilityTool::new(engine.clone()));
    registry.register(InitiateReturnTool::new(engine));
    registry
}

fn order_id_argument(input: &Value) -> Option<&str> {
    input.get("order_id").and_then(Value::as_str)
}

fn missing_order_id_reply() -> Value {
    Value::String("Error: tool input must include an `order_id` string.".to_string())
}
