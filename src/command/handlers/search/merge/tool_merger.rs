use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::engine::tools::{ToolFieldTable, ToolName, ToolResult, WorkerResponse};

const LOG_TARGET: &str = "snel_search::merge";

/// Merged value per requested tool, in request order.
pub type MergedResultMap = IndexMap<ToolName, Value>;

/// Folds the final answers of many workers into one value per tool.
///
/// Lists accumulate in response order, maps replace whatever came before
/// (last writer wins), other values are kept as opaque scalars. Tools nobody
/// answered for come out as `{}`.
pub struct ToolResultMerger {
    table: ToolFieldTable,
}

impl ToolResultMerger {
    pub fn new() -> Self {
        Self::with_table(ToolFieldTable::global())
    }

    pub fn with_table(table: ToolFieldTable) -> Self {
        Self { table }
    }

    pub fn merge(&self, responses: &[WorkerResponse], tools: &[ToolName]) -> MergedResultMap {
        let mut merged: IndexMap<ToolName, Option<Value>> =
            tools.iter().map(|tool| (*tool, None)).collect();

        for (index, response) in responses.iter().enumerate() {
            for (tool, slot) in merged.iter_mut() {
                let Some(field) = self.table.lookup(*tool) else {
                    error!(target: LOG_TARGET, tool = %tool, "No result field registered for tool");
                    continue;
                };

                match ToolResult::classify(field.extract(response)) {
                    ToolResult::Empty => {
                        debug!(target: LOG_TARGET, tool = %tool, response = index, "No data found");
                    }
                    ToolResult::Items(items) => absorb_items(slot, items, *tool, index),
                    ToolResult::Map(map) => {
                        *slot = Some(Value::Object(map.clone()));
                    }
                    ToolResult::Scalar(value) => {
                        warn!(
                            target: LOG_TARGET,
                            tool = %tool,
                            field = field.field,
                            response = index,
                            "Unexpected result type, keeping value as-is"
                        );
                        *slot = Some(value.clone());
                    }
                }
            }
        }

        merged
            .into_iter()
            .map(|(tool, value)| (tool, value.unwrap_or_else(|| Value::Object(Map::new()))))
            .collect()
    }
}

impl Default for ToolResultMerger {
    fn default() -> Self {
        Self::new()
    }
}

fn absorb_items(slot: &mut Option<Value>, items: &[Value], tool: ToolName, index: usize) {
    if let Some(Value::Array(acc)) = slot.as_mut() {
        acc.extend(items.iter().cloned());
        return;
    }

    if slot.is_some() {
        warn!(
            target: LOG_TARGET,
            tool = %tool,
            response = index,
            "List result follows a non-list value, restarting accumulation"
        );
    }
    *slot = Some(Value::Array(items.to_vec()));
}
