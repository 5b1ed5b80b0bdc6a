use serde_json::json;

use super::ValueInput;

#[derive(Debug, Clone, Copy)]
pub struct DeleteStrategy;

impl super::CommandStrategy for DeleteStrategy {
    type Input = ValueInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        input.catalog.delete(&input.value).await?;
        super::print_json(&json!({ "deleted": input.value }))
    }
}
