use super::ValueInput;

/// Strategy for analyzing and storing a new string.
///
/// Fails with a conflict if the exact value is already stored.
#[derive(Debug, Clone, Copy)]
pub struct AddStrategy;

impl super::CommandStrategy for AddStrategy {
    type Input = ValueInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let record = input.catalog.create(&input.value).await?;
        super::print_json(&record)
    }
}
