use super::ValueInput;

#[derive(Debug, Clone, Copy)]
pub struct GetStrategy;

impl super::CommandStrategy for GetStrategy {
    type Input = ValueInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let record = input.catalog.get(&input.value).await?;
        super::print_json(&record)
    }
}
