use super::ValueInput;

/// Strategy for filtering with a plain-English query.
///
/// The output carries the interpretation next to the matches so a caller can
/// see which phrases were understood.
#[derive(Debug, Clone, Copy)]
pub struct QueryStrategy;

impl super::CommandStrategy for QueryStrategy {
    type Input = ValueInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let matches = input.catalog.filter_natural_language(&input.value).await?;
        super::print_json(&matches)
    }
}
