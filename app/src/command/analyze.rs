use serde::Serialize;
use strand_core::{PropertySchema, PropertySet, sha256_hex};

pub struct AnalyzeInput {
    pub schema: PropertySchema,
    pub value: String,
}

#[derive(Serialize)]
struct Analysis<'a> {
    id: String,
    value: &'a str,
    properties: PropertySet,
}

/// Strategy for analyzing a string without touching the store.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeStrategy;

impl super::CommandStrategy for AnalyzeStrategy {
    type Input = AnalyzeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let properties = strand_core::analyze(&input.schema, &input.value);
        super::print_json(&Analysis {
            id: sha256_hex(&input.value),
            value: &input.value,
            properties,
        })
    }
}
