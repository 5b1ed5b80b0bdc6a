use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use strand_core::{FilterCriteria, Predicate, PropertySchema, StringCatalog, StringRecord};
use tracing::debug;

/// `field:op:value` or `field<sym>value`, e.g. `vowel_count:ge:2`, `length>5`.
const CLAUSE_PATTERN: &str =
    r"^\s*([a-z_]+)\s*(?::\s*([a-z]+)\s*:|(>=|<=|!=|<>|==|=|>|<))\s*(.*?)\s*$";

pub struct ListInput {
    pub catalog: Arc<StringCatalog>,
    pub criteria: FilterCriteria,
    pub clauses: Vec<String>,
}

#[derive(Serialize)]
struct ListOutput {
    data: Vec<StringRecord>,
    count: usize,
    filters_applied: FilterCriteria,
    predicate: String,
}

/// Strategy for listing stored strings through the structured filters plus
/// any number of `--where` clauses.
#[derive(Debug, Clone, Copy)]
pub struct ListStrategy;

impl super::CommandStrategy for ListStrategy {
    type Input = ListInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let ListInput {
            catalog,
            criteria,
            clauses,
        } = input;

        if clauses.is_empty() {
            return super::print_json(&catalog.filter(&criteria).await?);
        }

        let predicate = combine(catalog.schema(), &criteria, &clauses)?;
        let data = catalog.list(Some(&predicate)).await?;
        super::print_json(&ListOutput {
            count: data.len(),
            data,
            filters_applied: criteria,
            predicate: predicate.to_string(),
        })
    }
}

/// Conjunction of the structured criteria and every `--where` clause.
fn combine(
    schema: &PropertySchema,
    criteria: &FilterCriteria,
    clauses: &[String],
) -> anyhow::Result<Predicate> {
    let mut children = match criteria.to_predicate(schema)? {
        Predicate::And { children } => children,
        leaf @ Predicate::Leaf(_) => vec![leaf],
    };

    let pattern = Regex::new(CLAUSE_PATTERN)?;
    for clause in clauses {
        children.push(parse_clause(schema, &pattern, clause)?);
    }

    Ok(Predicate::and(children))
}

fn parse_clause(
    schema: &PropertySchema,
    pattern: &Regex,
    clause: &str,
) -> anyhow::Result<Predicate> {
    let caps = pattern.captures(clause).ok_or_else(|| {
        anyhow::anyhow!("Invalid --where clause '{clause}', expected field:op:value")
    })?;

    let field = &caps[1];
    let operator = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map_or("", |m| m.as_str());
    let raw = caps.get(4).map_or("", |m| m.as_str());
    debug!("Parsed clause '{clause}' as {field} {operator} {raw:?}");

    Ok(schema.parse_predicate(field, operator, raw)?)
}
