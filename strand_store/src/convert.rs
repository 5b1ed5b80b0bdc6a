use strand_core::{PropertySet, StringRecord};
use strand_entities::strings;

pub fn record_from_model(m: strings::Model) -> anyhow::Result<StringRecord> {
    let properties: PropertySet = serde_json::from_str(&m.properties)?;

    Ok(StringRecord {
        id: m.sha256_hash,
        value: m.value,
        properties,
        created_at: m.created_at,
    })
}
