use redb::TableDefinition;

/// Table for the key-value entries.
/// Key: entry name (e.g. "herdbook.animals")
/// Value: serialized JSON document
pub const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");
