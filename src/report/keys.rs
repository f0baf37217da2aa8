use std::collections::HashMap;

use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct KeyRow {
    key_id: i32,
    key: String,
}

/// Looks up the store's internal key ids for the given metric names. Names
/// missing from the dictionary are silently absent from the result; their
/// columns simply never receive data.
pub async fn resolve_keys(
    pool: &PgPool,
    names: &[&str],
) -> Result<HashMap<String, i32>, sqlx::Error> {
    let names: Vec<String> = names.iter().map(|n| (*n).to_owned()).collect();
    let rows = sqlx::query_as::<_, KeyRow>(
        "SELECT key_id, key FROM key_dictionary WHERE key = ANY($1)",
    )
    .bind(&names)
    .fetch_all(pool)
    .await?;
    Ok(key_map(rows))
}

fn key_map(rows: Vec<KeyRow>) -> HashMap<String, i32> {
    rows.into_iter().map(|row| (row.key, row.key_id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_holds_only_the_names_the_dictionary_returned() {
        let rows = vec![
            KeyRow { key_id: 17, key: "KW_Demand".to_owned() },
            KeyRow { key_id: 23, key: "Frequency".to_owned() },
        ];
        let map = key_map(rows);
        assert_eq!(map.get("KW_Demand"), Some(&17));
        assert_eq!(map.get("Frequency"), Some(&23));
        assert_eq!(map.get("PF_Total"), None);
        assert_eq!(map.len(), 2);
    }
}
