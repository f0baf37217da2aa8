use sqlx::PgPool;
use uuid::Uuid;

use super::types::UNKNOWN_DEVICE;

/// Directory row surfaced by the device listing endpoint.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct DeviceRow {
    pub id: Uuid,
    pub name: Option<String>,
}

/// Device resolved to the entity its telemetry is filed under.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResolvedDevice {
    pub id: Uuid,
    pub name: Option<String>,
}

impl ResolvedDevice {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => UNKNOWN_DEVICE.to_owned(),
        }
    }
}

pub async fn list_devices(pool: &PgPool) -> Result<Vec<DeviceRow>, sqlx::Error> {
    sqlx::query_as::<_, DeviceRow>("SELECT id, name FROM device ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Maps an external device identifier to its directory row. Three ordered
/// strategies, first hit wins: exact primary key, exact name, then the
/// primary key compared in text form. `Ok(None)` means the device is
/// unknown, which callers treat as an empty report, not an error.
pub async fn resolve_device(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<ResolvedDevice>, sqlx::Error> {
    if let Some(device) = by_primary_key(pool, identifier).await? {
        return Ok(Some(device));
    }
    if let Some(device) = by_name(pool, identifier).await? {
        return Ok(Some(device));
    }
    by_text_id(pool, identifier).await
}

async fn by_primary_key(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<ResolvedDevice>, sqlx::Error> {
    let Some(id) = parse_entity_id(identifier) else {
        return Ok(None);
    };
    sqlx::query_as::<_, ResolvedDevice>("SELECT id, name FROM device WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn by_name(pool: &PgPool, identifier: &str) -> Result<Option<ResolvedDevice>, sqlx::Error> {
    sqlx::query_as::<_, ResolvedDevice>("SELECT id, name FROM device WHERE name = $1 LIMIT 1")
        .bind(identifier)
        .fetch_optional(pool)
        .await
}

async fn by_text_id(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<ResolvedDevice>, sqlx::Error> {
    sqlx::query_as::<_, ResolvedDevice>("SELECT id, name FROM device WHERE id::text = $1 LIMIT 1")
        .bind(identifier)
        .fetch_optional(pool)
        .await
}

fn parse_entity_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_parsing_gates_the_primary_key_strategy() {
        assert!(parse_entity_id("3f8a1c2e-9b4d-4f6a-8c1d-2e5b7a9c0d1f").is_some());
        assert!(parse_entity_id(" 3F8A1C2E-9B4D-4F6A-8C1D-2E5B7A9C0D1F ").is_some());
        assert!(parse_entity_id("Main Incomer").is_none());
        assert!(parse_entity_id("").is_none());
    }

    #[test]
    fn display_name_falls_back_for_missing_or_blank_names() {
        let named = ResolvedDevice { id: Uuid::nil(), name: Some("Main Incomer".to_owned()) };
        let blank = ResolvedDevice { id: Uuid::nil(), name: Some("   ".to_owned()) };
        let unnamed = ResolvedDevice { id: Uuid::nil(), name: None };
        assert_eq!(named.display_name(), "Main Incomer");
        assert_eq!(blank.display_name(), UNKNOWN_DEVICE);
        assert_eq!(unnamed.display_name(), UNKNOWN_DEVICE);
    }
}
