use crate::models::{
    BudgetConstraints, LocationPreference, MigrationWillingness, ParentPreference,
    SocietalSurvey, StoredPreference, Weight,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// PostgreSQL-backed store for preference and survey submissions.
///
/// Records are written once and never updated or deleted; the pool is the
/// only shared resource and is owned here.
pub struct PreferenceStore {
    pool: PgPool,
}

impl PreferenceStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Persist a validated preference record.
    ///
    /// The identifier and creation timestamp are assigned by the database;
    /// the stored record is returned with both filled in. Duplicate
    /// submissions create distinct rows.
    pub async fn save_preference(
        &self,
        preference: &ParentPreference,
    ) -> Result<StoredPreference, StoreError> {
        let query = r#"
            INSERT INTO parent_preferences (
                parent_id,
                financial_stability_weight,
                job_security_weight,
                prestige_weight,
                parent_risk_tolerance,
                weight_on_parent_layer,
                location_preference,
                migration_willingness,
                max_tuition_per_year,
                unacceptable_professions,
                acceptable_professions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, submitted_at
        "#;

        let row = sqlx::query(query)
            .bind(&preference.parent_id)
            .bind(preference.financial_stability_weight.get())
            .bind(preference.job_security_weight.get())
            .bind(preference.prestige_weight.get())
            .bind(preference.parent_risk_tolerance.get())
            .bind(preference.weight_on_parent_layer.get())
            .bind(preference.location_preference)
            .bind(preference.migration_willingness)
            .bind(preference.budget_constraints.max_tuition_per_year)
            .bind(&preference.unacceptable_professions)
            .bind(&preference.acceptable_professions)
            .fetch_one(&self.pool)
            .await?;

        let id: Uuid = row.get("id");
        let submitted_at: chrono::DateTime<chrono::Utc> = row.get("submitted_at");

        tracing::debug!("Saved preference record {}", id);

        Ok(StoredPreference {
            id,
            preference: preference.clone(),
            timestamp: submitted_at,
        })
    }

    /// Fetch a stored preference record by id
    pub async fn get_preference(&self, id: Uuid) -> Result<StoredPreference, StoreError> {
        let query = r#"
            SELECT id, parent_id,
                   financial_stability_weight, job_security_weight, prestige_weight,
                   parent_risk_tolerance, weight_on_parent_layer,
                   location_preference, migration_willingness,
                   max_tuition_per_year,
                   unacceptable_professions, acceptable_professions,
                   submitted_at
            FROM parent_preferences
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("preference {}", id)))?;

        Self::row_to_preference(&row)
    }

    /// List stored preferences, most recent first.
    ///
    /// When `parent_id` is given only that parent's submissions are
    /// returned; intended for operational inspection, not a public API.
    pub async fn list_preferences(
        &self,
        parent_id: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StoredPreference>, StoreError> {
        let query = r#"
            SELECT id, parent_id,
                   financial_stability_weight, job_security_weight, prestige_weight,
                   parent_risk_tolerance, weight_on_parent_layer,
                   location_preference, migration_willingness,
                   max_tuition_per_year,
                   unacceptable_professions, acceptable_professions,
                   submitted_at
            FROM parent_preferences
            WHERE $1::TEXT IS NULL OR parent_id = $1
            ORDER BY submitted_at DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(parent_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_preference).collect()
    }

    /// Persist a societal survey submission with its raw responses
    pub async fn save_survey(&self, survey: &SocietalSurvey) -> Result<Uuid, StoreError> {
        let query = r#"
            INSERT INTO societal_surveys (survey_id, source, responses)
            VALUES ($1, $2, $3)
            RETURNING id
        "#;

        let responses = serde_json::to_value(&survey.responses)?;

        let row = sqlx::query(query)
            .bind(&survey.survey_id)
            .bind(&survey.source)
            .bind(responses)
            .fetch_one(&self.pool)
            .await?;

        let id: Uuid = row.get("id");

        tracing::debug!("Saved societal survey {}", id);

        Ok(id)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    fn row_to_preference(row: &sqlx::postgres::PgRow) -> Result<StoredPreference, StoreError> {
        let weight = |column: &str| -> Result<Weight, StoreError> {
            Weight::new(row.get(column))
                .map_err(|e| StoreError::CorruptRow(format!("{}: {}", column, e)))
        };

        let location_preference: LocationPreference = row.get("location_preference");
        let migration_willingness: MigrationWillingness = row.get("migration_willingness");

        Ok(StoredPreference {
            id: row.get("id"),
            preference: ParentPreference {
                parent_id: row.get("parent_id"),
                financial_stability_weight: weight("financial_stability_weight")?,
                job_security_weight: weight("job_security_weight")?,
                prestige_weight: weight("prestige_weight")?,
                location_preference,
                migration_willingness,
                budget_constraints: BudgetConstraints {
                    max_tuition_per_year: row.get("max_tuition_per_year"),
                },
                unacceptable_professions: row.get("unacceptable_professions"),
                acceptable_professions: row.get("acceptable_professions"),
                parent_risk_tolerance: weight("parent_risk_tolerance")?,
                weight_on_parent_layer: weight("weight_on_parent_layer")?,
            },
            timestamp: row.get("submitted_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("preference abc".to_string());
        assert_eq!(format!("{}", err), "Not found: preference abc");
    }
}
