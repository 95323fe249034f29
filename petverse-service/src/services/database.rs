//! Database service for petverse-service.

use crate::models::{
    Adoption, AdoptionOutcome, AdoptionRow, CreateLostFoundReport, LostFoundReport, Pet,
    ReportType, ResetSummary, SAMPLE_PETS,
};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::Utc;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument, warn};

const PET_COLUMNS: &str = "id, name, type, age, description, adopted, image";

const REPORT_COLUMNS: &str = "id, user_name, report_type, pet_name, pet_type, breed, color, \
     location, date, contact_phone, description, created_at";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the SQLite database at `database_url`.
    #[instrument(skip(database_url), fields(service = "petverse-service"))]
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Opening SQLite database");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Insert the sample catalog when the pet table is empty.
    ///
    /// Returns whether anything was inserted.
    #[instrument(skip(self))]
    pub async fn seed_sample_pets(&self) -> Result<bool, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pets")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to count pets: {}", e)))?;

        if count > 0 {
            return Ok(false);
        }

        for pet in SAMPLE_PETS.iter() {
            sqlx::query(
                r#"
                INSERT INTO pets (name, type, age, description, adopted, image)
                VALUES (?, ?, ?, ?, 0, ?)
                "#,
            )
            .bind(pet.name)
            .bind(pet.pet_type)
            .bind(pet.age)
            .bind(pet.description)
            .bind(pet.image)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to seed pet: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        info!(count = SAMPLE_PETS.len(), "Sample pets inserted");
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Pet Operations
    // -------------------------------------------------------------------------

    /// Pets not yet adopted, in insertion order.
    #[instrument(skip(self))]
    pub async fn list_available_pets(&self) -> Result<Vec<Pet>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_available_pets"])
            .start_timer();

        let pets = sqlx::query_as::<_, Pet>(&format!(
            "SELECT {} FROM pets WHERE adopted = 0 ORDER BY id",
            PET_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list pets: {}", e)))?;

        timer.observe_duration();

        Ok(pets)
    }

    /// Get a pet by ID.
    #[instrument(skip(self))]
    pub async fn get_pet(&self, pet_id: i64) -> Result<Option<Pet>, AppError> {
        sqlx::query_as::<_, Pet>(&format!("SELECT {} FROM pets WHERE id = ?", PET_COLUMNS))
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get pet: {}", e)))
    }

    // -------------------------------------------------------------------------
    // Adoption Operations
    // -------------------------------------------------------------------------

    /// Mark a pet adopted and record the adoption in one transaction.
    ///
    /// The conditional update takes the write lock first, so two concurrent
    /// adopters of one pet yield exactly one adoption row.
    #[instrument(skip(self))]
    pub async fn adopt_pet(&self, user_name: &str, pet_id: i64) -> Result<AdoptionOutcome, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["adopt_pet"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let claimed: Option<(String,)> = sqlx::query_as(
            "UPDATE pets SET adopted = 1 WHERE id = ? AND adopted = 0 RETURNING name",
        )
        .bind(pet_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to mark pet adopted: {}", e)))?;

        let Some((pet_name,)) = claimed else {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM pets WHERE id = ?")
                .bind(pet_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get pet: {}", e)))?;
            tx.rollback().await.ok();
            timer.observe_duration();

            return Ok(if exists.is_some() {
                AdoptionOutcome::AlreadyAdopted
            } else {
                AdoptionOutcome::PetNotFound
            });
        };

        let adoption = sqlx::query_as::<_, Adoption>(
            r#"
            INSERT INTO adoptions (user_name, pet_id, pet_name)
            VALUES (?, ?, ?)
            RETURNING id, user_name, pet_id, pet_name
            "#,
        )
        .bind(user_name)
        .bind(pet_id)
        .bind(&pet_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to record adoption: {}", e)))?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit adoption: {}", e))
        })?;

        timer.observe_duration();

        info!(adoption_id = adoption.id, pet_name = %adoption.pet_name, "Pet adopted");

        Ok(AdoptionOutcome::Adopted(adoption))
    }

    /// Adoptions recorded under `user_name` (exact match), joined with the
    /// current pet row. Adoptions whose pet no longer exists are dropped by
    /// the inner join.
    #[instrument(skip(self))]
    pub async fn list_adoptions_for(&self, user_name: &str) -> Result<Vec<AdoptionRow>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_adoptions_for"])
            .start_timer();

        let rows = sqlx::query_as::<_, AdoptionRow>(
            r#"
            SELECT a.pet_name, p.type, p.age, p.description, p.image
            FROM adoptions a
            JOIN pets p ON p.id = a.pet_id
            WHERE a.user_name = ?
            ORDER BY a.id
            "#,
        )
        .bind(user_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list adoptions: {}", e)))?;

        timer.observe_duration();

        Ok(rows)
    }

    /// Adoption records for one pet.
    #[instrument(skip(self))]
    pub async fn adoptions_for_pet(&self, pet_id: i64) -> Result<Vec<Adoption>, AppError> {
        sqlx::query_as::<_, Adoption>(
            "SELECT id, user_name, pet_id, pet_name FROM adoptions WHERE pet_id = ? ORDER BY id",
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list adoptions: {}", e)))
    }

    /// Make every pet available again and clear the adoption history.
    #[instrument(skip(self))]
    pub async fn reset_adoptions(&self) -> Result<ResetSummary, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["reset_adoptions"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let released = sqlx::query("UPDATE pets SET adopted = 0 WHERE adopted = 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to release pets: {}", e)))?;

        let removed = sqlx::query("DELETE FROM adoptions")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete adoptions: {}", e))
            })?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit reset: {}", e))
        })?;

        timer.observe_duration();

        let summary = ResetSummary {
            pets_released: released.rows_affected(),
            adoptions_removed: removed.rows_affected(),
        };

        warn!(
            pets_released = summary.pets_released,
            adoptions_removed = summary.adoptions_removed,
            "All adoptions reset"
        );

        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Lost & Found Operations
    // -------------------------------------------------------------------------

    /// Store a new lost/found report.
    #[instrument(skip(self, input), fields(report_type = %input.report_type))]
    pub async fn create_lost_found_report(
        &self,
        input: &CreateLostFoundReport,
    ) -> Result<LostFoundReport, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_lost_found_report"])
            .start_timer();

        let report = sqlx::query_as::<_, LostFoundReport>(&format!(
            r#"
            INSERT INTO lost_found_reports
                (user_name, report_type, pet_name, pet_type, breed, color, location, date,
                 contact_phone, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(&input.user_name)
        .bind(input.report_type.as_str())
        .bind(&input.pet_name)
        .bind(&input.pet_type)
        .bind(&input.breed)
        .bind(&input.color)
        .bind(&input.location)
        .bind(&input.date)
        .bind(&input.contact_phone)
        .bind(&input.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create report: {}", e)))?;

        timer.observe_duration();

        info!(report_id = report.id, "Lost & found report created");

        Ok(report)
    }

    /// Reports, newest first, optionally restricted to one type.
    #[instrument(skip(self))]
    pub async fn list_lost_found_reports(
        &self,
        report_type: Option<ReportType>,
    ) -> Result<Vec<LostFoundReport>, AppError> {
        let reports = if let Some(report_type) = report_type {
            sqlx::query_as::<_, LostFoundReport>(&format!(
                "SELECT {} FROM lost_found_reports WHERE report_type = ? ORDER BY id DESC",
                REPORT_COLUMNS
            ))
            .bind(report_type.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, LostFoundReport>(&format!(
                "SELECT {} FROM lost_found_reports ORDER BY id DESC",
                REPORT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await
        };

        reports
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list reports: {}", e)))
    }
}
