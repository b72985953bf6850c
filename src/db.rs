use rusqlite::Connection;
use time::OffsetDateTime;

use crate::error::ExtractError;

/// One row of `workoutheader`, as far as the export cares: the encoded
/// route, when the workout started, and how long it lasted.
#[derive(Debug)]
pub struct WorkoutRecord {
    pub polyline: String,
    pub start_time: OffsetDateTime,
    pub total_time_secs: f64,
}

struct WorkoutRow {
    polyline: String,
    start_time_ms: i64,
    total_time_secs: f64,
}

/// Looks up a workout by its exact description. Zero matches and multiple
/// matches are both errors; descriptions are not unique in the schema, so a
/// silent first-match could export the wrong workout.
pub fn fetch_workout(conn: &Connection, description: &str) -> Result<WorkoutRecord, ExtractError> {
    let mut stmt = conn
        .prepare("SELECT polyline, startTime, totalTime FROM workoutheader WHERE description = ?1")?;

    let rows = stmt
        .query_map([description], |row| {
            Ok(WorkoutRow {
                polyline: row.get(0)?,
                start_time_ms: row.get(1)?,
                total_time_secs: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<WorkoutRow>>>()?;

    if rows.len() > 1 {
        return Err(ExtractError::AmbiguousDescription {
            description: description.to_string(),
            matches: rows.len(),
        });
    }
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| ExtractError::RecordNotFound(description.to_string()))?;

    // startTime is stored as milliseconds since the Unix epoch.
    let start_time =
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(row.start_time_ms) * 1_000_000)?;

    Ok(WorkoutRecord {
        polyline: row.polyline,
        start_time,
        total_time_secs: row.total_time_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE workoutheader (
                description TEXT,
                polyline TEXT,
                startTime INTEGER,
                totalTime REAL
            )",
        )
        .unwrap();
        conn
    }

    fn insert(conn: &Connection, description: &str, polyline: &str) {
        conn.execute(
            "INSERT INTO workoutheader (description, polyline, startTime, totalTime)
             VALUES (?1, ?2, 1700000000000, 40.0)",
            [description, polyline],
        )
        .unwrap();
    }

    #[test]
    fn fetches_matching_workout() {
        let conn = test_db();
        insert(&conn, "Morning run", "_p~iF~ps|U");

        let record = fetch_workout(&conn, "Morning run").unwrap();
        assert_eq!(record.polyline, "_p~iF~ps|U");
        assert_eq!(record.start_time.unix_timestamp(), 1_700_000_000);
        assert_eq!(record.total_time_secs, 40.0);
    }

    #[test]
    fn missing_description_is_record_not_found() {
        let conn = test_db();
        insert(&conn, "Morning run", "_p~iF~ps|U");

        let err = fetch_workout(&conn, "Evening run").unwrap_err();
        assert!(matches!(err, ExtractError::RecordNotFound(desc) if desc == "Evening run"));
    }

    #[test]
    fn duplicate_descriptions_are_rejected() {
        let conn = test_db();
        insert(&conn, "Morning run", "_p~iF~ps|U");
        insert(&conn, "Morning run", "_p~iF~ps|V");

        let err = fetch_workout(&conn, "Morning run").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::AmbiguousDescription { matches: 2, .. }
        ));
    }
}
