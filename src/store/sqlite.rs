use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::habits::CompletionLog;
use crate::quiz::{self, Personality};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn parse_optional_datetime(s: Option<String>) -> Option<DateTime<Utc>> {
    s.as_deref().map(parse_datetime)
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        message.into(),
    )
}

const HABIT_COLUMNS: &str = "id, owner_email, name, description, category, priority, created_at,
     completed_dates, position, archived_at, paused_at, completed_at";

/// Reads the completion log column. Values of the wrong SQL type count as corrupt.
fn completion_log(value: ValueRef<'_>) -> CompletionLog {
    match value {
        ValueRef::Null => CompletionLog::default(),
        ValueRef::Text(raw) => CompletionLog::decode(std::str::from_utf8(raw).ok()),
        other => {
            tracing::debug!("Resetting non-text completion log of type {}", other.data_type());
            CompletionLog::default()
        }
    }
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        priority: Priority::parse_or_default(&row.get::<_, String>(5)?),
        created_at: parse_datetime(&row.get::<_, String>(6)?),
        completed_dates: completion_log(row.get_ref(7)?),
        position: row.get(8)?,
        archived_at: parse_optional_datetime(row.get(9)?),
        paused_at: parse_optional_datetime(row.get(10)?),
        completed_at: parse_optional_datetime(row.get(11)?),
    })
}

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let action: String = row.get(3)?;
    Ok(Notification {
        id: row.get(0)?,
        user_email: row.get(1)?,
        message: row.get(2)?,
        action_type: action.parse().map_err(|e| conversion_error(3, e))?,
        habit_name: row.get(4)?,
        is_read: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        token_hash: row.get(1)?,
        token_lookup: row.get(2)?,
        user_email: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        expires_at: parse_datetime(&row.get::<_, String>(5)?),
        last_used_at: parse_optional_datetime(row.get(6)?),
    })
}

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<HabitTemplate> {
    let personality: Option<String> = row.get(5)?;
    Ok(HabitTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        priority: Priority::parse_or_default(&row.get::<_, String>(4)?),
        personality: personality.and_then(|p| p.parse().ok()),
        reason: row.get(6)?,
    })
}

fn pause_from_row(row: &Row<'_>) -> rusqlite::Result<EmergencyPause> {
    Ok(EmergencyPause {
        id: row.get(0)?,
        user_email: row.get(1)?,
        reason: row.get(2)?,
        duration_days: row.get(3)?,
        started_at: parse_datetime(&row.get::<_, String>(4)?),
        ends_at: parse_datetime(&row.get::<_, String>(5)?),
        ended_at: parse_optional_datetime(row.get(6)?),
        is_active: row.get(7)?,
    })
}

/// Records `event` unless the user switched notifications off.
/// A user without a preferences row gets notifications.
fn record_notification(conn: &Connection, event: &HabitEvent) -> Result<()> {
    let inserted = conn.execute(
        "INSERT INTO notifications (user_email, message, action_type, habit_name, is_read, created_at)
         SELECT ?1, ?2, ?3, ?4, 0, ?5
         WHERE COALESCE(
             (SELECT notifications_enabled FROM user_preferences WHERE email = ?1), 1
         ) = 1",
        params![
            event.user_email,
            event.message,
            event.action.as_str(),
            event.habit_name,
            format_datetime(&Utc::now()),
        ],
    )?;

    if inserted == 0 {
        tracing::debug!(action = event.action.as_str(), "Notifications disabled, skipped");
    }
    Ok(())
}

fn seed_templates(conn: &Connection) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO habit_templates (name, description, category, priority, personality, reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    let mut added = 0;
    for seed in quiz::catalogue::all_seeds() {
        added += stmt.execute(params![
            seed.name,
            seed.description,
            seed.category,
            seed.priority.as_str(),
            seed.personality.map(Personality::as_str),
            seed.reason,
        ])?;
    }
    Ok(added)
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA)?;
        let added = seed_templates(&conn)?;
        if added > 0 {
            tracing::info!(added, "Seeded habit templates");
        }
        Ok(())
    }

    // Habit operations

    fn create_habit(&self, habit: &NewHabit, event: Option<&HabitEvent>) -> Result<Habit> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM habits WHERE owner_email = ?1",
            params![habit.owner],
            |row| row.get(0),
        )?;

        let log = CompletionLog::default();
        tx.execute(
            "INSERT INTO habits (owner_email, name, description, category, priority, created_at,
                                 completed_dates, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                habit.owner,
                habit.name,
                habit.description,
                habit.category,
                habit.priority.as_str(),
                format_datetime(&habit.created_at),
                log.encode(),
                position,
            ],
        )?;
        let id = tx.last_insert_rowid();

        if let Some(event) = event {
            record_notification(&tx, event)?;
        }
        tx.commit()?;

        Ok(Habit {
            id,
            owner: habit.owner.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            category: habit.category.clone(),
            priority: habit.priority,
            created_at: habit.created_at,
            completed_dates: log,
            position,
            archived_at: None,
            paused_at: None,
            completed_at: None,
        })
    }

    fn get_habit(&self, owner: &str, id: i64) -> Result<Option<Habit>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1 AND owner_email = ?2"),
            params![id, owner],
            habit_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_habits(&self, owner: &str) -> Result<Vec<Habit>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE owner_email = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map(params![owner], habit_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_habit_ids(&self, owner: &str) -> Result<Vec<i64>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id FROM habits WHERE owner_email = ?1 ORDER BY id")?;

        let rows = stmt.query_map(params![owner], |row| row.get(0))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn habit_name_exists(&self, owner: &str, name: &str) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM habits WHERE owner_email = ?1 AND name = ?2",
            params![owner, name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn update_habit(&self, habit: &Habit, event: Option<&HabitEvent>) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE habits SET name = ?1, description = ?2, category = ?3, priority = ?4,
                    position = ?5, archived_at = ?6, paused_at = ?7, completed_at = ?8
             WHERE id = ?9 AND owner_email = ?10",
            params![
                habit.name,
                habit.description,
                habit.category,
                habit.priority.as_str(),
                habit.position,
                habit.archived_at.as_ref().map(format_datetime),
                habit.paused_at.as_ref().map(format_datetime),
                habit.completed_at.as_ref().map(format_datetime),
                habit.id,
                habit.owner,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }

        if let Some(event) = event {
            record_notification(&tx, event)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_completed_dates(&self, owner: &str, id: i64, log: &CompletionLog) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE habits SET completed_dates = ?1 WHERE id = ?2 AND owner_email = ?3",
            params![log.encode(), id, owner],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_habit(&self, owner: &str, id: i64, event: Option<&HabitEvent>) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "DELETE FROM habits WHERE id = ?1 AND owner_email = ?2",
            params![id, owner],
        )?;

        if rows > 0 {
            if let Some(event) = event {
                record_notification(&tx, event)?;
            }
        }
        tx.commit()?;
        Ok(rows > 0)
    }

    fn set_positions(&self, owner: &str, positions: &[(i64, i64)]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        for (id, position) in positions {
            tx.execute(
                "UPDATE habits SET position = ?1 WHERE id = ?2 AND owner_email = ?3",
                params![position, id, owner],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // Notification operations

    fn list_notifications(&self, email: &str) -> Result<Vec<Notification>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_email, message, action_type, habit_name, is_read, created_at
             FROM notifications WHERE user_email = ?1 ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map(params![email], notification_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_unread_notifications(&self, email: &str) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE user_email = ?1 AND is_read = 0",
            params![email],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn mark_notification_read(&self, email: &str, id: i64) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND user_email = ?2",
            params![id, email],
        )?;
        Ok(rows > 0)
    }

    fn mark_all_notifications_read(&self, email: &str) -> Result<usize> {
        let rows = self.conn().execute(
            "UPDATE notifications SET is_read = 1 WHERE user_email = ?1 AND is_read = 0",
            params![email],
        )?;
        Ok(rows)
    }

    // Preference operations

    fn get_preferences(&self, email: &str) -> Result<Option<UserPreferences>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT email, has_seen_tutorial, theme, notifications_enabled, updated_at
             FROM user_preferences WHERE email = ?1",
            params![email],
            |row| {
                Ok(UserPreferences {
                    email: row.get(0)?,
                    has_seen_tutorial: row.get(1)?,
                    theme: row.get::<_, String>(2)?.parse().unwrap_or_default(),
                    notifications_enabled: row.get(3)?,
                    updated_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn upsert_preferences(&self, prefs: &UserPreferences) -> Result<()> {
        self.conn().execute(
            "INSERT INTO user_preferences (email, has_seen_tutorial, theme, notifications_enabled, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(email) DO UPDATE SET
                has_seen_tutorial = excluded.has_seen_tutorial,
                theme = excluded.theme,
                notifications_enabled = excluded.notifications_enabled,
                updated_at = excluded.updated_at",
            params![
                prefs.email,
                prefs.has_seen_tutorial,
                prefs.theme.as_str(),
                prefs.notifications_enabled,
                format_datetime(&prefs.updated_at),
            ],
        )?;
        Ok(())
    }

    // Session operations

    fn create_session(&self, session: &Session) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO sessions (id, token_hash, token_lookup, user_email, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.id,
                session.token_hash,
                session.token_lookup,
                session.user_email,
                format_datetime(&session.created_at),
                format_datetime(&session.expires_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::TokenLookupCollision)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_session_by_lookup(&self, lookup: &str) -> Result<Option<Session>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, user_email, created_at, expires_at, last_used_at
             FROM sessions WHERE token_lookup = ?1",
            params![lookup],
            session_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn touch_session(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE sessions SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn delete_session(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, expires_at FROM sessions")?;
        let expired: Vec<String> = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|(_, expires_at)| parse_datetime(expires_at) <= now)
            .map(|(id, _)| id)
            .collect();

        for id in &expired {
            conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        }
        Ok(expired.len())
    }

    // Template operations

    fn list_templates(&self, personality: Option<Personality>) -> Result<Vec<HabitTemplate>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, category, priority, personality, reason
             FROM habit_templates WHERE personality IS ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(
            params![personality.map(Personality::as_str)],
            template_from_row,
        )?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_template(&self, id: i64) -> Result<Option<HabitTemplate>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, description, category, priority, personality, reason
             FROM habit_templates WHERE id = ?1",
            params![id],
            template_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Quiz operations

    fn upsert_quiz_result(&self, result: &QuizResult) -> Result<()> {
        self.conn().execute(
            "INSERT INTO quiz_results (user_email, personality, answers, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_email) DO UPDATE SET
                personality = excluded.personality,
                answers = excluded.answers,
                updated_at = excluded.updated_at",
            params![
                result.user_email,
                result.personality.as_str(),
                serde_json::to_string(&result.answers)?,
                format_datetime(&result.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_quiz_result(&self, email: &str) -> Result<Option<QuizResult>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT user_email, personality, answers, updated_at
             FROM quiz_results WHERE user_email = ?1",
            params![email],
            |row| {
                let personality: String = row.get(1)?;
                let answers: String = row.get(2)?;
                Ok(QuizResult {
                    user_email: row.get(0)?,
                    personality: personality.parse().map_err(|e| conversion_error(1, e))?,
                    answers: serde_json::from_str(&answers).unwrap_or_default(),
                    updated_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    // Emergency pause operations

    fn get_active_emergency_pause(&self, email: &str) -> Result<Option<EmergencyPause>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, user_email, reason, duration_days, started_at, ends_at, ended_at, is_active
             FROM emergency_pauses WHERE user_email = ?1 AND is_active = 1
             ORDER BY id DESC LIMIT 1",
            params![email],
            pause_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn start_emergency_pause(
        &self,
        pause: &EmergencyPause,
        habit_ids: &[i64],
    ) -> Result<EmergencyPause> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let started_at = format_datetime(&pause.started_at);
        tx.execute(
            "INSERT INTO emergency_pauses (user_email, reason, duration_days, started_at, ends_at, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, 1)",
            params![
                pause.user_email,
                pause.reason,
                pause.duration_days,
                started_at,
                format_datetime(&pause.ends_at),
            ],
        )?;
        let id = tx.last_insert_rowid();

        for habit_id in habit_ids {
            tx.execute(
                "UPDATE habits SET paused_at = ?1 WHERE id = ?2 AND owner_email = ?3",
                params![started_at, habit_id, pause.user_email],
            )?;
        }

        tx.commit()?;
        Ok(EmergencyPause {
            id,
            is_active: true,
            ended_at: None,
            ..pause.clone()
        })
    }

    fn end_emergency_pause(
        &self,
        email: &str,
        pause_id: i64,
        ended_at: DateTime<Utc>,
        habit_ids: &[i64],
    ) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE emergency_pauses SET is_active = 0, ended_at = ?1
             WHERE id = ?2 AND user_email = ?3",
            params![format_datetime(&ended_at), pause_id, email],
        )?;
        if rows == 0 {
            return Err(Error::NotFound);
        }

        for habit_id in habit_ids {
            tx.execute(
                "UPDATE habits SET paused_at = NULL WHERE id = ?1 AND owner_email = ?2",
                params![habit_id, email],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
