pub const SCHEMA: &str = r#"
-- Habits belong to the user identified by owner_email
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_email TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    category TEXT,
    priority TEXT NOT NULL DEFAULT 'Medium',
    created_at TEXT DEFAULT (datetime('now')),

    -- JSON array of YYYY-MM-DD strings
    completed_dates TEXT DEFAULT '[]',

    -- Manual (drag-and-drop) order
    position INTEGER NOT NULL DEFAULT 0,

    -- Status stamps, NULL = status not set
    archived_at TEXT,
    paused_at TEXT,
    completed_at TEXT
);

-- In-app notifications keep a snapshot of the habit name, no foreign key
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_email TEXT NOT NULL,
    message TEXT NOT NULL,
    action_type TEXT NOT NULL,
    habit_name TEXT,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Absent row = defaults (notifications on, light theme, tutorial unseen)
CREATE TABLE IF NOT EXISTS user_preferences (
    email TEXT PRIMARY KEY,
    has_seen_tutorial INTEGER NOT NULL DEFAULT 0,
    theme TEXT NOT NULL DEFAULT 'light',
    notifications_enabled INTEGER NOT NULL DEFAULT 1,
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Sessions are bearer credentials issued after a one-time code
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    token_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    token_lookup TEXT NOT NULL,        -- first 8 chars of ID for fast lookup
    user_email TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    expires_at TEXT NOT NULL,
    last_used_at TEXT
);

-- Quick-add and quiz templates; personality NULL = general template
CREATE TABLE IF NOT EXISTS habit_templates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'Medium',
    personality TEXT,
    reason TEXT
);

-- One quiz result per user, overwritten on retake
CREATE TABLE IF NOT EXISTS quiz_results (
    user_email TEXT PRIMARY KEY,
    personality TEXT NOT NULL,
    answers TEXT NOT NULL DEFAULT '{}',
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS emergency_pauses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_email TEXT NOT NULL,
    reason TEXT NOT NULL DEFAULT '',
    duration_days INTEGER NOT NULL,
    started_at TEXT NOT NULL,
    ends_at TEXT NOT NULL,
    ended_at TEXT,
    is_active INTEGER NOT NULL DEFAULT 1
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_habits_owner ON habits(owner_email);
CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_email, created_at);
CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_lookup ON sessions(token_lookup);
CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_email);
CREATE UNIQUE INDEX IF NOT EXISTS idx_templates_identity
    ON habit_templates(name, IFNULL(personality, ''));
CREATE INDEX IF NOT EXISTS idx_emergency_pauses_user ON emergency_pauses(user_email, is_active);
"#;
