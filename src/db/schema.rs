//! Schema migrations for quillboard.
//!
//! Each entry is applied once, in order, inside its own transaction; the
//! applied version is tracked in the `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: core content tables
    "CREATE TABLE users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT NOT NULL COLLATE NOCASE,
        email         TEXT,
        display_name  TEXT NOT NULL,
        role          TEXT NOT NULL DEFAULT 'author',
        is_active     INTEGER NOT NULL DEFAULT 1,
        created_at    TEXT NOT NULL
    );
    CREATE UNIQUE INDEX idx_users_username ON users(username);
    CREATE INDEX idx_users_role ON users(role);

    CREATE TABLE posts (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        title            TEXT NOT NULL,
        slug             TEXT NOT NULL,
        body             TEXT NOT NULL,
        excerpt          TEXT,
        status           TEXT NOT NULL DEFAULT 'draft',
        author_id        INTEGER NOT NULL REFERENCES users(id),
        cover_image_url  TEXT,
        created_at       TEXT NOT NULL,
        updated_at       TEXT NOT NULL,
        published_at     TEXT
    );
    CREATE UNIQUE INDEX idx_posts_slug ON posts(slug);
    CREATE INDEX idx_posts_status ON posts(status);

    CREATE TABLE comments (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id       INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
        author_name   TEXT NOT NULL,
        author_email  TEXT NOT NULL,
        body          TEXT NOT NULL,
        status        TEXT NOT NULL DEFAULT 'pending',
        created_at    TEXT NOT NULL
    );
    CREATE INDEX idx_comments_post ON comments(post_id);
    CREATE INDEX idx_comments_status ON comments(status);",
    // v2: contact form inbox
    "CREATE TABLE contacts (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL,
        subject     TEXT NOT NULL,
        body        TEXT NOT NULL,
        is_read     INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX idx_contacts_is_read ON contacts(is_read);",
    // v3: managed file metadata
    "CREATE TABLE managed_files (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        url            TEXT NOT NULL,
        original_name  TEXT NOT NULL,
        stored_name    TEXT NOT NULL,
        file_type      TEXT NOT NULL,
        category       TEXT NOT NULL,
        size           INTEGER NOT NULL,
        created_at     TEXT NOT NULL,
        modified_at    TEXT NOT NULL
    );
    CREATE UNIQUE INDEX idx_managed_files_url ON managed_files(url);
    CREATE INDEX idx_managed_files_category ON managed_files(category);",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
        }
    }
}
