//! Demo content seeding for quillboard.
//!
//! Populates a fresh database with users, posts, comments, contact
//! messages, and a handful of managed files, so the admin console has
//! something to show. Everything goes through the same repositories and
//! services the console uses; the database and store are injected.

use rand::Rng;
use tracing::info;

use crate::comment::{CommentRepository, CommentStatus, NewComment};
use crate::contact::{ContactRepository, NewContactMessage};
use crate::db::{NewUser, Role, UserRepository};
use crate::file::{
    DetectedType, FileCategory, FileStore, ManagedFileRepository, NewManagedFile,
};
use crate::post::{NewPost, PostService, PostStatus};
use crate::{Database, Result};

/// Counts of what a seeding run created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
    pub contacts: usize,
    pub files: usize,
}

/// Demo content seeder.
pub struct Seeder<'a> {
    db: &'a Database,
    store: &'a FileStore,
}

const DEMO_USERS: &[(&str, &str, Role)] = &[
    ("admin", "Site Admin", Role::Admin),
    ("elena", "Elena Vasquez", Role::Editor),
    ("jun", "Jun Park", Role::Author),
    ("priya", "Priya Nair", Role::Author),
];

const DEMO_POSTS: &[(&str, &str)] = &[
    (
        "Welcome to the blog",
        "This is the first post. Everything you see here was planted by the seeder.",
    ),
    (
        "Writing with plain text",
        "Markdown keeps the writing honest. No toolbars, no distractions.",
    ),
    (
        "A field guide to drafts",
        "Most drafts never ship, and that is fine. The folder is a compost heap, not a museum.",
    ),
    (
        "Notes from the garden",
        "Tomatoes again this year. The aphids remain undefeated.",
    ),
    (
        "On keeping a changelog",
        "A changelog is a love letter to your future self. Write one.",
    ),
    (
        "Archive everything",
        "Old posts do not have to die; they can retire quietly to the archive.",
    ),
];

const DEMO_COMMENTERS: &[(&str, &str)] = &[
    ("Ann", "ann@example.com"),
    ("Bob", "bob@example.com"),
    ("Carol", "carol@example.com"),
];

const DEMO_COMMENTS: &[&str] = &[
    "Great post, thanks for writing it.",
    "I disagree with almost everything here, but politely.",
    "Could you expand on the second paragraph?",
    "Bookmarked.",
];

const DEMO_CONTACTS: &[(&str, &str, &str, &str)] = &[
    (
        "Sam Reader",
        "sam@example.com",
        "Broken link",
        "The link in your changelog post 404s for me.",
    ),
    (
        "Dana Lee",
        "dana@example.com",
        "Guest post?",
        "Would you be open to a guest post about composting?",
    ),
    (
        "Spam Bot",
        "winner@example.net",
        "You have won",
        "Click here to claim your prize.",
    ),
];

const DEMO_FILES: &[(&str, FileCategory, usize)] = &[
    ("header.png", FileCategory::CoverImages, 2048),
    ("tomatoes.jpg", FileCategory::Images, 4096),
    ("sketch.png", FileCategory::Images, 1024),
    ("press-kit.pdf", FileCategory::Documents, 8192),
    ("notes.txt", FileCategory::Documents, 256),
];

impl<'a> Seeder<'a> {
    /// Create a new seeder over the given database and file store.
    pub fn new(db: &'a Database, store: &'a FileStore) -> Self {
        Self { db, store }
    }

    /// Seed demo content.
    ///
    /// A database that already has users is left untouched; the seeder is
    /// safe to run more than once.
    pub async fn run(&self) -> Result<SeedReport> {
        let users = UserRepository::new(self.db.pool());
        if users.count().await? > 0 {
            info!("Database already has users; skipping seed");
            return Ok(SeedReport::default());
        }

        let mut report = SeedReport::default();

        let author_ids = self.seed_users(&mut report).await?;
        let post_ids = self.seed_posts(&author_ids, &mut report).await?;
        self.seed_comments(&post_ids, &mut report).await?;
        self.seed_contacts(&mut report).await?;
        self.seed_files(&mut report).await?;

        info!(
            users = report.users,
            posts = report.posts,
            comments = report.comments,
            contacts = report.contacts,
            files = report.files,
            "Seeding complete"
        );

        Ok(report)
    }

    async fn seed_users(&self, report: &mut SeedReport) -> Result<Vec<i64>> {
        let repo = UserRepository::new(self.db.pool());
        let mut ids = Vec::new();

        for (username, display_name, role) in DEMO_USERS {
            let user = repo
                .create(
                    &NewUser::new(*username, *display_name)
                        .with_email(format!("{username}@example.com"))
                        .with_role(*role),
                )
                .await?;
            ids.push(user.id);
            report.users += 1;
        }

        Ok(ids)
    }

    async fn seed_posts(&self, author_ids: &[i64], report: &mut SeedReport) -> Result<Vec<i64>> {
        let service = PostService::new(self.db.pool());
        let mut rng = rand::rng();
        let mut ids = Vec::new();

        for (i, (title, body)) in DEMO_POSTS.iter().enumerate() {
            let author = author_ids[rng.random_range(0..author_ids.len())];
            // Mix of statuses: mostly published, a draft and an archived post
            let status = match i {
                0 => PostStatus::Published,
                i if i == DEMO_POSTS.len() - 1 => PostStatus::Archived,
                i if i % 3 == 2 => PostStatus::Draft,
                _ => PostStatus::Published,
            };

            let post = service
                .create(
                    &NewPost::new(*title, *body, author)
                        .with_excerpt(body.chars().take(60).collect::<String>())
                        .with_status(status),
                )
                .await?;
            ids.push(post.id);
            report.posts += 1;
        }

        Ok(ids)
    }

    async fn seed_comments(&self, post_ids: &[i64], report: &mut SeedReport) -> Result<()> {
        let repo = CommentRepository::new(self.db.pool());
        let mut rng = rand::rng();

        for post_id in post_ids {
            let count = rng.random_range(0..=3);
            for _ in 0..count {
                let (name, email) = DEMO_COMMENTERS[rng.random_range(0..DEMO_COMMENTERS.len())];
                let body = DEMO_COMMENTS[rng.random_range(0..DEMO_COMMENTS.len())];
                let status = match rng.random_range(0..4) {
                    0 => CommentStatus::Pending,
                    3 => CommentStatus::Spam,
                    _ => CommentStatus::Approved,
                };

                repo.create(&NewComment::new(*post_id, name, email, body).with_status(status))
                    .await?;
                report.comments += 1;
            }
        }

        Ok(())
    }

    async fn seed_contacts(&self, report: &mut SeedReport) -> Result<()> {
        let repo = ContactRepository::new(self.db.pool());

        for (name, email, subject, body) in DEMO_CONTACTS {
            repo.create(&NewContactMessage::new(*name, *email, *subject, *body))
                .await?;
            report.contacts += 1;
        }

        Ok(())
    }

    async fn seed_files(&self, report: &mut SeedReport) -> Result<()> {
        let repo = ManagedFileRepository::new(self.db.pool());

        for (name, category, size) in DEMO_FILES {
            // Placeholder bytes; the metadata is what the console shows
            let content = vec![0u8; *size];
            let stored = self.store.save(&content, *category, name)?;
            let detected = DetectedType::from_name(name);

            repo.create(&NewManagedFile::new(
                FileStore::public_url(*category, &stored),
                *name,
                stored,
                detected.kind(),
                *category,
                *size as i64,
            ))
            .await?;
            report.files += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (Database, TempDir, FileStore) {
        let db = Database::open_in_memory().await.unwrap();
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (db, temp_dir, store)
    }

    #[tokio::test]
    async fn test_seed_populates_everything() {
        let (db, _tmp, store) = setup().await;
        let seeder = Seeder::new(&db, &store);

        let report = seeder.run().await.unwrap();

        assert_eq!(report.users, DEMO_USERS.len());
        assert_eq!(report.posts, DEMO_POSTS.len());
        assert_eq!(report.contacts, DEMO_CONTACTS.len());
        assert_eq!(report.files, DEMO_FILES.len());

        // Files exist physically and in metadata
        let files = ManagedFileRepository::new(db.pool()).list_all().await.unwrap();
        assert_eq!(files.len(), DEMO_FILES.len());
        for file in &files {
            assert!(store.exists(file.category, &file.stored_name));
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let (db, _tmp, store) = setup().await;
        let seeder = Seeder::new(&db, &store);

        seeder.run().await.unwrap();
        let second = seeder.run().await.unwrap();

        assert_eq!(second, SeedReport::default());
        assert_eq!(
            UserRepository::new(db.pool()).count().await.unwrap(),
            DEMO_USERS.len() as i64
        );
    }

    #[tokio::test]
    async fn test_seeded_slugs_are_unique() {
        let (db, _tmp, store) = setup().await;
        Seeder::new(&db, &store).run().await.unwrap();

        let slugs: Vec<(String,)> = sqlx::query_as("SELECT slug FROM posts")
            .fetch_all(db.pool())
            .await
            .unwrap();

        let mut seen = std::collections::HashSet::new();
        for (slug,) in &slugs {
            assert!(seen.insert(slug.clone()), "duplicate slug {slug}");
        }
    }
}
