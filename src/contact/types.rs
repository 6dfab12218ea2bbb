//! Contact message model types.

/// A message received through the contact form.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: i64,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Whether an admin has read the message.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new contact message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl NewContactMessage {
    /// Create a new contact message.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}
