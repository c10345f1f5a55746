//! Contact message model and visibility buckets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "orçamento")]
    Orcamento,
    #[serde(rename = "evento")]
    Evento,
    #[serde(rename = "parceria")]
    Parceria,
    #[serde(rename = "outro")]
    Outro,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Orcamento => "orçamento",
            Subject::Evento => "evento",
            Subject::Parceria => "parceria",
            Subject::Outro => "outro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "orçamento" => Some(Subject::Orcamento),
            "evento" => Some(Subject::Evento),
            "parceria" => Some(Subject::Parceria),
            "outro" => Some(Subject::Outro),
            _ => None,
        }
    }
}

/// Visibility bucket of a contact message
///
/// Every message is in exactly one bucket: `archived` wins over the read
/// flag, and the remaining messages split by `read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Unread,
    Read,
    Archived,
}

impl Bucket {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(Bucket::Unread),
            "read" => Some(Bucket::Read),
            "archived" => Some(Bucket::Archived),
            _ => None,
        }
    }
}

/// Contact message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: Subject,
    pub message: String,
    pub read: bool,
    pub archived: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// The single bucket this message is visible in
    pub fn bucket(&self) -> Bucket {
        if self.archived {
            Bucket::Archived
        } else if self.read {
            Bucket::Read
        } else {
            Bucket::Unread
        }
    }
}

/// Incoming contact submission from the public site
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Validated contact data, ready for persistence
#[derive(Debug, Clone)]
pub struct ContactData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: Subject,
    pub message: String,
}

/// Admin patch for a contact message
///
/// `read` and `archived` are one-way flips: only `true` has an effect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPatch {
    pub read: Option<bool>,
    pub archived: Option<bool>,
    pub notes: Option<String>,
}

/// Query parameters for contact listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    /// Bucket filter: "unread", "read" or "archived"; anything else means all
    pub status: Option<String>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(read: bool, archived: bool) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: "João Silva".to_string(),
            email: "joao@x.com".to_string(),
            phone: "11999999999".to_string(),
            subject: Subject::Orcamento,
            message: "Gostaria de um orçamento para 100 pessoas".to_string(),
            read,
            archived,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bucket_partition() {
        // Every flag combination lands in exactly one bucket
        assert_eq!(contact(false, false).bucket(), Bucket::Unread);
        assert_eq!(contact(true, false).bucket(), Bucket::Read);
        assert_eq!(contact(false, true).bucket(), Bucket::Archived);
        assert_eq!(contact(true, true).bucket(), Bucket::Archived);
    }

    #[test]
    fn test_subject_uses_correct_encoding() {
        // The legacy data set carried a mojibake variant of this value;
        // only the correctly encoded form is accepted.
        assert_eq!(Subject::parse("orçamento"), Some(Subject::Orcamento));
        assert_eq!(Subject::parse("or√ßamento"), None);
        assert_eq!(
            serde_json::to_string(&Subject::Orcamento).unwrap(),
            "\"orçamento\""
        );
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(Bucket::parse("unread"), Some(Bucket::Unread));
        assert_eq!(Bucket::parse("all"), None);
    }
}
