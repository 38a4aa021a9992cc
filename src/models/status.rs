use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of status labels stored as lowercase text.
pub trait StatusSet: Copy + Eq + Send + Sync + Unpin + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == label)
    }
}

/// Status of inquiries and demo bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Completed,
    Archived,
}

impl StatusSet for LeadStatus {
    const ALL: &'static [Self] = &[
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Completed,
        LeadStatus::Archived,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Completed => "completed",
            LeadStatus::Archived => "archived",
        }
    }
}

/// Status of event registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RegistrationStatus {
    New,
    Contacted,
    Confirmed,
    Attended,
    Cancelled,
}

impl StatusSet for RegistrationStatus {
    const ALL: &'static [Self] = &[
        RegistrationStatus::New,
        RegistrationStatus::Contacted,
        RegistrationStatus::Confirmed,
        RegistrationStatus::Attended,
        RegistrationStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::New => "new",
            RegistrationStatus::Contacted => "contacted",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn parse<S: StatusSet>(&self) -> Option<S> {
        S::parse(self.status.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_label_in_the_set() {
        for status in LeadStatus::ALL {
            assert_eq!(LeadStatus::parse(status.as_str()), Some(*status));
        }
        for status in RegistrationStatus::ALL {
            assert_eq!(RegistrationStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn parse_rejects_labels_from_other_sets() {
        assert_eq!(LeadStatus::parse("confirmed"), None);
        assert_eq!(RegistrationStatus::parse("completed"), None);
        assert_eq!(LeadStatus::parse("New"), None);
        assert_eq!(LeadStatus::parse(""), None);
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&RegistrationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
