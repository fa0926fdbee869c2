//! Suite domain model.

use serde::{Deserialize, Serialize};

/// Operational status of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteStatus {
    Active,
    Inactive,
    Maintenance,
}

impl SuiteStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteStatus::Active => "ativo",
            SuiteStatus::Inactive => "inativo",
            SuiteStatus::Maintenance => "manutencao",
        }
    }

    /// Parses from database string representation (Portuguese or English).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ativo" | "active" => Some(SuiteStatus::Active),
            "inativo" | "inactive" => Some(SuiteStatus::Inactive),
            "manutencao" | "maintenance" => Some(SuiteStatus::Maintenance),
            _ => None,
        }
    }
}

/// A rentable room of the guesthouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub id: String,
    pub name: String,
    pub identification_color: Option<String>,
    pub status: SuiteStatus,
}

impl Suite {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            identification_color: None,
            status: SuiteStatus::Active,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.identification_color = Some(color.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == SuiteStatus::Active
    }
}

/// Orders suites the way the store returns them: by name, then id.
pub fn sort_by_name(suites: &mut [Suite]) {
    suites.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

/// Response for listing suites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSuitesResponse {
    pub suites: Vec<Suite>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_status_parse() {
        assert_eq!(SuiteStatus::parse("ativo"), Some(SuiteStatus::Active));
        assert_eq!(SuiteStatus::parse("inactive"), Some(SuiteStatus::Inactive));
        assert_eq!(
            SuiteStatus::parse("manutencao"),
            Some(SuiteStatus::Maintenance)
        );
        assert_eq!(SuiteStatus::parse("closed"), None);
    }

    #[test]
    fn test_suite_status_as_str_roundtrips() {
        for status in [
            SuiteStatus::Active,
            SuiteStatus::Inactive,
            SuiteStatus::Maintenance,
        ] {
            assert_eq!(SuiteStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_sort_by_name() {
        let mut suites = vec![
            Suite::new("s1", "Verde"),
            Suite::new("s2", "Azul"),
            Suite::new("s3", "Master"),
        ];
        sort_by_name(&mut suites);
        let names: Vec<&str> = suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Azul", "Master", "Verde"]);
    }

    #[test]
    fn test_suite_serialization() {
        let suite = Suite::new("s1", "Verde").with_color("#4CAF50");
        let json = serde_json::to_value(&suite).unwrap();
        assert_eq!(json["identificationColor"], "#4CAF50");
        assert_eq!(json["status"], "active");
    }
}
