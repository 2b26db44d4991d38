use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// How many related projects the sidebar shows.
pub const RELATED_LIMIT: usize = 6;

/// An opportunity posting created by an alumni user.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Project {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Legacy roster; older rows store user ids here instead of names.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub team_members: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills_required: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by_email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_links: Vec<ProjectLink>,
    #[serde(default)]
    pub jd_pdf: Option<String>,
    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_roles: Vec<TeamRole>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub partners: Vec<String>,
    #[serde(default)]
    pub funding: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub highlights: Vec<String>,
}

/// A role/slot within a project, with capacity and fill tracking.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Position {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filled_count: u32,
    /// Stored as an integer flag by older rows.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(default)]
    pub stipend: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_students: Vec<UserRef>,
}

/// Minimal user reference embedded in positions.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UserRef {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ContactDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TeamRole {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills: Vec<String>,
}

/// Response of the application-status endpoint.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ApplicationStatus {
    #[serde(default)]
    pub has_applied: bool,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/project-applications`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApplicationRequest {
    pub project_id: u64,
    pub position_id: Option<u64>,
    pub message: String,
}

/// Review state of a submitted application.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationState {
    Pending,
    Accepted,
    Declined,
    Other(String),
}

impl ApplicationState {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "declined" => Self::Declined,
            _ => Self::Other(s.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Positions still taking applicants.
    pub fn open_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(|p| p.is_active)
    }

    /// Closed positions, shown only as history.
    pub fn filled_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(|p| !p.is_active)
    }

    pub fn has_contact(&self) -> bool {
        self.contact_details.as_ref().is_some_and(|c| {
            c.email.is_some() || c.phone.is_some() || c.website.is_some()
        })
    }

    /// Whether any link or the job description PDF is attached.
    pub fn has_links(&self) -> bool {
        self.jd_pdf.is_some() || !self.project_links.is_empty()
    }

    /// `created_at` as a calendar date, or the raw string if unparseable.
    pub fn created_date(&self) -> String {
        format_date(&self.created_at)
    }
}

impl Position {
    /// "filled/count filled", clamped so it never exceeds capacity.
    pub fn fill_label(&self) -> String {
        format!("{}/{} filled", self.filled_count.min(self.count), self.count)
    }

    pub fn stipend_label(&self) -> Option<String> {
        self.stipend.map(|s| format!("₹{}", group_thousands(s.round() as i64)))
    }
}

/// Keep projects other than `current_id`, capped at [`RELATED_LIMIT`].
pub fn related_from(candidates: Vec<Project>, current_id: u64) -> Vec<Project> {
    candidates
        .into_iter()
        .filter(|p| p.id != current_id)
        .take(RELATED_LIMIT)
        .collect()
}

/// Avatar fallback text: first letter of each name part, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`/`false`, `0`/`1` or null (false).
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(false),
        Some(serde_json::Value::Bool(b)) => Ok(b),
        Some(serde_json::Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(serde::de::Error::custom(format!("invalid flag {}", n))),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got {}",
            other
        ))),
    }
}

/// Accepts a list of strings or numbers (or null) as `Vec<String>`.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u64) -> Project {
        Project {
            id,
            title: format!("Project {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_minimal_project() {
        let p: Project = serde_json::from_str(r#"{"id": 7, "title": "Rover"}"#).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.title, "Rover");
        assert!(p.positions.is_empty());
        assert!(p.contact_details.is_none());
    }

    #[test]
    fn test_parse_nulls_and_numeric_members() {
        let p: Project = serde_json::from_str(
            r#"{"id": 1, "team_members": [3, "Asha Rao"], "images": null,
                "positions": null, "tags": null, "funding": null}"#,
        )
        .unwrap();
        assert_eq!(p.team_members, vec!["3", "Asha Rao"]);
        assert!(p.images.is_empty());
        assert!(p.positions.is_empty());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn test_parse_integer_active_flag() {
        let p: Project = serde_json::from_str(
            r#"{"id": 1, "positions": [
                {"id": 2, "count": 3, "filled_count": 1, "is_active": 1},
                {"id": 3, "count": 2, "filled_count": 2, "is_active": 0},
                {"id": 4, "count": 1, "is_active": null}]}"#,
        )
        .unwrap();
        let flags: Vec<bool> = p.positions.iter().map(|pos| pos.is_active).collect();
        assert_eq!(flags, vec![true, false, false]);
        assert_eq!(p.open_positions().map(|pos| pos.id).collect::<Vec<_>>(), vec![2]);

        let bad = serde_json::from_str::<Position>(r#"{"id": 5, "is_active": 2}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_full_position() {
        let p: Position = serde_json::from_str(
            r#"{"id": 4, "title": "ML Intern", "count": 3, "filled_count": 1,
                "is_active": true, "stipend": 15000, "duration": "3 months",
                "selected_students": [{"id": 9, "name": "Ravi K", "email": "r@x.in"}]}"#,
        )
        .unwrap();
        assert_eq!(p.count, 3);
        assert_eq!(p.stipend_label().as_deref(), Some("₹15,000"));
        assert_eq!(p.selected_students[0].name, "Ravi K");
    }

    #[test]
    fn test_filled_position_is_not_open() {
        let mut p = project(1);
        p.positions = vec![
            Position {
                id: 1,
                count: 3,
                filled_count: 3,
                is_active: false,
                ..Default::default()
            },
            Position {
                id: 2,
                count: 2,
                filled_count: 0,
                is_active: true,
                ..Default::default()
            },
        ];
        let open: Vec<u64> = p.open_positions().map(|pos| pos.id).collect();
        assert_eq!(open, vec![2]);
        let filled: Vec<&Position> = p.filled_positions().collect();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].fill_label(), "3/3 filled");
    }

    #[test]
    fn test_fill_label_clamps_overfilled() {
        let pos = Position {
            count: 2,
            filled_count: 5,
            ..Default::default()
        };
        assert_eq!(pos.fill_label(), "2/2 filled");
    }

    #[test]
    fn test_related_excludes_current_and_caps() {
        let candidates: Vec<Project> = (1..=10).map(project).collect();
        let related = related_from(candidates, 3);
        assert_eq!(related.len(), RELATED_LIMIT);
        assert!(related.iter().all(|p| p.id != 3));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("asha  rao"), "AR");
        assert_eq!(initials("Ñandu"), "Ñ");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-03-05T10:00:00Z"), "2024-03-05");
        assert_eq!(format_date("2024-03-05 10:00:00"), "2024-03-05");
        assert_eq!(format_date("last week"), "last week");
    }

    #[test]
    fn test_application_state_parse() {
        assert_eq!(ApplicationState::parse("Accepted"), ApplicationState::Accepted);
        assert_eq!(
            ApplicationState::parse("waitlisted"),
            ApplicationState::Other("waitlisted".into())
        );
    }

    #[test]
    fn test_contact_requires_a_field() {
        let mut p = project(1);
        p.contact_details = Some(ContactDetails::default());
        assert!(!p.has_contact());
        p.contact_details = Some(ContactDetails {
            phone: Some("+91 1234".into()),
            ..Default::default()
        });
        assert!(p.has_contact());
    }
}
