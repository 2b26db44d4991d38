use crate::data::project::Project;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// A logged-in session as written by the platform's login flow.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Bearer credentials plus the identity they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub user: SessionUser,
}

/// What the current viewer is allowed to do.
///
/// Only [`Viewer::Student`] can hand out credentials for an application, so
/// a guest or alumni viewer cannot build an apply request at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewer {
    Guest,
    Student(Credentials),
    Alumni(Credentials),
}

impl Session {
    /// Read a session file. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session: Session = serde_json::from_str(&content)?;
        if session.token.trim().is_empty() {
            return Err(Error::Config(format!(
                "{} has an empty token",
                path.display()
            )));
        }
        Ok(Some(session))
    }
}

impl Viewer {
    pub fn from_session(session: Option<Session>) -> Self {
        let Some(session) = session else {
            return Viewer::Guest;
        };
        let creds = Credentials {
            token: session.token,
            user: session.user,
        };
        match creds.user.role.as_str() {
            "student" => Viewer::Student(creds),
            _ => Viewer::Alumni(creds),
        }
    }

    /// Load the viewer from a session file, degrading to Guest on errors.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Viewer::Guest;
        };
        match Session::load_from(path) {
            Ok(session) => Self::from_session(session),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                Viewer::Guest
            }
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Viewer::Guest => None,
            Viewer::Student(c) | Viewer::Alumni(c) => Some(c),
        }
    }

    /// Credentials usable for submitting an application (students only).
    pub fn credentials_for_apply(&self) -> Option<&Credentials> {
        match self {
            Viewer::Student(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Viewer::Student(_))
    }

    /// Whether this viewer created the project (matched by id or email).
    pub fn is_owner(&self, project: &Project) -> bool {
        self.credentials().is_some_and(|c| {
            c.user.id == project.created_by_id
                || (!c.user.email.is_empty() && c.user.email == project.created_by_email)
        })
    }

    pub fn label(&self) -> String {
        match self {
            Viewer::Guest => "guest".to_string(),
            Viewer::Student(c) => format!("{} (student)", c.user.name),
            Viewer::Alumni(c) => format!("{} ({})", c.user.name, c.user.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn session(role: &str) -> Session {
        Session {
            token: "tok".into(),
            user: SessionUser {
                id: 5,
                name: "Meera Iyer".into(),
                email: "meera@iit.ac.in".into(),
                role: role.into(),
            },
        }
    }

    #[test]
    fn test_missing_session_is_guest() {
        let viewer = Viewer::load(Some(&PathBuf::from("/tmp/nonexistent-alum-session.json")));
        assert_eq!(viewer, Viewer::Guest);
        assert_eq!(Viewer::load(None), Viewer::Guest);
    }

    #[test]
    fn test_role_selects_capability() {
        assert!(Viewer::from_session(Some(session("student"))).is_student());
        let alumni = Viewer::from_session(Some(session("alumni")));
        assert!(!alumni.is_student());
        assert!(alumni.credentials_for_apply().is_none());
        assert!(alumni.credentials().is_some());
    }

    #[test]
    fn test_load_session_file() {
        let tmp = std::env::temp_dir().join("alum-board-test-session.json");
        fs::write(
            &tmp,
            r#"{"token": "abc", "user": {"id": 3, "name": "Dev", "email": "d@x.in", "role": "student"}}"#,
        )
        .unwrap();
        let viewer = Viewer::load(Some(&tmp));
        assert_eq!(viewer.credentials_for_apply().map(|c| c.token.as_str()), Some("abc"));
        let _ = fs::remove_file(&tmp);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let tmp = std::env::temp_dir().join("alum-board-test-empty-token.json");
        fs::write(&tmp, r#"{"token": " ", "user": {"id": 3}}"#).unwrap();
        assert!(matches!(Session::load_from(&tmp), Err(Error::Config(_))));
        assert_eq!(Viewer::load(Some(&tmp)), Viewer::Guest);
        let _ = fs::remove_file(&tmp);
    }

    #[test]
    fn test_owner_by_id_or_email() {
        let viewer = Viewer::from_session(Some(session("alumni")));
        let mut project = Project {
            id: 1,
            created_by_id: 5,
            ..Default::default()
        };
        assert!(viewer.is_owner(&project));
        project.created_by_id = 99;
        assert!(!viewer.is_owner(&project));
        project.created_by_email = "meera@iit.ac.in".into();
        assert!(viewer.is_owner(&project));
        assert!(!Viewer::Guest.is_owner(&project));
    }
}
