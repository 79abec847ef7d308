//! Admin actions accepted by `POST /admin/custom`.

use serde::{Deserialize, Serialize};

/// The action named in an admin action request did not match any known action.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported action: {0}")]
pub struct UnknownAction(pub String);

/// An admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Refresh platform caches. Completes inline.
    RefreshCache,
    /// Generate a report. Only scheduled; the result carries a report id.
    GenerateReport,
}

impl AdminAction {
    /// All supported actions.
    pub const ALL: [Self; 2] = [Self::RefreshCache, Self::GenerateReport];

    /// The wire name of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RefreshCache => "refresh_cache",
            Self::GenerateReport => "generate_report",
        }
    }
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        assert_eq!(
            "refresh_cache".parse::<AdminAction>().unwrap(),
            AdminAction::RefreshCache
        );
        assert_eq!(
            "generate_report".parse::<AdminAction>().unwrap(),
            AdminAction::GenerateReport
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "REFRESH_CACHE".parse::<AdminAction>(),
            Err(UnknownAction("REFRESH_CACHE".to_string()))
        );
    }

    #[test]
    fn test_display_matches_wire_name() {
        for action in AdminAction::ALL {
            assert_eq!(action.to_string().parse::<AdminAction>().unwrap(), action);
        }
    }
}
