//! 409 body parsing

use crate::error::Error;
use serde_json::Value;

/// Aliases that mark a conflict as permanent. Everything else is retried.
const PERMANENT_ALIASES: [&str; 2] = ["limit_exceeded", "object_protected"];

/// Body of a 409 response: `{details, error_alias, non_field_errors}`.
///
/// Every field is optional. A body that is empty or not a JSON object parses
/// to a conflict with no aliases, which is retried.
#[derive(Debug, Default)]
pub(crate) struct LockConflict {
    details: Value,
    aliases: Vec<String>,
    non_field_errors: Vec<String>,
}

impl LockConflict {
    pub(crate) fn parse(body: &[u8]) -> Self {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        Self {
            details: fields.remove("details").unwrap_or(Value::Null),
            aliases: string_list(fields.remove("error_alias")),
            non_field_errors: string_list(fields.remove("non_field_errors")),
        }
    }

    pub(crate) fn is_permanent(&self) -> bool {
        self.aliases
            .iter()
            .any(|alias| PERMANENT_ALIASES.contains(&alias.as_str()))
    }

    /// `"{first non_field_error}: {details as JSON}"`
    pub(crate) fn message(&self) -> String {
        let first = self
            .non_field_errors
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        format!("{}: {}", first, self.details)
    }

    /// The permanent-lock error for this conflict, if it is one.
    pub(crate) fn into_permanent_error(self, url: &str) -> Option<Error> {
        if !self.is_permanent() {
            return None;
        }
        Some(Error::PermanentLock {
            url: url.to_string(),
            message: self.message(),
            aliases: self.aliases,
        })
    }
}

/// Accept either a list or a single value; non-string entries are rendered as JSON.
fn string_list(value: Option<Value>) -> Vec<String> {
    let render = |v: Value| match v {
        Value::String(s) => s,
        other => other.to_string(),
    };

    match value {
        Some(Value::Array(items)) => items.into_iter().map(render).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![render(other)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::object_protected(r#"{"error_alias": ["object_protected"]}"#, true)]
    #[case::limit_exceeded(r#"{"error_alias": ["limit_exceeded"]}"#, true)]
    #[case::second_alias(r#"{"error_alias": ["locked", "object_protected"]}"#, true)]
    #[case::plain_string(r#"{"error_alias": "limit_exceeded"}"#, true)]
    #[case::transient(r#"{"error_alias": ["object_locked"]}"#, false)]
    #[case::no_alias(r#"{"details": []}"#, false)]
    #[case::empty_body("", false)]
    #[case::not_json("<html>Conflict</html>", false)]
    #[case::array_body("[1, 2]", false)]
    fn test_permanent_classification(#[case] body: &str, #[case] permanent: bool) {
        assert_eq!(LockConflict::parse(body.as_bytes()).is_permanent(), permanent);
    }

    #[test]
    fn test_message_combines_first_error_and_details() {
        let body = br#"{
            "details": [{"id": "1"}],
            "error_alias": ["object_protected"],
            "non_field_errors": ["Object is protected", "second"]
        }"#;

        let conflict = LockConflict::parse(body);
        assert_eq!(
            conflict.message(),
            r#"Object is protected: [{"id":"1"}]"#
        );
    }

    #[test]
    fn test_message_without_details() {
        let conflict = LockConflict::parse(br#"{"non_field_errors": ["Quota"]}"#);
        assert_eq!(conflict.message(), "Quota: null");
    }

    #[test]
    fn test_into_permanent_error() {
        let conflict = LockConflict::parse(
            br#"{"error_alias": ["limit_exceeded"], "non_field_errors": ["Limit"], "details": {}}"#,
        );
        match conflict.into_permanent_error("https://cp.sbcloud.ru/v1/vm") {
            Some(Error::PermanentLock {
                url,
                message,
                aliases,
            }) => {
                assert_eq!(url, "https://cp.sbcloud.ru/v1/vm");
                assert_eq!(message, "Limit: {}");
                assert_eq!(aliases, vec!["limit_exceeded".to_string()]);
            }
            other => panic!("expected PermanentLock, got {other:?}"),
        }

        assert!(LockConflict::parse(b"").into_permanent_error("u").is_none());
    }
}
