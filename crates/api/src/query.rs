//! Query parameter types for API handlers.

use std::str::FromStr;

use movies_core::error::CoreError;
use movies_core::options::{GetAllMoviesOptions, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use movies_core::types::UserId;
use movies_core::validation::FieldViolation;
use serde::Deserialize;

/// Query parameters for `GET /api/v1/movies`.
///
/// `sortBy` takes a public field name; a leading `-` sorts descending.
/// Numeric parameters arrive as raw strings so that unparsable values are
/// reported together with the other listing rules.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllMoviesQuery {
    pub title: Option<String>,
    pub year: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl GetAllMoviesQuery {
    /// Parse into listing options, applying pagination defaults.
    ///
    /// Unparsable numbers fail here along with every rule the parsed values
    /// break; otherwise the result still needs [`GetAllMoviesOptions::validate`].
    pub fn into_options(self, user_id: Option<UserId>) -> Result<GetAllMoviesOptions, CoreError> {
        let mut violations = Vec::new();

        let year_of_release = parse_param(
            self.year.as_deref(),
            "yearOfRelease",
            "Year of release must be a whole number",
            &mut violations,
        );
        let page = parse_param(
            self.page.as_deref(),
            "page",
            "Page must be a whole number",
            &mut violations,
        );
        let page_size = parse_param(
            self.page_size.as_deref(),
            "pageSize",
            "Page size must be a whole number",
            &mut violations,
        );

        let options = GetAllMoviesOptions {
            title: self.title,
            year_of_release,
            page: page.unwrap_or(DEFAULT_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            ..Default::default()
        }
        .with_sort_by(self.sort_by.as_deref())
        .with_user(user_id);

        if violations.is_empty() {
            return Ok(options);
        }
        if let Err(CoreError::Validation(rest)) = options.validate() {
            violations.extend(rest);
        }
        Err(CoreError::Validation(violations))
    }
}

/// Parse an optional numeric parameter. Blank values count as absent.
fn parse_param<T: FromStr>(
    raw: Option<&str>,
    field: &str,
    message: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            violations.push(FieldViolation::new(field, message));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use movies_core::options::{SortField, SortOrder};

    use super::*;

    #[test]
    fn defaults_applied() {
        let opts = GetAllMoviesQuery::default().into_options(None).unwrap();
        assert_eq!(opts.page, 1);
        assert_eq!(opts.page_size, 10);
        assert_eq!(opts.sort(), None);
    }

    #[test]
    fn descending_sort_prefix() {
        let query = GetAllMoviesQuery {
            sort_by: Some("-title".into()),
            ..Default::default()
        };
        let opts = query.into_options(None).unwrap();
        assert_eq!(opts.sort(), Some((SortField::Title, SortOrder::Descending)));
    }

    #[test]
    fn numbers_are_parsed_and_blanks_ignored() {
        let query = GetAllMoviesQuery {
            year: Some("1999".into()),
            page: Some(" 3 ".into()),
            page_size: Some(String::new()),
            ..Default::default()
        };
        let opts = query.into_options(None).unwrap();
        assert_eq!(opts.year_of_release, Some(1999));
        assert_eq!(opts.page, 3);
        assert_eq!(opts.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn unparsable_numbers_are_reported_with_other_rules() {
        let query = GetAllMoviesQuery {
            year: Some("19x".into()),
            page: Some("abc".into()),
            page_size: Some("99999999999999999999".into()),
            sort_by: Some("budget".into()),
            ..Default::default()
        };
        let err = query.into_options(None).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref v) if v.len() == 4);
        if let CoreError::Validation(violations) = err {
            let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
            assert_eq!(fields, vec!["yearOfRelease", "page", "pageSize", "sortField"]);
        }
    }
}
