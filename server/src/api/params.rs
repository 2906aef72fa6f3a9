//! Parsing of list-endpoint query parameters.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::store::Direction;

/// Query parameters for the tag and ingredient lists.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CatalogParams {
    /// Non-zero to keep only entries used by at least one of the caller's recipes
    pub assigned_only: Option<String>,
    /// Name ordering, `desc` unless given
    pub sort_dir: Option<Direction>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecipeListParams {
    /// Comma-separated tag ids, e.g. `1,2`
    pub tags: Option<String>,
    /// Comma-separated ingredient ids
    pub ingredients: Option<String>,
}

/// Parse a comma-separated list of integer ids such as `"1,2,3"`.
///
/// An absent or empty parameter means "no filter" and yields `None`.
pub fn parse_id_list(field: &str, raw: Option<&str>) -> Result<Option<Vec<i32>>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|part| {
            part.trim().parse::<i32>().map_err(|_| {
                ApiError::field(
                    field,
                    format!("\"{}\" is not a valid comma-separated list of ids.", raw),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse an integer-style flag: any non-zero integer is true. `true`/`false`
/// are accepted as well. Absent means false.
pub fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(false);
    };

    if raw.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(false);
    }

    raw.parse::<i64>()
        .map(|value| value != 0)
        .map_err(|_| ApiError::field(field, format!("\"{}\" is not a valid flag.", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_list() {
        assert_eq!(parse_id_list("tags", Some("1,2,3")).unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(parse_id_list("tags", Some(" 4 , 5 ")).unwrap(), Some(vec![4, 5]));
        assert_eq!(parse_id_list("tags", Some("7")).unwrap(), Some(vec![7]));
    }

    #[test]
    fn test_id_list_absent_means_no_filter() {
        assert_eq!(parse_id_list("tags", None).unwrap(), None);
        assert_eq!(parse_id_list("tags", Some("")).unwrap(), None);
    }

    #[test]
    fn test_id_list_rejects_garbage() {
        for raw in ["a", "1,a", "1,,2", "1.5"] {
            match parse_id_list("ingredients", Some(raw)) {
                Err(ApiError::Validation(fields)) => assert!(fields.get("ingredients").is_some()),
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_flag() {
        assert!(!parse_flag("assigned_only", None).unwrap());
        assert!(!parse_flag("assigned_only", Some("0")).unwrap());
        assert!(parse_flag("assigned_only", Some("1")).unwrap());
        assert!(parse_flag("assigned_only", Some("2")).unwrap());
        assert!(parse_flag("assigned_only", Some("true")).unwrap());
        assert!(!parse_flag("assigned_only", Some("False")).unwrap());
        assert!(parse_flag("assigned_only", Some("yes")).is_err());
    }
}
