use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// Optional search criteria for members. Every field is independent;
/// absent fields contribute no condition to the compiled predicate, so
/// the default (empty) filter matches every member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchFilter {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

/// Zero-based page coordinates, owned by the caller and read-only to the
/// core. Page numbers and sizes are unsigned, so the only invalid input
/// is a zero size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(number: u64, size: u64) -> Self {
        Self { number, size }
    }

    pub fn offset(&self) -> u64 {
        self.number * self.size
    }

    /// Rejects unusable page coordinates before any store round-trip.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.size == 0 {
            return Err(CoreError::InvalidPageRequest);
        }
        Ok(())
    }
}

/// One page of results plus the authoritative total across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            number: page.number,
            size: page.size,
        }
    }
}

/// How the team table participates in an assembled query. The style is
/// always chosen by the caller, never inferred from the filter.
///
/// `Inner` and `Left` follow the declared member-to-team relation and
/// cannot multiply member rows (the relation is many-to-one). `Cross`
/// scans members and teams as independent sets correlated only by the
/// predicate; with an empty predicate it degenerates to a cartesian
/// product, so it must be requested explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamJoin {
    #[default]
    None,
    Inner,
    Left,
    Cross,
}

impl TeamJoin {
    /// Whether team columns are addressable under this join.
    pub fn includes_team(&self) -> bool {
        !matches!(self, TeamJoin::None)
    }

    /// Whether the join can yield more rows than there are members,
    /// which invalidates page-size-based total inference.
    pub fn multiplies_rows(&self) -> bool {
        matches!(self, TeamJoin::Cross)
    }
}

/// Immutable query-shape specification consumed by the query assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberQuerySpec {
    pub join: TeamJoin,
}

impl MemberQuerySpec {
    pub fn joined(join: TeamJoin) -> Self {
        Self { join }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortField {
    Id,
    Username,
    Age,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPlacement {
    First,
    Last,
}

/// One ordering key. `nulls` overrides the store's default placement of
/// null values for the keyed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSort {
    pub field: MemberSortField,
    pub direction: SortDirection,
    pub nulls: Option<NullPlacement>,
}

impl MemberSort {
    pub fn asc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
            nulls: None,
        }
    }

    pub fn desc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
            nulls: None,
        }
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullPlacement::Last);
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullPlacement::First);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_default() {
        let filter = MemberSearchFilter::default();
        assert!(filter.username.is_none());
        assert!(filter.team_name.is_none());
        assert!(filter.age_goe.is_none());
        assert!(filter.age_loe.is_none());
    }

    #[test]
    fn page_request_rejects_zero_size() {
        assert!(matches!(
            PageRequest::new(0, 0).validate(),
            Err(CoreError::InvalidPageRequest)
        ));
        assert!(PageRequest::new(0, 1).validate().is_ok());
    }

    #[test]
    fn page_request_offset() {
        assert_eq!(PageRequest::new(0, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 75);
    }

    #[test]
    fn cross_join_multiplies_rows() {
        assert!(TeamJoin::Cross.multiplies_rows());
        assert!(!TeamJoin::Left.multiplies_rows());
        assert!(!TeamJoin::Inner.multiplies_rows());
        assert!(!TeamJoin::None.multiplies_rows());
    }
}
