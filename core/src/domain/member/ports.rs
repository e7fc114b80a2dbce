use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    member::{
        entities::{Member, MemberTeamRow, Team},
        value_objects::{MemberQuerySpec, MemberSearchFilter, MemberSort, Page, PageRequest},
    },
};

/// Repository trait for member directory data access
#[cfg_attr(test, mockall::automock)]
pub trait MemberSearchRepository: Send + Sync {
    fn save_member(&self, member: Member)
    -> impl Future<Output = Result<Member, CoreError>> + Send;

    fn save_team(&self, team: Team) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn find_member_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Member>, CoreError>> + Send;

    fn find_all_members(&self) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn find_members_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    /// Members in caller-chosen order; each key may place nulls first or
    /// last.
    fn list_members(
        &self,
        sorts: Vec<MemberSort>,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    /// Full-entity search under a caller-chosen join spec.
    fn search_members(
        &self,
        filter: MemberSearchFilter,
        spec: MemberQuerySpec,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    /// Flat field-list projection of the search: username and age only.
    fn search_name_age(
        &self,
        filter: MemberSearchFilter,
    ) -> impl Future<Output = Result<Vec<(Option<String>, i32)>, CoreError>> + Send;

    /// Members whose username equals the name of any team. Teams are not
    /// related to members here; the two sets are correlated by the
    /// predicate alone (cross join).
    fn members_named_after_teams(
        &self,
    ) -> impl Future<Output = Result<Vec<Member>, CoreError>> + Send;

    fn search(
        &self,
        filter: MemberSearchFilter,
    ) -> impl Future<Output = Result<Vec<MemberTeamRow>, CoreError>> + Send;

    fn search_page(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<MemberTeamRow>, CoreError>> + Send;

    fn search_page_eager(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<MemberTeamRow>, CoreError>> + Send;
}

/// Service trait for the member search caller boundary
#[cfg_attr(test, mockall::automock)]
pub trait MemberSearchService: Send + Sync {
    fn search(
        &self,
        filter: MemberSearchFilter,
    ) -> impl Future<Output = Result<Vec<MemberTeamRow>, CoreError>> + Send;

    /// Paged search with the adaptive count strategy: the count query is
    /// skipped whenever the fetched page proves the total on its own.
    fn search_page(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<MemberTeamRow>, CoreError>> + Send;

    /// Paged search that always issues the count query.
    fn search_page_eager(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<MemberTeamRow>, CoreError>> + Send;
}
