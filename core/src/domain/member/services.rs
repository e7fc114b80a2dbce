use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    member::{
        entities::MemberTeamRow,
        ports::{MemberSearchRepository, MemberSearchService},
        value_objects::{MemberSearchFilter, Page, PageRequest},
    },
};

impl<M> MemberSearchService for Service<M>
where
    M: MemberSearchRepository,
{
    async fn search(&self, filter: MemberSearchFilter) -> Result<Vec<MemberTeamRow>, CoreError> {
        self.member_repository.search(filter).await
    }

    /// Content and count are independent round-trips without a shared
    /// transaction; a concurrent write between the two can leave
    /// `total_elements` inconsistent with `content`. Accepted relaxation.
    async fn search_page(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> Result<Page<MemberTeamRow>, CoreError> {
        page.validate()?;

        self.member_repository.search_page(filter, page).await
    }

    async fn search_page_eager(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> Result<Page<MemberTeamRow>, CoreError> {
        page.validate()?;

        self.member_repository.search_page_eager(filter, page).await
    }
}
