use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        member::{
            entities::{Member, MemberTeamRow, Team},
            pagination::resolved_total,
            ports::MemberSearchRepository,
            value_objects::{
                MemberQuerySpec, MemberSearchFilter, MemberSort, Page, PageRequest, TeamJoin,
            },
        },
    },
    entity::{members, teams},
    infrastructure::member::{
        mappers::MemberTeamQueryRow,
        query::{apply_sort, assemble_search, select_member_team, username_matches_team_name},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresMemberSearchRepository {
    pub db: DatabaseConnection,
}

impl PostgresMemberSearchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pagination engine shared by the paged search paths.
    ///
    /// Content is fetched with offset/limit ordered by member id, so
    /// repeated calls see stable page boundaries. When `adaptive` is set,
    /// the total is inferred from the fetched page size where the page
    /// boundary proves it; otherwise, and whenever the fetched page is
    /// full or the join can multiply rows, a dedicated count query runs
    /// with the same predicate and join graph but no projection and no
    /// ordering.
    ///
    /// Content and count are separate round-trips without a shared
    /// transaction; a write landing between them can make the total
    /// disagree with the page content. Accepted relaxation.
    async fn fetch_page(
        &self,
        filter: &MemberSearchFilter,
        spec: &MemberQuerySpec,
        page: PageRequest,
        adaptive: bool,
    ) -> Result<Page<MemberTeamRow>, CoreError> {
        let rows = select_member_team(assemble_search(filter, spec)?)
            .order_by_asc(members::Column::Id)
            .offset(page.offset())
            .limit(page.size)
            .into_model::<MemberTeamQueryRow>()
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch member search page: {}", e);
                CoreError::Store(e)
            })?;

        let content: Vec<MemberTeamRow> = rows.into_iter().map(MemberTeamRow::from).collect();

        let resolved = if adaptive {
            resolved_total(&page, content.len(), spec.join.multiplies_rows())
        } else {
            None
        };

        let total_elements = match resolved {
            Some(total) => total,
            None => assemble_search(filter, spec)?
                .count(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to count member search results: {}", e);
                    CoreError::Store(e)
                })?,
        };

        Ok(Page::new(content, page, total_elements))
    }
}

impl MemberSearchRepository for PostgresMemberSearchRepository {
    async fn save_member(&self, member: Member) -> Result<Member, CoreError> {
        let created = members::Entity::insert(members::ActiveModel {
            id: Set(member.id),
            username: Set(member.username.clone()),
            age: Set(member.age),
            team_id: Set(member.team_id),
            created_at: Set(member.created_at.fixed_offset()),
            updated_at: Set(member.updated_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(Member::from)
        .map_err(|e| {
            error!("Failed to create member: {}", e);
            CoreError::Store(e)
        })?;

        Ok(created)
    }

    async fn save_team(&self, team: Team) -> Result<Team, CoreError> {
        let created = teams::Entity::insert(teams::ActiveModel {
            id: Set(team.id),
            name: Set(team.name.clone()),
            created_at: Set(team.created_at.fixed_offset()),
            updated_at: Set(team.updated_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(Team::from)
        .map_err(|e| {
            error!("Failed to create team: {}", e);
            CoreError::Store(e)
        })?;

        Ok(created)
    }

    async fn find_member_by_id(&self, id: Uuid) -> Result<Option<Member>, CoreError> {
        let member = members::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get member by id: {}", e);
                CoreError::Store(e)
            })?;

        Ok(member.map(Member::from))
    }

    async fn find_all_members(&self) -> Result<Vec<Member>, CoreError> {
        let members = members::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch members: {}", e);
                CoreError::Store(e)
            })?
            .iter()
            .map(Member::from)
            .collect();

        Ok(members)
    }

    async fn find_members_by_username(&self, username: &str) -> Result<Vec<Member>, CoreError> {
        let members = members::Entity::find()
            .filter(members::Column::Username.eq(username))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch members by username: {}", e);
                CoreError::Store(e)
            })?
            .iter()
            .map(Member::from)
            .collect();

        Ok(members)
    }

    async fn list_members(&self, sorts: Vec<MemberSort>) -> Result<Vec<Member>, CoreError> {
        let members = apply_sort(members::Entity::find(), &sorts)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list members: {}", e);
                CoreError::Store(e)
            })?
            .iter()
            .map(Member::from)
            .collect();

        Ok(members)
    }

    async fn search_members(
        &self,
        filter: MemberSearchFilter,
        spec: MemberQuerySpec,
    ) -> Result<Vec<Member>, CoreError> {
        let members = assemble_search(&filter, &spec)?
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to search members: {}", e);
                CoreError::Store(e)
            })?
            .iter()
            .map(Member::from)
            .collect();

        Ok(members)
    }

    async fn search_name_age(
        &self,
        filter: MemberSearchFilter,
    ) -> Result<Vec<(Option<String>, i32)>, CoreError> {
        let rows = assemble_search(&filter, &MemberQuerySpec::joined(TeamJoin::Left))?
            .select_only()
            .column(members::Column::Username)
            .column(members::Column::Age)
            .into_tuple::<(Option<String>, i32)>()
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to search member names and ages: {}", e);
                CoreError::Store(e)
            })?;

        Ok(rows)
    }

    async fn members_named_after_teams(&self) -> Result<Vec<Member>, CoreError> {
        let members = assemble_search(
            &MemberSearchFilter::default(),
            &MemberQuerySpec::joined(TeamJoin::Cross),
        )?
        .filter(username_matches_team_name())
        .all(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to search members named after teams: {}", e);
            CoreError::Store(e)
        })?
        .iter()
        .map(Member::from)
        .collect();

        Ok(members)
    }

    async fn search(&self, filter: MemberSearchFilter) -> Result<Vec<MemberTeamRow>, CoreError> {
        let rows = select_member_team(assemble_search(
            &filter,
            &MemberQuerySpec::joined(TeamJoin::Left),
        )?)
        .into_model::<MemberTeamQueryRow>()
        .all(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to search members: {}", e);
            CoreError::Store(e)
        })?;

        Ok(rows.into_iter().map(MemberTeamRow::from).collect())
    }

    async fn search_page(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> Result<Page<MemberTeamRow>, CoreError> {
        self.fetch_page(&filter, &MemberQuerySpec::joined(TeamJoin::Left), page, true)
            .await
    }

    async fn search_page_eager(
        &self,
        filter: MemberSearchFilter,
        page: PageRequest,
    ) -> Result<Page<MemberTeamRow>, CoreError> {
        self.fetch_page(
            &filter,
            &MemberQuerySpec::joined(TeamJoin::Left),
            page,
            false,
        )
        .await
    }
}
