//! Predicate compilation and query assembly for member search.
//!
//! Filters compile to a single `Condition` tree; query shape (joins,
//! projection, ordering) is applied by pure functions that consume and
//! return the `Select` value, so no stage mutates shared builder state.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, RelationTrait, Select,
    sea_query::{Expr, NullOrdering, SimpleExpr},
};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        member::value_objects::{
            MemberQuerySpec, MemberSearchFilter, MemberSort, MemberSortField, NullPlacement,
            SortDirection, TeamJoin,
        },
    },
    entity::{members, teams},
};

/// Compiles the filter into one AND-combined condition tree.
///
/// Absent fields are skipped, so an empty filter compiles to an empty
/// conjunction, which the store renders as an unfiltered scan. The result
/// is always a valid condition and composes with further conditions.
pub fn search_condition(filter: &MemberSearchFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref username) = filter.username {
        condition = condition.add(members::Column::Username.eq(username.clone()));
    }

    if let Some(ref team_name) = filter.team_name {
        condition = condition.add(teams::Column::Name.eq(team_name.clone()));
    }

    if let Some(age_goe) = filter.age_goe {
        condition = condition.add(members::Column::Age.gte(age_goe));
    }

    if let Some(age_loe) = filter.age_loe {
        condition = condition.add(members::Column::Age.lte(age_loe));
    }

    condition
}

/// Builds the member select for the given filter under the caller-chosen
/// join spec. The join is added exactly once regardless of how many
/// conditions or projected fields reference the team.
///
/// A team-name condition without a team join cannot be satisfied; it is
/// rejected here, before anything reaches the store.
pub fn assemble_search(
    filter: &MemberSearchFilter,
    spec: &MemberQuerySpec,
) -> Result<Select<members::Entity>, CoreError> {
    if filter.team_name.is_some() && !spec.join.includes_team() {
        return Err(CoreError::MissingTeamJoin);
    }

    let mut query = members::Entity::find();

    match spec.join {
        TeamJoin::None => {}
        TeamJoin::Inner => {
            query = query.join(JoinType::InnerJoin, members::Relation::Team.def());
        }
        TeamJoin::Left => {
            query = query.join(JoinType::LeftJoin, members::Relation::Team.def());
        }
        TeamJoin::Cross => {
            // Independent scan of both tables; correlation is left
            // entirely to the predicate.
            QueryTrait::query(&mut query).from(teams::Entity);
        }
    }

    Ok(query.filter(search_condition(filter)))
}

/// Narrows the select to the flat member/team row, positionally.
pub fn select_member_team(query: Select<members::Entity>) -> Select<members::Entity> {
    query
        .select_only()
        .column_as(members::Column::Id, "member_id")
        .column_as(members::Column::Username, "username")
        .column_as(members::Column::Age, "age")
        .column_as(teams::Column::Id, "team_id")
        .column_as(teams::Column::Name, "team_name")
}

pub fn apply_sort(query: Select<members::Entity>, sorts: &[MemberSort]) -> Select<members::Entity> {
    sorts.iter().fold(query, |query, sort| {
        let column = sort_column(sort.field);
        let order = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        match sort.nulls {
            Some(NullPlacement::First) => {
                query.order_by_with_nulls(column, order, NullOrdering::First)
            }
            Some(NullPlacement::Last) => {
                query.order_by_with_nulls(column, order, NullOrdering::Last)
            }
            None => query.order_by(column, order),
        }
    })
}

/// Correlation predicate for the cross-join search: member username
/// equals team name.
pub fn username_matches_team_name() -> SimpleExpr {
    Expr::col((members::Entity, members::Column::Username))
        .equals((teams::Entity, teams::Column::Name))
}

fn sort_column(field: MemberSortField) -> members::Column {
    match field {
        MemberSortField::Id => members::Column::Id,
        MemberSortField::Username => members::Column::Username,
        MemberSortField::Age => members::Column::Age,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbBackend;

    use super::*;

    const BASE_SELECT: &str = "SELECT \"members\".\"id\", \"members\".\"username\", \
         \"members\".\"age\", \"members\".\"team_id\", \"members\".\"created_at\", \
         \"members\".\"updated_at\" FROM \"members\"";

    fn sql(query: Select<members::Entity>) -> String {
        query.build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn empty_filter_compiles_to_unfiltered_scan() {
        let query = assemble_search(&MemberSearchFilter::default(), &MemberQuerySpec::default())
            .unwrap();

        let sql = sql(query);
        assert_eq!(sql, BASE_SELECT);
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn each_present_field_appends_one_condition() {
        let filter = MemberSearchFilter {
            username: Some("member1".to_string()),
            ..Default::default()
        };
        let sql_one = sql(assemble_search(&filter, &MemberQuerySpec::default()).unwrap());
        assert!(sql_one.contains("WHERE \"members\".\"username\" = 'member1'"));
        assert!(!sql_one.contains(">="));
        assert!(!sql_one.contains("<="));

        let filter = MemberSearchFilter {
            username: Some("member1".to_string()),
            team_name: Some("teamB".to_string()),
            age_goe: Some(35),
            age_loe: Some(40),
        };
        let sql_all = sql(
            assemble_search(&filter, &MemberQuerySpec::joined(TeamJoin::Left)).unwrap(),
        );
        assert!(sql_all.contains("\"members\".\"username\" = 'member1'"));
        assert!(sql_all.contains("\"teams\".\"name\" = 'teamB'"));
        assert!(sql_all.contains("\"members\".\"age\" >= 35"));
        assert!(sql_all.contains("\"members\".\"age\" <= 40"));
        assert_eq!(sql_all.matches(" AND ").count(), 3);
    }

    #[test]
    fn team_condition_without_team_join_is_rejected() {
        let filter = MemberSearchFilter {
            team_name: Some("teamB".to_string()),
            ..Default::default()
        };

        let result = assemble_search(&filter, &MemberQuerySpec::default());
        assert!(matches!(result, Err(CoreError::MissingTeamJoin)));
    }

    #[test]
    fn team_join_is_added_exactly_once() {
        let filter = MemberSearchFilter {
            team_name: Some("teamB".to_string()),
            ..Default::default()
        };
        let query = select_member_team(
            assemble_search(&filter, &MemberQuerySpec::joined(TeamJoin::Left)).unwrap(),
        );

        let sql = sql(query);
        assert_eq!(sql.matches("LEFT JOIN \"teams\"").count(), 1);
        assert!(sql.contains("ON \"members\".\"team_id\" = \"teams\".\"id\""));
    }

    #[test]
    fn inner_join_follows_the_declared_relation() {
        let query = assemble_search(
            &MemberSearchFilter::default(),
            &MemberQuerySpec::joined(TeamJoin::Inner),
        )
        .unwrap();

        let sql = sql(query);
        assert!(sql.contains("INNER JOIN \"teams\" ON \"members\".\"team_id\" = \"teams\".\"id\""));
    }

    #[test]
    fn cross_join_scans_both_tables_with_predicate_correlation_only() {
        let query = assemble_search(
            &MemberSearchFilter::default(),
            &MemberQuerySpec::joined(TeamJoin::Cross),
        )
        .unwrap()
        .filter(username_matches_team_name());

        let sql = sql(query);
        assert!(sql.contains("FROM \"members\", \"teams\""));
        assert!(sql.contains("WHERE \"members\".\"username\" = \"teams\".\"name\""));
        assert!(!sql.contains("JOIN"));
    }

    #[test]
    fn member_team_projection_is_positional() {
        let query = select_member_team(
            assemble_search(
                &MemberSearchFilter::default(),
                &MemberQuerySpec::joined(TeamJoin::Left),
            )
            .unwrap(),
        );

        let sql = sql(query);
        assert!(sql.starts_with("SELECT \"members\".\"id\" AS \"member_id\""));
        assert!(sql.contains("\"teams\".\"id\" AS \"team_id\""));
        assert!(sql.contains("\"teams\".\"name\" AS \"team_name\""));
        assert!(!sql.contains("\"members\".\"created_at\""));
    }

    #[test]
    fn sort_supports_direction_and_null_placement() {
        let sorts = [
            MemberSort::desc(MemberSortField::Age),
            MemberSort::asc(MemberSortField::Username).nulls_last(),
        ];
        let query = apply_sort(members::Entity::find(), &sorts);

        let sql = sql(query);
        assert!(sql.contains(
            "ORDER BY \"members\".\"age\" DESC, \"members\".\"username\" ASC NULLS LAST"
        ));
    }

    #[test]
    fn page_coordinates_become_limit_and_offset() {
        let query = assemble_search(&MemberSearchFilter::default(), &MemberQuerySpec::default())
            .unwrap()
            .offset(3)
            .limit(3);

        let sql = sql(query);
        assert!(sql.ends_with("LIMIT 3 OFFSET 3"));
    }
}
