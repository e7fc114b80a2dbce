pub mod member_search_repository;
