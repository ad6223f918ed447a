//! Tests for the follow services, phrased as behaviour steps.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockFollowRepository;

fn uid(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn follow(id: i64, follower: i64, followee: i64) -> Follow {
    let now = Utc::now();
    Follow {
        id: FollowId::new(id).expect("follow id"),
        follower_id: uid(follower),
        followee_id: uid(followee),
        created_at: now,
        updated_at: now,
    }
}

#[given("an empty follow graph")]
fn an_empty_follow_graph() -> MockFollowRepository {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_pair().returning(|_| Ok(None));
    repo.expect_insert().returning(|pair| {
        Ok(follow(
            1,
            i64::from(pair.follower_id().get()),
            i64::from(pair.followee_id().get()),
        ))
    });
    repo
}

#[given("a graph where user 1 already follows user 2")]
fn a_graph_with_an_existing_edge() -> MockFollowRepository {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_pair()
        .returning(|_| Ok(Some(follow(1, 1, 2))));
    repo.expect_insert().times(0);
    repo
}

#[when("the follow service runs over the graph")]
fn the_follow_service_runs_over(
    graph: MockFollowRepository,
) -> FollowService<MockFollowRepository> {
    FollowService::new(Arc::new(graph))
}

#[then("the follow is rejected as invalid")]
fn the_follow_is_rejected_as_invalid(result: Result<Follow, Error>) {
    let error = result.expect_err("follow must fail");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "a user cannot follow themselves");
}

#[then("the follow is rejected as a duplicate")]
fn the_follow_is_rejected_as_a_duplicate(result: Result<Follow, Error>) {
    let error = result.expect_err("follow must fail");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn following_oneself_is_invalid_on_an_empty_graph() {
    let service = the_follow_service_runs_over(an_empty_follow_graph());
    the_follow_is_rejected_as_invalid(service.create(uid(4), uid(4)).await);
}

#[rstest]
#[tokio::test]
async fn following_oneself_is_invalid_even_with_existing_edges() {
    let service = the_follow_service_runs_over(a_graph_with_an_existing_edge());
    the_follow_is_rejected_as_invalid(service.create(uid(1), uid(1)).await);
}

#[rstest]
#[tokio::test]
async fn following_twice_is_a_conflict() {
    let service = the_follow_service_runs_over(a_graph_with_an_existing_edge());
    the_follow_is_rejected_as_a_duplicate(service.create(uid(1), uid(2)).await);
}

#[rstest]
#[case("follows_follower_id_fkey", ErrorCode::Unauthorized)]
#[case("follows_followee_id_fkey", ErrorCode::NotFound)]
#[tokio::test]
async fn dangling_endpoints_are_reported_per_side(
    #[case] constraint: &str,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_pair().return_once(|_| Ok(None));
    let constraint = constraint.to_owned();
    repo.expect_insert()
        .return_once(move |_| Err(RepositoryError::reference(constraint)));

    let service = the_follow_service_runs_over(repo);
    let error = service
        .create(uid(1), uid(2))
        .await
        .expect_err("dangling endpoint");

    assert_eq!(error.code(), expected);
    assert!(!error.message().contains("fkey"));
}

#[rstest]
#[tokio::test]
async fn following_a_new_user_creates_the_edge() {
    let service = the_follow_service_runs_over(an_empty_follow_graph());
    let created = service
        .create(uid(1), uid(2))
        .await
        .expect("follow succeeds");
    assert_eq!(created.follower_id, uid(1));
    assert_eq!(created.followee_id, uid(2));
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_insert_is_a_conflict() {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_pair().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(RepositoryError::duplicate("follows_pair_key")));

    let service = the_follow_service_runs_over(repo);
    the_follow_is_rejected_as_a_duplicate(service.create(uid(1), uid(2)).await);
}

#[rstest]
#[tokio::test]
async fn update_cannot_turn_an_edge_into_a_self_follow() {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(follow(1, 1, 2))));
    repo.expect_update().times(0);

    let changes = FollowChanges {
        follower_id: Some(uid(2)),
        followee_id: None,
    };
    let error = FollowService::new(Arc::new(repo))
        .update(FollowId::new(1).expect("id"), changes)
        .await
        .expect_err("self follow");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_keeping_its_own_pair_is_allowed() {
    let mut repo = MockFollowRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(follow(1, 1, 2))));
    repo.expect_find_by_pair()
        .return_once(|_| Ok(Some(follow(1, 1, 2))));
    repo.expect_update()
        .return_once(|_, _| Ok(Some(follow(1, 1, 2))));

    let changes = FollowChanges {
        follower_id: Some(uid(1)),
        followee_id: None,
    };
    FollowService::new(Arc::new(repo))
        .update(FollowId::new(1).expect("id"), changes)
        .await
        .expect("update succeeds");
}

#[rstest]
#[case(0)]
#[case(-1)]
#[tokio::test]
async fn get_rejects_non_positive_ids(#[case] raw: i64) {
    let error = FollowService::new(Arc::new(MockFollowRepository::new()))
        .get(raw)
        .await
        .expect_err("invalid id");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_edge_is_not_found() {
    let mut repo = MockFollowRepository::new();
    repo.expect_delete().return_once(|_| Ok(None));

    let error = FollowService::new(Arc::new(repo))
        .delete(FollowId::new(9).expect("id"))
        .await
        .expect_err("missing edge");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
