use chrono::{Duration, Utc};
use teloxide::types::UserId;
use crate::domain::{format_timestamp, User};
use crate::repo::test::{repos_over, InMemoryStore, UID};

#[tokio::test]
async fn create_if_absent_creates_exactly_one_row() {
    let store = InMemoryStore::empty();
    let users = repos_over(&store).users;

    let created = users.create_if_absent(UserId(UID)).await
        .expect("creation failed");
    assert!(created);

    let rows = store.rows_of("Users");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], UID.to_string());
    assert_eq!(rows[0][1], "[]");
    assert_eq!(rows[0][2], rows[0][3]);

    let created = users.create_if_absent(UserId(UID)).await
        .expect("repeated invocation failed");
    assert!(!created);
    assert_eq!(store.rows_of("Users").len(), 1);
}

#[tokio::test]
async fn get_returns_the_matching_row_only() {
    let first = User::new(UserId(UID), Utc::now());
    let other = User::new(UserId(UID + 1), Utc::now());
    let store = InMemoryStore::with_sheet("Users", vec![first.to_row(), other.to_row()]);
    let users = repos_over(&store).users;

    let found = users.get(UserId(UID + 1)).await
        .expect("lookup failed")
        .expect("user must be present");
    assert_eq!(found.id, (UID + 1).to_string());

    let missing = users.get(UserId(404)).await
        .expect("lookup failed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn update_activity_patches_only_the_target_row() {
    let created_at = Utc::now() - Duration::days(7);
    let first = User::new(UserId(UID), created_at);
    let second = User::new(UserId(UID + 1), created_at);
    let store = InMemoryStore::with_sheet("Users", vec![first.to_row(), second.to_row()]);
    let users = repos_over(&store).users;

    let ts = Utc::now();
    let updated = users.update_activity(UserId(UID + 1), ts).await
        .expect("update failed");
    assert!(updated);

    let rows = store.rows_of("Users");
    assert_eq!(rows[0], first.to_row());
    assert_eq!(rows[1][2], format_timestamp(created_at));
    assert_eq!(rows[1][3], format_timestamp(ts));
}

#[tokio::test]
async fn update_activity_of_a_missing_user_is_a_no_op() {
    let store = InMemoryStore::with_sheet("Users", vec![User::new(UserId(UID), Utc::now()).to_row()]);
    let users = repos_over(&store).users;

    let updated = users.update_activity(UserId(404), Utc::now()).await
        .expect("update failed");
    assert!(!updated);
    assert_eq!(store.rows_of("Users").len(), 1);
}

#[tokio::test]
async fn update_subscriptions_rewrites_the_json_cell() {
    let store = InMemoryStore::with_sheet("Users", vec![User::new(UserId(UID), Utc::now()).to_row()]);
    let users = repos_over(&store).users;

    let updated = users.update_subscriptions(UserId(UID), vec!["ch_one".to_owned(), "ch_two".to_owned()]).await
        .expect("update failed");
    assert!(updated);

    let rows = store.rows_of("Users");
    assert_eq!(rows[0][1], r#"["ch_one","ch_two"]"#);
}
