//! Board services running against the in-memory store.

use std::sync::Arc;

use board_core::domain::{CommentId, PostId};
use board_core::ports::{TransactionManager, TxMode};
use board_core::{CommentService, DomainError, PostService, RepoError};
use board_infra::{InMemoryStore, StoreStats};

fn services() -> (InMemoryStore, PostService, CommentService) {
    let store = InMemoryStore::new();
    let transactions: Arc<dyn TransactionManager> = Arc::new(store.clone());
    (
        store,
        PostService::new(Arc::clone(&transactions)),
        CommentService::new(transactions),
    )
}

async fn create(posts: &PostService, title: &str, nickname: &str) -> PostId {
    posts
        .create(title.to_string(), "content".to_string(), nickname.to_string())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_created_post_has_no_comments_and_its_author() {
    let (_, posts, _) = services();

    let id = create(&posts, "Hello", "alice").await;
    let post = posts.get_detail(id).await.unwrap();

    assert_eq!(post.id(), Some(id));
    assert!(post.comments().is_empty());
    assert_eq!(post.author().nickname(), "alice");
}

#[tokio::test]
async fn test_second_post_by_same_nickname_reuses_member() {
    let (store, posts, _) = services();

    let first = create(&posts, "one", "alice").await;
    let second = create(&posts, "two", "alice").await;

    let a = posts.get_detail(first).await.unwrap();
    let b = posts.get_detail(second).await.unwrap();
    assert_eq!(a.author().id(), b.author().id());
    assert_eq!(store.stats().await.members, 1);
}

#[tokio::test]
async fn test_list_is_newest_first_and_clamped() {
    let (_, posts, _) = services();
    for i in 0..60 {
        create(&posts, &format!("post {i}"), "alice").await;
    }

    let page = posts.list(-5, 1000).await.unwrap();
    assert_eq!(page.page, 0);
    assert_eq!(page.size, 50);
    assert_eq!(page.items.len(), 50);
    assert_eq!(page.total_elements, 60);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].title, "post 59");

    let page = posts.list(1, 50).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items.last().unwrap().title, "post 0");

    let page = posts.list(0, 0).await.unwrap();
    assert_eq!(page.size, 1);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_list_past_the_last_page_is_empty() {
    let (_, posts, _) = services();
    create(&posts, "only", "alice").await;

    let page = posts.list(i64::MAX, 50).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_list_reports_comment_counts() {
    let (_, posts, comments) = services();
    let id = create(&posts, "Hello", "alice").await;
    comments
        .add(id, "one".to_string(), "bob".to_string())
        .await
        .unwrap();
    comments
        .add(id, "two".to_string(), "carol".to_string())
        .await
        .unwrap();

    let page = posts.list(0, 10).await.unwrap();
    assert_eq!(page.items[0].comment_count, 2);
    assert_eq!(page.items[0].author_nickname, "alice");
}

#[tokio::test]
async fn test_update_round_trip_keeps_id_and_author() {
    let (_, posts, _) = services();
    let id = create(&posts, "Hello", "alice").await;
    let before = posts.get_detail(id).await.unwrap();

    posts
        .update(id, "Title 2".to_string(), "Content 2".to_string())
        .await
        .unwrap();

    let after = posts.get_detail(id).await.unwrap();
    assert_eq!(after.id(), Some(id));
    assert_eq!(after.title(), "Title 2");
    assert_eq!(after.content(), "Content 2");
    assert_eq!(after.author(), before.author());
    assert_eq!(after.created_at(), before.created_at());
    assert!(after.updated_at() >= before.updated_at());
}

#[tokio::test]
async fn test_update_and_delete_missing_post_are_not_found() {
    let (_, posts, _) = services();

    let err = posts
        .update(PostId(99), "t".to_string(), "c".to_string())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = posts.delete(PostId(99)).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Post",
            id: 99
        }
    ));
}

#[tokio::test]
async fn test_invalid_update_changes_nothing() {
    let (_, posts, _) = services();
    let id = create(&posts, "Hello", "alice").await;

    let err = posts
        .update(id, "x".repeat(201), "c".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(posts.get_detail(id).await.unwrap().title(), "Hello");
}

#[tokio::test]
async fn test_add_comment_creates_member_only_for_new_nickname() {
    let (store, posts, comments) = services();
    let id = create(&posts, "Hello", "alice").await;
    let before = store.stats().await;

    comments
        .add(id, "first".to_string(), "bob".to_string())
        .await
        .unwrap();
    let after_new = store.stats().await;
    assert_eq!(after_new.members, before.members + 1);
    assert_eq!(after_new.comments, before.comments + 1);

    comments
        .add(id, "second".to_string(), "bob".to_string())
        .await
        .unwrap();
    let after_known = store.stats().await;
    assert_eq!(after_known.members, after_new.members);
    assert_eq!(after_known.comments, after_new.comments + 1);

    let post = posts.get_detail(id).await.unwrap();
    let contents: Vec<&str> = post.comments().iter().map(|c| c.content()).collect();
    assert_eq!(contents, ["first", "second"]);
    assert!(post.comments().iter().all(|c| c.post_id() == Some(id)));
}

#[tokio::test]
async fn test_add_comment_to_missing_post_creates_nothing() {
    let (store, _, comments) = services();

    let err = comments
        .add(PostId(1), "hi".to_string(), "ghost".to_string())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.stats().await, StoreStats::default());
}

#[tokio::test]
async fn test_failed_comment_rolls_back_new_member() {
    let (store, posts, comments) = services();
    let id = create(&posts, "Hello", "alice").await;

    let err = comments
        .add(id, "x".repeat(1001), "newcomer".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(store.stats().await.members, 1);
}

#[tokio::test]
async fn test_delete_cascades_to_comments() {
    let (store, posts, comments) = services();
    let id = create(&posts, "Hello", "alice").await;
    let comment_id = comments
        .add(id, "Nice!".to_string(), "bob".to_string())
        .await
        .unwrap();

    posts.delete(id).await.unwrap();

    let uow = store.begin(TxMode::ReadOnly).await.unwrap();
    let found = uow.comments().find_by_id(comment_id).await.unwrap();
    uow.commit().await.unwrap();
    assert!(found.is_none());
    assert_eq!(store.stats().await.comments, 0);
}

#[tokio::test]
async fn test_remove_comment_deletes_orphan() {
    let (store, posts, comments) = services();
    let id = create(&posts, "Hello", "alice").await;
    let keep = comments
        .add(id, "keep".to_string(), "bob".to_string())
        .await
        .unwrap();
    let drop = comments
        .add(id, "drop".to_string(), "bob".to_string())
        .await
        .unwrap();

    comments.remove(id, drop).await.unwrap();

    let post = posts.get_detail(id).await.unwrap();
    assert_eq!(post.comment_count(), 1);
    assert_eq!(post.comments()[0].id(), Some(keep));
    assert_eq!(store.stats().await.comments, 1);

    let err = comments.remove(id, CommentId(999)).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Comment",
            ..
        }
    ));
}

#[tokio::test]
async fn test_read_only_transaction_rejects_writes() {
    let (store, _, _) = services();

    let uow = store.begin(TxMode::ReadOnly).await.unwrap();
    let member = board_core::domain::Member::create("alice").unwrap();
    let result = uow.members().save(member).await;
    drop(uow);

    assert!(matches!(result, Err(RepoError::ReadOnly)));
    assert_eq!(store.stats().await.members, 0);
}

#[tokio::test]
async fn test_board_scenario() {
    let (store, posts, comments) = services();

    let id = posts
        .create("Hello".to_string(), "World".to_string(), "alice".to_string())
        .await
        .unwrap();
    assert_eq!(id, PostId(1));

    comments
        .add(id, "Nice!".to_string(), "bob".to_string())
        .await
        .unwrap();
    assert_eq!(store.stats().await.members, 2);
    let page = posts.list(0, 10).await.unwrap();
    assert_eq!(page.items[0].comment_count, 1);

    posts.delete(id).await.unwrap();
    assert!(posts.get_detail(id).await.unwrap_err().is_not_found());
    assert_eq!(
        store.stats().await,
        StoreStats {
            members: 2,
            posts: 0,
            comments: 0,
        }
    );
}
