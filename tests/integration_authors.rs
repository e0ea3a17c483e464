mod support;

use pressroom_core::domain::article::ArticleRepository;
use pressroom_core::domain::author::{AuthorId, AuthorName, AuthorRepository, Email, NewAuthor};
use pressroom_core::domain::comment::{CommentRepository, NewComment};
use pressroom_core::domain::errors::DomainError;
use support::*;

#[tokio::test]
async fn create_normalises_email_and_reports_event() {
    let Some(h) = harness().await else { return };
    let token = unique();

    let created = h
        .repos
        .authors
        .create(NewAuthor::new(
            format!("  Alice.{token}@Example.COM "),
            "Alice",
        ))
        .await
        .expect("create");
    assert_eq!(created.email.as_str(), format!("alice.{token}@example.com"));
    assert_eq!(created.created_at, fixed_now());

    let fetched = h.repos.authors.get_by_id(created.id).await.expect("get");
    assert_eq!(fetched.name.as_str(), "Alice");
    assert_eq!(h.events.names(), vec!["author.created"]);
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let Some(h) = harness().await else { return };
    let author = seed_author(&h, "dup").await;

    let err = h
        .repos
        .authors
        .create(NewAuthor::new(author.email.as_str().to_uppercase(), "Copy"))
        .await
        .unwrap_err();
    match err {
        DomainError::DuplicateKey(msg) => assert!(msg.contains(author.email.as_str())),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
    let Some(h) = harness().await else { return };

    let err = h
        .repos
        .authors
        .create(NewAuthor::new(unique_email("blank"), "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationFailed(ref v) if v.field == "name"));

    let err = h
        .repos
        .authors
        .create(NewAuthor::new("not-an-email", "Someone"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationFailed(ref v) if v.field == "email"));
}

#[tokio::test]
async fn get_by_email_treats_absence_as_none() {
    let Some(h) = harness().await else { return };
    let author = seed_author(&h, "lookup").await;

    let found = h
        .repos
        .authors
        .get_by_email(&author.email.as_str().to_uppercase())
        .await
        .expect("lookup");
    assert_eq!(found.map(|a| a.id), Some(author.id));

    let missing = h
        .repos
        .authors
        .get_by_email(&unique_email("nobody"))
        .await
        .expect("lookup");
    assert!(missing.is_none());

    let malformed = h
        .repos
        .authors
        .get_by_email("nobody")
        .await
        .expect("lookup");
    assert!(malformed.is_none());

    let err = h
        .repos
        .authors
        .get_by_id(AuthorId(i64::MAX))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_all_is_ordered_by_id() {
    let Some(h) = harness().await else { return };
    let first = seed_author(&h, "order").await;
    let second = seed_author(&h, "order").await;

    let all = h.repos.authors.get_all().await.expect("all");
    assert!(all.windows(2).all(|pair| pair[0].id.0 < pair[1].id.0));
    let position = |id: AuthorId| all.iter().position(|a| a.id == id);
    let first_pos = position(first.id).expect("first listed");
    let second_pos = position(second.id).expect("second listed");
    assert!(first_pos < second_pos);
}

#[tokio::test]
async fn update_distinguishes_no_op_from_missing() {
    let Some(h) = harness().await else { return };
    let mut author = seed_author(&h, "update").await;

    let unchanged = h.repos.authors.update(&author).await.expect("no-op update");
    assert_eq!(unchanged.id, author.id);
    assert_eq!(unchanged.email, author.email);

    author.rename(AuthorName::new("Renamed Author").unwrap());
    let renamed = h.repos.authors.update(&author).await.expect("rename");
    assert_eq!(renamed.name.as_str(), "Renamed Author");

    let other = seed_author(&h, "taken").await;
    author.change_email(other.email.clone());
    let err = h.repos.authors.update(&author).await.unwrap_err();
    assert!(
        matches!(err, DomainError::DuplicateKey(_)),
        "unexpected error: {err:?}"
    );

    author.id = AuthorId(i64::MAX);
    let ghost = Email::new(unique_email("ghost")).unwrap();
    author.change_email(ghost);
    let err = h.repos.authors.update(&author).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_cascades_to_articles_and_comments() {
    let Some(h) = harness().await else { return };
    let doomed = seed_author(&h, "doomed").await;
    let survivor = seed_author(&h, "survivor").await;

    let own_article = seed_article(&h, &doomed, "own").await;
    let other_article = seed_article(&h, &survivor, "other").await;

    // Survivor's comment on the doomed author's article goes with the article.
    h.repos
        .comments
        .create(NewComment::new(own_article.id, survivor.id, "Nice post"))
        .await
        .expect("comment on own article");
    // Doomed author's comment on someone else's article goes with the author.
    h.repos
        .comments
        .create(NewComment::new(
            other_article.id,
            doomed.id,
            "Thanks for sharing",
        ))
        .await
        .expect("comment on other article");
    let kept = h
        .repos
        .comments
        .create(NewComment::new(other_article.id, survivor.id, "Still here"))
        .await
        .expect("survivor comment");

    h.repos.authors.delete(doomed.id).await.expect("delete");

    let err = h.repos.authors.get_by_id(doomed.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(
        h.repos
            .articles
            .get_by_id_including_deleted(own_article.id)
            .await
            .unwrap_err()
            .is_not_found()
    );
    let remaining = h
        .repos
        .comments
        .get_by_article_id(other_article.id)
        .await
        .expect("comments");
    let remaining_ids: Vec<_> = remaining.iter().map(|c| c.id).collect();
    assert_eq!(remaining_ids, vec![kept.id]);

    let err = h.repos.authors.delete(doomed.id).await.unwrap_err();
    assert!(err.is_not_found());
}
