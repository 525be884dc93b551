//! Service-level flows over the in-memory store.

use std::sync::Arc;

use plaza_core::DomainError;
use chrono::{TimeDelta, Utc};
use plaza_core::domain::{Actor, NewComment, NewPost};
use plaza_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, LikeRepository, PasswordService,
    PostRepository, Repositories, UserRepository,
};
use plaza_core::services::{FollowOutcome, accounts, feed, posts, profile, social};
use plaza_infra::{Argon2PasswordService, InMemoryStore};
use plaza_shared::dto::RegisterForm;

struct Fixture {
    repos: Repositories,
    passwords: Argon2PasswordService,
}

impl Fixture {
    fn new() -> Self {
        Self {
            repos: Repositories::from_store(Arc::new(InMemoryStore::new())),
            passwords: Argon2PasswordService::with_cost(1024, 1).unwrap(),
        }
    }

    async fn user(&self, name: &str) -> Actor {
        let form = RegisterForm {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "pw".to_string(),
            confirmation: "pw".to_string(),
        };
        let user = accounts::register(&self.repos, &self.passwords, &form)
            .await
            .unwrap();
        Actor::from(&user)
    }
}

#[tokio::test]
async fn follow_twice_restores_relation() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;

    let first = social::toggle_follow(&fx.repos, &alice, bob.user_id).await.unwrap();
    assert_eq!(first, FollowOutcome::Followed);
    assert!(fx.repos.follows.is_following(alice.user_id, bob.user_id).await.unwrap());

    let second = social::toggle_follow(&fx.repos, &alice, bob.user_id).await.unwrap();
    assert_eq!(second, FollowOutcome::Unfollowed);
    assert!(!fx.repos.follows.is_following(alice.user_id, bob.user_id).await.unwrap());
}

#[tokio::test]
async fn self_follow_never_changes_state() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;

    for _ in 0..3 {
        let result = social::toggle_follow(&fx.repos, &alice, alice.user_id).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    assert_eq!(fx.repos.follows.follower_count(alice.user_id).await.unwrap(), 0);
    assert_eq!(fx.repos.follows.following_count(alice.user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn like_twice_restores_count() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = posts::create_post(&fx.repos, &alice, "hello").await.unwrap();

    let before = fx.repos.likes.like_counts(&[post.id]).await.unwrap();
    assert_eq!(before.get(&post.id), None);

    assert!(social::toggle_like(&fx.repos, &bob, post.id).await.unwrap());
    let liked = fx.repos.likes.like_counts(&[post.id]).await.unwrap();
    assert_eq!(liked.get(&post.id), Some(&1));

    assert!(!social::toggle_like(&fx.repos, &bob, post.id).await.unwrap());
    let after = fx.repos.likes.like_counts(&[post.id]).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn like_missing_post_is_not_found() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;

    let result = social::toggle_like(&fx.repos, &alice, 404).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn blank_post_is_rejected() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;

    let result = posts::create_post(&fx.repos, &alice, "  ").await;
    assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "Post cannot be empty."));

    let post = posts::create_post(&fx.repos, &alice, "hello").await.unwrap();
    let page = feed::list_posts(&fx.repos, "all", None, None).await.unwrap();
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].post.id, post.id);
    assert_eq!(page.posts[0].post.content, "hello");
}

#[tokio::test]
async fn edit_by_other_user_is_forbidden() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = posts::create_post(&fx.repos, &alice, "original").await.unwrap();

    let result = posts::edit_post(&fx.repos, &bob, post.id, "hijacked").await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));

    let stored = fx.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "original");

    let edited = posts::edit_post(&fx.repos, &alice, post.id, "  revised ").await.unwrap();
    assert_eq!(edited.content, "revised");
}

#[tokio::test]
async fn edit_with_blank_content_keeps_post() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let post = posts::create_post(&fx.repos, &alice, "keep me").await.unwrap();

    let result = posts::edit_post(&fx.repos, &alice, post.id, "\n\t").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let stored = fx.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "keep me");
}

#[tokio::test]
async fn anonymous_following_feed_is_empty() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    posts::create_post(&fx.repos, &alice, "visible to all").await.unwrap();

    let page = feed::list_posts(&fx.repos, "following", None, None).await.unwrap();

    assert!(page.posts.is_empty());
    assert!(!page.has_next);
    assert!(!page.has_previous);
    assert_eq!(page.num_pages, 1);
    assert_eq!(page.current_page, 1);
}

#[tokio::test]
async fn following_feed_only_shows_followed_authors() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let carol = fx.user("carol").await;

    posts::create_post(&fx.repos, &bob, "from bob").await.unwrap();
    posts::create_post(&fx.repos, &carol, "from carol").await.unwrap();
    social::toggle_follow(&fx.repos, &alice, bob.user_id).await.unwrap();

    let page = feed::list_posts(&fx.repos, "following", Some(&alice), None)
        .await
        .unwrap();

    assert_eq!(page.posts.len(), 1);
    let item = &page.posts[0];
    assert_eq!(item.post.content, "from bob");
    assert!(item.is_authenticated);
    assert!(!item.can_edit);
}

#[tokio::test]
async fn pages_of_twenty_five_posts() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    for i in 0..25 {
        posts::create_post(&fx.repos, &alice, &format!("post {i}")).await.unwrap();
    }

    let first = feed::list_posts(&fx.repos, "all", None, Some("1")).await.unwrap();
    assert_eq!(first.posts.len(), 10);
    assert!(first.has_next);
    assert!(!first.has_previous);
    assert_eq!(first.num_pages, 3);
    assert_eq!(first.posts[0].post.content, "post 24");

    let third = feed::list_posts(&fx.repos, "all", None, Some("3")).await.unwrap();
    assert_eq!(third.posts.len(), 5);
    assert!(!third.has_next);
    assert!(third.has_previous);
    assert_eq!(third.posts[4].post.content, "post 0");

    let fourth = feed::list_posts(&fx.repos, "all", None, Some("4")).await;
    assert!(matches!(fourth, Err(DomainError::PageOutOfRange(4))));

    let zero = feed::list_posts(&fx.repos, "all", None, Some("0")).await;
    assert!(matches!(zero, Err(DomainError::PageOutOfRange(0))));
}

#[tokio::test]
async fn bad_views_are_rejected() {
    let fx = Fixture::new();

    let invalid = feed::list_posts(&fx.repos, "notanumber", None, None).await;
    assert!(matches!(invalid, Err(DomainError::Validation(_))));

    let unknown = feed::list_posts(&fx.repos, "999999", None, None).await;
    assert!(matches!(unknown, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn feed_marks_liked_and_editable_posts() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let own = posts::create_post(&fx.repos, &alice, "mine").await.unwrap();
    let other = posts::create_post(&fx.repos, &bob, "theirs").await.unwrap();
    social::toggle_like(&fx.repos, &alice, other.id).await.unwrap();
    posts::add_comment(&fx.repos, &bob, own.id, "nice").await.unwrap();

    let page = feed::list_posts(&fx.repos, "all", Some(&alice), None).await.unwrap();
    let find = |id: i64| page.posts.iter().find(|p| p.post.id == id).unwrap();

    let mine = find(own.id);
    assert!(mine.can_edit);
    assert!(!mine.is_liked);
    assert_eq!(mine.post.comments.len(), 1);
    assert_eq!(mine.post.comments[0].content, "nice");

    let theirs = find(other.id);
    assert!(!theirs.can_edit);
    assert!(theirs.is_liked);
    assert_eq!(theirs.post.likes, 1);
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let post = posts::create_post(&fx.repos, &alice, "hello").await.unwrap();

    let result = posts::add_comment(&fx.repos, &alice, post.id, "   ").await;
    assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "A comment cannot be empty"));

    let missing = posts::add_comment(&fx.repos, &alice, 999, "hi").await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn profile_reports_counts_and_follow_state() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    posts::create_post(&fx.repos, &bob, "bob's post").await.unwrap();

    let outcome = profile::follow_profile(&fx.repos, bob.user_id, Some(&alice))
        .await
        .unwrap();
    assert_eq!(outcome, FollowOutcome::Followed);

    let seen_by_alice = profile::get_profile(&fx.repos, bob.user_id, Some(&alice))
        .await
        .unwrap();
    assert_eq!(seen_by_alice.username, "bob");
    assert_eq!(seen_by_alice.followers, 1);
    assert_eq!(seen_by_alice.following, 0);
    assert_eq!(seen_by_alice.posts.len(), 1);
    assert_eq!(seen_by_alice.is_following, Some(true));

    let own = profile::get_profile(&fx.repos, bob.user_id, Some(&bob)).await.unwrap();
    assert_eq!(own.is_following, None);

    let anonymous = profile::get_profile(&fx.repos, bob.user_id, None).await.unwrap();
    assert_eq!(anonymous.is_following, None);
}

#[tokio::test]
async fn comments_are_listed_newest_first() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = posts::create_post(&fx.repos, &alice, "discuss").await.unwrap();
    let now = Utc::now();

    for (content, age) in [("second", 2), ("first", 3), ("third", 1)] {
        let mut comment = NewComment::new(bob.user_id, post.id, content.to_string());
        comment.created_at = now - TimeDelta::minutes(age);
        fx.repos.comments.create(comment).await.unwrap();
    }

    let page = feed::list_posts(&fx.repos, "all", None, None).await.unwrap();
    let contents: Vec<&str> = page.posts[0]
        .post
        .comments
        .iter()
        .map(|c| c.content.as_str())
        .collect();
    assert_eq!(contents, ["third", "second", "first"]);
}

#[tokio::test]
async fn profile_posts_are_newest_first() {
    let fx = Fixture::new();
    let bob = fx.user("bob").await;
    let now = Utc::now();

    for (content, age) in [("middle", 2), ("oldest", 3), ("newest", 1)] {
        let mut post = NewPost::new(bob.user_id, content.to_string());
        post.created_at = now - TimeDelta::hours(age);
        fx.repos.posts.create(post).await.unwrap();
    }

    let view = profile::get_profile(&fx.repos, bob.user_id, None).await.unwrap();
    let contents: Vec<&str> = view.posts.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn profile_follow_checks_user_before_session() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;

    let missing = profile::follow_profile(&fx.repos, 999, None).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    let anonymous = profile::follow_profile(&fx.repos, alice.user_id, None).await;
    assert!(matches!(anonymous, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn register_and_authenticate() {
    let fx = Fixture::new();
    fx.user("alice").await;

    let duplicate = RegisterForm {
        username: "alice".to_string(),
        email: String::new(),
        password: "pw".to_string(),
        confirmation: "pw".to_string(),
    };
    let result = accounts::register(&fx.repos, &fx.passwords, &duplicate).await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));

    let mismatch = RegisterForm {
        username: "dave".to_string(),
        email: String::new(),
        password: "one".to_string(),
        confirmation: "two".to_string(),
    };
    let result = accounts::register(&fx.repos, &fx.passwords, &mismatch).await;
    assert!(matches!(result, Err(DomainError::Validation(msg)) if msg == "Passwords must match."));

    let ok = accounts::authenticate(&fx.repos, &fx.passwords, "alice", "pw")
        .await
        .unwrap();
    assert_eq!(ok.map(|u| u.username), Some("alice".to_string()));

    let padded = accounts::authenticate(&fx.repos, &fx.passwords, "  alice ", "pw")
        .await
        .unwrap();
    assert_eq!(padded.map(|u| u.username), Some("alice".to_string()));

    let wrong = accounts::authenticate(&fx.repos, &fx.passwords, "alice", "nope")
        .await
        .unwrap();
    assert!(wrong.is_none());

    let stored = fx.repos.users.find_by_username("alice").await.unwrap().unwrap();
    assert!(fx.passwords.verify("pw", &stored.password_hash).unwrap());
}
