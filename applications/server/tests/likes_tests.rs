//! Album like toggles and their cached counts
mod common;

use chorus_core::{types::LikeState, ChorusError};
use common::{create_album, create_user, CountingCache, TestContext};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_double_toggle_restores_state() {
    let ctx = TestContext::new().await;
    let user = create_user(&ctx.pool, "fan").await;
    let album = create_album(&ctx.pool, "25").await;

    let first = ctx.state.likes.toggle_like(&album, &user).await.unwrap();
    let second = ctx.state.likes.toggle_like(&album, &user).await.unwrap();
    assert_eq!(first, LikeState::Liked);
    assert_eq!(second, LikeState::NotLiked);

    assert_eq!(ctx.state.likes.get_album_likes(&album).await.unwrap().value, 0);
}

#[tokio::test]
async fn test_toggle_invalidates_cached_count() {
    let ctx = TestContext::new().await;
    let fan = create_user(&ctx.pool, "fan").await;
    let other = create_user(&ctx.pool, "other").await;
    let album = create_album(&ctx.pool, "19").await;

    assert_eq!(ctx.state.likes.get_album_likes(&album).await.unwrap().value, 0);
    assert!(ctx.state.likes.get_album_likes(&album).await.unwrap().from_cache);

    ctx.state.likes.toggle_like(&album, &fan).await.unwrap();
    ctx.state.likes.toggle_like(&album, &other).await.unwrap();

    let count = ctx.state.likes.get_album_likes(&album).await.unwrap();
    assert!(!count.from_cache);
    assert_eq!(count.value, 2);
}

#[tokio::test]
async fn test_each_toggle_deletes_count_once() {
    let cache = Arc::new(CountingCache::new());
    let ctx = TestContext::with_cache(cache.clone(), Duration::from_secs(1800)).await;
    let fan = create_user(&ctx.pool, "fan").await;
    let album = create_album(&ctx.pool, "Hello").await;

    for expected in 1..=3 {
        ctx.state.likes.toggle_like(&album, &fan).await.unwrap();
        assert_eq!(cache.deletes(), expected);
    }

    let missing = chorus_core::types::AlbumId::new("album-missing");
    let result = ctx.state.likes.toggle_like(&missing, &fan).await;
    assert!(result.unwrap_err().is_not_found());
    assert_eq!(cache.deletes(), 3, "a failed toggle must not invalidate");

    // Reads never delete
    ctx.state.likes.get_album_likes(&album).await.unwrap();
    assert_eq!(cache.deletes(), 3);
}

#[tokio::test]
async fn test_explicit_like_and_unlike() {
    let ctx = TestContext::new().await;
    let user = create_user(&ctx.pool, "fan").await;
    let album = create_album(&ctx.pool, "30").await;

    let result = ctx.state.likes.unlike_album(&album, &user).await;
    assert!(result.unwrap_err().is_not_found());

    ctx.state.likes.like_album(&album, &user).await.unwrap();
    let result = ctx.state.likes.like_album(&album, &user).await;
    assert!(matches!(result, Err(ChorusError::Conflict(_))));

    ctx.state.likes.unlike_album(&album, &user).await.unwrap();
    assert_eq!(ctx.state.likes.get_album_likes(&album).await.unwrap().value, 0);
}

#[tokio::test]
async fn test_toggle_missing_album_is_not_found() {
    let ctx = TestContext::new().await;
    let user = create_user(&ctx.pool, "fan").await;
    let missing = chorus_core::types::AlbumId::new("album-missing");

    let result = ctx.state.likes.toggle_like(&missing, &user).await;
    assert!(result.unwrap_err().is_not_found());

    let result = ctx.state.likes.like_album(&missing, &user).await;
    assert!(result.unwrap_err().is_not_found());
}
