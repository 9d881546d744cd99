//! Integration tests for album likes


use chorus_core::{types::*, ChorusError};
use test_helpers::*;

#[tokio::test]
async fn test_double_toggle_restores_state_and_count() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Parachutes").await;

    assert_eq!(chorus_storage::albums::count_likes(pool, &album).await.unwrap(), 0);

    let state = chorus_storage::albums::toggle(pool, &user, &album).await.unwrap();
    assert_eq!(state, LikeState::Liked);
    assert_eq!(chorus_storage::albums::count_likes(pool, &album).await.unwrap(), 1);

    let state = chorus_storage::albums::toggle(pool, &user, &album).await.unwrap();
    assert_eq!(state, LikeState::NotLiked);
    assert_eq!(chorus_storage::albums::count_likes(pool, &album).await.unwrap(), 0);
    assert_eq!(
        chorus_storage::albums::like_state(pool, &user, &album).await.unwrap(),
        LikeState::NotLiked
    );
}

#[tokio::test]
async fn test_count_is_derived_per_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "X&Y").await;
    let other_album = create_test_album(pool, "Ghost Stories").await;

    for name in ["a", "b", "c"] {
        let user = create_test_user(pool, name).await;
        chorus_storage::albums::like(pool, &user, &album).await.unwrap();
    }

    assert_eq!(chorus_storage::albums::count_likes(pool, &album).await.unwrap(), 3);
    assert_eq!(chorus_storage::albums::count_likes(pool, &other_album).await.unwrap(), 0);
}

#[tokio::test]
async fn test_like_twice_conflicts_and_unlike_missing_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "fan").await;
    let album = create_test_album(pool, "Viva la Vida").await;

    chorus_storage::albums::like(pool, &user, &album).await.unwrap();
    let err = chorus_storage::albums::like(pool, &user, &album).await.unwrap_err();
    assert!(matches!(err, ChorusError::Conflict(_)));

    chorus_storage::albums::unlike(pool, &user, &album).await.unwrap();
    let err = chorus_storage::albums::unlike(pool, &user, &album).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_require_missing_album() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Mylo Xyloto").await;
    assert!(chorus_storage::albums::require(pool, &album).await.is_ok());

    let err = chorus_storage::albums::require(pool, &AlbumId::new("album-missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_song_lookup() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "A Rush of Blood").await;
    let song = create_test_song(pool, "The Scientist", Some(&album)).await;

    let found = chorus_storage::songs::get_by_id(pool, &song).await.unwrap();
    assert_eq!(found.title, "The Scientist");
    assert_eq!(found.album_id, Some(album));

    let err = chorus_storage::songs::get_by_id(pool, &SongId::new("song-missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
