//! Integration tests for the activity log


use chorus_core::types::*;
use chrono::{DateTime, Utc};
use test_helpers::*;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

#[tokio::test]
async fn test_record_and_list() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "dicoding").await;
    let playlist = create_test_playlist(pool, "Log", &user).await;
    let song = create_test_song(pool, "Paradise", None).await;

    let record = chorus_storage::activities::record(pool, &playlist, &song, &user, ActivityAction::Add)
        .await
        .unwrap();
    assert!(record.id.as_str().starts_with("activity-"));

    let listed = chorus_storage::activities::list_by_playlist(pool, &playlist)
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username.as_deref(), Some("dicoding"));
    assert_eq!(listed[0].title.as_deref(), Some("Paradise"));
    assert_eq!(listed[0].action, ActivityAction::Add);
    assert_eq!(listed[0].time, record.time);
}

#[tokio::test]
async fn test_out_of_order_appends_list_in_time_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "dicoding").await;
    let playlist = create_test_playlist(pool, "Log", &user).await;
    let s1 = create_test_song(pool, "One", None).await;
    let s2 = create_test_song(pool, "Two", None).await;
    let s3 = create_test_song(pool, "Three", None).await;

    // Arrive as t3, t1, t2
    for (song, secs) in [(&s3, 3), (&s1, 1), (&s2, 2)] {
        chorus_storage::activities::record_at(pool, &playlist, song, &user, ActivityAction::Add, at(secs))
            .await
            .unwrap();
    }

    let listed = chorus_storage::activities::list_by_playlist(pool, &playlist)
        .await
        .unwrap();

    let songs: Vec<_> = listed.iter().map(|a| a.song_id.clone()).collect();
    assert_eq!(songs, vec![s1, s2, s3]);
    assert!(listed.windows(2).all(|w| w[0].time <= w[1].time));
}

#[tokio::test]
async fn test_same_second_ties_keep_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "dicoding").await;
    let playlist = create_test_playlist(pool, "Log", &user).await;
    let song = create_test_song(pool, "Shiver", None).await;

    chorus_storage::activities::record_at(pool, &playlist, &song, &user, ActivityAction::Add, at(5))
        .await
        .unwrap();
    chorus_storage::activities::record_at(pool, &playlist, &song, &user, ActivityAction::Delete, at(5))
        .await
        .unwrap();

    let listed = chorus_storage::activities::list_by_playlist(pool, &playlist)
        .await
        .unwrap();

    let actions: Vec<_> = listed.iter().map(|a| a.action).collect();
    assert_eq!(actions, vec![ActivityAction::Add, ActivityAction::Delete]);
}

#[tokio::test]
async fn test_concurrent_records_stay_ordered() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let user = create_test_user(&pool, "dicoding").await;
    let playlist = create_test_playlist(&pool, "Busy", &user).await;
    let song = create_test_song(&pool, "Speed of Sound", None).await;

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let (pool, playlist, song, user) =
                (pool.clone(), playlist.clone(), song.clone(), user.clone());
            let action = if i % 2 == 0 { ActivityAction::Add } else { ActivityAction::Delete };
            tokio::spawn(async move {
                chorus_storage::activities::record(&pool, &playlist, &song, &user, action).await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let listed = chorus_storage::activities::list_by_playlist(&pool, &playlist)
        .await
        .unwrap();

    assert_eq!(listed.len(), 10);
    assert!(listed.windows(2).all(|w| w[0].time <= w[1].time));
}

#[tokio::test]
async fn test_list_for_missing_playlist_is_not_found() {
    let test_db = TestDb::new().await;

    let err = chorus_storage::activities::list_by_playlist(
        test_db.pool(),
        &PlaylistId::new("playlist-missing"),
    )
    .await
    .unwrap_err();

    assert!(err.is_not_found());
}
