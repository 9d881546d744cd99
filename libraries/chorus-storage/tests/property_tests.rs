//! Property-based tests for activity ordering and like toggles
//!
//! Each case runs against its own SQLite file on a fresh runtime.


use chorus_core::types::*;
use chrono::{DateTime, Utc};
use proptest::prelude::*;
use std::collections::HashMap;
use test_helpers::*;

// ===== Helpers =====

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new()
        .expect("Failed to build runtime")
        .block_on(future)
}

/// Offsets drawn from a narrow range so equal timestamps are common
fn arrival_offsets() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..5, 1..16)
}

/// Indices into a fixed set of four users
fn toggle_sequence() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 0..24)
}

// ===== Property Tests =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: listing is ordered by time, ties kept in arrival order
    #[test]
    fn activity_listing_orders_by_time_then_arrival(offsets in arrival_offsets()) {
        let (listed, recorded) = block_on(async {
            let test_db = TestDb::new().await;
            let pool = test_db.pool();

            let user = create_test_user(pool, "writer").await;
            let playlist = create_test_playlist(pool, "Ordered", &user).await;

            let mut recorded = Vec::with_capacity(offsets.len());
            for (i, offset) in offsets.iter().enumerate() {
                let song = create_test_song(pool, &format!("Track {i}"), None).await;
                chorus_storage::activities::record_at(
                    pool,
                    &playlist,
                    &song,
                    &user,
                    ActivityAction::Add,
                    at(*offset),
                )
                .await
                .unwrap();
                recorded.push((*offset, song));
            }

            let listed = chorus_storage::activities::list_by_playlist(pool, &playlist)
                .await
                .unwrap();
            (listed, recorded)
        });

        prop_assert_eq!(listed.len(), recorded.len());
        prop_assert!(
            listed.windows(2).all(|pair| pair[0].time <= pair[1].time),
            "listing went backwards in time"
        );

        // A stable sort by time is exactly arrival order within a tie
        let mut expected = recorded;
        expected.sort_by_key(|(offset, _)| *offset);
        let expected_songs: Vec<SongId> = expected.into_iter().map(|(_, song)| song).collect();
        let listed_songs: Vec<SongId> = listed.into_iter().map(|a| a.song_id).collect();
        prop_assert_eq!(listed_songs, expected_songs);
    }

    /// Property: like count equals the users with an odd number of toggles
    #[test]
    fn like_count_follows_toggle_parity(toggles in toggle_sequence()) {
        let (count, states, returned, expected) = block_on(async {
            let test_db = TestDb::new().await;
            let pool = test_db.pool();

            let album = create_test_album(pool, "Parity").await;
            let mut users = Vec::with_capacity(4);
            for i in 0..4 {
                users.push(create_test_user(pool, &format!("listener{i}")).await);
            }

            let mut flips: HashMap<usize, usize> = HashMap::new();
            let mut returned = Vec::with_capacity(toggles.len());
            let mut expected = Vec::with_capacity(toggles.len());
            for &index in &toggles {
                let flipped = flips.entry(index).or_insert(0);
                *flipped += 1;
                expected.push(if *flipped % 2 == 1 {
                    LikeState::Liked
                } else {
                    LikeState::NotLiked
                });
                returned.push(
                    chorus_storage::albums::toggle(pool, &users[index], &album)
                        .await
                        .unwrap(),
                );
            }

            let count = chorus_storage::albums::count_likes(pool, &album).await.unwrap();
            let mut states = Vec::with_capacity(users.len());
            for (index, user) in users.iter().enumerate() {
                let state = chorus_storage::albums::like_state(pool, user, &album)
                    .await
                    .unwrap();
                let odd = flips.get(&index).is_some_and(|n| n % 2 == 1);
                states.push((state, odd));
            }
            (count, states, returned, expected)
        });

        prop_assert_eq!(returned, expected);

        let odd_users = states.iter().filter(|(_, odd)| *odd).count() as i64;
        prop_assert_eq!(count, odd_users);
        for (state, odd) in states {
            let want = if odd { LikeState::Liked } else { LikeState::NotLiked };
            prop_assert_eq!(state, want);
        }
    }
}
