#[cfg(feature = "mock")]
mod mock_tests {
    use artist_stats::{
        aggregate_artist, fetch_albums, load_artist_data, Album, AlbumPage, Artist,
        ArtistAlbumsIterator, ArtistReference, AsyncPaginatedIterator, AudioFeature,
        AudioFeatures, FailurePolicy, Image, MockSpotifyClient, Result, SpotifyClient,
        SpotifyError, Track, TrackPage,
    };
    use chrono::NaiveDate;
    use mockall::predicate::*; // for eq(), any(), etc.
    use mockall::Sequence;

    fn album(name: &str, date: &str, total_tracks: u32) -> Album {
        Album {
            name: name.to_string(),
            release_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total_tracks,
            id: name.to_lowercase(),
            uri: format!("spotify:album:{}", name.to_lowercase()),
        }
    }

    fn features(energy: f64) -> AudioFeatures {
        AudioFeatures {
            danceability: 0.7,
            energy,
            key: 2.0,
            loudness: -8.5,
            mode: 0.0,
            speechiness: 0.3,
            acousticness: 0.05,
            instrumentalness: 0.0,
            liveness: 0.2,
            valence: 0.45,
            tempo: 92.0,
        }
    }

    fn expect_image(mock: &mut MockSpotifyClient) {
        mock.expect_get_artist().returning(|id| {
            Ok(Artist {
                id: id.to_string(),
                name: "Mobb Deep".to_string(),
                images: vec![],
            })
        });
        mock.expect_search_artists()
            .with(eq("artist:Mobb Deep"))
            .returning(|_| {
                Ok(vec![Artist {
                    id: "mobb".to_string(),
                    name: "Mobb Deep".to_string(),
                    images: vec![
                        Image {
                            url: "https://i.scdn.co/image/640".to_string(),
                            width: Some(640),
                            height: Some(640),
                        },
                        Image {
                            url: "https://i.scdn.co/image/160".to_string(),
                            width: Some(160),
                            height: Some(160),
                        },
                    ],
                }])
            });
    }

    #[test_log::test(tokio::test)]
    async fn test_album_pagination_follows_cursor() -> Result<()> {
        let mut mock_client = MockSpotifyClient::new();
        let mut seq = Sequence::new();

        for (cursor, name, next) in [
            (None, "The Infamous", Some("page-2")),
            (Some("page-2"), "Hell on Earth", Some("page-3")),
            (Some("page-3"), "Murda Muzik", None),
        ] {
            mock_client
                .expect_get_artist_albums_page()
                .with(eq("mobb"), eq(cursor.map(str::to_string)))
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_, _| {
                    Ok(AlbumPage {
                        albums: vec![album(name, "1995-04-25", 1)],
                        next: next.map(str::to_string),
                        total: Some(3),
                    })
                });
        }

        let client: &dyn SpotifyClient = &mock_client;
        let mut albums = ArtistAlbumsIterator::new(client, "mobb");
        let collected = albums.collect_all().await?;

        let names: Vec<_> = collected.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["The Infamous", "Hell on Earth", "Murda Muzik"]);
        assert_eq!(albums.pages_fetched(), 3);
        assert_eq!(albums.total_items(), Some(3));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_fetch_albums_propagates_page_errors() {
        let mut mock_client = MockSpotifyClient::new();
        mock_client
            .expect_get_artist_albums_page()
            .returning(|_, cursor| match cursor {
                None => Ok(AlbumPage {
                    albums: vec![album("The Infamous", "1995-04-25", 1)],
                    next: Some("page-2".to_string()),
                    total: Some(2),
                }),
                Some(_) => Err(SpotifyError::RateLimit { retry_after: 3 }),
            });

        let err = fetch_albums(&mock_client, "mobb").await.unwrap_err();
        assert!(matches!(err, SpotifyError::RateLimit { retry_after: 3 }));
    }

    #[test_log::test(tokio::test)]
    async fn test_aggregate_two_albums() -> Result<()> {
        let mut mock_client = MockSpotifyClient::new();
        expect_image(&mut mock_client);

        mock_client.expect_get_artist_albums_page().returning(|_, _| {
            Ok(AlbumPage {
                albums: vec![
                    album("Juvenile Hell", "2020-01-01", 3),
                    album("The Infamous", "2021-01-01", 5),
                ],
                next: None,
                total: Some(2),
            })
        });
        mock_client
            .expect_get_album_tracks_page()
            .returning(|album_id, _| {
                let count = if album_id == "juvenile hell" { 3 } else { 5 };
                Ok(TrackPage {
                    tracks: (0..count)
                        .map(|n| Track {
                            name: format!("Track {n}"),
                            duration_secs: 240.0,
                            id: format!("{album_id}/{n}"),
                            uri: format!("spotify:track:{n}"),
                            features: None,
                        })
                        .collect(),
                    next: None,
                    total: Some(count),
                })
            });
        mock_client.expect_get_audio_features().returning(|ids| {
            // Energy rises with track position: 0.0, 0.1, 0.2, ...
            Ok(ids
                .iter()
                .map(|id| {
                    let n: f64 = id.rsplit('/').next().unwrap().parse().unwrap();
                    Some(features(n / 10.0))
                })
                .collect())
        });

        let artist = ArtistReference::new("Mobb Deep", "spotify:artist:mobb", true);
        let summary = aggregate_artist(&mock_client, &artist).await?;

        assert_eq!(summary.total_albums, 2);
        assert_eq!(summary.track_per_album, 4.0);
        assert_eq!(summary.av_time_btwn_release, 366.0);
        assert_eq!(summary.image_url, "https://i.scdn.co/image/160");

        // Album means are 0.1 and 0.2; the artist mean weighs them equally.
        let energy = summary.feature(AudioFeature::Energy);
        assert!((energy.mean - 0.15).abs() < 1e-9);
        assert!(energy.volatility > 0.0);

        let dance = summary.feature(AudioFeature::Danceability);
        assert!((dance.mean - 0.7).abs() < 1e-9);
        assert!(dance.volatility.abs() < 1e-12);

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_audio_features_abort_artist() {
        let mut mock_client = MockSpotifyClient::new();
        expect_image(&mut mock_client);
        mock_client.expect_get_artist_albums_page().returning(|_, _| {
            Ok(AlbumPage {
                albums: vec![
                    album("Juvenile Hell", "1993-04-23", 1),
                    album("The Infamous", "1995-04-25", 1),
                ],
                next: None,
                total: Some(2),
            })
        });
        mock_client
            .expect_get_album_tracks_page()
            .returning(|album_id, _| {
                Ok(TrackPage {
                    tracks: vec![Track {
                        name: "Intro".to_string(),
                        duration_secs: 60.0,
                        id: format!("{album_id}-intro"),
                        uri: "spotify:track:intro".to_string(),
                        features: None,
                    }],
                    next: None,
                    total: Some(1),
                })
            });
        mock_client
            .expect_get_audio_features()
            .returning(|_| Ok(vec![None]));

        let artists = vec![ArtistReference::new("Mobb Deep", "mobb", true)];

        let err = load_artist_data(&mock_client, &artists, FailurePolicy::Abort)
            .await
            .unwrap_err();
        assert!(matches!(err, SpotifyError::NotFound(msg) if msg.contains("juvenile hell-intro")));

        let dataset = load_artist_data(&mock_client, &artists, FailurePolicy::Skip)
            .await
            .unwrap();
        assert!(dataset.is_empty());
    }
}
