//! Integration tests for the tournament service
//!
//! These tests drive the service end to end on the in-memory store:
//! registration, score updates, ranking and clearing.

use leaderboard::db::InMemoryPlayerStore;
use leaderboard::player::{
    PlayerId, RankedPlayer, RecordingReporter, ReportedEvent, TournamentError, TournamentService,
};
use std::sync::Arc;

fn setup() -> (TournamentService, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let service = TournamentService::new(Arc::new(InMemoryPlayerStore::new()), reporter.clone());
    (service, reporter)
}

async fn register_with_score(service: &TournamentService, name: &str, score: i64) -> PlayerId {
    let id = service.create_player(name).await.unwrap();
    service.update_player_score(id, score).await.unwrap();
    id
}

fn summary(players: &[RankedPlayer]) -> Vec<(&str, i64, u32)> {
    players
        .iter()
        .map(|p| (p.name.as_str(), p.score, p.rank))
        .collect()
}

#[tokio::test]
async fn test_full_tournament_scenario() {
    let (service, _) = setup();

    let freddy = register_with_score(&service, "freddy", 150).await;
    let player = service.get_player_by_id(freddy).await.unwrap();
    assert_eq!(player.name, "freddy");
    assert_eq!(player.score, 150);
    assert_eq!(player.rank, 1);

    for (name, score) in [
        ("pierre", 10),
        ("paul", 5),
        ("lea", 80),
        ("lucie", 0),
        ("alain", 10),
    ] {
        register_with_score(&service, name, score).await;
    }

    let ranked = service.list_players_by_rank().await.unwrap();
    assert_eq!(ranked.len(), 6);
    assert_eq!(ranked[0].name, "freddy");
    assert_eq!((ranked[0].score, ranked[0].rank), (150, 1));
    assert_eq!(ranked[1].name, "lea");
    assert_eq!((ranked[1].score, ranked[1].rank), (80, 2));

    let mut tied: Vec<&str> = ranked[2..4].iter().map(|p| p.name.as_str()).collect();
    tied.sort_unstable();
    assert_eq!(tied, vec!["alain", "pierre"]);
    assert!(ranked[2..4].iter().all(|p| p.score == 10 && p.rank == 3));

    assert_eq!(summary(&ranked[4..]), vec![("paul", 5, 4), ("lucie", 0, 5)]);
}

#[tokio::test]
async fn test_ties_are_listed_in_registration_order() {
    let (service, _) = setup();
    register_with_score(&service, "pierre", 10).await;
    register_with_score(&service, "alain", 10).await;

    let ranked = service.list_players_by_rank().await.unwrap();
    assert_eq!(summary(&ranked), vec![("pierre", 10, 1), ("alain", 10, 1)]);
}

#[tokio::test]
async fn test_single_lookup_agrees_with_leaderboard() {
    let (service, _) = setup();
    for (name, score) in [("a", 7), ("b", 7), ("c", 3), ("d", 0), ("e", 12), ("f", 3)] {
        register_with_score(&service, name, score).await;
    }

    for listed in service.list_players_by_rank().await.unwrap() {
        let fetched = service.get_player_by_id(listed.id).await.unwrap();
        assert_eq!(fetched, listed);
    }
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let (service, _) = setup();

    service.create_player("freddy").await.unwrap();
    let err = service.create_player("freddy").await.unwrap_err();

    assert!(matches!(err, TournamentError::Conflict { ref name } if name == "freddy"));
    assert_eq!(err.client_message(), "Player 'freddy' already exists.");
}

#[tokio::test]
async fn test_concurrent_duplicate_registration_yields_one_player() {
    let (service, _) = setup();

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.create_player("racer").await })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(TournamentError::Conflict { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(service.list_players_by_rank().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_tournament_lists_nothing() {
    let (service, reporter) = setup();

    let ranked = service.list_players_by_rank().await.unwrap();

    assert!(ranked.is_empty());
    assert_eq!(reporter.events(), vec![ReportedEvent::PlayersListed(Vec::new())]);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (service, _) = setup();
    let missing = PlayerId::new();

    let err = service.get_player_by_id(missing).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotFound(id) if id == missing));

    let err = service.update_player_score(missing, 3).await.unwrap_err();
    assert!(matches!(err, TournamentError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn test_negative_score_rejected() {
    let (service, _) = setup();
    let id = service.create_player("lucie").await.unwrap();

    let err = service.update_player_score(id, -1).await.unwrap_err();
    assert!(matches!(err, TournamentError::Validation(_)));
    assert_eq!(service.get_player_by_id(id).await.unwrap().score, 0);
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let (service, reporter) = setup();
    service.create_player("a").await.unwrap();
    service.create_player("b").await.unwrap();
    reporter.clear();

    assert_eq!(service.clear_tournament().await.unwrap(), 2);
    assert_eq!(service.clear_tournament().await.unwrap(), 0);
    assert!(service.list_players_by_rank().await.unwrap().is_empty());

    let events = reporter.events();
    assert_eq!(events[0], ReportedEvent::TournamentCleared { deleted: 2 });
    assert_eq!(events[1], ReportedEvent::TournamentCleared { deleted: 0 });
}

#[tokio::test]
async fn test_name_can_be_reused_after_clear() {
    let (service, _) = setup();
    let first = service.create_player("freddy").await.unwrap();
    service.clear_tournament().await.unwrap();

    let second = service.create_player("freddy").await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_one_report_per_operation() {
    let (service, reporter) = setup();

    let id = service.create_player("freddy").await.unwrap();
    service.update_player_score(id, 150).await.unwrap();
    let fetched = service.get_player_by_id(id).await.unwrap();
    let listed = service.list_players_by_rank().await.unwrap();

    assert_eq!(
        reporter.events(),
        vec![
            ReportedEvent::PlayerCreated {
                id,
                name: "freddy".to_string()
            },
            ReportedEvent::ScoreUpdated { id, score: 150 },
            ReportedEvent::PlayerFetched(fetched),
            ReportedEvent::PlayersListed(listed),
        ]
    );
}

#[tokio::test]
async fn test_failed_operations_are_not_reported() {
    let (service, reporter) = setup();
    service.create_player("freddy").await.unwrap();
    reporter.clear();

    let _ = service.create_player("freddy").await;
    let _ = service.create_player("").await;
    let _ = service.get_player_by_id(PlayerId::new()).await;

    assert!(reporter.events().is_empty());
}
