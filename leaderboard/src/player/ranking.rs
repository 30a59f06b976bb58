//! Leaderboard ranking.
//!
//! Players are ordered by descending score. The best score gets rank 1,
//! players sharing a score share a rank, and each lower score takes the
//! next rank: scores `150, 80, 10, 10, 5, 0` rank `1, 2, 3, 3, 4, 5`.
//!
//! Sorting is stable, so players with equal scores keep the order they
//! were given in. Both stores hand players back in registration order.

use std::collections::BTreeSet;

use super::models::{Player, RankedPlayer};

/// Rank every player, highest score first
///
/// Empty input yields an empty leaderboard.
pub fn rank_all(mut players: Vec<Player>) -> Vec<RankedPlayer> {
    players.sort_by(|a, b| b.score.cmp(&a.score));

    let mut rank = 0u32;
    let mut previous_score: Option<i64> = None;

    players
        .into_iter()
        .map(|player| {
            if previous_score.is_none_or(|previous| player.score < previous) {
                rank += 1;
            }
            previous_score = Some(player.score);
            RankedPlayer::new(player, rank)
        })
        .collect()
}

/// Rank a single score against a set of players without building the
/// whole leaderboard
///
/// Agrees with the rank `rank_all` gives any player of the same set.
pub fn rank_of(score: i64, players: &[Player]) -> u32 {
    let higher: BTreeSet<i64> = players
        .iter()
        .map(|player| player.score)
        .filter(|other| *other > score)
        .collect();
    rank_from_higher_count(higher.len() as u64)
}

/// Convert the number of distinct scores above a player into its rank
pub fn rank_from_higher_count(count: u64) -> u32 {
    u32::try_from(count).map_or(u32::MAX, |count| count.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::models::PlayerId;

    fn players(scores: &[(&str, i64)]) -> Vec<Player> {
        scores
            .iter()
            .map(|(name, score)| Player {
                id: PlayerId::new(),
                name: name.to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_rank_all_empty() {
        assert!(rank_all(Vec::new()).is_empty());
    }

    #[test]
    fn test_rank_all_single_player() {
        let ranked = rank_all(players(&[("solo", 0)]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_rank_all_shares_rank_on_ties() {
        let ranked = rank_all(players(&[
            ("c", 10),
            ("a", 150),
            ("f", 0),
            ("d", 10),
            ("b", 80),
            ("e", 5),
        ]));

        let scores: Vec<i64> = ranked.iter().map(|p| p.score).collect();
        let ranks: Vec<u32> = ranked.iter().map(|p| p.rank).collect();
        assert_eq!(scores, vec![150, 80, 10, 10, 5, 0]);
        assert_eq!(ranks, vec![1, 2, 3, 3, 4, 5]);
    }

    #[test]
    fn test_rank_all_keeps_input_order_on_ties() {
        let ranked = rank_all(players(&[("pierre", 10), ("paul", 5), ("alain", 10)]));
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["pierre", "alain", "paul"]);
    }

    #[test]
    fn test_rank_all_everyone_tied() {
        let ranked = rank_all(players(&[("a", 0), ("b", 0), ("c", 0)]));
        assert!(ranked.iter().all(|p| p.rank == 1));
    }

    #[test]
    fn test_rank_of_matches_rank_all() {
        let all = players(&[
            ("a", 150),
            ("b", 80),
            ("c", 10),
            ("d", 10),
            ("e", 5),
            ("f", 0),
        ]);
        for ranked in rank_all(all.clone()) {
            assert_eq!(rank_of(ranked.score, &all), ranked.rank, "{}", ranked.name);
        }
    }

    #[test]
    fn test_rank_of_score_above_everyone() {
        let all = players(&[("a", 3), ("b", 2)]);
        assert_eq!(rank_of(100, &all), 1);
        assert_eq!(rank_of(0, &[]), 1);
    }

    #[test]
    fn test_rank_from_higher_count_saturates() {
        assert_eq!(rank_from_higher_count(0), 1);
        assert_eq!(rank_from_higher_count(4), 5);
        assert_eq!(rank_from_higher_count(u64::MAX), u32::MAX);
    }
}
