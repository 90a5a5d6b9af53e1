//! Decides which single change happened between two observations of a game.

use espn::{Game, GameState};
use huddle_api::GameChange;

/// Compare two snapshots of the same game. The first matching rule wins, so
/// simultaneous changes collapse into one label per call.
pub fn classify(old: &Game, new: &Game) -> GameChange {
    if old == new {
        return GameChange::NoChanges;
    }

    if new.start != old.start && old.status.state != GameState::Rescheduled {
        return GameChange::Rescheduled;
    }

    if new.home_team.score != old.home_team.score {
        return GameChange::HomeScore;
    }

    if new.away_team.score != old.away_team.score {
        return GameChange::AwayScore;
    }

    if new.status.state == GameState::Finished && old.status.state != GameState::Finished {
        return GameChange::Finished;
    }

    if new.status.state != old.status.state || new.status.period != old.status.period {
        return match new.status.period {
            1 => GameChange::Started,
            _ => GameChange::PeriodFinished,
        };
    }

    GameChange::NoChanges
}

/// Carry over only the fields covered by `change` from `new` into `old`.
/// Anything else that differs is picked up by later polls.
pub fn apply(change: GameChange, old: &Game, new: &Game) -> Game {
    let mut updated = old.clone();
    match change {
        GameChange::Rescheduled => {
            updated.start = new.start;
            updated.status.state = GameState::Rescheduled;
        }
        GameChange::HomeScore => updated.home_team.score = new.home_team.score,
        GameChange::AwayScore => updated.away_team.score = new.away_team.score,
        GameChange::Started | GameChange::PeriodFinished | GameChange::Finished => {
            updated.status = new.status.clone();
        }
        GameChange::NoChanges | GameChange::NewGame => {}
    }

    updated
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn base() -> Game {
        let mut game = Game {
            id: "g1".to_string(),
            start: Utc.with_ymd_and_hms(2024, 9, 8, 17, 0, 0).unwrap(),
            ..Default::default()
        };
        game.home_team.score = 3;
        game.away_team.score = 7;
        game.status.state = GameState::InProgress;
        game.status.period = 2;
        game
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let game = base();
        assert_eq!(classify(&game, &game), GameChange::NoChanges);
        assert_eq!(classify(&game, &game.clone()), GameChange::NoChanges);
    }

    #[test]
    fn moved_start_is_a_reschedule() {
        let old = base();
        let mut new = old.clone();
        new.start = old.start + Duration::hours(2);
        assert_eq!(classify(&old, &new), GameChange::Rescheduled);

        for state in [GameState::Scheduled, GameState::Finished, GameState::Cancelled] {
            let mut old = old.clone();
            old.status.state = state;
            let mut new = new.clone();
            new.status.state = state;
            assert_eq!(classify(&old, &new), GameChange::Rescheduled);
        }
    }

    #[test]
    fn second_reschedule_is_not_reported() {
        let mut old = base();
        old.status.state = GameState::Rescheduled;
        let mut new = old.clone();
        new.start = old.start + Duration::days(1);

        assert_eq!(classify(&old, &new), GameChange::NoChanges);
    }

    #[test]
    fn score_changes() {
        let old = base();

        let mut home = old.clone();
        home.home_team.score = 10;
        assert_eq!(classify(&old, &home), GameChange::HomeScore);

        let mut away = old.clone();
        away.away_team.score = 14;
        assert_eq!(classify(&old, &away), GameChange::AwayScore);

        let mut both = home.clone();
        both.away_team.score = 14;
        assert_eq!(classify(&old, &both), GameChange::HomeScore);
    }

    #[test]
    fn finish_wins_over_period_change() {
        let old = base();
        let mut new = old.clone();
        new.status.state = GameState::Finished;
        new.status.period = 4;
        assert_eq!(classify(&old, &new), GameChange::Finished);

        let mut old_finished = new.clone();
        old_finished.status.period = 5;
        assert_eq!(classify(&old_finished, &new), GameChange::PeriodFinished);
    }

    #[test]
    fn kickoff_and_periods() {
        let mut old = base();
        old.status.state = GameState::Scheduled;
        old.status.period = 0;
        let mut new = old.clone();
        new.status.state = GameState::InProgress;
        new.status.period = 1;
        assert_eq!(classify(&old, &new), GameChange::Started);

        let old = base();
        let mut new = old.clone();
        new.status.period = 3;
        assert_eq!(classify(&old, &new), GameChange::PeriodFinished);
    }

    #[test]
    fn untracked_fields_are_no_changes() {
        let old = base();
        let mut new = old.clone();
        new.status.display_clock = "2:00".to_string();
        new.weather.temperature = 12;

        assert_eq!(classify(&old, &new), GameChange::NoChanges);
    }

    #[test]
    fn apply_only_touches_the_changed_fields() {
        let old = base();
        let mut new = old.clone();
        new.home_team.score = 10;
        new.away_team.score = 14;
        new.start = old.start + Duration::hours(1);

        let updated = apply(GameChange::Rescheduled, &old, &new);
        assert_eq!(updated.start, new.start);
        assert_eq!(updated.status.state, GameState::Rescheduled);
        assert_eq!(updated.home_team.score, 3);

        let updated = apply(GameChange::HomeScore, &old, &new);
        assert_eq!(updated.home_team.score, 10);
        assert_eq!(updated.away_team.score, 7);
        assert_eq!(updated.start, old.start);

        let mut kickoff = old.clone();
        kickoff.status.period = 1;
        kickoff.status.display_clock = "15:00".to_string();
        let updated = apply(GameChange::Started, &old, &kickoff);
        assert_eq!(updated.status, kickoff.status);

        assert_eq!(apply(GameChange::NoChanges, &old, &new), old);
    }
}
