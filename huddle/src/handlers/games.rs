use std::sync::Arc;

use huddle_api::{GameChange, GameEvent, TextEvent, Topic};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, instrument};

use crate::{
    broker::{Broker, Subscription},
    cancel::Cancellation,
    polling::{scheduler::PollingScheduler, PollingContext},
};

use super::{send_error, Handler, Notifications};

/// Drives the polling and turns game changes into broadcast texts.
///
/// Lines are collected for one buffer window and then published together
/// as a single [`TextEvent`].
pub struct GamesHandler {
    ctx: PollingContext,
    notifications: Notifications,
}

impl GamesHandler {
    pub fn new(ctx: PollingContext) -> Self {
        Self {
            ctx,
            notifications: Notifications::default(),
        }
    }

    fn broker(&self) -> &Broker {
        &self.ctx.broker
    }

    #[instrument(level = "debug", skip_all, name = "games_notifier")]
    async fn notify_games(self: Arc<Self>, mut subscription: Subscription, cancel: Cancellation) {
        let window = self.ctx.config.buffer_event;
        let mut flush = interval_at(Instant::now() + window, window);
        let mut lines: Vec<String> = vec![];

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    self.flush(&mut lines);
                    break;
                }
                _ = flush.tick() => self.flush(&mut lines),
                message = subscription.recv() => {
                    let Some(message) = message else {
                        break;
                    };

                    match serde_json::from_slice::<GameEvent>(&message.payload) {
                        Ok(event) if self.notifications.enabled() => lines.extend(render(&event)),
                        Ok(_) => {}
                        Err(e) => send_error(self.broker(), e),
                    }
                    message.ack();
                }
            }
        }

        debug!("Stopped notifying games");
    }

    fn flush(&self, lines: &mut Vec<String>) {
        if lines.is_empty() {
            return;
        }

        let text = lines.join("\n");
        lines.clear();
        if !self.notifications.enabled() {
            return;
        }

        if let Err(e) = self.broker().publish_event(Topic::Text, &TextEvent::new(text)) {
            send_error(self.broker(), e);
        }
    }
}

impl Handler for GamesHandler {
    fn id(&self) -> &str {
        "games"
    }

    fn execute_handlers(self: Arc<Self>, cancel: Cancellation) -> Vec<JoinHandle<()>> {
        let mut handles = vec![];
        match self.broker().subscribe(Topic::Games) {
            Ok(subscription) => {
                handles.push(tokio::spawn(
                    self.clone().notify_games(subscription, cancel.clone()),
                ));
            }
            Err(e) => send_error(self.broker(), format!("games could not subscribe: {e}")),
        }

        handles.extend(PollingScheduler::start(self.ctx.clone(), cancel).into_handles());
        handles
    }

    fn stop_notifications(&self) {
        self.notifications.stop();
    }

    fn resume_notifications(&self) {
        self.notifications.resume();
    }
}

/// The broadcast line for a change, if it is worth one.
pub fn render(event: &GameEvent) -> Option<String> {
    let game = &event.game;
    let teams = format!(
        "#{} El partido entre {} ({}) vs {} ({})",
        game.competition,
        game.away_team.name,
        game.away_team.record,
        game.home_team.name,
        game.home_team.record,
    );

    match event.last_game_change {
        GameChange::Started => Some(format!(
            "{teams} ha iniciado. Se juega en {} ({}, {})",
            game.venue.full_name, game.venue.city, game.venue.state
        )),
        GameChange::Finished => Some(format!(
            "{teams} ha finalizado con el resultado de {} - {}",
            game.away_team.score, game.home_team.score
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use espn::{Competition, Game};

    use crate::{
        cancel::cancellation,
        clock::FixedClock,
        config::PollingConfig,
        polling::source::fake::FakeSource,
        services::game_store::GameStore,
    };

    use super::*;

    fn game() -> Game {
        let mut game = Game {
            id: "g1".to_string(),
            competition: Competition::NFL,
            ..Default::default()
        };
        game.away_team.name = "Detroit Lions".to_string();
        game.away_team.record = "1-0".to_string();
        game.away_team.score = 21;
        game.home_team.name = "Kansas City Chiefs".to_string();
        game.home_team.record = "0-1".to_string();
        game.home_team.score = 20;
        game.venue.full_name = "Arrowhead Stadium".to_string();
        game.venue.city = "Kansas City".to_string();
        game.venue.state = "MO".to_string();
        game
    }

    fn handler(broker: &Broker) -> Arc<GamesHandler> {
        Arc::new(GamesHandler::new(PollingContext {
            config: PollingConfig {
                buffer_event: Duration::from_secs(30),
                ..Default::default()
            },
            store: GameStore::new(),
            broker: broker.clone(),
            source: Arc::new(FakeSource::default()),
            clock: Arc::new(FixedClock(Utc::now())),
        }))
    }

    #[test]
    fn renders_kickoff_and_final() {
        let started = render(&GameEvent::new(&game(), GameChange::Started)).unwrap();
        assert_eq!(
            started,
            "#NFL El partido entre Detroit Lions (1-0) vs Kansas City Chiefs (0-1) ha iniciado. \
             Se juega en Arrowhead Stadium (Kansas City, MO)"
        );

        let finished = render(&GameEvent::new(&game(), GameChange::Finished)).unwrap();
        assert!(finished.ends_with("ha finalizado con el resultado de 21 - 20"));

        for change in [
            GameChange::HomeScore,
            GameChange::AwayScore,
            GameChange::PeriodFinished,
            GameChange::Rescheduled,
        ] {
            assert!(render(&GameEvent::new(&game(), change)).is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn buffers_lines_into_one_text() {
        let broker = Broker::new();
        let mut texts = broker.subscribe(Topic::Text).unwrap();
        let (_cancel, token) = cancellation();
        handler(&broker).execute_handlers(token);

        for change in [GameChange::Started, GameChange::HomeScore, GameChange::Finished] {
            let delivery = broker
                .publish_event(Topic::Games, &GameEvent::new(&game(), change))
                .unwrap();
            assert_eq!(delivery.acknowledged().await, 1);
        }

        let message = texts.recv().await.unwrap();
        let text: TextEvent = serde_json::from_slice(&message.payload).unwrap();
        let lines: Vec<_> = text.text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ha iniciado"));
        assert!(lines[1].contains("ha finalizado"));
    }

    #[tokio::test(start_paused = true)]
    async fn muted_games_are_acknowledged_but_not_sent() {
        let broker = Broker::new();
        let mut texts = broker.subscribe(Topic::Text).unwrap();
        let (_cancel, token) = cancellation();
        let handler = handler(&broker);
        handler.clone().execute_handlers(token);
        handler.stop_notifications();

        let delivery = broker
            .publish_event(Topic::Games, &GameEvent::new(&game(), GameChange::Started))
            .unwrap();
        assert_eq!(delivery.acknowledged().await, 1);

        let nothing = tokio::time::timeout(Duration::from_secs(90), texts.recv()).await;
        assert!(nothing.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pending_lines_are_sent_on_shutdown() {
        let broker = Broker::new();
        let mut texts = broker.subscribe(Topic::Text).unwrap();
        let (cancel, token) = cancellation();
        let handles = handler(&broker).execute_handlers(token);

        let delivery = broker
            .publish_event(Topic::Games, &GameEvent::new(&game(), GameChange::Started))
            .unwrap();
        assert_eq!(delivery.acknowledged().await, 1);

        cancel.cancel();
        for handle in handles {
            handle.await.unwrap();
        }

        let message = tokio::time::timeout(Duration::from_secs(1), texts.recv())
            .await
            .unwrap()
            .unwrap();
        let text: TextEvent = serde_json::from_slice(&message.payload).unwrap();
        assert!(text.text.contains("ha iniciado"));
    }
}
