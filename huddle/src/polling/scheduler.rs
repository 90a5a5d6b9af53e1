//! The two periodic tasks that keep the game store up to date.

use espn::Competition;
use huddle_api::{GameChange, GameEvent, Topic};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, instrument, warn};

use crate::cancel::Cancellation;

use super::{
    classify::{apply, classify},
    PollingContext,
};

/// Owns the info and list refresh tasks. Both stop once the shared
/// cancellation fires.
#[derive(Debug)]
pub struct PollingScheduler {
    info: JoinHandle<()>,
    list: JoinHandle<()>,
}

impl PollingScheduler {
    pub fn start(ctx: PollingContext, cancel: Cancellation) -> Self {
        let info = tokio::spawn(poll_info(ctx.clone(), cancel.clone()));
        let list = tokio::spawn(poll_list(ctx, cancel));
        Self { info, list }
    }

    pub fn into_handles(self) -> Vec<JoinHandle<()>> {
        vec![self.info, self.list]
    }
}

#[instrument(level = "debug", skip_all, name = "info_refresh")]
async fn poll_info(ctx: PollingContext, cancel: Cancellation) {
    let mut ticker = interval(ctx.config.info_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        refresh_info(&ctx).await;
    }

    debug!("Stopped refreshing game information");
}

#[instrument(level = "debug", skip_all, name = "list_refresh")]
async fn poll_list(ctx: PollingContext, cancel: Cancellation) {
    let mut ticker = interval(ctx.config.list_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        refresh_list(&ctx).await;
    }

    debug!("Stopped refreshing game lists");
}

/// Fetch the live detail of the tracked games and publish every classified
/// change. Returns the number of published events.
pub async fn refresh_info(ctx: &PollingContext) -> usize {
    let mut published = 0;
    for competition in Competition::ALL {
        for old in ctx.store.snapshot(competition) {
            if ctx.config.only_playing && !old.is_in_progress(ctx.clock.now()) {
                continue;
            }

            let new = match ctx.source.game(competition, &old.id).await {
                Ok(game) => game,
                Err(e) => {
                    warn!("Failed to fetch {competition} game {}: {e}", old.id);
                    continue;
                }
            };

            let change = classify(&old, &new);
            if change == GameChange::NoChanges {
                continue;
            }

            let updated = apply(change, &old, &new);
            ctx.store.replace(competition, &old.id, updated.clone());
            debug!("{} changed: {change}", updated.name);

            match ctx
                .broker
                .publish_event(Topic::Games, &GameEvent::new(&updated, change))
            {
                Ok(_) => published += 1,
                Err(e) => warn!("Failed to publish change of {}: {e}", old.id),
            }
        }
    }

    published
}

/// Merge newly scheduled games into the store and forget the old ones.
pub async fn refresh_list(ctx: &PollingContext) {
    for &competition in Competition::active() {
        let games = match ctx.source.games(competition).await {
            Ok(games) => games,
            Err(e) => {
                warn!("Failed to fetch the {competition} schedule: {e}");
                continue;
            }
        };

        let added = ctx.store.upsert_new(competition, games);
        let removed = ctx
            .store
            .evict_stale(competition, ctx.clock.now(), ctx.config.retention());
        if added > 0 || removed > 0 {
            info!("{competition} schedule: {added} new games, {removed} finished games forgotten");
        }
    }
}
