//! Faction pool construction and random picking.
//!
//! The sleep faction is special only here: during the night window a winning
//! roll replaces the whole pool with the sleep faction, so it dominates that
//! draw instead of joining the base factions as one more option. The picker
//! treats every faction alike.
use chrono::Timelike;
use log::{debug, trace};

use crate::config::RollConfig;
use crate::constants::SLEEP_ROLL_CHANCE;
use crate::faction::Faction;
use crate::numbers::roll_to_index;
use crate::rng::RollSource;
use crate::sleep::SleepWindow;

/// Base factions followed by the sleep faction, unconditionally.
#[must_use]
pub fn build_faction_pool<T: Clone>(base_factions: &[T], sleep_faction: T) -> Vec<T> {
    let mut pool = Vec::with_capacity(base_factions.len() + 1);
    pool.extend_from_slice(base_factions);
    pool.push(sleep_faction);
    pool
}

/// Inputs for a randomized pool build.
pub struct PoolRequest<'a, T, D, R: ?Sized> {
    pub base_factions: &'a [T],
    pub sleep_faction: T,
    pub date: &'a D,
    pub rng: &'a mut R,
}

/// Build the pool for a single draw at `request.date`.
///
/// Outside the 22:00 to 06:00 window the base factions come back unchanged and
/// no roll is drawn. Inside it, one roll below 0.5 yields only the sleep
/// faction; anything else yields the base factions.
#[must_use]
pub fn build_random_faction_pool<T, D, R>(request: PoolRequest<'_, T, D, R>) -> Vec<T>
where
    T: Clone,
    D: Timelike,
    R: RollSource + ?Sized,
{
    roll_pool(request, SleepWindow::NIGHT, SLEEP_ROLL_CHANCE)
}

/// [`build_random_faction_pool`] with the window and chance taken from `cfg`.
#[must_use]
pub fn build_random_faction_pool_with<T, D, R>(
    request: PoolRequest<'_, T, D, R>,
    cfg: &RollConfig,
) -> Vec<T>
where
    T: Clone,
    D: Timelike,
    R: RollSource + ?Sized,
{
    roll_pool(request, cfg.sleep_window, cfg.sleep_chance)
}

fn roll_pool<T, D, R>(
    request: PoolRequest<'_, T, D, R>,
    window: SleepWindow,
    chance: f64,
) -> Vec<T>
where
    T: Clone,
    D: Timelike,
    R: RollSource + ?Sized,
{
    let PoolRequest {
        base_factions,
        sleep_faction,
        date,
        rng,
    } = request;
    let hour = date.hour();

    if !window.contains(date) {
        debug!(
            "Sleep roll | hour {hour} outside window, {} base factions",
            base_factions.len()
        );
        return base_factions.to_vec();
    }

    let roll = rng.next_roll();
    if roll < chance {
        debug!("Sleep roll | hour {hour} roll {roll:.3} < {chance:.2}, sleep faction only");
        vec![sleep_faction]
    } else {
        debug!("Sleep roll | hour {hour} roll {roll:.3} >= {chance:.2}, base factions");
        base_factions.to_vec()
    }
}

/// Pick one element using a single roll.
///
/// Returns `None` for an empty pool without drawing. Out-of-range rolls are
/// clamped onto the first or last element.
#[must_use]
pub fn pick_random_faction<'p, T, R>(pool: &'p [T], rng: &mut R) -> Option<&'p T>
where
    R: RollSource + ?Sized,
{
    if pool.is_empty() {
        return None;
    }
    let roll = rng.next_roll();
    let index = roll_to_index(roll, pool.len());
    trace!("Pick | roll {roll:.3} -> index {index} of {}", pool.len());
    pool.get(index)
}

/// Build the configured pool for `date` and pick from it.
///
/// Draws one roll for the sleep decision when inside the window, then one
/// roll for the pick.
#[must_use]
pub fn roll_faction<D, R>(cfg: &RollConfig, date: &D, rng: &mut R) -> Option<Faction>
where
    D: Timelike,
    R: RollSource + ?Sized,
{
    let pool = build_random_faction_pool_with(
        PoolRequest {
            base_factions: cfg.factions.as_slice(),
            sleep_faction: cfg.sleep_faction,
            date,
            rng: &mut *rng,
        },
        cfg,
    );
    pick_random_faction(&pool, rng).copied()
}
