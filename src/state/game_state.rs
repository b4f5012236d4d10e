use std::collections::BTreeMap;

use rand::Rng;

use super::coin::{CoinPool, CoinTier};
use super::enemies::{DamageOutcome, Enemy, EnemyKind};
use super::pool::Pool;
use crate::clock::Timestamp;
use crate::config::CoreConfig;
use crate::error::Result;
use crate::sound_handler::{SoundHandler, SoundSettings};

/// Per-tick inputs from the game loop. `now` is sampled once and shared by
/// every enemy this tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInput {
    pub now: Timestamp,
    pub player_x: f32,
    pub player_y: f32,
    /// Walk-blink counters, advanced by the caller.
    pub blink_right: f64,
    pub blink_left: f64,
    /// Green power-up: enemy lasers stay parked.
    pub lasers_suppressed: bool,
}

/// The enemy collective: owns every enemy, the shared coins, the sound queue
/// and the run's score.
pub struct GameState {
    config: CoreConfig,
    enemies: BTreeMap<EnemyKind, Pool<Enemy>>,
    pub coins: CoinPool,
    pub sounds: SoundHandler,
    score: u32,
    coins_collected: u32,
}

impl GameState {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        let enemies = EnemyKind::ALL
            .into_iter()
            .map(|kind| (kind, Pool::new()))
            .collect();
        Ok(GameState {
            coins: CoinPool::new(config.coin_distance),
            sounds: SoundHandler::new(config.sounds),
            enemies,
            score: 0,
            coins_collected: 0,
            config,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn set_sound_settings(&mut self, settings: SoundSettings) {
        self.config.sounds = settings;
        self.sounds.set_settings(settings);
    }

    /// Puts an enemy on screen, recycling a removed one of the same kind when
    /// possible. Returns its index within the kind's pool.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, id: u32) -> Result<Option<usize>> {
        let scale = self.config.scale;
        let params = self.config.params(kind);
        let pos = params.spawn_point(id, scale)?;
        let pool = self.enemies.entry(kind).or_default();
        Ok(pool.acquire(
            || Enemy::placed(params, id, pos, scale),
            |enemy| enemy.reinstate_at(id, pos),
        ))
    }

    /// Takes an enemy off screen and returns it to its pool.
    pub fn remove_enemy(&mut self, kind: EnemyKind, index: usize) -> bool {
        self.enemies
            .get_mut(&kind)
            .is_some_and(|pool| pool.release(index, Enemy::remove))
    }

    pub fn update(&mut self, input: &TickInput, rng: &mut impl Rng) {
        let now = input.now;
        let coins = &mut self.coins;
        let sounds = &mut self.sounds;
        for pool in self.enemies.values_mut() {
            pool.for_each_live_mut(|_, enemy| {
                enemy.update_hit_cooldown(now);
                enemy.set_direction(input.player_x);
                enemy.update_texture(now, input.blink_right, input.blink_left);
                enemy.update_movement(now);
                enemy.update_laser(now, input.lasers_suppressed, sounds);
                enemy.update_death(now, coins, rng);
            });
        }
    }

    /// Applies one player shot. A full-health multi-hit enemy takes a hit;
    /// anything else dies.
    pub fn damage_enemy(
        &mut self,
        kind: EnemyKind,
        index: usize,
        now: Timestamp,
    ) -> DamageOutcome {
        let Some(pool) = self.enemies.get_mut(&kind) else {
            return DamageOutcome::Ignored;
        };
        if !pool.is_live(index) {
            return DamageOutcome::Ignored;
        }
        let Some(enemy) = pool.get_mut(index) else {
            return DamageOutcome::Ignored;
        };
        if !enemy.is_alive() || !enemy.is_visible() || enemy.hit_cooldown_active(now) {
            return DamageOutcome::Ignored;
        }

        let health = enemy.health();
        let params = enemy.params();
        let (hit_points, kill_points) = (params.hit_points, params.kill_points);
        if health.is_full() && health.max > 1 {
            if enemy.hit(now, &mut self.sounds) {
                self.score += hit_points;
                return DamageOutcome::Hit;
            }
            DamageOutcome::Ignored
        } else if enemy.kill(now, &mut self.sounds) {
            self.score += kill_points;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Ignored
        }
    }

    pub fn mark_laser_hit(&mut self, kind: EnemyKind, index: usize) {
        if let Some(enemy) = self.enemies.get_mut(&kind).and_then(|p| p.get_mut(index)) {
            enemy.mark_laser_hit();
        }
    }

    pub fn collect_coin(&mut self, index: usize) -> Option<CoinTier> {
        let tier = self.coins.collect(index)?;
        self.coins_collected += tier.value();
        Some(tier)
    }

    /// Clears the field: every enemy is removed (death counts reset) and all
    /// coins are hidden.
    pub fn player_died(&mut self) {
        for pool in self.enemies.values_mut() {
            for index in pool.live_indices().to_vec() {
                pool.release(index, Enemy::remove);
            }
        }
        self.coins.clear();
        log::debug!("player died; field cleared");
    }

    pub fn enemy(&self, kind: EnemyKind, index: usize) -> Option<&Enemy> {
        self.enemies.get(&kind)?.get(index)
    }

    pub fn enemies(&self, kind: EnemyKind) -> Option<&Pool<Enemy>> {
        self.enemies.get(&kind)
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = (EnemyKind, usize, &Enemy)> {
        self.enemies
            .iter()
            .flat_map(|(&kind, pool)| pool.iter_live().map(move |(i, e)| (kind, i, e)))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::sound_handler::Sound;
    use crate::state::common::Scale;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tick(ms: u64, player_x: f32) -> TickInput {
        TickInput {
            now: Timestamp::from_millis(ms),
            player_x,
            ..TickInput::default()
        }
    }

    fn run(state: &mut GameState, from: u64, to: u64, rng: &mut StdRng) {
        for ms in from..=to {
            state.update(&tick(ms, 0.0), rng);
        }
    }

    #[test]
    fn new_validates_the_config() {
        let mut config = CoreConfig::default();
        config.scale = Scale { x: -1.0, y: 1.0 };
        assert!(matches!(
            GameState::new(config),
            Err(CoreError::InvalidConfig { kind: None, .. })
        ));
    }

    #[test]
    fn spawn_rejects_unknown_ids() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        assert!(state.spawn_enemy(EnemyKind::SmallAlien, 9).is_err());
        assert_eq!(state.spawn_enemy(EnemyKind::SmallAlien, 1).unwrap(), Some(0));
        assert_eq!(state.spawn_enemy(EnemyKind::SmallAlien, 2).unwrap(), Some(1));
        assert_eq!(state.live_enemies().count(), 2);
    }

    #[test]
    fn enemies_walk_towards_the_player() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        state.spawn_enemy(EnemyKind::SmallAlien, 1).unwrap();
        state.spawn_enemy(EnemyKind::MediumAlien, 1).unwrap();
        run(&mut state, 0, 120, &mut rng);

        let small = state.enemy(EnemyKind::SmallAlien, 0).unwrap();
        let medium = state.enemy(EnemyKind::MediumAlien, 0).unwrap();
        assert!(small.position().0 > -800.0);
        assert!(medium.position().0 < 850.0);
        assert!((small.position().0 + 800.0 - 3.0).abs() < 1e-3);
    }

    #[test]
    fn medium_alien_takes_two_shots_and_drops_silver() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let index = state.spawn_enemy(EnemyKind::MediumAlien, 3).unwrap().unwrap();

        assert_eq!(
            state.damage_enemy(EnemyKind::MediumAlien, index, Timestamp::from_millis(10)),
            DamageOutcome::Hit
        );
        assert_eq!(
            state.damage_enemy(EnemyKind::MediumAlien, index, Timestamp::from_millis(50)),
            DamageOutcome::Ignored
        );
        assert_eq!(state.score(), 1);

        run(&mut state, 11, 200, &mut rng);
        assert_eq!(
            state.damage_enemy(EnemyKind::MediumAlien, index, Timestamp::from_millis(201)),
            DamageOutcome::Killed
        );
        assert_eq!(state.score(), 3);
        assert_eq!(
            state.damage_enemy(EnemyKind::MediumAlien, index, Timestamp::from_millis(202)),
            DamageOutcome::Ignored
        );

        run(&mut state, 202, 600, &mut rng);
        let enemy = state.enemy(EnemyKind::MediumAlien, index).unwrap();
        assert!(enemy.is_alive());
        assert_eq!(enemy.death_count(), 1);

        let (coin_index, coin) = state.coins.on_screen().next().unwrap();
        assert_eq!(coin.tier, CoinTier::Silver);
        assert_eq!(state.collect_coin(coin_index), Some(CoinTier::Silver));
        assert_eq!(state.coins_collected(), 2);
        assert_eq!(state.collect_coin(coin_index), None);

        let sounds: Vec<Sound> = state.sounds.drain().collect();
        assert_eq!(sounds, vec![Sound::AlienHit, Sound::AlienDeath]);
    }

    #[test]
    fn small_alien_dies_in_one_shot() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let index = state.spawn_enemy(EnemyKind::SmallAlien, 1).unwrap().unwrap();
        let outcome = state.damage_enemy(EnemyKind::SmallAlien, index, Timestamp::from_millis(1));
        assert_eq!(outcome, DamageOutcome::Killed);
        assert_eq!(state.score(), 1);
        let stray = state.damage_enemy(EnemyKind::SmallAlien, 7, Timestamp::ZERO);
        assert_eq!(stray, DamageOutcome::Ignored);
    }

    #[test]
    fn coin_allocation_stays_at_peak() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for id in 1..=3 {
            state.spawn_enemy(EnemyKind::SmallAlien, id).unwrap();
        }

        let mut t = 0;
        for _round in 0..10 {
            for index in 0..3 {
                state.damage_enemy(EnemyKind::SmallAlien, index, Timestamp::from_millis(t));
            }
            run(&mut state, t, t + 300, &mut rng);
            t += 301;
            assert_eq!(state.coins.on_screen_count(), 3);
            let on_screen: Vec<usize> = state.coins.on_screen().map(|(i, _)| i).collect();
            for index in on_screen {
                state.collect_coin(index);
            }
        }
        assert_eq!(state.coins.all().len(), 3);
        assert_eq!(state.coins_collected(), 30);
    }

    #[test]
    fn player_death_clears_the_field() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let index = state.spawn_enemy(EnemyKind::RedMachine, 2).unwrap().unwrap();
        state.damage_enemy(EnemyKind::RedMachine, index, Timestamp::ZERO);
        run(&mut state, 0, 150, &mut rng);
        state.damage_enemy(EnemyKind::RedMachine, index, Timestamp::from_millis(151));
        run(&mut state, 151, 600, &mut rng);
        assert_eq!(state.enemy(EnemyKind::RedMachine, index).unwrap().death_count(), 1);
        assert_eq!(state.coins.on_screen_count(), 1);

        state.player_died();
        assert_eq!(state.live_enemies().count(), 0);
        assert_eq!(state.coins.on_screen_count(), 0);
        let removed = state.enemy(EnemyKind::RedMachine, index).unwrap();
        assert_eq!(removed.death_count(), 0);
        assert!(!removed.is_visible());

        let again = state.spawn_enemy(EnemyKind::RedMachine, 5).unwrap();
        assert_eq!(again, Some(index));
        assert_eq!(state.enemies(EnemyKind::RedMachine).unwrap().allocated(), 1);
        let enemy = state.enemy(EnemyKind::RedMachine, index).unwrap();
        assert_eq!(enemy.position(), (275.0, 220.0));
    }

    #[test]
    fn suppressed_lasers_stay_silent() {
        let mut state = GameState::new(CoreConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        state.spawn_enemy(EnemyKind::RedMachine, 1).unwrap();
        for ms in 0..1_000 {
            let input = TickInput {
                lasers_suppressed: true,
                ..tick(ms, 0.0)
            };
            state.update(&input, &mut rng);
        }
        assert!(state.sounds.pending().is_empty());

        run(&mut state, 1_000, 2_000, &mut rng);
        assert!(state.sounds.pending().contains(&Sound::LaserGunEnemy));
    }

    #[test]
    fn muted_sounds_do_not_change_outcomes() {
        let mut config = CoreConfig::default();
        config.sounds = SoundSettings::muted();
        let mut state = GameState::new(config).unwrap();
        let index = state.spawn_enemy(EnemyKind::MediumAlien, 1).unwrap().unwrap();
        let outcome = state.damage_enemy(EnemyKind::MediumAlien, index, Timestamp::ZERO);
        assert_eq!(outcome, DamageOutcome::Hit);
        assert!(state.sounds.pending().is_empty());
    }
}
