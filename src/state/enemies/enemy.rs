use std::time::Duration;

use rand::Rng;

use crate::clock::Timestamp;
use crate::error::Result;
use crate::sound_handler::SoundHandler;
use crate::state::animation_handler::{AnimationHandler, is_still_frame};
use crate::state::coin::CoinPool;
use crate::state::common::{Dir, Health, Pos, Scale};
use crate::state::enemies::common::{DeathPhase, HitCooldown};
use crate::state::enemies::laser::EnemyLaser;
use crate::state::enemies::movement::{CatchUp, FloatEffect};
use crate::state::enemies::params::{ArchetypeParams, EnemyKind, MovementModel};
use crate::state::enemies::sprite::{EnemySprite, HealthBar, HealthBarSprite};
use crate::state::pool::Poolable;

/// One hostile actor. Every archetype runs this same state machine; the
/// numbers come from its `ArchetypeParams`.
#[derive(Clone, Debug)]
pub struct Enemy {
    params: ArchetypeParams,
    scale: Scale,
    spawn_id: u32,
    pos: Pos,
    facing: Option<Dir>,
    health: Health,
    death_count: u32,
    death: DeathPhase,
    cooldown: HitCooldown,
    visible: bool,
    /// Cleared by `remove`; a removed enemy is free for reuse.
    active: bool,
    animation: AnimationHandler<EnemySprite>,
    health_bar: Option<HealthBar>,
    movement: CatchUp,
    patrol_heading: Dir,
    float: Option<FloatEffect>,
    laser: Option<EnemyLaser>,
}

impl Enemy {
    pub fn spawn(params: &ArchetypeParams, id: u32, scale: Scale) -> Result<Self> {
        params.validate()?;
        let pos = params.spawn_point(id, scale)?;
        Ok(Self::placed(params, id, pos, scale))
    }

    /// Builds an enemy at an already validated spawn position.
    pub(crate) fn placed(params: &ArchetypeParams, id: u32, pos: Pos, scale: Scale) -> Self {
        let mut enemy = Enemy {
            params: params.clone(),
            scale,
            spawn_id: id,
            pos,
            facing: None,
            health: Health::full(params.max_health),
            death_count: 0,
            death: DeathPhase::Alive,
            cooldown: HitCooldown::Ready,
            visible: true,
            active: true,
            animation: AnimationHandler::new(
                EnemySprite::resting(params.kind),
                params.walk_frame_interval,
            ),
            health_bar: None,
            movement: CatchUp::default(),
            patrol_heading: Dir::Right,
            float: None,
            laser: None,
        };
        enemy.reset_life();
        log::debug!("spawned {} #{id} at ({:.1}, {:.1})", params.kind, pos.x, pos.y);
        enemy
    }

    pub fn reinstate(&mut self, id: u32) -> Result<()> {
        let pos = self.params.spawn_point(id, self.scale)?;
        self.reinstate_at(id, pos);
        Ok(())
    }

    pub(crate) fn reinstate_at(&mut self, id: u32, pos: Pos) {
        self.spawn_id = id;
        self.pos = pos;
        self.facing = None;
        self.death = DeathPhase::Alive;
        self.visible = true;
        self.active = true;
        self.patrol_heading = Dir::Right;
        self.reset_life();
        let muzzle = self.muzzle();
        if let Some(laser) = &mut self.laser {
            laser.reload(muzzle);
        }
        log::debug!("reinstated {} #{id}", self.params.kind);
    }

    /// Hides the enemy and zeroes every transient field. Safe to call twice.
    pub fn remove(&mut self) {
        if self.active {
            log::debug!(
                "removed {} #{} after {} deaths",
                self.params.kind,
                self.spawn_id,
                self.death_count
            );
        }
        self.active = false;
        self.visible = false;
        self.death_count = 0;
        self.death = DeathPhase::Alive;
        self.facing = None;
        self.patrol_heading = Dir::Right;
        self.reset_life();
        let muzzle = self.muzzle();
        if let Some(laser) = &mut self.laser {
            laser.reload(muzzle);
        }
        if let Some(bar) = &mut self.health_bar {
            bar.visible = false;
        }
    }

    /// Fresh health, cooldown, sprite and timers at the current position.
    fn reset_life(&mut self) {
        self.health = Health::full(self.params.max_health);
        self.cooldown = HitCooldown::Ready;
        self.animation.reset(EnemySprite::resting(self.params.kind));
        self.movement.clear();
        self.health_bar = self
            .params
            .health_bar_offset
            .map(|offset| HealthBar::above(self.pos, offset * self.scale.y));
        self.float = self.params.float.map(|_| FloatEffect::new(self.pos.y));
        if self.laser.is_none() && self.params.laser.is_some() {
            self.laser = Some(EnemyLaser::loaded(self.muzzle()));
        }
    }

    fn muzzle_drop(&self) -> f32 {
        self.params
            .laser
            .map_or(0.0, |laser| laser.muzzle_offset * self.scale.y)
    }

    fn muzzle(&self) -> Pos {
        self.pos.offset(0.0, -self.muzzle_drop())
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.pos = self.pos.offset(dx, dy);
        if let Some(bar) = &mut self.health_bar {
            bar.shift(dx, dy);
        }
    }

    fn on_screen(&self) -> bool {
        self.active && self.visible && self.death.is_alive()
    }

    pub fn set_direction(&mut self, player_x: f32) {
        if self.on_screen() {
            self.facing = Some(Dir::towards(self.pos.x, player_x));
        }
    }

    /// Walk-cycle frame. The blink counters belong to the caller so every
    /// enemy on screen changes frame together.
    pub fn update_texture(&mut self, now: Timestamp, blink_right: f64, blink_left: f64) {
        if !self.on_screen() || !self.animation.frame_due(now) {
            return;
        }
        if !self.params.walk_cycle {
            self.animation.set_state(EnemySprite::Idle);
            return;
        }
        let Some(dir) = self.facing else {
            return;
        };
        let counter = match dir {
            Dir::Right => blink_right,
            Dir::Left => blink_left,
        };
        let sprite = if is_still_frame(counter) {
            EnemySprite::Still(dir)
        } else {
            EnemySprite::Walking(dir)
        };
        self.animation.set_state(sprite);
    }

    pub fn update_movement(&mut self, now: Timestamp) {
        if !self.on_screen() {
            self.movement.clear();
            if let Some(float) = &mut self.float {
                float.pause();
            }
            return;
        }

        let dy = match (&mut self.float, &self.params.float) {
            (Some(float), Some(params)) => float.step(now, self.pos.y, params, self.scale.y),
            _ => 0.0,
        };
        if dy != 0.0 {
            self.move_by(0.0, dy);
        }

        let Some(step) = self.params.movement.speed().step_for(self.death_count) else {
            self.movement.clear();
            return;
        };

        let heading = match self.params.movement {
            MovementModel::Chase { .. } => self.facing,
            MovementModel::Patrol { bound, .. } => {
                let bound = bound * self.scale.x;
                if self.pos.x > bound {
                    self.patrol_heading = Dir::Left;
                } else if self.pos.x < -bound {
                    self.patrol_heading = Dir::Right;
                }
                Some(self.patrol_heading)
            }
        };
        let Some(heading) = heading else {
            self.movement.clear();
            return;
        };

        if let Some(ratio) = self.movement.tick(now, self.params.movement.interval()) {
            self.move_by(heading.sign() * step * self.scale.x * ratio, 0.0);
        }
    }

    /// Advances the hit cooldown one step without taking damage.
    pub fn update_hit_cooldown(&mut self, now: Timestamp) {
        self.cooldown.poll(now, self.params.hit_cooldown);
    }

    pub fn hit_cooldown_active(&self, now: Timestamp) -> bool {
        self.cooldown.is_active(now, self.params.hit_cooldown)
    }

    /// Takes one non-lethal hit. Only applies at full health on a multi-hit
    /// archetype; the lethal hit goes through `kill`.
    pub fn hit(&mut self, now: Timestamp, sounds: &mut SoundHandler) -> bool {
        if self.cooldown.poll(now, self.params.hit_cooldown) || self.cooldown != HitCooldown::Ready
        {
            return false;
        }
        if !self.on_screen() || !self.health.is_full() || self.health.max <= 1 {
            return false;
        }

        if let Some(bar) = &mut self.health_bar {
            bar.sprite = HealthBarSprite::Half;
        }
        if let Some(sound) = self.params.hit_sound {
            sounds.play(sound);
        }
        self.health.current = self.health.max - 1;
        self.cooldown = HitCooldown::Cooling { entered_at: now };
        true
    }

    /// Starts the death sequence. No effect while already dying.
    pub fn kill(&mut self, now: Timestamp, sounds: &mut SoundHandler) -> bool {
        if !self.on_screen() {
            return false;
        }
        self.death_count += 1;
        self.health.current = 0;
        if let Some(bar) = &mut self.health_bar {
            bar.visible = false;
        }
        sounds.play(self.params.death_sound);
        self.animation.set_state(EnemySprite::ExplosionFrame1);
        self.movement.clear();
        self.death = DeathPhase::ExplosionFrame1 { entered_at: now };
        log::debug!(
            "{} #{} killed (death {})",
            self.params.kind,
            self.spawn_id,
            self.death_count
        );
        true
    }

    /// One step of the death sequence per call; a no-op while alive.
    pub fn update_death(&mut self, now: Timestamp, coins: &mut CoinPool, rng: &mut impl Rng) {
        let timings = self.params.death;
        match self.death {
            DeathPhase::Alive => {}
            DeathPhase::ExplosionFrame1 { entered_at } => {
                if now.since(entered_at) >= timings.explosion_frame {
                    self.animation.set_state(EnemySprite::ExplosionFrame2);
                    self.death = DeathPhase::ExplosionFrame2;
                }
            }
            DeathPhase::ExplosionFrame2 => {
                self.death = DeathPhase::AwaitingRespawn { entered_at: now };
            }
            DeathPhase::AwaitingRespawn { entered_at } => {
                if now.since(entered_at) >= timings.linger {
                    let slot = coins.drop_coin(self.params.reward, self.pos, self.params.coin_axis);
                    log::debug!(
                        "{} #{} dropped {:?} coin into slot {slot:?}",
                        self.params.kind,
                        self.spawn_id,
                        self.params.reward
                    );
                    self.visible = false;
                    self.death = DeathPhase::RewardGranted;
                }
            }
            DeathPhase::RewardGranted => {
                self.pos = self.params.respawn.pick(self.scale, rng);
                self.reset_life();
                if let Some(bar) = &mut self.health_bar {
                    bar.visible = false;
                }
                self.death = DeathPhase::Respawning { entered_at: now };
                log::debug!(
                    "{} #{} respawning at ({:.1}, {:.1})",
                    self.params.kind,
                    self.spawn_id,
                    self.pos.x,
                    self.pos.y
                );
            }
            DeathPhase::Respawning { entered_at } => {
                if now.since(entered_at) >= timings.reappear {
                    self.visible = true;
                    if let Some(bar) = &mut self.health_bar {
                        bar.visible = true;
                    }
                    self.death = DeathPhase::Alive;
                }
            }
        }
    }

    pub fn update_laser(&mut self, now: Timestamp, suppressed: bool, sounds: &mut SoundHandler) {
        if !self.active {
            return;
        }
        let muzzle = self.muzzle();
        if let (Some(laser), Some(params)) = (&mut self.laser, &self.params.laser) {
            laser.update(now, muzzle, params, self.scale, suppressed, sounds);
        }
    }

    /// Called by the collision layer once the laser has struck the player.
    pub fn mark_laser_hit(&mut self) {
        if let Some(laser) = &mut self.laser {
            laser.mark_hit();
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.params.kind
    }

    pub fn params(&self) -> &ArchetypeParams {
        &self.params
    }

    pub fn spawn_id(&self) -> u32 {
        self.spawn_id
    }

    pub fn is_alive(&self) -> bool {
        self.active && self.death.is_alive()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn death_phase(&self) -> f32 {
        self.death.as_f32()
    }

    pub fn death_state(&self) -> DeathPhase {
        self.death
    }

    pub fn hit_phase(&self) -> f32 {
        self.cooldown.as_f32()
    }

    pub fn hit_cooldown(&self) -> HitCooldown {
        self.cooldown
    }

    pub fn position(&self) -> (f32, f32) {
        (self.pos.x, self.pos.y)
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    pub fn facing(&self) -> Option<Dir> {
        self.facing
    }

    pub fn sprite(&self) -> EnemySprite {
        self.animation.current_state()
    }

    pub fn texture_name(&self) -> &'static str {
        self.sprite().texture_name(self.params.kind)
    }

    pub fn health_bar(&self) -> Option<&HealthBar> {
        self.health_bar.as_ref()
    }

    pub fn laser(&self) -> Option<&EnemyLaser> {
        self.laser.as_ref()
    }

    /// Total time from `kill` until the enemy is back on screen, ignoring
    /// tick granularity.
    pub fn death_sequence_length(&self) -> Duration {
        let t = self.params.death;
        t.explosion_frame + t.linger + t.reappear
    }
}

impl Poolable for Enemy {
    fn is_free(&self) -> bool {
        !self.active
    }
}
