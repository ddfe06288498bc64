//! Fixed-step turret simulation over the thread's global pool registry.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context as _;
use recycle_pool::{Component, PoolManifest, PoolStats, Scene, global};
use tracing::{debug, info, warn};

use crate::components::{BULLET_DAMAGE, Bullet, Spark, Turret};
use crate::world::HeadlessWorld;

/// Sparks stay visible this many ticks
const SPARK_TICKS: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Ticks between two shots
    pub fire_every: u32,
    /// Ticks a bullet flies before it hits
    pub lifetime: u32,
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub ticks: u32,
    pub shots: u32,
    pub impacts: u32,
    pub dry_impacts: u32,
    pub bullets: PoolStats,
    pub sparks: PoolStats,
    pub entities: usize,
}

pub struct Simulation {
    world: Rc<RefCell<HeadlessWorld>>,
    settings: Settings,
    tick: u32,
    flying: Vec<Bullet>,
    sparks: Vec<(Spark, u32)>,
    shots: u32,
    impacts: u32,
    dry_impacts: u32,
}

impl Simulation {
    /// Stock the pools declared in `manifest` and register them globally
    ///
    /// `bullets` is filed under the turret, `sparks` under itself.
    pub fn stock(manifest: &PoolManifest, settings: Settings) -> anyhow::Result<Self> {
        let world = recycle_pool::scene::share(HeadlessWorld::new());

        let bullets = manifest
            .builder::<Bullet>("bullets", world.clone())?
            .build()
            .context("stocking bullets")?;
        let overwrite = manifest.get("bullets").is_some_and(|decl| decl.overwrite);

        global::with(|pools| -> anyhow::Result<()> {
            let turret = Turret {
                name: bullets.holder().name().to_string(),
            };
            pools.register(turret, bullets, overwrite);
            pools
                .register_declared::<Spark>(manifest, "sparks", world.clone())
                .context("stocking sparks")?;
            Ok(())
        })?;

        info!(
            entities = world.borrow().spawned(),
            fire_every = settings.fire_every,
            lifetime = settings.lifetime,
            "pools stocked"
        );

        Ok(Self {
            world,
            settings,
            tick: 0,
            flying: Vec::new(),
            sparks: Vec::new(),
            shots: 0,
            impacts: 0,
            dry_impacts: 0,
        })
    }

    pub fn run(&mut self, ticks: u32) -> Report {
        for _ in 0..ticks {
            self.step();
        }
        self.report()
    }

    /// Advance one tick: fire, move, resolve impacts, fade sparks
    pub fn step(&mut self) {
        self.tick += 1;

        if self.tick % self.settings.fire_every.max(1) == 0 {
            self.fire();
        }

        for bullet in &mut self.flying {
            bullet.traveled += 1;
        }
        let (landed, flying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.flying)
            .into_iter()
            .partition(|bullet| bullet.traveled >= self.settings.lifetime);
        self.flying = flying;
        for bullet in landed {
            self.impact(bullet);
        }

        for (_, age) in &mut self.sparks {
            *age += 1;
        }
        let (faded, glowing): (Vec<_>, Vec<_>) = std::mem::take(&mut self.sparks)
            .into_iter()
            .partition(|(_, age)| *age >= SPARK_TICKS);
        self.sparks = glowing;
        for (spark, _) in faded {
            self.recycle::<Spark, Spark>(spark);
        }
    }

    fn fire(&mut self) {
        let Some(mut bullet) = global::acquire_from::<Turret, Bullet>() else {
            warn!(tick = self.tick, "turret out of bullets");
            return;
        };
        // bullets created on demand skip the init hook
        if bullet.damage == 0 {
            bullet.damage = BULLET_DAMAGE;
        }
        self.world.borrow_mut().set_active(bullet.entity(), true);
        self.shots += 1;
        debug!(tick = self.tick, entity = %bullet.entity(), "fired");
        self.flying.push(bullet);
    }

    fn impact(&mut self, bullet: Bullet) {
        self.impacts += 1;
        match global::acquire_from::<Spark, Spark>() {
            Some(spark) => {
                self.world.borrow_mut().set_active(spark.entity(), true);
                self.sparks.push((spark, 0));
            }
            None => self.dry_impacts += 1,
        }
        self.recycle::<Turret, Bullet>(bullet);
    }

    /// Deactivate `element` and hand it back to its pool
    fn recycle<O: 'static, T: Component>(&self, element: T) {
        let entity = element.entity();
        self.world.borrow_mut().set_active(entity, false);
        if let Err(rejected) = global::return_to_pool::<O, T>(element) {
            warn!(entity = %entity, "dropping element the pool refused: {rejected}");
        }
    }

    pub fn report(&self) -> Report {
        let (bullets, sparks) = global::with(|pools| {
            (
                pools.stats::<Turret, Bullet>(),
                pools.stats::<Spark, Spark>(),
            )
        });
        Report {
            ticks: self.tick,
            shots: self.shots,
            impacts: self.impacts,
            dry_impacts: self.dry_impacts,
            bullets,
            sparks,
            entities: self.world.borrow().spawned(),
        }
    }

    pub fn world(&self) -> &Rc<RefCell<HeadlessWorld>> {
        &self.world
    }
}
