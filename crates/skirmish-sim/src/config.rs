//! Scenario definitions
//!
//! Deserializable templates for weapons, agents, and whole scenarios.
//! Reading files is the host's job; these are the validated shapes a
//! simulation is built from.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use skirmish_core::{DefId, GroupId, TimeMs, Vec2};

/// Parameters of one weapon type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Reload interval in milliseconds
    pub reload_ms: TimeMs,
    /// Projectile travel speed in units per second
    pub projectile_speed: f64,
    /// Damage applied on a hit
    pub damage: f64,
    /// Maximum projectile travel distance
    pub range: f64,
}

impl WeaponSpec {
    /// Check the spec for values that cannot drive a weapon
    pub fn validate(&self) -> Result<()> {
        if self.reload_ms == 0 {
            return Err(Error::InvalidDef("weapon reload interval is zero".into()));
        }
        if !(self.projectile_speed > 0.0 && self.projectile_speed.is_finite()) {
            return Err(Error::InvalidDef(
                "weapon projectile speed must be strictly positive".into(),
            ));
        }
        if !(self.damage >= 0.0 && self.damage.is_finite()) {
            return Err(Error::InvalidDef("weapon damage must be non-negative".into()));
        }
        if !(self.range > 0.0 && self.range.is_finite()) {
            return Err(Error::InvalidDef(
                "weapon range must be strictly positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            reload_ms: 900,
            projectile_speed: 30.0,
            damage: 10.0,
            range: 100.0,
        }
    }
}

/// Parameters of one agent type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// The agent's type
    pub kind: DefId,
    /// Starting hit points
    pub health: f64,
    /// Collision size
    pub size: f64,
    /// Command queue capacity, fixed at creation
    pub queue_capacity: usize,
    /// The agent's weapon
    pub weapon: WeaponSpec,
}

impl AgentSpec {
    /// Check the spec for values that cannot drive an agent
    pub fn validate(&self) -> Result<()> {
        if !(self.health > 0.0 && self.health.is_finite()) {
            return Err(Error::InvalidDef(
                "agent health must be strictly positive".into(),
            ));
        }
        if !(self.size >= 0.0 && self.size.is_finite()) {
            return Err(Error::InvalidDef("agent size must be non-negative".into()));
        }
        if self.queue_capacity == 0 {
            return Err(Error::InvalidDef("command queue capacity is zero".into()));
        }
        self.weapon.validate()
    }
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            kind: DefId::new("agent"),
            health: 100.0,
            size: 1.0,
            queue_capacity: 8,
            weapon: WeaponSpec::default(),
        }
    }
}

/// Placement of one agent in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPlacement {
    pub spec: AgentSpec,
    pub position: Vec2,
}

/// One group of agents and its observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDef {
    /// The group identifier
    pub id: u32,
    /// Agents spawned for this group
    pub agents: Vec<AgentPlacement>,
}

impl GroupDef {
    /// The typed group id
    pub fn group(&self) -> GroupId {
        GroupId::new(self.id)
    }
}

/// A whole scenario: every group and its agents
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub groups: Vec<GroupDef>,
}

impl ScenarioDef {
    /// Validate every definition in the scenario
    pub fn validate(&self) -> Result<()> {
        for group in &self.groups {
            for placement in &group.agents {
                placement.spec.validate()?;
                if !placement.position.is_finite() {
                    return Err(Error::InvalidDef(format!(
                        "non-finite agent position in {}",
                        group.group()
                    )));
                }
            }
        }
        Ok(())
    }
}
