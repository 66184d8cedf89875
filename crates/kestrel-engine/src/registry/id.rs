use std::fmt;

/// Identity of every long-lived engine subsystem.
///
/// Declaration order is the startup order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SubsystemId {
    Config,
    Log,
    File,
    Asset,
    Physics,
    World,
    Window,
    Input,
    Particles,
    Render,
    DebugDraw,
}

impl SubsystemId {
    pub const COUNT: usize = 11;

    /// Fixed total startup order. Shutdown walks it backwards.
    pub const STARTUP_ORDER: [SubsystemId; Self::COUNT] = [
        SubsystemId::Config,
        SubsystemId::Log,
        SubsystemId::File,
        SubsystemId::Asset,
        SubsystemId::Physics,
        SubsystemId::World,
        SubsystemId::Window,
        SubsystemId::Input,
        SubsystemId::Particles,
        SubsystemId::Render,
        SubsystemId::DebugDraw,
    ];

    /// Subsystems that must be `Running` before this one is constructed.
    ///
    /// Optional collaborators never appear here; dependents receive them as
    /// `Option` handles instead.
    pub fn dependencies(self) -> &'static [SubsystemId] {
        use SubsystemId::*;
        match self {
            Config => &[],
            Log => &[Config],
            File => &[Config, Log],
            Asset => &[Config, File],
            Physics => &[Config],
            World => &[Config, Asset],
            Window => &[Config],
            Input => &[Window],
            Particles => &[Asset],
            Render => &[Config, Window, Asset],
            DebugDraw => &[Render],
        }
    }

    /// Whether the factory may decline to provide this subsystem.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            SubsystemId::Physics | SubsystemId::Particles | SubsystemId::DebugDraw
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            SubsystemId::Config => "config",
            SubsystemId::Log => "log",
            SubsystemId::File => "file",
            SubsystemId::Asset => "asset",
            SubsystemId::Physics => "physics",
            SubsystemId::World => "world",
            SubsystemId::Window => "window",
            SubsystemId::Input => "input",
            SubsystemId::Particles => "particles",
            SubsystemId::Render => "render",
            SubsystemId::DebugDraw => "debug-draw",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of a single subsystem slot.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    ShutDown,
}
