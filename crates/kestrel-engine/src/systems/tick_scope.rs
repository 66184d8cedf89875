use std::collections::HashSet;

/// Which components a world tick is allowed to advance.
///
/// Game runs tick everything. An embedding editor ticks only the component
/// types it explicitly allows, so gameplay logic stays frozen while tooling
/// components (gizmos, previews) keep running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TickScope {
    #[default]
    Game,
    Editor { allowed: HashSet<String> },
}

impl TickScope {
    /// Editor scope allowing the given component type names.
    pub fn editor<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Editor {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, component_type: &str) -> bool {
        match self {
            Self::Game => true,
            Self::Editor { allowed } => allowed.contains(component_type),
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, Self::Editor { .. })
    }
}
