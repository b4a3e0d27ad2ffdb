//! Device schedule: how many of each device variant a plan contains.

use std::fmt;

use crate::model::{Device, DeviceKind, DeviceNode, LightType, PowerType, SwitchType};

/// A device kind together with its (defaulted) subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceVariant {
    Power(PowerType),
    Light(LightType),
    Switch(SwitchType),
}

impl DeviceVariant {
    /// Every variant, in schedule order.
    pub const ALL: [DeviceVariant; 9] = [
        Self::Power(PowerType::Single),
        Self::Power(PowerType::Double),
        Self::Light(LightType::Ceiling),
        Self::Light(LightType::Wall),
        Self::Switch(SwitchType::OneGang),
        Self::Switch(SwitchType::TwoGang),
        Self::Switch(SwitchType::ThreeGang),
        Self::Switch(SwitchType::FourGang),
        Self::Switch(SwitchType::Dimmer),
    ];

    /// Variant of a node; an unset subtype counts as the kind's default.
    pub fn of(node: &DeviceNode) -> Self {
        match node.device {
            Device::Power { power_type } => Self::Power(power_type.unwrap_or_default()),
            Device::Light { light_type } => Self::Light(light_type.unwrap_or_default()),
            Device::Switch { switch_type } => Self::Switch(switch_type.unwrap_or_default()),
        }
    }

    pub fn kind(self) -> DeviceKind {
        match self {
            Self::Power(_) => DeviceKind::Power,
            Self::Light(_) => DeviceKind::Light,
            Self::Switch(_) => DeviceKind::Switch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Power(t) => t.label(),
            Self::Light(t) => t.label(),
            Self::Switch(t) => t.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub variant: DeviceVariant,
    pub count: usize,
}

impl ScheduleEntry {
    pub fn label(&self) -> &'static str {
        self.variant.label()
    }
}

/// Per-variant device counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSchedule {
    entries: Vec<ScheduleEntry>,
}

impl DeviceSchedule {
    pub fn from_nodes(nodes: &[DeviceNode]) -> Self {
        let mut entries: Vec<ScheduleEntry> = DeviceVariant::ALL
            .iter()
            .map(|&variant| ScheduleEntry { variant, count: 0 })
            .collect();
        for node in nodes {
            let variant = DeviceVariant::of(node);
            if let Some(entry) = entries.iter_mut().find(|e| e.variant == variant) {
                entry.count += 1;
            }
        }
        Self { entries }
    }

    /// All variants, including those with a zero count.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Variants present in the plan.
    pub fn present(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.count > 0)
    }

    pub fn count(&self, variant: DeviceVariant) -> usize {
        self.entries
            .iter()
            .find(|e| e.variant == variant)
            .map_or(0, |e| e.count)
    }

    pub fn count_kind(&self, kind: DeviceKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.variant.kind() == kind)
            .map(|e| e.count)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DeviceSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.present() {
            writeln!(f, "{:<20} {:>4}", entry.label(), entry.count)?;
        }
        write!(f, "{:<20} {:>4}", "Total", self.total())
    }
}
