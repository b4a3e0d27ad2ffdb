use floorwire_core::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::Point;

entity_id! {
    /// Identifier of a device node.
    NodeId
}

/// The three device families placed on a floorplan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Power,
    Light,
    Switch,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Light => "light",
            Self::Switch => "switch",
        }
    }

    /// Power points and switches are fixed to walls; lights may float.
    pub fn is_wall_mounted(self) -> bool {
        matches!(self, Self::Power | Self::Switch)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "power" => Ok(Self::Power),
            "light" => Ok(Self::Light),
            "switch" => Ok(Self::Switch),
            _ => Err(format!("Unknown device kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerType {
    #[default]
    Single,
    Double,
}

impl PowerType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Power Point",
            Self::Double => "Double Power Point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    #[default]
    Ceiling,
    Wall,
}

impl LightType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ceiling => "Ceiling Light",
            Self::Wall => "Wall Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwitchType {
    #[default]
    #[serde(rename = "1g")]
    OneGang,
    #[serde(rename = "2g")]
    TwoGang,
    #[serde(rename = "3g")]
    ThreeGang,
    #[serde(rename = "4g")]
    FourGang,
    #[serde(rename = "dimmer")]
    Dimmer,
}

impl SwitchType {
    /// Plate type for a gang count, if one exists.
    pub fn for_gangs(gangs: usize) -> Option<Self> {
        match gangs {
            1 => Some(Self::OneGang),
            2 => Some(Self::TwoGang),
            3 => Some(Self::ThreeGang),
            4 => Some(Self::FourGang),
            _ => None,
        }
    }

    /// Number of independent toggles; `None` for a dimmer.
    pub fn gangs(self) -> Option<usize> {
        match self {
            Self::OneGang => Some(1),
            Self::TwoGang => Some(2),
            Self::ThreeGang => Some(3),
            Self::FourGang => Some(4),
            Self::Dimmer => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneGang => "1g",
            Self::TwoGang => "2g",
            Self::ThreeGang => "3g",
            Self::FourGang => "4g",
            Self::Dimmer => "dimmer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneGang => "1 Gang Switch",
            Self::TwoGang => "2 Gang Switch",
            Self::ThreeGang => "3 Gang Switch",
            Self::FourGang => "4 Gang Switch",
            Self::Dimmer => "Dimmer Switch",
        }
    }
}

/// Kind plus the subtype that is only meaningful for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Power { power_type: Option<PowerType> },
    Light { light_type: Option<LightType> },
    Switch { switch_type: Option<SwitchType> },
}

impl Device {
    /// Device of the given kind without a subtype.
    pub fn of_kind(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Power => Self::Power { power_type: None },
            DeviceKind::Light => Self::Light { light_type: None },
            DeviceKind::Switch => Self::Switch { switch_type: None },
        }
    }

    pub fn power(power_type: PowerType) -> Self {
        Self::Power {
            power_type: Some(power_type),
        }
    }

    pub fn light(light_type: LightType) -> Self {
        Self::Light {
            light_type: Some(light_type),
        }
    }

    pub fn switch(switch_type: SwitchType) -> Self {
        Self::Switch {
            switch_type: Some(switch_type),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Power { .. } => DeviceKind::Power,
            Self::Light { .. } => DeviceKind::Light,
            Self::Switch { .. } => DeviceKind::Switch,
        }
    }
}

/// Free-form properties shared by every device kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeData {
    pub label: Option<String>,
    pub circuit_id: Option<String>,
    pub height_mm: Option<f64>,
    pub notes: Option<String>,
}

impl NodeData {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.circuit_id.is_none()
            && self.height_mm.is_none()
            && self.notes.is_none()
    }
}

/// A device symbol placed on the floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct DeviceNode {
    pub id: NodeId,
    pub position: Point,
    /// Degrees.
    pub rotation: f64,
    pub device: Device,
    pub data: NodeData,
}

impl DeviceNode {
    /// Creates a node with a fresh id, no rotation and empty data.
    pub fn new(device: Device, position: Point) -> Self {
        Self {
            id: NodeId::generate(),
            position,
            rotation: 0.0,
            device,
            data: NodeData::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    pub fn kind(&self) -> DeviceKind {
        self.device.kind()
    }

    pub fn is_light(&self) -> bool {
        self.kind() == DeviceKind::Light
    }

    pub fn is_switch(&self) -> bool {
        self.kind() == DeviceKind::Switch
    }
}

/// Persisted shape of a node's `data` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    circuit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    switch_type: Option<SwitchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power_type: Option<PowerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    light_type: Option<LightType>,
}

/// Persisted shape of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: NodeId,
    kind: DeviceKind,
    position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<RawNodeData>,
}

impl TryFrom<RawNode> for DeviceNode {
    type Error = DocumentError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let data = raw.data.unwrap_or_default();
        let mismatch = |field: &'static str| DocumentError::KindMismatch {
            node: raw.id.to_string(),
            kind: raw.kind.to_string(),
            field,
        };

        let device = match raw.kind {
            DeviceKind::Power => {
                if data.light_type.is_some() {
                    return Err(mismatch("lightType"));
                }
                if data.switch_type.is_some() {
                    return Err(mismatch("switchType"));
                }
                Device::Power {
                    power_type: data.power_type,
                }
            }
            DeviceKind::Light => {
                if data.power_type.is_some() {
                    return Err(mismatch("powerType"));
                }
                if data.switch_type.is_some() {
                    return Err(mismatch("switchType"));
                }
                Device::Light {
                    light_type: data.light_type,
                }
            }
            DeviceKind::Switch => {
                if data.power_type.is_some() {
                    return Err(mismatch("powerType"));
                }
                if data.light_type.is_some() {
                    return Err(mismatch("lightType"));
                }
                Device::Switch {
                    switch_type: data.switch_type,
                }
            }
        };

        Ok(DeviceNode {
            id: raw.id,
            position: raw.position,
            rotation: raw.rotation.unwrap_or(0.0),
            device,
            data: NodeData {
                label: data.label,
                circuit_id: data.circuit_id,
                height_mm: data.height_mm,
                notes: data.notes,
            },
        })
    }
}

impl From<DeviceNode> for RawNode {
    fn from(node: DeviceNode) -> Self {
        let mut data = RawNodeData {
            label: node.data.label,
            circuit_id: node.data.circuit_id,
            height_mm: node.data.height_mm,
            notes: node.data.notes,
            ..RawNodeData::default()
        };
        match node.device {
            Device::Power { power_type } => data.power_type = power_type,
            Device::Light { light_type } => data.light_type = light_type,
            Device::Switch { switch_type } => data.switch_type = switch_type,
        }

        let empty = data.label.is_none()
            && data.circuit_id.is_none()
            && data.height_mm.is_none()
            && data.notes.is_none()
            && data.power_type.is_none()
            && data.light_type.is_none()
            && data.switch_type.is_none();

        RawNode {
            id: node.id,
            kind: node.device.kind(),
            position: node.position,
            rotation: Some(node.rotation),
            data: (!empty).then_some(data),
        }
    }
}
