use floorwire_designer::model::{
    Device, DeviceKind, DeviceNode, LightType, PowerType, SwitchType,
};
use floorwire_designer::schedule::{DeviceSchedule, DeviceVariant};
use floorwire_designer::Point;

fn device(device: Device) -> DeviceNode {
    DeviceNode::new(device, Point::new(0.0, 0.0))
}

#[test]
fn test_empty_schedule() {
    let schedule = DeviceSchedule::from_nodes(&[]);
    assert!(schedule.is_empty());
    assert_eq!(schedule.entries().len(), 9);
    assert_eq!(schedule.present().count(), 0);
}

#[test]
fn test_counts_with_defaults() {
    let nodes = vec![
        device(Device::of_kind(DeviceKind::Power)),
        device(Device::power(PowerType::Double)),
        device(Device::power(PowerType::Single)),
        device(Device::of_kind(DeviceKind::Light)),
        device(Device::light(LightType::Wall)),
        device(Device::of_kind(DeviceKind::Switch)),
        device(Device::switch(SwitchType::ThreeGang)),
        device(Device::switch(SwitchType::Dimmer)),
    ];
    let schedule = DeviceSchedule::from_nodes(&nodes);

    assert_eq!(schedule.count(DeviceVariant::Power(PowerType::Single)), 2);
    assert_eq!(schedule.count(DeviceVariant::Power(PowerType::Double)), 1);
    assert_eq!(schedule.count(DeviceVariant::Light(LightType::Ceiling)), 1);
    assert_eq!(schedule.count(DeviceVariant::Switch(SwitchType::OneGang)), 1);
    assert_eq!(schedule.count(DeviceVariant::Switch(SwitchType::FourGang)), 0);
    assert_eq!(schedule.count_kind(DeviceKind::Switch), 3);
    assert_eq!(schedule.total(), 8);

    let labels: Vec<&str> = schedule.present().map(|e| e.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Single Power Point",
            "Double Power Point",
            "Ceiling Light",
            "Wall Light",
            "1 Gang Switch",
            "3 Gang Switch",
            "Dimmer Switch",
        ]
    );
}

#[test]
fn test_display() {
    let nodes = vec![device(Device::switch(SwitchType::TwoGang))];
    let text = DeviceSchedule::from_nodes(&nodes).to_string();
    assert!(text.contains("2 Gang Switch"));
    assert!(text.lines().last().unwrap().starts_with("Total"));
    assert!(text.trim_end().ends_with('1'));
}
