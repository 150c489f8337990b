//! Daemon-style binding and polling through `ControllerManager`.

use padbind::backends::virtual_input::{VirtualBackend, VirtualBus};
use padbind::{
    AttachError, Capabilities, ControllerManager, DeviceIdentity, FailureKind, GamepadType,
    InputKind, Options, Resolver,
};

fn manager() -> ControllerManager<VirtualBackend> {
    ControllerManager::new(Resolver::with_capabilities(
        VirtualBackend::new(),
        Capabilities { wiimote: false },
    ))
}

#[test]
fn attach_binds_every_slot_of_a_receiver() {
    let mut mgr = manager();
    let receiver = DeviceIdentity::new(GamepadType::Xbox360Wireless, 0x045e, 0x0719, "receiver");
    let bus = VirtualBus::new("usb:1-1");

    assert_eq!(mgr.attach(&receiver, &bus, &Options::default()).unwrap(), 4);
    assert_eq!(mgr.len(), 4);

    bus.push_to("usb:1-1:2", InputKind::Connection { connected: true });
    bus.push_to("usb:1-1:2", InputKind::AxisMoved { axis: 4, value: 1.0 });
    bus.push_to("usb:1-1:2", InputKind::HatChanged { hat: 0, value: 6 });

    let events = mgr.poll_events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|(id, _)| id == "usb:1-1:2"));
    assert_eq!(events[1].1.kind, InputKind::AxisMoved { axis: 4, value: 1.0 });

    let snap = mgr.snapshot();
    assert_eq!(snap.len(), 4);
    let live = snap.get("usb:1-1:2").unwrap();
    assert_eq!(live.connected, Some(true));
    assert_eq!(live.get_axis(4), 1.0);
    assert_eq!(live.get_hat(0), 6);
    assert_eq!(snap.get("usb:1-1:0").unwrap().connected, None);
}

#[test]
fn attach_one_binds_the_configured_slot() {
    let mut mgr = manager();
    let receiver = DeviceIdentity::new(GamepadType::Xbox360Wireless, 0x045e, 0x0291, "receiver");
    let bus = VirtualBus::new("usb:1-1");
    let options = Options {
        wireless_id: 1,
        ..Options::default()
    };

    assert_eq!(mgr.attach_one(&receiver, &bus, &options).unwrap(), "usb:1-1:1");
    assert_eq!(mgr.handles().next().unwrap().slot(), Some(1));
}

#[test]
fn failed_attach_leaves_the_manager_untouched() {
    let mut mgr = manager();
    let pad = DeviceIdentity::new(GamepadType::Xbox360, 0x045e, 0x028e, "pad");
    mgr.attach(&pad, &VirtualBus::new("usb:1-3"), &Options::default())
        .unwrap();

    let cable = DeviceIdentity::new(GamepadType::Xbox360PlayNCharge, 0x045e, 0x028f, "cable");
    let err = mgr
        .attach(&cable, &VirtualBus::new("usb:1-4"), &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::UnsupportedByDesign));

    let wiimote = DeviceIdentity::new(GamepadType::Wiimote, 0x057e, 0x0306, "wiimote");
    let err = mgr
        .attach_one(&wiimote, &VirtualBus::new("bt:1"), &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::UnsupportedInBuild));

    let refused = mgr
        .attach(&pad, &VirtualBus::refusing("usb:1-5", "claimed"), &Options::default())
        .unwrap_err();
    assert_eq!(refused.kind(), Some(FailureKind::DriverFailed));

    assert_eq!(mgr.len(), 1);
}

#[test]
fn detach_releases_handles() {
    let mut mgr = manager();
    let pad = DeviceIdentity::new(GamepadType::Xbox, 0x045e, 0x0202, "pad");
    let bus = VirtualBus::new("usb:1-6");
    mgr.attach(&pad, &bus, &Options::default()).unwrap();
    mgr.attach(&pad, &VirtualBus::new("usb:1-7"), &Options::default())
        .unwrap();

    let released = mgr.detach("usb:1-6").unwrap();
    assert_eq!(released.device(), GamepadType::Xbox);
    assert_eq!(mgr.len(), 1);
    assert!(mgr.detach("usb:1-6").is_none());

    bus.push(InputKind::ButtonPressed { button: 0 });
    assert!(mgr.poll_events().is_empty());
}

#[test]
fn second_bind_of_an_attached_bus_is_refused() {
    let mut mgr = manager();
    let pad = DeviceIdentity::new(GamepadType::Xbox360, 0x045e, 0x028e, "pad");
    let bus = VirtualBus::new("usb:1-1");

    assert_eq!(mgr.attach_one(&pad, &bus, &Options::default()).unwrap(), "usb:1-1");
    let err = mgr.attach_one(&pad, &bus, &Options::default()).unwrap_err();
    assert!(matches!(&err, AttachError::AlreadyAttached(id) if id == "usb:1-1"));
    assert_eq!(err.kind(), None);
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.len(), mgr.snapshot().len());

    bus.push(InputKind::ButtonPressed { button: 3 });
    assert_eq!(mgr.poll_events().len(), 1);
    assert!(mgr.snapshot().get("usb:1-1").unwrap().get_button(3));

    assert!(mgr.detach("usb:1-1").is_some());
    assert!(mgr.is_empty());
}

#[test]
fn receiver_clash_adds_no_slots() {
    let mut mgr = manager();
    let receiver = DeviceIdentity::new(GamepadType::Xbox360Wireless, 0x045e, 0x0719, "receiver");
    let bus = VirtualBus::new("usb:2-1");
    let options = Options {
        wireless_id: 2,
        ..Options::default()
    };

    mgr.attach_one(&receiver, &bus, &options).unwrap();
    let err = mgr.attach(&receiver, &bus, &options).unwrap_err();
    assert!(matches!(&err, AttachError::AlreadyAttached(id) if id == "usb:2-1:2"));
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.snapshot().len(), 1);
}
