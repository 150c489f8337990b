//! Binding behaviour of every device family, driven through the virtual backend.

use padbind::backends::virtual_input::{VirtualBackend, VirtualBus};
use padbind::{
    BindError, Capabilities, DeviceIdentity, DriverError, DriverSpec, FailureKind, GamepadType,
    GenericUsbSpec, Options, Resolver, PLAY_N_CHARGE_MESSAGE,
};

fn resolver(wiimote: bool) -> Resolver<VirtualBackend> {
    Resolver::with_capabilities(VirtualBackend::new(), Capabilities { wiimote })
}

fn identity(kind: GamepadType) -> DeviceIdentity {
    DeviceIdentity::new(kind, 0x0079, 0x0006, format!("test {kind}"))
}

fn generic_options() -> Options {
    Options {
        generic_usb_specs: vec![GenericUsbSpec {
            vendor_id: 0x0079,
            product_id: 0x0006,
            interface: 2,
            endpoint: 0x83,
        }],
        ..Options::default()
    }
}

fn every_options() -> Vec<Options> {
    let mut busy = generic_options();
    busy.detach_kernel_driver = true;
    busy.wireless_id = 3;
    busy.chatpad.enabled = true;
    busy.headset.enabled = true;
    vec![Options::default(), busy]
}

#[test]
fn bindable_families_yield_one_handle_each() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:1-1");
    let options = generic_options();

    for kind in GamepadType::ALL.iter().copied() {
        if kind == GamepadType::Xbox360PlayNCharge {
            continue;
        }
        let handle = resolver
            .bind_one(&identity(kind), &bus, &options)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert_eq!(handle.device(), kind);

        let all = resolver.bind_all(&identity(kind), &bus, &options).unwrap();
        let expected = if kind == GamepadType::Xbox360Wireless { 4 } else { 1 };
        assert_eq!(all.len(), expected, "{kind}");
    }
}

#[test]
fn handles_carry_the_family_parameters() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:1-1");
    let mut options = generic_options();
    options.detach_kernel_driver = true;
    options.chatpad.no_init = true;
    options.headset.debug = true;

    let spec = |kind| resolver.bind_one(&identity(kind), &bus, &options).unwrap().spec().clone();

    assert_eq!(spec(GamepadType::XboxMat), DriverSpec::Xbox { detach: true });
    assert_eq!(
        spec(GamepadType::FirestormVsb),
        DriverSpec::Firestorm { vsb: true, detach: true }
    );
    assert_eq!(spec(GamepadType::Wiimote), DriverSpec::Wiimote);

    match spec(GamepadType::Xbox360Guitar) {
        DriverSpec::Xbox360 { peripherals, detach } => {
            assert!(detach);
            assert!(peripherals.chatpad.no_init);
            assert!(peripherals.headset.debug);
        }
        other => panic!("unexpected spec {other:?}"),
    }
}

#[test]
fn play_n_charge_fails_identically_in_both_entry_points() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:1-1");
    let cable = identity(GamepadType::Xbox360PlayNCharge);

    for options in every_options() {
        let one = resolver.bind_one(&cable, &bus, &options).unwrap_err();
        let all = resolver.bind_all(&cable, &bus, &options).unwrap_err();

        assert_eq!(one.kind(), FailureKind::UnsupportedByDesign);
        assert_eq!(all.kind(), FailureKind::UnsupportedByDesign);
        assert_eq!(one.to_string(), all.to_string());
        assert!(one.to_string().ends_with(PLAY_N_CHARGE_MESSAGE));
    }
    assert_eq!(resolver.backend().opened(), 0);
}

#[test]
fn bind_all_on_receiver_binds_four_slots_in_order() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:2-1");
    let receiver = identity(GamepadType::Xbox360Wireless);

    for wireless_id in [0, 2, 3, 7, 255] {
        let options = Options {
            wireless_id,
            ..Options::default()
        };
        let handles = resolver.bind_all(&receiver, &bus, &options).unwrap();
        let slots: Vec<_> = handles.iter().map(|h| h.slot()).collect();
        assert_eq!(slots, vec![Some(0), Some(1), Some(2), Some(3)]);

        let ids: Vec<_> = handles.iter().map(|h| h.id().to_string()).collect();
        assert_eq!(ids, ["usb:2-1:0", "usb:2-1:1", "usb:2-1:2", "usb:2-1:3"]);
    }
}

#[test]
fn bind_one_on_receiver_uses_the_configured_slot() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:2-1");
    let receiver = identity(GamepadType::Xbox360Wireless);

    for slot in 0..=3u8 {
        let options = Options {
            wireless_id: slot,
            detach_kernel_driver: slot % 2 == 0,
            ..Options::default()
        };
        let handle = resolver.bind_one(&receiver, &bus, &options).unwrap();
        assert_eq!(
            handle.spec(),
            &DriverSpec::Xbox360Wireless {
                slot,
                detach: slot % 2 == 0
            }
        );
    }

    let options = Options {
        wireless_id: 4,
        ..Options::default()
    };
    let err = resolver.bind_one(&receiver, &bus, &options).unwrap_err();
    assert!(matches!(err, BindError::WirelessSlotOutOfRange { slot: 4, .. }));
}

#[test]
fn generic_without_spec_constructs_nothing() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:3-1");
    let generic = identity(GamepadType::GenericUsb);

    let err = resolver.bind_one(&generic, &bus, &Options::default()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnresolvableConfiguration);
    assert!(matches!(
        err,
        BindError::NoGenericUsbSpec {
            vendor_id: 0x0079,
            product_id: 0x0006,
            ..
        }
    ));
    assert!(err.to_string().contains("0079:0006"));

    let err = resolver.bind_all(&generic, &bus, &Options::default()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnresolvableConfiguration);
    assert_eq!(resolver.backend().opened(), 0);
}

#[test]
fn generic_with_spec_uses_the_looked_up_pair() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:3-1");
    let mut options = generic_options();
    options.generic_usb_specs.insert(
        0,
        GenericUsbSpec {
            vendor_id: 0x0079,
            product_id: 0x0011,
            interface: 9,
            endpoint: 9,
        },
    );

    let handle = resolver
        .bind_one(&identity(GamepadType::GenericUsb), &bus, &options)
        .unwrap();
    assert_eq!(
        handle.spec(),
        &DriverSpec::GenericUsb {
            interface: 2,
            endpoint: 0x83,
            detach: false
        }
    );
}

#[test]
fn repeated_binds_give_equal_but_separate_handles() {
    let resolver = resolver(true);
    let bus = VirtualBus::new("usb:1-4");
    let options = generic_options();

    for kind in [GamepadType::Xbox360, GamepadType::GenericUsb, GamepadType::Xbox360Wireless] {
        let first = resolver.bind_one(&identity(kind), &bus, &options).unwrap();
        let second = resolver.bind_one(&identity(kind), &bus, &options).unwrap();

        assert_eq!(first.device(), second.device());
        assert_eq!(first.spec(), second.spec());

        let a = first.controller() as *const _ as *const ();
        let b = second.controller() as *const _ as *const ();
        assert_ne!(a, b);
    }
    assert_eq!(resolver.backend().opened(), 6);
}

#[test]
fn wiimote_binds_only_when_compiled_in() {
    let wiimote = identity(GamepadType::Wiimote);
    let bus = VirtualBus::new("bt:00:19:1d:00:00:00");
    let options = Options::default();

    let handle = resolver(true).bind_one(&wiimote, &bus, &options).unwrap();
    assert_eq!(handle.spec(), &DriverSpec::Wiimote);

    let without = resolver(false);
    for err in [
        without.bind_one(&wiimote, &bus, &options).unwrap_err(),
        without.bind_all(&wiimote, &bus, &options).unwrap_err(),
    ] {
        assert_eq!(err.kind(), FailureKind::UnsupportedInBuild);
        let msg = err.to_string();
        assert!(msg.contains("not compiled into this build"), "{msg}");
        assert!(msg.contains("wiimote"), "{msg}");
        assert!(!msg.contains("Play&Charge"));
    }
}

#[test]
fn driver_failures_propagate_with_their_source() {
    let resolver = resolver(true);
    let bus = VirtualBus::refusing("usb:1-9", "device busy");

    let err = resolver
        .bind_one(&identity(GamepadType::Xbox360), &bus, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::DriverFailed);
    assert!(matches!(
        &err,
        BindError::Driver {
            source: DriverError::Open(reason),
            ..
        } if reason == "device busy"
    ));
    assert!(std::error::Error::source(&err).is_some());

    let err = resolver
        .bind_all(&identity(GamepadType::Xbox360Wireless), &bus, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::DriverFailed);
}

#[test]
fn failures_name_the_device() {
    let resolver = resolver(false);
    let bus = VirtualBus::new("usb:1-1");

    for kind in [
        GamepadType::Xbox360PlayNCharge,
        GamepadType::Wiimote,
        GamepadType::GenericUsb,
    ] {
        let id = identity(kind);
        let err = resolver.bind_one(&id, &bus, &Options::default()).unwrap_err();
        assert_eq!(err.device(), id.to_string());
        assert!(err.to_string().starts_with(&id.to_string()));
    }
}
