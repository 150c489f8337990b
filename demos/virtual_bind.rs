use padbind::backends::virtual_input::{VirtualBackend, VirtualBus};
use padbind::{ControllerManager, DeviceIdentity, GamepadType, InputKind, Options, Resolver};

fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let options = Options::default();
    let mut mgr = ControllerManager::new(Resolver::new(VirtualBackend::new()));

    let receiver = DeviceIdentity::new(GamepadType::Xbox360Wireless, 0x045e, 0x0719, "Wireless Receiver");
    let receiver_bus = VirtualBus::new("usb:1-1");
    let cable = DeviceIdentity::new(GamepadType::Xbox360PlayNCharge, 0x045e, 0x028f, "Play&Charge");
    let cable_bus = VirtualBus::new("usb:1-2");

    match mgr.attach(&receiver, &receiver_bus, &options) {
        Ok(n) => println!("{receiver}: bound {n} slot(s)"),
        Err(e) => println!("{e}"),
    }
    if let Err(e) = mgr.attach(&cable, &cable_bus, &options) {
        println!("{e}");
    }

    receiver_bus.push_to("usb:1-1:1", InputKind::Connection { connected: true });
    receiver_bus.push_to("usb:1-1:1", InputKind::AxisMoved { axis: 0, value: 0.75 });
    receiver_bus.push_to("usb:1-1:1", InputKind::ButtonPressed { button: 1 });

    for (id, ev) in mgr.poll_events() {
        println!("{id}: {:?}", ev.kind);
    }
    let mut states: Vec<_> = mgr.snapshot().into_inner().into_iter().collect();
    states.sort_by(|a, b| a.0.cmp(&b.0));
    for (id, state) in states {
        println!("{id}: connected={:?} axis0={:.2}", state.connected, state.get_axis(0));
    }
}
