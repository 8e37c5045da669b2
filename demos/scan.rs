//! Scans for access points with an ESP32 running the AT firmware, connected
//! through a serial-USB adapter.
use std::{env, thread, time::Duration};

use esp32_at_host::{CommandSender, SenderConfig, SerialTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 5 {
        println!("Usage: {} <path-to-serial> <baudrate> [<ssid> <psk>]", args[0]);
        println!("Example: {} /dev/ttyUSB0 115200 mywifi hellopasswd123", args[0]);
        std::process::exit(1);
    }
    let dev = &args[1];
    let baud_rate: u32 = args[2].parse()?;

    let transport = SerialTransport::new(dev, baud_rate)?;
    let config = SenderConfig::new()
        .with_debug(true)
        .with_delay_after_send(Duration::from_millis(500));
    let mut esp = CommandSender::new(transport, config)?;

    esp.get_version()?;
    esp.set_wifi_mode(1, 0)?;
    esp.list_available_access_points()?;
    // Scans take a few seconds; replies are printed by the reader thread
    thread::sleep(Duration::from_secs(5));

    if let [_, _, _, ssid, psk] = args.as_slice() {
        esp.connect_access_point(ssid, psk, None)?;
        thread::sleep(Duration::from_secs(10));
        esp.get_connected_access_point()?;
        thread::sleep(Duration::from_secs(1));
    }

    esp.shutdown();
    Ok(())
}
