extern crate bmp180;
extern crate linux_embedded_hal as hal;

use std::thread;
use std::time::Duration;

use bmp180::{Oversampling, BMP180};
use hal::{Delay, I2cdev};

// Boulder, CO
const ALTITUDE_M: f64 = 1655.0;

fn main() {
    let dev = I2cdev::new("/dev/i2c-1").unwrap();
    let mut bmp180 = BMP180::new(dev);
    bmp180.initialize().unwrap();

    loop {
        let m = bmp180
            .temperature_and_pressure(&mut Delay, Oversampling::O8)
            .unwrap();
        let p0 = m.sea_level(ALTITUDE_M);

        println!("Temp: {:.2}C Pressure: {:.2}mbar", m.temperature, m.pressure);
        println!("Sea-level pressure: {:.2}mbar", p0);
        println!("Altitude: {:.0}m", m.altitude(p0));

        thread::sleep(Duration::from_secs(10));
    }
}
