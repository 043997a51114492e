mod buttons;
mod nvs;
mod panel;
mod tone;

use esp_idf_svc::hal::{
    delay::FreeRtos,
    gpio::AnyIOPin,
    peripherals::Peripherals,
    spi::{config::Config, SpiDeviceDriver, SpiDriver, SpiDriverConfig},
    units::Hertz,
};
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use pongboard_core::{Controller, TICK_MS};

use buttons::Buttons;
use nvs::NvsScoreStore;
use panel::Panel;
use tone::Buzzer;

// Pin map:
//   GPIO2/3/4 - player 1, player 2, mode buttons (active low, pulled up)
//   GPIO5     - passive buzzer (LEDC channel 0)
//   GPIO6/7   - SPI2 SCLK / MOSI to the MAX7219
//   GPIO10    - MAX7219 chip select

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("pongboard firmware starting");

    let peripherals = Peripherals::take().unwrap();

    let spi = SpiDriver::new(
        peripherals.spi2,
        peripherals.pins.gpio6,
        peripherals.pins.gpio7,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::default(),
    )
    .unwrap();

    // The MAX7219 latches on CS release and is happy well below 10 MHz.
    let spi_config = Config::default()
        .baudrate(Hertz(10_000_000))
        .data_mode(embedded_hal::spi::MODE_0);
    let spi_device =
        SpiDeviceDriver::new(&spi, Some(peripherals.pins.gpio10), &spi_config).unwrap();

    let panel = match Panel::new(spi_device) {
        Ok(panel) => panel,
        Err(err) => {
            log::error!("panel init failed: {err:?}");
            return;
        }
    };

    let buzzer = Buzzer::new(
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        peripherals.pins.gpio5,
    )
    .unwrap();

    let store = NvsScoreStore::new(EspDefaultNvsPartition::take().unwrap()).unwrap();

    let mut buttons = Buttons::new(
        peripherals.pins.gpio2,
        peripherals.pins.gpio3,
        peripherals.pins.gpio4,
    )
    .unwrap();

    let mut controller = Controller::new(panel, buzzer, store);

    log::info!("entering {TICK_MS} ms tick loop");

    loop {
        // Edge latches first, so a press that landed between ticks is seen
        // by this tick's scan.
        buttons.drain_edges(|button, pressed| controller.pin_edge(button, pressed));
        controller.tick(buttons.levels());

        FreeRtos::delay_ms(TICK_MS);
    }
}
