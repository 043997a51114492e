//! Passive-buzzer tone channel on an LEDC PWM channel.

use esp_idf_svc::hal::gpio::OutputPin;
use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use pongboard_core::{note_frequency_hz, Note, ToneChannel};

pub struct Buzzer<'d> {
    timer: LedcTimerDriver<'d>,
    channel: LedcDriver<'d>,
}

impl<'d> Buzzer<'d> {
    pub fn new(
        timer: impl Peripheral<P = esp_idf_svc::hal::ledc::TIMER0> + 'd,
        channel: impl Peripheral<P = esp_idf_svc::hal::ledc::CHANNEL0> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> Result<Self, EspError> {
        let timer = LedcTimerDriver::new(
            timer,
            &TimerConfig::default()
                .frequency(Hertz(440))
                .resolution(Resolution::Bits10),
        )?;
        let mut channel = LedcDriver::new(channel, &timer, pin)?;
        channel.set_duty(0)?;

        Ok(Self { timer, channel })
    }
}

impl ToneChannel for Buzzer<'_> {
    fn on(&mut self) {
        let duty = self.channel.get_max_duty() / 2;
        if self.channel.set_duty(duty).is_err() {
            log::warn!("tone: failed to enable output");
        }
    }

    fn off(&mut self) {
        if self.channel.set_duty(0).is_err() {
            log::warn!("tone: failed to silence output");
        }
    }

    fn set_pitch(&mut self, note: Note, octave: u8) {
        let Some(frequency) = note_frequency_hz(note, octave) else {
            return;
        };

        if self.timer.set_frequency(Hertz(frequency)).is_err() {
            log::warn!("tone: failed to set {frequency} Hz");
        }
    }
}
