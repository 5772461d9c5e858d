//! Pneuma - Guided Breathing Firmware
//!
//! Main firmware binary for RP2040-based wrist devices.
//!
//! Named after the Greek "pneuma" (πνεῦμα) meaning "breath" - the
//! firmware paces guided breathing rounds with haptic cues.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod controller;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pneuma firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Vibration motor driver transistor
    let motor = Output::new(p.PIN_15, Level::Low);

    // Face buttons, active low with internal pull-ups
    let primary = Input::new(p.PIN_10, Pull::Up);
    let plus = Input::new(p.PIN_11, Pull::Up);
    let minus = Input::new(p.PIN_12, Pull::Up);
    let select = Input::new(p.PIN_13, Pull::Up);

    // PPG front-end on ADC0
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let ppg_channel = Channel::new_pin(p.PIN_26, Pull::None);

    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::controller_task()));
    unwrap!(spawner.spawn(tasks::button_task(primary, plus, minus, select)));
    unwrap!(spawner.spawn(tasks::haptic_task(motor)));
    unwrap!(spawner.spawn(tasks::heart_rate_task(adc, ppg_channel)));
    unwrap!(spawner.spawn(tasks::display_task()));

    info!("All tasks spawned");
}
