//! Stompbox - MIDI Foot Controller Firmware
//!
//! Main firmware binary for ESP32-S3 based pedal modules. A single task
//! polls the multiplexed controls and the encoder every millisecond,
//! feeds the setup session, and draws whatever updates come back.
//!
//! ```text
//! Ticker (1 ms) ──► scan mux + encoder ──► SetupSession::poll
//!                                               │
//!                       Dimmer ◄── Update ──────┤
//!                                               ▼
//!                                    Renderer ──► ST7789
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, Output};
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use stomp_core::battery::BatteryStatus;
use stomp_core::config::{BATTERY_REFRESH_MS, MUX_SETTLE_US, POLL_PERIOD_MS};
use stomp_core::input::mux::{AddressBits, MuxScanner};
use stomp_core::input::InputConfig;
use stomp_core::menu::Update;
use stomp_core::settings::PersistentStore;
use stomp_core::{RawSample, SettingsStore, SetupSession};
use stomp_display::{DisplayBackend, GraphicsBackend, Renderer};
use stomp_hal::adapters::{EhDelay, EhPin};
use stomp_hal::{elapsed_ms, Clock};

mod board;
mod brightness;
mod clock;
mod fuel_gauge;
mod st7789;
mod storage;

use board::{Board, EncoderHw, PwmChannel, VbusAdc, VbusPin};
use brightness::Dimmer;
use clock::EmbassyClock;
use fuel_gauge::Max17048;
use st7789::St7789;
use storage::FlashSettingsStorage;

esp_bootloader_esp_idf::esp_app_desc!();

type Scanner = MuxScanner<EhPin<Output<'static>>, EhPin<Input<'static>>, EhDelay<Delay>>;

/// Main entry point
#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    info!("Stompbox firmware starting...");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let board = Board::init(esp_hal::init(config));
    esp_rtos::start(TimerGroup::new(board.timg0).timer0);
    info!("Peripherals initialized");

    let clock = EmbassyClock;

    // Settings first: the backlight level comes from them
    let store = PersistentStore::load(FlashSettingsStorage::new(board.flash));

    let mut dimmer = Dimmer::new(board.led, board.tft.backlight);

    let mut panel = St7789::new(board.tft.spi, board.tft.dc, board.tft.cs);
    if let Err(err) = panel.init(&mut Delay::new()) {
        error!("TFT init failed: {}", err);
    }
    let mut display = GraphicsBackend::new(panel);
    let mut renderer = Renderer::new();

    let mut power = board.power;
    let mut gauge = Max17048::new(power.i2c);
    match gauge.version() {
        Ok(version) => info!("MAX17048 version {=u16:#x}", version),
        Err(_) => warn!("MAX17048 not responding"),
    }
    let battery = read_battery(&mut gauge, &mut power.adc, &mut power.vbus);

    let mut scanner: Scanner = MuxScanner::new(
        board.mux.address.map(EhPin::new),
        EhPin::new(board.mux.common),
        EhDelay(Delay::new()),
        AddressBits::STRAIGHT,
    )
    .with_settle_us(MUX_SETTLE_US);
    let mut encoder = board.encoder;

    let sample = read_sample(&mut scanner, &mut encoder);
    let (mut session, first) = match SetupSession::new(
        store,
        battery,
        InputConfig::default(),
        &sample,
        clock.now_ms(),
    ) {
        Ok(started) => started,
        Err(err) => defmt::panic!("menu setup failed: {}", err),
    };

    show(&mut display, &mut renderer, &mut dimmer, &session, &first);
    info!("Setup menu running");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_PERIOD_MS));
    let mut last_battery = clock.now_ms();

    loop {
        ticker.next().await;
        let now = clock.now_ms();

        let sample = read_sample(&mut scanner, &mut encoder);
        for update in session.poll(&sample, now) {
            show(&mut display, &mut renderer, &mut dimmer, &session, &update);
        }

        if elapsed_ms(now, last_battery) >= BATTERY_REFRESH_MS {
            last_battery = now;
            let status = read_battery(&mut gauge, &mut power.adc, &mut power.vbus);
            if let Some(update) = session.set_battery(status) {
                show(&mut display, &mut renderer, &mut dimmer, &session, &update);
            }
        }
    }
}

/// One tick of raw input
fn read_sample(scanner: &mut Scanner, encoder: &mut EncoderHw) -> RawSample {
    RawSample {
        frame: scanner.scan_all(),
        encoder_a: encoder.a.is_high(),
        encoder_b: encoder.b.is_high(),
    }
}

/// Gauge state of charge plus VBUS presence
///
/// A failed gauge read shows as 0 %; a failed ADC read as no USB power.
fn read_battery<I2C: embedded_hal::i2c::I2c>(
    gauge: &mut Max17048<I2C>,
    adc: &mut VbusAdc,
    vbus: &mut VbusPin,
) -> BatteryStatus {
    let soc = gauge.soc_register().unwrap_or_else(|_| {
        warn!("battery: gauge read failed");
        0
    });
    let counts = nb::block!(adc.read_oneshot(vbus)).unwrap_or(0);
    trace!("battery: soc={=u16:#x} vbus={}", soc, counts);
    BatteryStatus::from_readings(soc, counts)
}

/// Apply brightness and draw one update
fn show<B, S>(
    display: &mut B,
    renderer: &mut Renderer,
    dimmer: &mut Dimmer<PwmChannel, PwmChannel>,
    session: &SetupSession<S>,
    update: &Update,
) where
    B: DisplayBackend,
    S: SettingsStore,
{
    dimmer.follow(&update.view, session.store());

    if let Err(err) = renderer.render(display, update) {
        warn!("display: render failed: {}", err);
        // Repaint everything on the next update
        renderer.invalidate();
    }
}
