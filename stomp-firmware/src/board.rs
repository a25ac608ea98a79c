//! Board support for the pedal controller module
//!
//! Maps the ESP32-S3 pins to named subsystems so nothing else in the
//! firmware needs to know a GPIO number.
//!
//! Pin map:
//! GPIO |     Function      | Notes
//!   3  | I2C SDA           | MAX17048 fuel gauge
//!   4  | I2C SCL           |
//!   5  | MUX COM           | Common of the 8-channel mux, pull-up, active low
//!   6  | MUX C             | Address bit 2
//!   8  | TFT DC            |
//!   9  | MUX B             | Address bit 1
//!  10  | MUX A             | Address bit 0
//!  11  | VBUS sense        | ADC2, divider from USB 5V
//!  12  | LED PWM           | LED ring, LEDC channel 1
//!  13  | TFT backlight     | LEDC channel 0
//!  14  | TFT CS            |
//!  35  | SPI2 MOSI         |
//!  36  | SPI2 SCK          |
//!  37  | Encoder A         | pull-up
//!  38  | Encoder B         | pull-up

use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::gpio::{DriveMode, Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::ledc::channel::{self as ledc_channel, ChannelIFace as _};
use esp_hal::ledc::timer::{self as ledc_timer, TimerIFace as _};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::{Peripherals, ADC2, GPIO11, TIMG0};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::Rate;
use esp_hal::Blocking;
use esp_storage::FlashStorage;
use static_cell::StaticCell;

/// TFT SPI clock
const TFT_SPI_MHZ: u32 = 40;
/// Fuel gauge I2C clock
const I2C_KHZ: u32 = 400;
/// PWM frequency for the backlight and LED ring
const PWM_KHZ: u32 = 20;

pub type PwmChannel = ledc_channel::Channel<'static, LowSpeed>;
pub type VbusAdc = Adc<'static, ADC2<'static>, Blocking>;
pub type VbusPin = AdcPin<GPIO11<'static>, ADC2<'static>>;

static PWM_TIMER: StaticCell<ledc_timer::Timer<'static, LowSpeed>> = StaticCell::new();

/// Multiplexer pins, address lines in A, B, C order
pub struct MuxHw {
    pub address: [Output<'static>; 3],
    pub common: Input<'static>,
}

/// Encoder phase pins
pub struct EncoderHw {
    pub a: Input<'static>,
    pub b: Input<'static>,
}

/// TFT bus and control pins
pub struct TftHw {
    pub spi: Spi<'static, Blocking>,
    pub dc: Output<'static>,
    pub cs: Output<'static>,
    pub backlight: PwmChannel,
}

/// Battery measurement
pub struct PowerHw {
    pub i2c: I2c<'static, Blocking>,
    pub adc: VbusAdc,
    pub vbus: VbusPin,
}

pub struct Board {
    pub mux: MuxHw,
    pub encoder: EncoderHw,
    pub tft: TftHw,
    pub led: PwmChannel,
    pub power: PowerHw,
    pub flash: FlashStorage<'static>,
    /// Handed to the scheduler
    pub timg0: TIMG0<'static>,
}

impl Board {
    /// Configure every pin and bus
    ///
    /// Peripheral construction only fails on invalid static configuration,
    /// so failures here are fatal.
    pub fn init(p: Peripherals) -> Self {
        let mux = MuxHw {
            address: [
                Output::new(p.GPIO10, Level::Low, OutputConfig::default()),
                Output::new(p.GPIO9, Level::Low, OutputConfig::default()),
                Output::new(p.GPIO6, Level::Low, OutputConfig::default()),
            ],
            common: Input::new(p.GPIO5, InputConfig::default().with_pull(Pull::Up)),
        };

        let encoder = EncoderHw {
            a: Input::new(p.GPIO37, InputConfig::default().with_pull(Pull::Up)),
            b: Input::new(p.GPIO38, InputConfig::default().with_pull(Pull::Up)),
        };

        let spi = Spi::new(
            p.SPI2,
            SpiConfig::default()
                .with_frequency(Rate::from_mhz(TFT_SPI_MHZ))
                .with_mode(Mode::_0),
        )
        .expect("spi init")
        .with_sck(p.GPIO36)
        .with_mosi(p.GPIO35);

        let mut ledc = Ledc::new(p.LEDC);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let mut timer = ledc.timer::<LowSpeed>(ledc_timer::Number::Timer0);
        timer
            .configure(ledc_timer::config::Config {
                duty: ledc_timer::config::Duty::Duty8Bit,
                clock_source: ledc_timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(PWM_KHZ),
            })
            .expect("pwm timer");
        let timer = PWM_TIMER.init(timer);

        let mut backlight = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel0, p.GPIO13);
        backlight
            .configure(ledc_channel::config::Config {
                timer: &*timer,
                duty_pct: 0,
                drive_mode: DriveMode::PushPull,
            })
            .expect("backlight channel");

        let mut led = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel1, p.GPIO12);
        led.configure(ledc_channel::config::Config {
            timer: &*timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        })
        .expect("led channel");

        let tft = TftHw {
            spi,
            dc: Output::new(p.GPIO8, Level::High, OutputConfig::default()),
            cs: Output::new(p.GPIO14, Level::High, OutputConfig::default()),
            backlight,
        };

        let i2c = I2c::new(
            p.I2C0,
            I2cConfig::default().with_frequency(Rate::from_khz(I2C_KHZ)),
        )
        .expect("i2c init")
        .with_sda(p.GPIO3)
        .with_scl(p.GPIO4);

        let mut adc_config = AdcConfig::new();
        let vbus = adc_config.enable_pin(p.GPIO11, Attenuation::_6dB);
        let adc = Adc::new(p.ADC2, adc_config);

        Board {
            mux,
            encoder,
            tft,
            led,
            power: PowerHw { i2c, adc, vbus },
            flash: FlashStorage::new(p.FLASH),
            timg0: p.TIMG0,
        }
    }
}
