//! A platform agnostic driver to interface with the BNO055 (absolute
//! orientation sensor)
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! The device runs its own sensor fusion; the driver brings it up in a
//! fusion mode, reports calibration and health, and decodes the fused
//! Euler angles. Every settling delay goes through a host supplied
//! [`DelayMs`] so tests can run against a fake clock.
//!
//! The bus must be clocked at [`I2C_FREQUENCY_HZ`] by the host before it
//! is handed to the driver. Transactions are neither retried nor timed
//! out: a bus error is returned as [`Error::Bus`] and a hung bus blocks
//! the caller.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`DelayMs`]: https://docs.rs/embedded-hal/0.2/embedded_hal/blocking/delay/trait.DelayMs.html

#![deny(missing_docs)]
#![no_std]

extern crate cast;
extern crate embedded_hal as hal;

mod conf;
mod euler;
mod regs;
mod status;

use hal::blocking::delay::DelayMs;
use hal::blocking::i2c::{Write, WriteRead};

use conf::RegisterBits;
use regs::Register;

pub use conf::{Axis, AxisRemap, Bno055Config, ClockSource, OperatingMode};
pub use euler::{degrees, EulerAngles, EULER_LSB_PER_DEGREE};
pub use regs::{ADDRESS, ALTERNATE_ADDRESS, CHIP_ID, I2C_FREQUENCY_HZ};
pub use status::{CalibrationStatus, SystemError, SystemStatus};

/// Settling time after an operation mode change, in ms
pub const MODE_SWITCH_DELAY_MS: u16 = 200;
/// Settling time after a configuration write or mode read-back, in ms
pub const CONFIG_DELAY_MS: u16 = 100;
/// Settling time after changing the clock source, in ms
pub const CLOCK_SWITCH_DELAY_MS: u16 = 200;
/// Recovery time between consecutive status reads, in ms
pub const STATUS_READ_DELAY_MS: u16 = 1;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Bus(error)
    }
}

/// What the last [`Bno055::initialize`] observed
///
/// The mode read-backs are diagnostics only; they do not affect
/// [`StartupReport::passed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartupReport {
    /// Content of the `CHIP_ID` register
    pub chip_id: u8,
    /// Chip temperature in Celsius
    pub temperature: i8,
    /// Mode read back after switching to config mode
    pub config_readback: OperatingMode,
    /// Mode read back after switching to the fusion mode
    pub fusion_readback: OperatingMode,
}

impl StartupReport {
    /// Chip identified and temperature sensor alive
    pub fn passed(&self) -> bool {
        self.chip_id == CHIP_ID && self.temperature != 0
    }
}

/// BNO055 driver
pub struct Bno055<I2C> {
    i2c: I2C,
    config: Bno055Config,
    startup: Option<StartupReport>,
}

impl<I2C, E> Bno055<I2C> where I2C: WriteRead<Error = E> + Write<Error = E>
{
    /// Creates a new driver with the default [`Bno055Config`]
    ///
    /// Nothing is sent on the bus until [`Bno055::initialize`].
    pub fn new(i2c: I2C) -> Self {
        Bno055::with_config(i2c, Bno055Config::default())
    }

    /// Creates a new driver with a custom configuration
    pub fn with_config(i2c: I2C, config: Bno055Config) -> Self {
        Bno055 { i2c,
                 config,
                 startup: None }
    }

    /// Destroys the driver, returning the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Brings the device up in the configured fusion mode
    ///
    /// Returns `Ok(false)` if the chip id is wrong or the temperature
    /// sensor reads zero. The configuration and mode writes are issued
    /// either way, so the device ends in the same state whatever the
    /// checks found. Only bus errors abort the sequence.
    pub fn initialize<D>(&mut self, delay: &mut D) -> Result<bool, Error<E>>
        where D: DelayMs<u16>
    {
        let chip_id = self.chip_id()?;
        #[cfg(feature = "defmt")]
        {
            if chip_id == CHIP_ID {
                defmt::info!("BNO055 detected");
            } else {
                defmt::warn!("no BNO055 detected, CHIP_ID=0x{:02X}", chip_id);
            }
        }

        let temperature = self.temperature()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("chip temperature is {} C", temperature);

        self.write_register(Register::OPR_MODE, OperatingMode::Config.value())?;
        delay.delay_ms(MODE_SWITCH_DELAY_MS);

        let config_readback = self.operating_mode()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("changed to mode {}", config_readback);
        delay.delay_ms(CONFIG_DELAY_MS);

        self.write_register(Register::AXIS_MAP_CONFIG,
                            self.config.axis_remap.value())?;
        delay.delay_ms(CONFIG_DELAY_MS);

        self.write_register(Register::SYS_TRIGGER,
                            self.config.clock_source.value())?;
        delay.delay_ms(CLOCK_SWITCH_DELAY_MS);

        self.write_register(Register::OPR_MODE,
                            self.config.fusion_mode.value())?;
        delay.delay_ms(MODE_SWITCH_DELAY_MS);

        let fusion_readback = self.operating_mode()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("changed to mode {}", fusion_readback);
        delay.delay_ms(CONFIG_DELAY_MS);

        let report = StartupReport { chip_id,
                                     temperature,
                                     config_readback,
                                     fusion_readback };
        self.startup = Some(report);

        #[cfg(feature = "defmt")]
        defmt::info!("startup passed: {}", report.passed());

        Ok(report.passed())
    }

    /// Report of the most recent [`Bno055::initialize`], if any
    pub fn last_startup(&self) -> Option<StartupReport> {
        self.startup
    }

    /// Calibration quality of each sensor
    pub fn calibration_status(&mut self) -> Result<CalibrationStatus, Error<E>> {
        let r = self.read_register(Register::CALIB_STAT)?;
        Ok(CalibrationStatus::from_register(r))
    }

    /// Point-in-time health check: no system error and the fusion
    /// algorithm running
    ///
    /// Any other combination, including a self-test in progress, is
    /// reported as unhealthy. Nothing is retried.
    pub fn is_healthy<D>(&mut self, delay: &mut D) -> Result<bool, Error<E>>
        where D: DelayMs<u16>
    {
        let sys_err = self.read_register(Register::SYS_ERR)?;
        delay.delay_ms(STATUS_READ_DELAY_MS);
        let sys_status = self.read_register(Register::SYS_STATUS)?;
        delay.delay_ms(STATUS_READ_DELAY_MS);

        let healthy = status::is_healthy(sys_err, sys_status);
        #[cfg(feature = "defmt")]
        {
            if !healthy {
                defmt::warn!("unhealthy: SYS_ERR={} SYS_STATUS={}",
                             sys_err,
                             sys_status);
            }
        }
        Ok(healthy)
    }

    /// Decoded `SYS_STATUS` register
    pub fn system_status(&mut self) -> Result<SystemStatus, Error<E>> {
        let r = self.read_register(Register::SYS_STATUS)?;
        Ok(SystemStatus::from_register(r))
    }

    /// Decoded `SYS_ERR` register
    pub fn system_error(&mut self) -> Result<SystemError, Error<E>> {
        let r = self.read_register(Register::SYS_ERR)?;
        Ok(SystemError::from_register(r))
    }

    /// Fused orientation in degrees
    ///
    /// Reads the six Euler output registers in a single burst.
    pub fn euler_angles(&mut self) -> Result<EulerAngles, Error<E>> {
        let buffer = self.read_registers::<6>(Register::EUL_HEADING_LSB)?;
        Ok(EulerAngles::from_raw(buffer))
    }

    /// Content of the `CHIP_ID` register, [`CHIP_ID`] for a BNO055
    pub fn chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::CHIP_ID)
    }

    /// Chip temperature in Celsius
    pub fn temperature(&mut self) -> Result<i8, Error<E>> {
        let r = self.read_register(Register::TEMP)?;
        Ok(i8::from_le_bytes([r]))
    }

    /// Current operation mode, as reported by the device
    pub fn operating_mode(&mut self) -> Result<OperatingMode, Error<E>> {
        let r = self.read_register(Register::OPR_MODE)?;
        Ok(OperatingMode::from_register(r))
    }

    /// Switches the operation mode and waits for it to settle
    pub fn set_mode<D>(&mut self,
                       mode: OperatingMode,
                       delay: &mut D)
                       -> Result<(), Error<E>>
        where D: DelayMs<u16>
    {
        self.write_register(Register::OPR_MODE, mode.value())?;
        delay.delay_ms(MODE_SWITCH_DELAY_MS);
        Ok(())
    }

    fn read_registers<const N: usize>(&mut self,
                                      reg: Register)
                                      -> Result<[u8; N], Error<E>> {
        let mut buffer = [0u8; N];
        self.i2c
            .write_read(self.config.address, &[reg.addr()], &mut buffer)?;
        Ok(buffer)
    }

    fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>> {
        self.read_registers::<1>(reg).map(|b| b[0])
    }

    fn write_register(&mut self, reg: Register, byte: u8) -> Result<(), Error<E>> {
        self.i2c.write(self.config.address, &[reg.addr(), byte])?;
        Ok(())
    }
}
