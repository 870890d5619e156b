//! Decoding of the calibration and system status registers

/// `SYS_STATUS` code reported while the fusion algorithm is running
pub const STATUS_FUSION_RUNNING: u8 = 5;

/// `SYS_ERR` code reported when there is no error
pub const ERROR_NONE: u8 = 0;

/// Calibration quality of each sensor, `0` (uncalibrated) to `3` (fully
/// calibrated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationStatus {
    /// Magnetometer, bits [1:0]
    pub mag: u8,
    /// Accelerometer, bits [3:2]
    pub acc: u8,
    /// Gyroscope, bits [5:4]
    pub gyr: u8,
    /// Overall system, bits [7:6]
    pub sys: u8,
}

impl CalibrationStatus {
    /// Highest calibration score
    pub const FULL: u8 = 3;

    /// Unpacks the content of the `CALIB_STAT` register
    pub fn from_register(r: u8) -> Self {
        CalibrationStatus { mag: r & 0x03,
                            acc: (r >> 2) & 0x03,
                            gyr: (r >> 4) & 0x03,
                            sys: (r >> 6) & 0x03 }
    }

    /// All four scores are at [`CalibrationStatus::FULL`]
    pub fn is_fully_calibrated(&self) -> bool {
        self.mag == Self::FULL
        && self.acc == Self::FULL
        && self.gyr == Self::FULL
        && self.sys == Self::FULL
    }
}

/// Content of the `SYS_STATUS` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemStatus {
    /// System idle
    Idle,
    /// System error, see [`SystemError`]
    Error,
    /// Initializing peripherals
    InitializingPeripherals,
    /// System initialization
    Initializing,
    /// Executing self-test
    SelfTest,
    /// Sensor fusion algorithm running
    FusionRunning,
    /// System running without fusion algorithm
    RunningNoFusion,
    /// Undocumented code
    Unknown(u8),
}

impl SystemStatus {
    /// Decodes the content of the `SYS_STATUS` register
    pub fn from_register(r: u8) -> Self {
        match r {
            0 => SystemStatus::Idle,
            1 => SystemStatus::Error,
            2 => SystemStatus::InitializingPeripherals,
            3 => SystemStatus::Initializing,
            4 => SystemStatus::SelfTest,
            STATUS_FUSION_RUNNING => SystemStatus::FusionRunning,
            6 => SystemStatus::RunningNoFusion,
            other => SystemStatus::Unknown(other),
        }
    }
}

/// Content of the `SYS_ERR` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    /// No error
    None,
    /// Peripheral initialization error
    PeripheralInit,
    /// System initialization error
    SystemInit,
    /// Self-test result failed
    SelfTestFailed,
    /// Register map value out of range
    RegisterValueOutOfRange,
    /// Register map address out of range
    RegisterAddressOutOfRange,
    /// Register map write error
    RegisterWrite,
    /// Low power mode not available for the selected operation mode
    LowPowerModeUnavailable,
    /// Accelerometer power mode not available
    AccelPowerModeUnavailable,
    /// Fusion algorithm configuration error
    FusionConfig,
    /// Sensor configuration error
    SensorConfig,
    /// Undocumented code
    Unknown(u8),
}

impl SystemError {
    /// Decodes the content of the `SYS_ERR` register
    pub fn from_register(r: u8) -> Self {
        match r {
            ERROR_NONE => SystemError::None,
            0x01 => SystemError::PeripheralInit,
            0x02 => SystemError::SystemInit,
            0x03 => SystemError::SelfTestFailed,
            0x04 => SystemError::RegisterValueOutOfRange,
            0x05 => SystemError::RegisterAddressOutOfRange,
            0x06 => SystemError::RegisterWrite,
            0x07 => SystemError::LowPowerModeUnavailable,
            0x08 => SystemError::AccelPowerModeUnavailable,
            0x09 => SystemError::FusionConfig,
            0x0A => SystemError::SensorConfig,
            other => SystemError::Unknown(other),
        }
    }
}

/// Health verdict from raw `SYS_ERR` and `SYS_STATUS` codes: no error and
/// the fusion algorithm running. Anything else, including a self-test in
/// progress, is unhealthy.
pub fn is_healthy(error: u8, status: u8) -> bool {
    error == ERROR_NONE && status == STATUS_FUSION_RUNNING
}
