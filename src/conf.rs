use crate::regs;

pub(crate) trait RegisterBits {
    fn mask() -> u8;
    fn value(&self) -> u8;
}

/// Operation mode of the device
///
/// Writes to any register other than `OPR_MODE` are only honoured in
/// [`OperatingMode::Config`]. Fusion output registers are populated in the
/// fusion modes ([`OperatingMode::Imu`] and up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Configuration mode, the only mode accepting configuration writes
    Config,
    /// Accelerometer only
    AccOnly,
    /// Magnetometer only
    MagOnly,
    /// Gyroscope only
    GyroOnly,
    /// Accelerometer + magnetometer
    AccMag,
    /// Accelerometer + gyroscope
    AccGyro,
    /// Magnetometer + gyroscope
    MagGyro,
    /// All three sensors, no fusion
    Amg,
    /// Relative orientation fusion (accelerometer + gyroscope)
    Imu,
    /// Tilt-compensated compass fusion
    Compass,
    /// Magnet-for-gyroscope fusion
    M4g,
    /// Nine degrees of freedom fusion, fast magnetometer calibration off
    NdofFmcOff,
    /// Nine degrees of freedom fusion
    Ndof,
    /// Code outside of the documented range, as read from the device
    Other(u8),
}

impl OperatingMode {
    /// Decodes the content of the `OPR_MODE` register
    pub fn from_register(r: u8) -> Self {
        match r & Self::mask() {
            0x00 => OperatingMode::Config,
            0x01 => OperatingMode::AccOnly,
            0x02 => OperatingMode::MagOnly,
            0x03 => OperatingMode::GyroOnly,
            0x04 => OperatingMode::AccMag,
            0x05 => OperatingMode::AccGyro,
            0x06 => OperatingMode::MagGyro,
            0x07 => OperatingMode::Amg,
            0x08 => OperatingMode::Imu,
            0x09 => OperatingMode::Compass,
            0x0A => OperatingMode::M4g,
            0x0B => OperatingMode::NdofFmcOff,
            0x0C => OperatingMode::Ndof,
            other => OperatingMode::Other(other),
        }
    }

    /// Whether the device fuses sensor data in this mode
    pub fn is_fusion(&self) -> bool {
        match self {
            OperatingMode::Imu
            | OperatingMode::Compass
            | OperatingMode::M4g
            | OperatingMode::NdofFmcOff
            | OperatingMode::Ndof => true,
            _ => false,
        }
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::Ndof
    }
}

impl RegisterBits for OperatingMode {
    fn mask() -> u8 {
        0x0F
    }

    fn value(&self) -> u8 {
        match self {
            OperatingMode::Config => 0x00,
            OperatingMode::AccOnly => 0x01,
            OperatingMode::MagOnly => 0x02,
            OperatingMode::GyroOnly => 0x03,
            OperatingMode::AccMag => 0x04,
            OperatingMode::AccGyro => 0x05,
            OperatingMode::MagGyro => 0x06,
            OperatingMode::Amg => 0x07,
            OperatingMode::Imu => 0x08,
            OperatingMode::Compass => 0x09,
            OperatingMode::M4g => 0x0A,
            OperatingMode::NdofFmcOff => 0x0B,
            OperatingMode::Ndof => 0x0C,
            OperatingMode::Other(v) => *v & Self::mask(),
        }
    }
}

/// Physical sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X = 0b00,
    /// Y axis
    Y = 0b01,
    /// Z axis
    Z = 0b10,
}

impl Axis {
    fn from_bits(b: u8) -> Option<Self> {
        match b {
            0b00 => Some(Axis::X),
            0b01 => Some(Axis::Y),
            0b10 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Content of the `AXIS_MAP_CONFIG` register: which physical axis feeds
/// each of the reported x, y and z axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRemap {
    /// Physical axis reported as x
    pub x: Axis,
    /// Physical axis reported as y
    pub y: Axis,
    /// Physical axis reported as z
    pub z: Axis,
}

impl AxisRemap {
    /// Device reset value (`0x24`), no remapping
    pub const IDENTITY: AxisRemap = AxisRemap { x: Axis::X,
                                                y: Axis::Y,
                                                z: Axis::Z };

    /// X and Z swapped (`0x06`), the mounting this driver brings the
    /// device up with
    pub const SWAP_XZ: AxisRemap = AxisRemap { x: Axis::Z,
                                               y: Axis::Y,
                                               z: Axis::X };

    /// Decodes `AXIS_MAP_CONFIG`; `None` for the reserved `0b11` code
    pub fn from_register(r: u8) -> Option<Self> {
        Some(AxisRemap { x: Axis::from_bits(r & 0x03)?,
                         y: Axis::from_bits((r >> 2) & 0x03)?,
                         z: Axis::from_bits((r >> 4) & 0x03)? })
    }
}

impl Default for AxisRemap {
    fn default() -> Self {
        AxisRemap::SWAP_XZ
    }
}

impl RegisterBits for AxisRemap {
    fn mask() -> u8 {
        0x3F
    }

    fn value(&self) -> u8 {
        (self.x as u8) | ((self.y as u8) << 2) | ((self.z as u8) << 4)
    }
}

/// Clock source selection in `SYS_TRIGGER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal oscillator
    Internal = 0x00,
    /// External 32 kHz crystal
    External = 0x80,
}

impl Default for ClockSource {
    fn default() -> Self {
        ClockSource::External
    }
}

impl RegisterBits for ClockSource {
    fn mask() -> u8 {
        ClockSource::External.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

/// Configuration of Bno055
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bno055Config {
    pub(crate) address: u8,
    pub(crate) axis_remap: AxisRemap,
    pub(crate) clock_source: ClockSource,
    pub(crate) fusion_mode: OperatingMode,
}

impl Bno055Config {
    /// Creates Bno055 configuration with the default address
    /// ([`ADDRESS`]), [`AxisRemap::SWAP_XZ`], the external crystal and
    /// [`OperatingMode::Ndof`].
    ///
    /// [`ADDRESS`]: ./constant.ADDRESS.html
    pub fn new() -> Self {
        Bno055Config { address: regs::ADDRESS,
                       axis_remap: AxisRemap::default(),
                       clock_source: ClockSource::default(),
                       fusion_mode: OperatingMode::default() }
    }

    /// Sets the 7-bit device address
    pub fn address(&mut self, address: u8) -> &mut Self {
        self.address = address;
        self
    }

    /// Selects [`ALTERNATE_ADDRESS`]
    ///
    /// [`ALTERNATE_ADDRESS`]: ./constant.ALTERNATE_ADDRESS.html
    pub fn alternate_address(&mut self) -> &mut Self {
        self.address(regs::ALTERNATE_ADDRESS)
    }

    /// Sets the axis remapping ([`AxisRemap`])
    pub fn axis_remap(&mut self, axis_remap: AxisRemap) -> &mut Self {
        self.axis_remap = axis_remap;
        self
    }

    /// Sets the clock source ([`ClockSource`])
    pub fn clock_source(&mut self, clock_source: ClockSource) -> &mut Self {
        self.clock_source = clock_source;
        self
    }

    /// Sets the mode entered at the end of initialization
    pub fn fusion_mode(&mut self, mode: OperatingMode) -> &mut Self {
        self.fusion_mode = mode;
        self
    }
}

impl Default for Bno055Config {
    fn default() -> Self {
        Bno055Config::new()
    }
}
