/// Default 7-bit I2C address (COM3 pin low)
pub const ADDRESS: u8 = 0x28;

/// Alternative 7-bit I2C address (COM3 pin high)
pub const ALTERNATE_ADDRESS: u8 = 0x29;

/// Expected content of the `CHIP_ID` register
pub const CHIP_ID: u8 = 0xA0;

/// Bus clock the device is operated at
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Register {
    CHIP_ID = 0x00,
    EUL_HEADING_LSB = 0x1A,
    EUL_HEADING_MSB = 0x1B,
    EUL_ROLL_LSB = 0x1C,
    EUL_ROLL_MSB = 0x1D,
    EUL_PITCH_LSB = 0x1E,
    EUL_PITCH_MSB = 0x1F,
    TEMP = 0x34,
    CALIB_STAT = 0x35,
    SYS_STATUS = 0x39,
    SYS_ERR = 0x3A,
    OPR_MODE = 0x3D,
    SYS_TRIGGER = 0x3F,
    AXIS_MAP_CONFIG = 0x41,
}

impl Register {
    pub fn addr(&self) -> u8 {
        *self as u8
    }
}
