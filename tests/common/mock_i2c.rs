//! Recording I2C bus and delay for exercising the driver without hardware

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use std::cell::RefCell;
use std::rc::Rc;

/// Operations observed on the bus, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Plain write: register address followed by data
    Write {
        /// 7-bit device address
        address: u8,
        /// Bytes sent
        bytes: Vec<u8>,
    },
    /// Register address write followed by a read
    WriteRead {
        /// 7-bit device address
        address: u8,
        /// Register the read started at
        register: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Blocking delay requested by the driver
    Delay(u16),
}

/// Bus failure injected by a test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockError {
    /// Device did not acknowledge
    Nack,
}

#[derive(Debug)]
struct MockState {
    registers: [u8; 256],
    operations: Vec<Operation>,
    fail_next_read: bool,
    fail_next_write: bool,
}

/// Simulated register file with an auto-incrementing register pointer
///
/// Clones share state, so a test can keep a handle after moving one into
/// the driver.
#[derive(Debug, Clone)]
pub struct MockI2c {
    state: Rc<RefCell<MockState>>,
}

impl MockI2c {
    pub fn new() -> Self {
        MockI2c { state: Rc::new(RefCell::new(MockState { registers: [0; 256],
                                                          operations: Vec::new(),
                                                          fail_next_read: false,
                                                          fail_next_write: false })) }
    }

    pub fn set_register(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers[register as usize] = value;
    }

    pub fn set_registers(&self, start: u8, values: &[u8]) {
        for (i, v) in values.iter().enumerate() {
            self.set_register(start.wrapping_add(i as u8), *v);
        }
    }

    pub fn register(&self, register: u8) -> u8 {
        self.state.borrow().registers[register as usize]
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Only the bus operations, delays filtered out
    pub fn bus_operations(&self) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(|op| match op {
                Operation::Delay(_) => false,
                _ => true,
            })
            .collect()
    }

    /// `(register, value)` of every single-register write
    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Write { bytes, .. } if bytes.len() == 2 => Some((bytes[0], bytes[1])),
                _ => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u16> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Delay(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Delay recording into this bus's operation log
    pub fn delay(&self) -> FakeDelay {
        FakeDelay { state: self.state.clone() }
    }
}

impl Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Nack);
        }
        state.operations.push(Operation::Write { address,
                                                 bytes: bytes.to_vec() });
        if let Some((register, data)) = bytes.split_first() {
            for (i, v) in data.iter().enumerate() {
                state.registers[register.wrapping_add(i as u8) as usize] = *v;
            }
        }
        Ok(())
    }
}

impl WriteRead for MockI2c {
    type Error = MockError;

    fn write_read(&mut self,
                  address: u8,
                  bytes: &[u8],
                  buffer: &mut [u8])
                  -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Nack);
        }
        assert_eq!(bytes.len(), 1, "read must send exactly one register address");
        let register = bytes[0];
        state.operations.push(Operation::WriteRead { address,
                                                     register,
                                                     len: buffer.len() });
        for (i, b) in buffer.iter_mut().enumerate() {
            *b = state.registers[register.wrapping_add(i as u8) as usize];
        }
        Ok(())
    }
}

/// Fake clock: records requested delays, never sleeps
#[derive(Debug, Clone)]
pub struct FakeDelay {
    state: Rc<RefCell<MockState>>,
}

impl DelayMs<u16> for FakeDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.state.borrow_mut().operations.push(Operation::Delay(ms));
    }
}
