// RoboClaw packet-serial protocol implementation
//
// Packet format (host -> controller): [Address, Command, Data..., CRC16]
// Write commands are acknowledged with a single 0xFF byte; read commands
// reply with their payload followed by a CRC16 covering the sent bytes and
// the payload. CRC is CRC16/XMODEM (poly 0x1021, init 0), big-endian on
// the wire.

use serialport::{self, SerialPort};
use std::io::{Read, Write};
use std::time::Duration;
use tracing::debug;

/// Default serial configuration for the RoboClaw
pub const DEFAULT_BAUDRATE: u32 = 38_400;
pub const DEFAULT_TIMEOUT_MS: u64 = 10;

/// Write commands are acknowledged with this byte
const ACK: u8 = 0xFF;

/// Maximum PWM duty value (7-bit resolution)
pub const PWM_MAX: u8 = 127;

/// Command set (subset used by the haptic driver)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    M1Forward = 0,
    M1Backward = 1,
    M2Forward = 4,
    M2Backward = 5,
    ReadEncM1 = 16,
    ReadEncM2 = 17,
    ResetEncoders = 20,
    SetEncM1 = 22,
    SetEncM2 = 23,
}

/// Error types for RoboClaw communication
#[derive(Debug, thiserror::Error)]
pub enum RoboclawError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CRC mismatch in reply to command {command:?}")]
    CrcMismatch { command: Command },

    #[error("Controller did not acknowledge command {command:?} (got 0x{byte:02X})")]
    Nack { command: Command, byte: u8 },

    #[error("Timeout waiting for reply to command {command:?}")]
    Timeout { command: Command },
}

pub type Result<T> = std::result::Result<T, RoboclawError>;

/// One encoder register read: raw count plus the controller's status byte
/// (underflow/direction/overflow flags).
#[derive(Debug, Clone, Copy)]
pub struct EncoderCount {
    pub count: i32,
    pub status: u8,
}

/// RoboClaw bus - handles packet-serial communication with the controller
pub struct RoboclawBus {
    port: Box<dyn SerialPort>,
    address: u8,
}

impl RoboclawBus {
    /// Open a new connection to the controller
    pub fn open(port_name: &str, address: u8) -> Result<Self> {
        Self::open_with_baudrate(port_name, address, DEFAULT_BAUDRATE)
    }

    /// Open with custom baudrate
    pub fn open_with_baudrate(port_name: &str, address: u8, baudrate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baudrate)
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .open()?;

        Ok(Self { port, address })
    }

    /// Build a write packet: address, command, data, CRC16 over all of it
    fn build_packet(address: u8, command: Command, data: &[u8]) -> Vec<u8> {
        let mut packet = Vec::with_capacity(4 + data.len());
        packet.push(address);
        packet.push(command as u8);
        packet.extend_from_slice(data);

        let crc = crc16(&packet);
        packet.extend_from_slice(&crc.to_be_bytes());

        packet
    }

    /// Send a write command and wait for the 0xFF acknowledge byte
    fn write_command(&mut self, command: Command, data: &[u8]) -> Result<()> {
        let packet = Self::build_packet(self.address, command, data);
        self.port.write_all(&packet)?;
        self.port.flush()?;

        let mut ack = [0u8; 1];
        self.port.read_exact(&mut ack).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                RoboclawError::Timeout { command }
            } else {
                RoboclawError::Io(e)
            }
        })?;

        if ack[0] != ACK {
            return Err(RoboclawError::Nack {
                command,
                byte: ack[0],
            });
        }
        Ok(())
    }

    /// Send a read command and return its fixed-size payload.
    ///
    /// Read commands carry no CRC of their own; the reply CRC covers the
    /// two sent bytes plus the payload.
    fn read_command<const N: usize>(&mut self, command: Command) -> Result<[u8; N]> {
        let request = [self.address, command as u8];
        self.port.write_all(&request)?;
        self.port.flush()?;

        let mut payload = [0u8; N];
        self.port.read_exact(&mut payload).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                RoboclawError::Timeout { command }
            } else {
                RoboclawError::Io(e)
            }
        })?;

        let mut crc_bytes = [0u8; 2];
        self.port.read_exact(&mut crc_bytes)?;
        let received_crc = u16::from_be_bytes(crc_bytes);

        let mut crc_data = Vec::with_capacity(2 + N);
        crc_data.extend_from_slice(&request);
        crc_data.extend_from_slice(&payload);

        if crc16(&crc_data) != received_crc {
            return Err(RoboclawError::CrcMismatch { command });
        }

        Ok(payload)
    }

    /// Drive one motor channel at the given duty.
    ///
    /// `command` must be one of the four directional drive commands; the
    /// duty is capped at the controller's 7-bit resolution.
    pub fn drive(&mut self, command: Command, duty: u8) -> Result<()> {
        let duty = duty.min(PWM_MAX);
        debug!("Drive {:?} duty={}", command, duty);
        self.write_command(command, &[duty])
    }

    /// Read one encoder register (ReadEncM1 or ReadEncM2)
    pub fn read_encoder(&mut self, command: Command) -> Result<EncoderCount> {
        let payload: [u8; 5] = self.read_command(command)?;
        let count = i32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        Ok(EncoderCount {
            count,
            status: payload[4],
        })
    }

    /// Set one encoder register to a fixed count (SetEncM1 or SetEncM2)
    pub fn set_encoder(&mut self, command: Command, count: i32) -> Result<()> {
        debug!("Set encoder {:?} to {}", command, count);
        self.write_command(command, &count.to_be_bytes())
    }

    /// Zero both encoder counters in one command
    pub fn reset_encoders(&mut self) -> Result<()> {
        debug!("Resetting both encoder counters");
        self.write_command(Command::ResetEncoders, &[])
    }
}

/// CRC16/XMODEM over the given bytes (poly 0x1021, init 0)
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
