// MAX7219 / MAX72S19 register definitions

// No-op register, used for daisy-chain passthrough
pub const REG_NOOP: u8 = 0x00;

// Digit data registers. Each digit register drives one digit (decode mode)
// or one row of eight segments/LEDs (raw mode).
pub const REG_DIGIT0: u8 = 0x01;
pub const REG_DIGIT7: u8 = 0x08;

// Control registers
pub const REG_DECODE_MODE: u8 = 0x09; // Per-digit BCD decode enable mask
pub const REG_INTENSITY: u8 = 0x0A; // Brightness, lower nibble 0x0..0xF
pub const REG_SCAN_LIMIT: u8 = 0x0B; // Highest digit scanned, 0..7
pub const REG_SHUTDOWN: u8 = 0x0C; // 0 = shutdown, 1 = normal operation
pub const REG_DISPLAY_TEST: u8 = 0x0F; // 1 = all segments on
